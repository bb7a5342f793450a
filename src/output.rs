use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use std::{io, path::Path};
use tokio::fs;

pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Writes `png` to `path` and reads the file back from disk.
///
/// The parent directory must already exist. The file is left in place if the
/// read back fails.
pub async fn persist(png: &[u8], path: &Path) -> io::Result<Vec<u8>> {
    fs::write(path, png).await?;
    debug!("Wrote {} bytes to {}", png.len(), path.display());

    fs::read(path).await
}

pub fn encode_data_url(png: &[u8]) -> String {
    format!("{DATA_URL_PREFIX}{}", STANDARD.encode(png))
}
