use crate::err::ConvertError;
use log::debug;
use std::path::{Path, PathBuf};
use tokio::fs::{canonicalize, read_to_string};

/// Where the SVG text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvgSource {
    Url(String),
    Content(String),
    File(PathBuf),
}

impl SvgSource {
    /// Directory that relative references inside the SVG resolve against.
    pub async fn resources_dir(&self) -> Option<PathBuf> {
        match self {
            SvgSource::File(path) => canonicalize(path)
                .await
                .ok()
                .and_then(|p| p.parent().map(Path::to_path_buf)),
            _ => None,
        }
    }

    fn origin(&self) -> &str {
        match self {
            SvgSource::Url(url) => url,
            SvgSource::Content(_) => "<content>",
            SvgSource::File(path) => path.to_str().unwrap_or("<file>"),
        }
    }
}

pub async fn resolve(
    client: &reqwest::Client,
    source: &SvgSource,
) -> Result<String, ConvertError> {
    let text = match source {
        SvgSource::Url(url) => fetch(client, url).await?,
        SvgSource::Content(content) => content.clone(),
        SvgSource::File(path) => read_to_string(path).await?,
    };

    debug!("Resolved {} bytes of SVG from {}", text.len(), source.origin());

    Ok(text)
}

async fn fetch(client: &reqwest::Client, url: &str) -> reqwest::Result<String> {
    client.get(url).send().await?.error_for_status()?.text().await
}
