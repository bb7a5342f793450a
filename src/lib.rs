//! Turn SVG from a URL, a string, or a local file into a PNG file, and get the
//! file back as a `data:image/png;base64,...` URL.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = svg2png::Converter::new()?;
//! let data_url = converter
//!     .convert_from_content(
//!         r#"<svg width="10" height="10"><rect width="10" height="10" fill="red"/></svg>"#,
//!         "out.png",
//!     )
//!     .await?;
//! assert!(data_url.starts_with(svg2png::DATA_URL_PREFIX));
//! # Ok(())
//! # }
//! ```

mod config;
mod converter;
pub mod document;
mod err;
pub mod output;
pub mod raster;
pub mod source;

pub use config::ConverterOptions;
pub use converter::Converter;
pub use err::{format_error_chain, ConvertError, ErrorKind};
pub use output::DATA_URL_PREFIX;
pub use source::SvgSource;
