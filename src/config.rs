use serde::Deserialize;
use std::path::PathBuf;

/// Options for building a [`Converter`](crate::Converter).
///
/// Deserializable so it can live inside a host application's own config file;
/// this crate never reads one itself.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConverterOptions {
    /// Load system fonts so `<text>` elements render.
    pub load_system_fonts: bool,
    /// Extra directories to load fonts from.
    pub font_dirs: Vec<PathBuf>,
    /// `User-Agent` sent when fetching SVGs over HTTP.
    pub user_agent: Option<String>,
}

pub static DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
            user_agent: None,
        }
    }
}

impl ConverterOptions {
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}
