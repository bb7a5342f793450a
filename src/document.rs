use log::debug;
use thiserror::Error;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),

    #[error("root element is <{0}>, expected <svg>")]
    NotSvg(String),
}

/// The parts of a parsed SVG the rasterizer cares about.
///
/// `width` and `height` are the root attributes exactly as written; no units are
/// stripped and nothing is filled in when they are missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    pub width: Option<String>,
    pub height: Option<String>,
    /// Byte offset just past the root tag name when the root has no namespace.
    missing_namespace_at: Option<usize>,
}

impl SvgDocument {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let xml = roxmltree::Document::parse_with_options(text, opt)?;
        let root = xml.root_element();

        let name = root.tag_name();
        if name.name() != "svg" {
            return Err(ParseError::NotSvg(name.name().to_string()));
        }

        let start = root.range().start;
        let missing_namespace_at = match name.namespace() {
            None if !declares_default_namespace(&text[start..]) => Some(start + "<svg".len()),
            _ => None,
        };

        let document = Self {
            width: root.attribute("width").map(str::to_string),
            height: root.attribute("height").map(str::to_string),
            missing_namespace_at,
        };

        debug!(
            "Parsed SVG with width {:?} and height {:?}",
            document.width, document.height
        );

        Ok(document)
    }

    /// Returns `text` with the SVG namespace declared on the root, if it wasn't.
    pub fn with_namespace<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        match self.missing_namespace_at {
            Some(at) => {
                let mut patched = String::with_capacity(text.len() + SVG_NAMESPACE.len() + 9);
                patched.push_str(&text[..at]);
                patched.push_str(&format!(" xmlns=\"{SVG_NAMESPACE}\""));
                patched.push_str(&text[at..]);
                patched.into()
            }
            None => text.into(),
        }
    }
}

/// Whether the start tag at the beginning of `tag` has an `xmlns` attribute,
/// including an empty one.
fn declares_default_namespace(tag: &str) -> bool {
    let mut quote = None;
    let mut after_space = false;

    for (i, c) in tag.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return false,
            None if after_space && tag[i..].starts_with("xmlns") => {
                if tag[i + "xmlns".len()..].trim_start().starts_with('=') {
                    return true;
                }
            }
            None => {}
        }
        after_space = quote.is_none() && c.is_whitespace();
    }

    false
}
