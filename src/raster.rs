use crate::document::SvgDocument;
use log::{debug, warn};
use resvg::{
    tiny_skia::{Pixmap, Transform},
    usvg::{self, fontdb::Database, Options, Tree},
};
use std::{path::PathBuf, sync::Arc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error(transparent)]
    Render(#[from] usvg::Error),

    #[error("cannot rasterize at {width}x{height}")]
    InvalidSize { width: f32, height: f32 },

    #[error("failed to encode PNG")]
    Encode(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Renders `text` to PNG bytes at the size declared by `document`, falling back
/// to the intrinsic size for whatever isn't declared.
pub fn rasterize(
    text: &str,
    document: &SvgDocument,
    fontdb: Arc<Database>,
    resources_dir: Option<PathBuf>,
) -> Result<Vec<u8>, RasterError> {
    let width = requested_length("width", document.width.as_deref());
    let height = requested_length("height", document.height.as_deref());
    if width.is_some_and(|w| w <= 0.0) || height.is_some_and(|h| h <= 0.0) {
        return Err(RasterError::InvalidSize {
            width: width.unwrap_or_default(),
            height: height.unwrap_or_default(),
        });
    }

    let opt = Options {
        fontdb,
        resources_dir,
        ..Default::default()
    };

    let rtree = Tree::from_str(&document.with_namespace(text), &opt)?;
    let natural = rtree.size();
    let (width, height) = target_size(width, height, natural.width(), natural.height());

    let mut pixmap = Pixmap::new(width.ceil() as u32, height.ceil() as u32)
        .ok_or(RasterError::InvalidSize { width, height })?;

    let transform = Transform::from_scale(width / natural.width(), height / natural.height());
    resvg::render(&rtree, transform, &mut pixmap.as_mut());

    debug!("Rasterized SVG to {}x{}", pixmap.width(), pixmap.height());

    pixmap
        .encode_png()
        .map_err(|e| RasterError::Encode(e.into()))
}

fn requested_length(name: &str, value: Option<&str>) -> Option<f32> {
    let value = value?;
    let length = parse_length(value);
    if length.is_none() {
        warn!("Can't interpret {name}=\"{value}\", using the intrinsic size");
    }

    length
}

/// Converts an absolute SVG length to CSS pixels at 96 DPI.
pub fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    let split = value
        .find(|c: char| c.is_ascii_alphabetic() || c == '%')
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);

    let number: f32 = number.trim_end().parse().ok()?;
    if !number.is_finite() {
        return None;
    }

    let scale = match unit {
        "" | "px" => 1.0,
        "in" => 96.0,
        "cm" => 96.0 / 2.54,
        "mm" => 96.0 / 25.4,
        "pt" => 4.0 / 3.0,
        "pc" => 16.0,
        _ => return None,
    };

    Some(number * scale)
}

fn target_size(
    width: Option<f32>,
    height: Option<f32>,
    natural_width: f32,
    natural_height: f32,
) -> (f32, f32) {
    match (width, height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, natural_height * w / natural_width),
        (None, Some(h)) => (natural_width * h / natural_height, h),
        (None, None) => (natural_width, natural_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rasterize_str(text: &str) -> Result<Vec<u8>, RasterError> {
        let document = SvgDocument::parse(text).unwrap();
        rasterize(text, &document, Arc::new(Database::new()), None)
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("10"), Some(10.0));
        assert_eq!(parse_length(" 12.5px "), Some(12.5));
        assert_eq!(parse_length("1in"), Some(96.0));
        assert_eq!(parse_length("3pt"), Some(4.0));
        assert_eq!(parse_length("2pc"), Some(32.0));
        assert_eq!(parse_length("-4"), Some(-4.0));
    }

    #[test]
    fn test_parse_length_rejects_relative_units() {
        assert_eq!(parse_length("100%"), None);
        assert_eq!(parse_length("2em"), None);
        assert_eq!(parse_length("wide"), None);
        assert_eq!(parse_length(""), None);
    }

    #[test]
    fn test_target_size() {
        assert_eq!(target_size(Some(8.0), Some(4.0), 2.0, 2.0), (8.0, 4.0));
        assert_eq!(target_size(Some(20.0), None, 10.0, 5.0), (20.0, 10.0));
        assert_eq!(target_size(None, Some(20.0), 10.0, 5.0), (40.0, 20.0));
        assert_eq!(target_size(None, None, 10.0, 5.0), (10.0, 5.0));
    }

    #[test]
    fn test_renders_png() {
        let png = rasterize_str(r#"<svg width="3" height="2"><rect width="3" height="2"/></svg>"#)
            .unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let err = rasterize_str(r#"<svg width="0" height="5" viewBox="0 0 5 5"/>"#).unwrap_err();
        assert!(matches!(
            err,
            RasterError::InvalidSize { width, height } if width == 0.0 && height == 5.0
        ));
    }

    #[test]
    fn test_negative_size_is_rejected() {
        let err = rasterize_str(r#"<svg height="-4mm" viewBox="0 0 5 5"/>"#).unwrap_err();
        assert!(matches!(err, RasterError::InvalidSize { height, .. } if height < 0.0));
    }

    #[test]
    fn test_foreign_root_namespace_is_render_error() {
        let err = rasterize_str(r#"<svg xmlns="urn:not-svg" width="5" height="5"/>"#).unwrap_err();
        assert!(matches!(err, RasterError::Render(_)));
    }
}
