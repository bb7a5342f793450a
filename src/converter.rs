use crate::{
    config::ConverterOptions,
    document::SvgDocument,
    err::{format_error_chain, ConvertError},
    output, raster,
    source::{self, SvgSource},
};
use log::{debug, info};
use resvg::usvg::fontdb::Database;
use std::{path::Path, sync::Arc};

/// Converts SVGs to PNG files and returns each file as a base64 data URL.
///
/// Holds the HTTP client and font database so they are set up once and shared
/// across conversions. Cloning is cheap.
#[derive(Clone)]
pub struct Converter {
    client: reqwest::Client,
    font_db: Arc<Database>,
}

impl Converter {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_options(ConverterOptions::default())
    }

    pub fn with_options(options: ConverterOptions) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(options.user_agent())
            .build()?;

        let font_db = Arc::new({
            let mut db = Database::new();
            if options.load_system_fonts {
                db.load_system_fonts();
            }
            for dir in &options.font_dirs {
                db.load_fonts_dir(dir);
            }
            db
        });

        debug!("Loaded {} font faces", font_db.len());

        Ok(Self { client, font_db })
    }

    pub async fn convert_from_url(
        &self,
        url: &str,
        output_path: impl AsRef<Path>,
    ) -> Result<String, ConvertError> {
        self.convert(SvgSource::Url(url.to_string()), output_path)
            .await
    }

    pub async fn convert_from_content(
        &self,
        svg: &str,
        output_path: impl AsRef<Path>,
    ) -> Result<String, ConvertError> {
        self.convert(SvgSource::Content(svg.to_string()), output_path)
            .await
    }

    pub async fn convert_from_local_file(
        &self,
        input_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<String, ConvertError> {
        self.convert(
            SvgSource::File(input_path.as_ref().to_path_buf()),
            output_path,
        )
        .await
    }

    pub async fn convert(
        &self,
        source: SvgSource,
        output_path: impl AsRef<Path>,
    ) -> Result<String, ConvertError> {
        let output_path = output_path.as_ref();

        let result = self.run(&source, output_path).await;
        match &result {
            Ok(_) => info!("Converted SVG to {}", output_path.display()),
            Err(e) => debug!("Conversion failed: {}", format_error_chain(e)),
        }

        result
    }

    /// Runs the conversion and hands the outcome to `callback`, which is called
    /// exactly once.
    pub async fn convert_with<F>(
        &self,
        source: SvgSource,
        output_path: impl AsRef<Path>,
        callback: F,
    ) where
        F: FnOnce(Result<String, ConvertError>),
    {
        callback(self.convert(source, output_path).await)
    }

    async fn run(&self, source: &SvgSource, output_path: &Path) -> Result<String, ConvertError> {
        let text = source::resolve(&self.client, source).await?;
        let document = SvgDocument::parse(&text)?;

        let resources_dir = source.resources_dir().await;
        let png = raster::rasterize(&text, &document, self.font_db.clone(), resources_dir)?;

        let written = output::persist(&png, output_path).await?;

        Ok(output::encode_data_url(&written))
    }
}
