use super::orchestrator::DocumentRenderer;
use crate::error::PipelineError;
use folio_layout::FontBook;
use folio_style::{RenderConfig, TextStyle};
use std::path::{Path, PathBuf};

/// A builder for creating a [`DocumentRenderer`].
#[derive(Debug, Default)]
pub struct RendererBuilder {
    config: RenderConfig,
    base_dir: Option<PathBuf>,
}

impl RendererBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads a JSON configuration file. Font paths resolve against its directory.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.config = RenderConfig::from_file(path)?;
        Ok(self)
    }

    /// Directory that relative image references resolve against. Defaults to
    /// the directory of the input file, or the working directory.
    pub fn with_base_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Validates the configuration and loads every configured font.
    pub fn build(self) -> Result<DocumentRenderer, PipelineError> {
        self.config.validate()?;
        let fonts = FontBook::from_config(&self.config)?;
        for family in [&self.config.defaults.font, &self.config.monospace.font] {
            fonts.resolve(family, TextStyle::PLAIN)?;
        }
        log::info!("Loaded {} font faces", fonts.faces().len());
        Ok(DocumentRenderer::new(self.config, fonts, self.base_dir))
    }
}
