//! The render configuration: font families, default text settings and page geometry.
//!
//! All lengths are in PDF points. Every field has a default, so an empty JSON
//! object is a valid configuration.

use crate::error::ConfigError;
use crate::font::FontVariant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RenderConfig {
    /// TrueType families by name. The standard PDF families are always available.
    pub fonts: BTreeMap<String, FontVariants>,
    pub defaults: TextDefaults,
    pub monospace: MonospaceFace,
    pub page: PageSetup,
    /// Document title for the PDF metadata; overrides the book's own title.
    pub title: Option<String>,
}

/// Font files for one family. Only the regular face is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FontVariants {
    pub regular: PathBuf,
    #[serde(default)]
    pub bold: Option<PathBuf>,
    #[serde(default)]
    pub italic: Option<PathBuf>,
    #[serde(default)]
    pub bold_italic: Option<PathBuf>,
}

impl FontVariants {
    pub fn path(&self, variant: FontVariant) -> Option<&Path> {
        match variant {
            FontVariant::Regular => Some(self.regular.as_path()),
            FontVariant::Bold => self.bold.as_deref(),
            FontVariant::Italic => self.italic.as_deref(),
            FontVariant::BoldItalic => self.bold_italic.as_deref(),
        }
    }

    fn paths_mut(&mut self) -> impl Iterator<Item = &mut PathBuf> {
        std::iter::once(&mut self.regular).chain(
            [&mut self.bold, &mut self.italic, &mut self.bold_italic]
                .into_iter()
                .filter_map(|p| p.as_mut()),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextDefaults {
    pub font: String,
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    pub leading: f32,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            font: "Helvetica".to_string(),
            font_size: 11.0,
            leading: 1.35,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonospaceFace {
    pub font: String,
    pub font_size: f32,
}

impl Default for MonospaceFace {
    fn default() -> Self {
        Self {
            font: "Courier".to_string(),
            font_size: 9.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PageSetup {
    pub size: PageSize,
    pub margins: Margins,
}

impl PageSetup {
    pub fn width(&self) -> f32 {
        self.size.dimensions().0
    }

    pub fn height(&self) -> f32 {
        self.size.dimensions().1
    }

    pub fn content_width(&self) -> f32 {
        self.width() - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f32 {
        self.height() - self.margins.top - self.margins.bottom
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions(&self) -> (f32, f32) {
        match *self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (width, height),
        }
    }
}

/// Page margins. Deserializes from a single number or from a map of all four sides.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(from = "MarginsDef")]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margins {
    /// 20 mm on every side.
    fn default() -> Self {
        Margins::all(56.7)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MarginsDef {
    All(f32),
    Sides {
        top: f32,
        right: f32,
        bottom: f32,
        left: f32,
    },
}

impl From<MarginsDef> for Margins {
    fn from(def: MarginsDef) -> Self {
        match def {
            MarginsDef::All(v) => Margins::all(v),
            MarginsDef::Sides {
                top,
                right,
                bottom,
                left,
            } => Margins {
                top,
                right,
                bottom,
                left,
            },
        }
    }
}

impl RenderConfig {
    /// Parses and validates a JSON configuration. Relative font paths are kept as given.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON configuration file. Relative font paths resolve against the
    /// directory containing the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading render config from {}", path.display());
        let mut config = Self::from_json(&std::fs::read_to_string(path)?)?;
        if let Some(dir) = path.parent() {
            config.resolve_font_paths(dir);
        }
        Ok(config)
    }

    pub fn resolve_font_paths(&mut self, base: &Path) {
        for variants in self.fonts.values_mut() {
            for p in variants.paths_mut() {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f32| {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    message: format!("must be a positive number, got {}", value),
                })
            }
        };
        positive("defaults.font_size", self.defaults.font_size)?;
        positive("defaults.leading", self.defaults.leading)?;
        positive("monospace.font_size", self.monospace.font_size)?;
        positive("page.content_width", self.page.content_width())?;
        positive("page.content_height", self.page.content_height())?;
        Ok(())
    }
}
