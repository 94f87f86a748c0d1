//! Configuration surface and text style primitives shared by the layout and
//! rendering crates.

pub mod config;
pub mod font;
mod error;

pub use config::{FontVariants, Margins, MonospaceFace, PageSetup, PageSize, RenderConfig, TextDefaults};
pub use error::ConfigError;
pub use font::{FontVariant, TextAlign, TextStyle};
