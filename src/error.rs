use folio_dom::DomError;
use folio_layout::LayoutError;
use folio_render_lopdf::RenderError;
use folio_style::ConfigError;
use thiserror::Error;

/// Malformed required structure in the input document. Always fatal.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StructureError {
    #[error("<{element}> is missing its required <{child}>")]
    MissingChild {
        element: &'static str,
        child: &'static str,
    },
    #[error("<{element}> is missing its required '{attribute}' attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("<{element}> has an empty title")]
    EmptyTitle { element: &'static str },
}

/// A comprehensive error type for the entire rendering pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read document: {0}")]
    Dom(#[from] DomError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Malformed document: {0}")]
    Structure(#[from] StructureError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
