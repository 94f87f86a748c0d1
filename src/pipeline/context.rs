use crate::decorate::RunningFooter;
use crate::dispatch::Diagnostic;
use crate::error::PipelineError;
use crate::ledger::RenderState;
use folio_layout::{FontBook, Surface};
use folio_style::{MonospaceFace, RenderConfig};
use std::path::PathBuf;

/// Everything a renderer may read or change while the tree is walked.
///
/// Renderers append to `state` and `diagnostics` only. The decorator is
/// installed by the book renderer and run after the walk.
pub struct RenderContext {
    pub surface: Surface,
    pub state: RenderState,
    pub diagnostics: Vec<Diagnostic>,
    pub monospace: MonospaceFace,
    /// Directory that relative image references resolve against.
    pub base_dir: PathBuf,
    pub decorator: Option<RunningFooter>,
    /// Document title taken from the book.
    pub title: Option<String>,
}

impl RenderContext {
    pub fn new(config: &RenderConfig, fonts: FontBook, base_dir: PathBuf) -> Result<Self, PipelineError> {
        let surface = Surface::new(fonts, config.page.clone(), &config.defaults)?;
        Ok(Self {
            surface,
            state: RenderState::new(),
            diagnostics: Vec::new(),
            monospace: config.monospace.clone(),
            base_dir,
            decorator: None,
            title: None,
        })
    }

    pub fn report_unhandled(&mut self, element: &str, context: &'static str) {
        log::warn!("No renderer for <{}> in {}, skipping it", element, context);
        self.diagnostics.push(Diagnostic {
            element: element.to_string(),
            context,
        });
    }
}

#[cfg(test)]
pub(crate) fn test_context() -> RenderContext {
    RenderContext::new(&RenderConfig::default(), FontBook::new(), PathBuf::new())
        .expect("default configuration is valid")
}
