use super::context::RenderContext;
use crate::blocks::DOCUMENT;
use crate::dispatch::{Diagnostic, dispatch};
use crate::error::PipelineError;
use crate::ledger::RenderState;
use chrono::Utc;
use folio_dom::Node;
use folio_layout::{FontBook, Page};
use folio_render_lopdf::{DocumentInfo, OutlineEntry, PdfWriter};
use folio_style::RenderConfig;
use itertools::Itertools;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Renders document trees with one configuration and font set.
#[derive(Debug)]
pub struct DocumentRenderer {
    config: RenderConfig,
    fonts: FontBook,
    base_dir: Option<PathBuf>,
}

/// The result of one render run: laid-out and decorated pages plus the ledger.
#[derive(Debug)]
pub struct Rendered {
    pub pages: Vec<Page>,
    pub fonts: FontBook,
    pub state: RenderState,
    pub diagnostics: Vec<Diagnostic>,
    pub title: Option<String>,
}

impl DocumentRenderer {
    pub(super) fn new(config: RenderConfig, fonts: FontBook, base_dir: Option<PathBuf>) -> Self {
        Self {
            config,
            fonts,
            base_dir,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Lays out `root` and decorates every resulting page.
    pub fn render(&self, root: &Node) -> Result<Rendered, PipelineError> {
        self.render_in(root, self.base_dir.clone().unwrap_or_default())
    }

    /// Parses XML text and renders it.
    pub fn render_xml(&self, xml: &str) -> Result<Rendered, PipelineError> {
        let root = folio_dom::parse_document(xml)?;
        self.render(&root)
    }

    /// Renders `root` and writes the PDF to `writer`.
    pub fn render_to_writer<W: Write>(&self, root: &Node, writer: &mut W) -> Result<Rendered, PipelineError> {
        let rendered = self.render(root)?;
        rendered.write_pdf(writer)?;
        Ok(rendered)
    }

    /// Renders an XML file to a PDF file and returns the diagnostics.
    ///
    /// Image references resolve against the input's directory unless a base
    /// directory was configured.
    pub fn render_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<Vec<Diagnostic>, PipelineError> {
        let input = input.as_ref();
        let output = output.as_ref();
        log::info!("Reading {}", input.display());
        let root = folio_dom::parse_file(input)?;

        let base_dir = self
            .base_dir
            .clone()
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        let rendered = self.render_in(&root, base_dir)?;

        let mut writer = BufWriter::new(File::create(output)?);
        rendered.write_pdf(&mut writer)?;
        writer.flush()?;
        log::info!("Wrote {} pages to {}", rendered.page_count(), output.display());
        Ok(rendered.diagnostics)
    }

    fn render_in(&self, root: &Node, base_dir: PathBuf) -> Result<Rendered, PipelineError> {
        let mut ctx = RenderContext::new(&self.config, self.fonts.clone(), base_dir)?;
        dispatch(root, &DOCUMENT, &mut ctx)?;

        if ctx.surface.page_count() == 0 {
            log::warn!("Document produced no content, emitting a blank page");
            ctx.surface.add_page();
        }

        if let Some(footer) = ctx.decorator.take() {
            let state = &ctx.state;
            ctx.surface
                .decorate(|page, canvas| footer.decorate(page, state, canvas))?;
        }

        let (pages, fonts) = ctx.surface.into_parts();
        log::info!(
            "Rendered {} pages, {} chapters, {} sections, {} diagnostics",
            pages.len(),
            ctx.state.chapters().len(),
            ctx.state.sections().len(),
            ctx.diagnostics.len()
        );
        Ok(Rendered {
            pages,
            fonts,
            state: ctx.state,
            diagnostics: ctx.diagnostics,
            title: self.config.title.clone().or(ctx.title),
        })
    }
}

impl Rendered {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Bookmarks for every chapter and section, in document order. Sections
    /// nest under the chapter preceding them.
    pub fn outline(&self) -> Vec<OutlineEntry> {
        let chapters = self.state.chapters().iter().map(|c| OutlineEntry {
            title: c.title.clone(),
            level: 1,
            page: c.page,
            y: c.y,
        });
        let sections = self.state.sections().iter().map(|s| OutlineEntry {
            title: s.title.clone(),
            level: 2,
            page: s.page,
            y: s.y,
        });
        chapters
            .merge_by(sections, |a, b| (a.page, a.y) <= (b.page, b.y))
            .collect()
    }

    pub fn write_pdf<W: Write>(&self, writer: &mut W) -> Result<(), PipelineError> {
        let info = DocumentInfo {
            title: self.title.clone(),
            created: Some(Utc::now()),
            ..DocumentInfo::default()
        };
        PdfWriter::new(&self.fonts)
            .with_info(info)
            .with_outline(self.outline())
            .write(&self.pages, writer)?;
        Ok(())
    }

    pub fn to_pdf_bytes(&self) -> Result<Vec<u8>, PipelineError> {
        let mut bytes = Vec::new();
        self.write_pdf(&mut bytes)?;
        Ok(bytes)
    }
}
