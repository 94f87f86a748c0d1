//! Block renderers, one per block-level element.
//!
//! Every renderer lays its node out on the surface and recurses into its
//! children through the registry of its own element. Sections and
//! subsections share one renderer parametrized by [`SectionLevel`].

mod book;
mod chapter;
mod figure;
mod listing;
mod note;
mod para;
mod section;

use crate::dispatch::{Registry, Renderer};
use crate::error::PipelineError;
use crate::pipeline::RenderContext;
use folio_dom::Node;
use folio_layout::{StyledFragment, TextAlign};

pub use section::{LevelConfig, SectionLevel};

pub const CHAPTER_TITLE_SIZE: f32 = 28.0;
pub const SECTION_TITLE_SIZE: f32 = 20.0;
pub const SUBSECTION_TITLE_SIZE: f32 = 16.0;
/// Indentation applied by both sections and subsections.
pub const SECTION_INDENT: f32 = 10.0;
pub const NOTE_INDENT: f32 = 10.0;
pub const LISTING_INDENT: f32 = 10.0;

pub const CHAPTER_TITLE_SPACING: f32 = 18.0;
pub const TITLE_SPACING: f32 = 6.0;
pub const PARA_SPACING: f32 = 6.0;
pub const SECTION_SPACING: f32 = 10.0;

pub const NOTE_LABEL: &str = "NOTE";
pub const FIGURE_LABEL: &str = "Figure:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Book,
    BookTitle,
    Chapter,
    ChapterTitle,
    Section(SectionLevel),
    SectionTitle(SectionLevel),
    Note,
    Figure,
    SimplePara,
    Para,
    ProgramListing,
    Screen,
}

impl Renderer for BlockKind {
    type Output = ();

    fn render(self, node: &Node, ctx: &mut RenderContext) -> Result<(), PipelineError> {
        log::debug!("Rendering <{}> as {:?} on page {}", node.name(), self, ctx.surface.page_no());
        match self {
            BlockKind::Book => book::render_book(node, ctx),
            BlockKind::BookTitle => book::render_book_title(node, ctx),
            BlockKind::Chapter => chapter::render_chapter(node, ctx),
            BlockKind::ChapterTitle => chapter::render_chapter_title(node, ctx),
            BlockKind::Section(level) => section::render_section(node, level, ctx),
            BlockKind::SectionTitle(level) => section::render_section_title(node, level, ctx),
            BlockKind::Note => note::render_note(node, ctx),
            BlockKind::Figure => figure::render_figure(node, ctx),
            BlockKind::SimplePara | BlockKind::Para => para::render_para(node, ctx),
            BlockKind::ProgramListing | BlockKind::Screen => listing::render_listing(node, ctx),
        }
    }
}

/// Accepted at the root of the tree.
pub static DOCUMENT: Registry<BlockKind> = Registry::new("document", &[("book", BlockKind::Book)]);

pub static BOOK: Registry<BlockKind> = Registry::new(
    "book",
    &[
        ("title", BlockKind::BookTitle),
        ("chapter", BlockKind::Chapter),
        ("section", BlockKind::Section(SectionLevel::Section)),
    ],
);

pub static CHAPTER: Registry<BlockKind> = Registry::new(
    "chapter",
    &[
        ("title", BlockKind::ChapterTitle),
        ("section", BlockKind::Section(SectionLevel::Section)),
        ("simpara", BlockKind::SimplePara),
        ("para", BlockKind::Para),
    ],
);

pub static SECTION: Registry<BlockKind> = Registry::new(
    "section",
    &[
        ("simpara", BlockKind::SimplePara),
        ("para", BlockKind::Para),
        ("programlisting", BlockKind::ProgramListing),
        ("screen", BlockKind::Screen),
        ("title", BlockKind::SectionTitle(SectionLevel::Section)),
        ("note", BlockKind::Note),
        ("section", BlockKind::Section(SectionLevel::Subsection)),
        ("figure", BlockKind::Figure),
    ],
);

pub static SUBSECTION: Registry<BlockKind> = Registry::new(
    "subsection",
    &[
        ("simpara", BlockKind::SimplePara),
        ("para", BlockKind::Para),
        ("programlisting", BlockKind::ProgramListing),
        ("screen", BlockKind::Screen),
        ("title", BlockKind::SectionTitle(SectionLevel::Subsection)),
        ("note", BlockKind::Note),
        ("section", BlockKind::Section(SectionLevel::Subsection)),
        ("figure", BlockKind::Figure),
    ],
);

pub static NOTE: Registry<BlockKind> = Registry::new(
    "note",
    &[("simpara", BlockKind::SimplePara), ("para", BlockKind::Para)],
);

/// Title text with whitespace normalized. Empty titles are malformed.
fn title_text(node: &Node, element: &'static str) -> Result<String, PipelineError> {
    let text = crate::inline::collapse_whitespace(&node.text_content())
        .trim()
        .to_string();
    if text.is_empty() {
        return Err(crate::error::StructureError::EmptyTitle { element }.into());
    }
    Ok(text)
}

/// Paints a title and returns the page and cursor position where it starts.
fn write_title(
    ctx: &mut RenderContext,
    fragment: StyledFragment,
    align: TextAlign,
) -> Result<(usize, f32), PipelineError> {
    let (page_before, y_before) = (ctx.surface.page_no(), ctx.surface.y());
    ctx.surface.write(&[fragment], align)?;
    let page = ctx.surface.page_no();
    let y = if page == page_before {
        y_before
    } else {
        ctx.surface.setup().margins.top
    };
    Ok((page, y))
}
