use super::{
    BlockKind, SECTION, SECTION_INDENT, SECTION_SPACING, SECTION_TITLE_SIZE, SUBSECTION,
    SUBSECTION_TITLE_SIZE, TITLE_SPACING, title_text, write_title,
};
use crate::dispatch::{Registry, handle_children};
use crate::error::PipelineError;
use crate::pipeline::RenderContext;
use folio_dom::Node;
use folio_layout::{StyledFragment, TextAlign, TextStyle};

/// Nesting depth of a section. Anything below a section is a subsection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLevel {
    Section,
    Subsection,
}

/// Per-level layout parameters.
#[derive(Debug, Clone, Copy)]
pub struct LevelConfig {
    /// Added to the enclosing indentation.
    pub indent: f32,
    pub title_size: f32,
    pub registry: &'static Registry<BlockKind>,
}

impl SectionLevel {
    pub fn config(self) -> LevelConfig {
        match self {
            SectionLevel::Section => LevelConfig {
                indent: SECTION_INDENT,
                title_size: SECTION_TITLE_SIZE,
                registry: &SECTION,
            },
            SectionLevel::Subsection => LevelConfig {
                indent: SECTION_INDENT,
                title_size: SUBSECTION_TITLE_SIZE,
                registry: &SUBSECTION,
            },
        }
    }
}

pub(super) fn render_section(
    node: &Node,
    level: SectionLevel,
    ctx: &mut RenderContext,
) -> Result<(), PipelineError> {
    let config = level.config();
    let previous = ctx.surface.indent(config.indent);
    handle_children(node, config.registry, ctx)?;
    ctx.surface.set_left(previous);
    ctx.surface.ln(SECTION_SPACING);
    Ok(())
}

pub(super) fn render_section_title(
    node: &Node,
    level: SectionLevel,
    ctx: &mut RenderContext,
) -> Result<(), PipelineError> {
    let title = title_text(node, "section/title")?;
    let fragment = StyledFragment::plain(title.clone())
        .with_style(TextStyle::BOLD)
        .with_font(ctx.surface.font().family.clone(), level.config().title_size);

    let (page, y) = write_title(ctx, fragment, TextAlign::Left)?;
    ctx.state.record_section(page, title, y);
    ctx.surface.ln(TITLE_SPACING);
    Ok(())
}
