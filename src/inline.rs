//! Inline composition: turns the inline children of a paragraph-like node
//! into an ordered list of styled fragments.
//!
//! Every inline renderer yields at most one fragment and reads its text
//! directly instead of recursing.

use crate::dispatch::{Registry, Renderer, handle_children};
use crate::error::PipelineError;
use crate::pipeline::RenderContext;
use folio_dom::Node;
use folio_layout::{StyledFragment, TextStyle};

/// Text painted for every cross-reference.
pub const MISSING_XREF: &str = "(missing)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
    Text,
    Preformatted,
    Emphasis,
    Literal,
    Link,
    CrossReference,
}

pub static INLINE: Registry<InlineKind> = Registry::new(
    "inline",
    &[
        ("text", InlineKind::Text),
        ("emphasis", InlineKind::Emphasis),
        ("literal", InlineKind::Literal),
        ("code", InlineKind::Literal),
        ("ulink", InlineKind::Link),
        ("xref", InlineKind::CrossReference),
    ],
);

/// Inline registry for listings and screens: raw text keeps its spacing.
pub static PREFORMATTED: Registry<InlineKind> = Registry::new(
    "preformatted",
    &[
        ("text", InlineKind::Preformatted),
        ("emphasis", InlineKind::Emphasis),
        ("literal", InlineKind::Literal),
        ("code", InlineKind::Literal),
        ("ulink", InlineKind::Link),
        ("xref", InlineKind::CrossReference),
    ],
);

impl Renderer for InlineKind {
    type Output = Option<StyledFragment>;

    fn render(self, node: &Node, ctx: &mut RenderContext) -> Result<Self::Output, PipelineError> {
        let fragment = match self {
            InlineKind::Text => StyledFragment::plain(collapse_whitespace(&node.text_content())),
            InlineKind::Preformatted => StyledFragment::plain(preserve_spaces(&node.text_content())),
            InlineKind::Emphasis => StyledFragment::plain(collapse_whitespace(&node.text_content()))
                .with_style(TextStyle::BOLD),
            InlineKind::Literal => StyledFragment::plain(collapse_whitespace(&node.text_content()))
                .with_font(ctx.monospace.font.clone(), ctx.monospace.font_size),
            InlineKind::Link => link(node),
            InlineKind::CrossReference => StyledFragment::plain(MISSING_XREF),
        };
        Ok((!fragment.text.is_empty()).then_some(fragment))
    }
}

fn link(node: &Node) -> StyledFragment {
    let text = collapse_whitespace(&node.text_content());
    match node.attribute("url") {
        Some(url) => {
            let visible = if text.trim().is_empty() { url.to_string() } else { text };
            StyledFragment::plain(visible).with_link(url)
        }
        None => {
            log::warn!("<ulink> without a 'url' attribute, painting its text only");
            StyledFragment::plain(text)
        }
    }
}

/// Composes the inline children of `node`. Empty runs are omitted.
pub fn compose(
    node: &Node,
    registry: &Registry<InlineKind>,
    ctx: &mut RenderContext,
) -> Result<Vec<StyledFragment>, PipelineError> {
    Ok(handle_children(node, registry, ctx)?
        .into_iter()
        .flatten()
        .collect())
}

/// Replaces every run of whitespace with a single space. Leading and
/// trailing runs are kept so adjacent fragments stay separated.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() && c != '\u{a0}' {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Turns spaces into non-breaking spaces so line wrapping keeps columns intact.
pub fn preserve_spaces(text: &str) -> String {
    text.replace(' ', "\u{a0}")
}
