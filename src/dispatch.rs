//! Name-based dispatch of child nodes to renderers.
//!
//! Each parent renderer owns a [`Registry`] listing the child names it
//! accepts. [`handle_children`] walks the children in document order, runs
//! the renderer registered for each name and collects the results. Names
//! missing from the registry are reported as [`Diagnostic`]s and skipped.

use crate::error::PipelineError;
use crate::pipeline::RenderContext;
use folio_dom::Node;
use std::fmt;

/// A renderer selected by node name. Implementors are small `Copy` tags;
/// a fresh invocation is made for every node.
pub trait Renderer: Copy {
    type Output;

    fn render(self, node: &Node, ctx: &mut RenderContext) -> Result<Self::Output, PipelineError>;
}

/// The child names a parent accepts, mapped to their renderers.
#[derive(Debug)]
pub struct Registry<K: 'static> {
    owner: &'static str,
    entries: &'static [(&'static str, K)],
}

impl<K: Copy> Registry<K> {
    pub const fn new(owner: &'static str, entries: &'static [(&'static str, K)]) -> Self {
        Self { owner, entries }
    }

    /// Name of the renderer this registry belongs to, used in diagnostics.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn lookup(&self, name: &str) -> Option<K> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, kind)| *kind)
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

/// A skipped node that no renderer was registered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the unhandled node.
    pub element: String,
    /// The renderer whose registry did not accept it.
    pub context: &'static str,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unhandled element <{}> in {}", self.element, self.context)
    }
}

/// Renders a single node through `registry`. Returns `None` when the node was skipped.
pub fn dispatch<K: Renderer>(
    node: &Node,
    registry: &Registry<K>,
    ctx: &mut RenderContext,
) -> Result<Option<K::Output>, PipelineError> {
    match registry.lookup(node.name()) {
        Some(kind) => kind.render(node, ctx).map(Some),
        // Indentation between block elements.
        None if node.is_blank() => Ok(None),
        None => {
            ctx.report_unhandled(node.name(), registry.owner());
            Ok(None)
        }
    }
}

/// Renders every child of `node` in document order. Skipped children produce no result.
pub fn handle_children<K: Renderer>(
    node: &Node,
    registry: &Registry<K>,
    ctx: &mut RenderContext,
) -> Result<Vec<K::Output>, PipelineError> {
    let mut results = Vec::with_capacity(node.children().len());
    for child in node.children() {
        if let Some(output) = dispatch(child, registry, ctx)? {
            results.push(output);
        }
    }
    Ok(results)
}
