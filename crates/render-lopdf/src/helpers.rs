//! Standalone helpers for the auxiliary PDF structures: the bookmark outline,
//! link annotations and compressed streams.

use crate::error::RenderError;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use folio_layout::{Page, win_ansi};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::HashMap;
use std::io::Write;

/// One bookmark. `level` 1 entries are top-level; deeper levels nest under
/// the closest preceding entry of a lower level.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub title: String,
    pub level: u8,
    /// 1-based page number.
    pub page: usize,
    /// Distance of the target from the top edge of the page.
    pub y: f32,
}

pub(crate) fn pdf_string(s: &str) -> Object {
    Object::String(win_ansi::encode(s), StringFormat::Literal)
}

pub(crate) fn compress(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

pub(crate) fn flate_stream(mut dict: lopdf::Dictionary, data: &[u8]) -> Result<Stream, RenderError> {
    dict.set("Filter", "FlateDecode");
    Ok(Stream::new(dict, compress(data)?))
}

/// Creates a URI link annotation for every text item that carries a link.
///
/// Returns the annotation ids per 0-based page index.
pub(crate) fn create_link_annotations(
    doc: &mut Document,
    pages: &[Page],
) -> HashMap<usize, Vec<ObjectId>> {
    let mut annots_by_page: HashMap<usize, Vec<ObjectId>> = HashMap::new();

    for (page_idx, page) in pages.iter().enumerate() {
        for text in page.texts() {
            let Some(url) = &text.link else { continue };
            let rect = vec![
                text.x.into(),
                (page.height - text.y - text.size * 0.2).into(),
                (text.x + text.width).into(),
                (page.height - text.y + text.size * 0.8).into(),
            ];
            let action = dictionary! {
                "Type" => "Action",
                "S" => "URI",
                "URI" => Object::string_literal(url.as_str()),
            };
            let annot = dictionary! {
                "Type" => "Annot", "Subtype" => "Link", "Rect" => rect,
                "Border" => vec![0.into(), 0.into(), 0.into()], "A" => action,
            };
            let annot_id = doc.add_object(annot);
            annots_by_page.entry(page_idx).or_default().push(annot_id);
        }
    }
    annots_by_page
}

/// Creates the document outline (bookmarks).
///
/// Returns the id of the root `Outlines` dictionary if any entry points at an existing page.
pub(crate) fn build_outlines(
    doc: &mut Document,
    entries: &[OutlineEntry],
    page_ids: &[ObjectId],
    page_height: f32,
) -> Option<ObjectId> {
    struct FlatOutlineItem {
        id: ObjectId,
        title: String,
        dest: Vec<Object>,
        parent_idx: Option<usize>,
    }
    struct NodeOutlineItem {
        id: ObjectId,
        title: String,
        dest: Vec<Object>,
        children: Vec<NodeOutlineItem>,
    }

    let mut flat_list: Vec<FlatOutlineItem> = Vec::new();
    let mut level_stack: Vec<(u8, usize)> = Vec::new();

    for entry in entries {
        if entry.page == 0 || entry.page > page_ids.len() {
            log::warn!("Outline entry '{}' points at missing page {}", entry.title, entry.page);
            continue;
        }
        let dest = vec![
            Object::Reference(page_ids[entry.page - 1]),
            "FitH".into(),
            (page_height - entry.y).into(),
        ];
        while level_stack.last().is_some_and(|(level, _)| *level >= entry.level) {
            level_stack.pop();
        }
        let parent_idx = level_stack.last().map(|(_, idx)| *idx);
        let new_idx = flat_list.len();
        flat_list.push(FlatOutlineItem {
            id: doc.new_object_id(),
            title: entry.title.clone(),
            dest,
            parent_idx,
        });
        level_stack.push((entry.level, new_idx));
    }

    let mut children_map: HashMap<usize, Vec<NodeOutlineItem>> = HashMap::new();
    let mut root_items = Vec::new();

    for (i, flat_node) in flat_list.into_iter().enumerate().rev() {
        let mut children = children_map.remove(&i).unwrap_or_default();
        children.reverse();
        let node = NodeOutlineItem {
            id: flat_node.id,
            title: flat_node.title,
            dest: flat_node.dest,
            children,
        };
        match flat_node.parent_idx {
            Some(parent_idx) => children_map.entry(parent_idx).or_default().push(node),
            None => root_items.push(node),
        }
    }
    root_items.reverse();

    let (first_id, last_id) = (root_items.first()?.id, root_items.last()?.id);
    let outline_root_id = doc.new_object_id();
    doc.objects.insert(
        outline_root_id,
        dictionary! {
            "Type" => "Outlines", "First" => first_id, "Last" => last_id,
            "Count" => root_items.len() as i64,
        }
        .into(),
    );

    fn insert_outline_level(items: &[NodeOutlineItem], parent_id: ObjectId, doc: &mut Document) {
        for (i, item) in items.iter().enumerate() {
            let mut dict = dictionary! {
                "Title" => pdf_string(&item.title),
                "Parent" => parent_id, "Dest" => item.dest.clone(),
            };
            if i > 0 {
                dict.set("Prev", items[i - 1].id);
            }
            if i + 1 < items.len() {
                dict.set("Next", items[i + 1].id);
            }
            if let (Some(first), Some(last)) = (item.children.first(), item.children.last()) {
                dict.set("First", first.id);
                dict.set("Last", last.id);
                dict.set("Count", -(item.children.len() as i64));
                insert_outline_level(&item.children, item.id, doc);
            }
            doc.objects.insert(item.id, dict.into());
        }
    }
    insert_outline_level(&root_items, outline_root_id, doc);
    Some(outline_root_id)
}
