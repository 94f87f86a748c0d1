//! Laid-out pages: absolutely positioned items in top-down page coordinates.

use crate::fonts::FontId;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub width: f32,
    pub height: f32,
    pub items: Vec<PageItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    Text(TextItem),
    Rule(RuleItem),
    Image(ImageItem),
}

/// A run of text in one face. `y` is the baseline, measured from the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font: FontId,
    pub size: f32,
    pub text: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleItem {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub thickness: f32,
}

/// An image placed with its top-left corner at (`x`, `y`).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageItem {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub path: PathBuf,
}

impl Page {
    pub fn new(number: usize, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            items: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextItem> {
        self.items.iter().filter_map(|item| match item {
            PageItem::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleItem> {
        self.items.iter().filter_map(|item| match item {
            PageItem::Rule(r) => Some(r),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageItem> {
        self.items.iter().filter_map(|item| match item {
            PageItem::Image(i) => Some(i),
            _ => None,
        })
    }

    /// The first text item containing `needle`.
    pub fn find_text(&self, needle: &str) -> Option<&TextItem> {
        self.texts().find(|t| t.text.contains(needle))
    }
}
