//! Positioned drawing primitives shared by the SVG preview and the PDF writer.
//!
//! Coordinates are in points with the origin at the top-left corner of the page
//! and y growing downwards. Text `y` is the baseline.

use serde::Serialize;

use crate::layout::font_metrics::{PageSize, Weight};
use crate::models::style::Rgb;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Text {
        x: f32,
        y: f32,
        content: String,
        size: f32,
        weight: Weight,
        italic: bool,
        color: Rgb,
    },
    /// Horizontal divider under a section header.
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
        color: Rgb,
    },
    /// Filled rectangle (backgrounds, skill bars).
    Fill {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    /// Outlined rectangle used as the empty photo frame.
    Frame {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    /// Bullet glyph centred on (`cx`, `cy`).
    Bullet {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Rgb,
    },
    /// Slot for the profile photo; the bytes come from the document.
    Photo {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

impl Element {
    #[cfg(test)]
    pub fn color(&self) -> Option<Rgb> {
        match self {
            Element::Text { color, .. }
            | Element::Rule { color, .. }
            | Element::Fill { color, .. }
            | Element::Frame { color, .. }
            | Element::Bullet { color, .. } => Some(*color),
            Element::Photo { .. } => None,
        }
    }

    #[cfg(test)]
    pub fn text(&self) -> Option<&str> {
        match self {
            Element::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub size: PageSize,
    pub elements: Vec<Element>,
}

/// One or more pages produced by a layout run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .filter_map(Element::text)
    }
}
