//! Live preview: a single clipped page rendered to SVG plus its fill report.

use serde::Serialize;
use tracing::{debug, warn};

use crate::layout::{self, recommend_fill_action, FillAdvice, PageFillAnalysis, RenderMode};
use crate::models::resume::ResumeDocument;
use crate::models::style::StyleSelection;
use crate::render::svg::page_to_svg;
use crate::templates::{Section, TemplateId};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    /// Document revision this preview was rendered from.
    pub revision: u64,
    pub template: TemplateId,
    pub width_px: u32,
    pub height_px: u32,
    pub fill: PageFillAnalysis,
    pub advice: FillAdvice,
    pub clipped_lines: usize,
    pub sections: Vec<Section>,
    pub svg: String,
}

pub fn render_preview(doc: &ResumeDocument, style: &StyleSelection, revision: u64) -> Preview {
    let out = layout::layout(doc, style, RenderMode::Preview);
    let advice = recommend_fill_action(&out.fill);

    if out.fill.verdict.overflows() {
        warn!(
            template = %style.template,
            overflow = out.fill.overflow_fraction,
            clipped = out.clipped,
            "preview content overflows the page"
        );
    }

    let photo = doc.personal_info.photo.as_ref();
    let svg = out
        .document
        .pages
        .first()
        .map(|page| page_to_svg(page, style, photo))
        .unwrap_or_default();
    let (width_px, height_px) = layout::US_LETTER.preview_px();

    debug!(revision, template = %style.template, verdict = ?out.fill.verdict, "preview rendered");

    Preview {
        revision,
        template: style.template,
        width_px,
        height_px,
        fill: out.fill,
        advice,
        clipped_lines: out.clipped,
        sections: out.sections,
        svg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::style::Rgb;
    use crate::templates::list;

    #[test]
    fn test_preview_of_empty_document_uses_samples() {
        let preview = render_preview(&ResumeDocument::default(), &StyleSelection::default(), 0);
        assert!(preview.svg.contains("Your Name"));
        assert_eq!((preview.width_px, preview.height_px), (816, 1056));
        assert!(!preview.fill.verdict.overflows());
    }

    #[test]
    fn test_preview_is_pure() {
        let mut doc = ResumeDocument::default();
        doc.personal_info.full_name = "Grace Hopper".to_string();
        doc.summary = "Compilers.".to_string();
        for t in list() {
            let style = StyleSelection::for_template(t.id);
            let a = render_preview(&doc, &style, 3);
            let b = render_preview(&doc, &style, 3);
            assert_eq!(a.svg, b.svg);
            assert!(a.svg.contains("Grace Hopper"));
        }
    }

    #[test]
    fn test_accent_change_alters_only_accent_colour_in_svg() {
        let doc = ResumeDocument::default();
        let base = StyleSelection::default();
        let tinted = StyleSelection {
            accent: Rgb::new(0xde, 0xad, 0x00),
            ..base
        };
        let a = render_preview(&doc, &base, 0).svg;
        let b = render_preview(&doc, &tinted, 0).svg;
        assert_ne!(a, b);
        assert_eq!(
            a.replace(&base.accent.to_string(), "ACCENT"),
            b.replace(&tinted.accent.to_string(), "ACCENT")
        );
    }
}
