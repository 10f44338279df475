// Layout engine: turns a resume document plus a style selection into
// positioned pages. Pure and synchronous; callers on the async side run the
// export path inside tokio::task::spawn_blocking.

pub mod canvas;
pub mod font_metrics;
pub mod page_fill;
pub mod placeholder;
pub mod scene;
pub mod sections;
pub mod strategy;
pub mod text;

pub use canvas::RenderMode;
pub use font_metrics::{FontFamily, Weight, US_LETTER};
pub use page_fill::{analyze_page_fill, recommend_fill_action, FillAdvice, PageFillAnalysis};
pub use scene::{Document, Element, Page};
pub use strategy::LayoutStrategy;

use crate::models::resume::ResumeDocument;
use crate::models::style::StyleSelection;
use crate::templates::{descriptor, sections_for, Section};

use canvas::{Canvas, PageGeometry};
use sections::RenderContext;

/// Result of one layout run.
#[derive(Debug, Clone)]
pub struct LayoutOutput {
    pub document: Document,
    /// Fill of the first page measured on the tallest column.
    pub fill: PageFillAnalysis,
    /// Sections that produced output, left column first.
    pub sections: Vec<Section>,
    /// Lines dropped because they fell below the page (preview only).
    pub clipped: usize,
}

/// Lays out `doc` with the template, font and colours in `style`.
///
/// Same inputs always produce the same output.
pub fn layout(doc: &ResumeDocument, style: &StyleSelection, mode: RenderMode) -> LayoutOutput {
    let template = descriptor(style.template);
    let geometry = PageGeometry {
        size: US_LETTER,
        margins: template.margins,
    };
    let strategy = LayoutStrategy::from(template.layout);
    let ctx = RenderContext::new(doc, style);
    let mut canvas = Canvas::new(geometry, mode);

    let (flows, sections) = strategy.render(&ctx, &mut canvas, sections_for(style.template));

    let used = flows
        .iter()
        .map(|f| f.used_height(&geometry))
        .fold(0.0_f32, f32::max);
    let fill = analyze_page_fill(used, geometry.content_height());
    let clipped = canvas.clipped();

    LayoutOutput {
        document: canvas.finish(),
        fill,
        sections,
        clipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EntryId, Experience, Project, Skill};
    use crate::models::style::Rgb;
    use crate::templates::{list, SectionSet, TemplateId};

    fn filled_document() -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        doc.personal_info.full_name = "Ada Lovelace".to_string();
        doc.personal_info.title = "Analyst".to_string();
        doc.personal_info.email = "ada@example.com".to_string();
        doc.summary = "Writes programs for engines that do not exist yet.".to_string();
        doc.experience.push(Experience {
            id: EntryId(1),
            company: "Analytical Engines".to_string(),
            position: "Programmer".to_string(),
            start_date: "1842".to_string(),
            end_date: "1843".to_string(),
            description: "Published the first algorithm\nAnnotated the memoir".to_string(),
            ..Default::default()
        });
        doc.skills.push(Skill {
            id: EntryId(1),
            name: "Mathematics".to_string(),
            level: 9,
        });
        doc.projects.push(Project {
            id: EntryId(1),
            name: "Note G".to_string(),
            description: "Bernoulli numbers".to_string(),
            ..Default::default()
        });
        doc
    }

    #[test]
    fn test_layout_is_deterministic() {
        let doc = filled_document();
        for t in list() {
            let style = StyleSelection::for_template(t.id);
            let a = layout(&doc, &style, RenderMode::Preview);
            let b = layout(&doc, &style, RenderMode::Preview);
            assert_eq!(a.document, b.document, "template {}", t.id);
            assert_eq!(a.fill, b.fill);
        }
    }

    #[test]
    fn test_preview_is_one_page() {
        let mut doc = filled_document();
        let entry = doc.experience[0].clone();
        for i in 0..40 {
            doc.experience.push(Experience {
                id: EntryId(i + 2),
                ..entry.clone()
            });
        }
        let out = layout(&doc, &StyleSelection::default(), RenderMode::Preview);
        assert_eq!(out.document.pages.len(), 1);
        assert!(out.clipped > 0);
        assert!(out.fill.verdict.overflows());
    }

    #[test]
    fn test_export_paginates_long_documents() {
        let mut doc = filled_document();
        let entry = doc.experience[0].clone();
        for i in 0..40 {
            doc.experience.push(Experience {
                id: EntryId(i + 2),
                ..entry.clone()
            });
        }
        let out = layout(&doc, &StyleSelection::default(), RenderMode::Export);
        assert!(out.document.pages.len() > 1);
        assert_eq!(out.clipped, 0);
    }

    #[test]
    fn test_accent_change_only_touches_accent_elements() {
        let doc = filled_document();
        for t in list() {
            let base = StyleSelection::for_template(t.id);
            let tinted = StyleSelection {
                accent: Rgb::new(0x12, 0x34, 0x56),
                ..base
            };
            let a = layout(&doc, &base, RenderMode::Preview).document;
            let b = layout(&doc, &tinted, RenderMode::Preview).document;
            assert_eq!(a.pages.len(), b.pages.len());
            for (pa, pb) in a.pages.iter().zip(&b.pages) {
                assert_eq!(pa.elements.len(), pb.elements.len());
                for (ea, eb) in pa.elements.iter().zip(&pb.elements) {
                    if ea.color() == Some(base.accent) {
                        assert_eq!(eb.color(), Some(tinted.accent));
                    } else {
                        assert_eq!(ea, eb, "template {}", t.id);
                    }
                }
            }
        }
    }

    #[test]
    fn test_preview_shows_every_applicable_section() {
        let doc = ResumeDocument::default();
        for t in list() {
            let style = StyleSelection::for_template(t.id);
            let out = layout(&doc, &style, RenderMode::Preview);
            let mut drawn = out.sections.clone();
            drawn.sort();
            let mut expected = LayoutStrategy::from(t.layout).sections(sections_for(t.id));
            expected.sort();
            assert_eq!(drawn, expected, "template {}", t.id);
            let texts: Vec<&str> = out.document.texts().collect();
            assert!(texts.contains(&"Your Name"));
        }
    }

    #[test]
    fn test_export_omits_empty_sections_and_placeholders() {
        let doc = filled_document();
        let out = layout(&doc, &StyleSelection::default(), RenderMode::Export);
        let texts: Vec<&str> = out.document.texts().collect();
        assert!(!texts.contains(&"EDUCATION"));
        assert!(!texts.contains(&"TOOLS"));
        assert!(texts.contains(&"EXPERIENCE"));
        assert!(!texts.iter().any(|t| t.contains("Your Name")));
    }

    #[test]
    fn test_corporate_never_renders_projects() {
        let doc = filled_document();
        let style = StyleSelection::for_template(TemplateId::Corporate);
        let out = layout(&doc, &style, RenderMode::Export);
        assert!(!out.sections.contains(&Section::Projects));
        assert!(!out.document.texts().any(|t| t == "Note G"));
        assert_eq!(sections_for(TemplateId::Corporate), SectionSet::NONE);
    }

    #[test]
    fn test_photo_template_reserves_frame_without_photo() {
        let doc = ResumeDocument::default();
        let style = StyleSelection::for_template(TemplateId::Profile);
        let out = layout(&doc, &style, RenderMode::Preview);
        let page = &out.document.pages[0];
        assert!(page
            .elements
            .iter()
            .any(|e| matches!(e, Element::Frame { .. })));
        assert!(!page
            .elements
            .iter()
            .any(|e| matches!(e, Element::Photo { .. })));
    }

    #[test]
    fn test_sparse_document_reports_whitespace() {
        let mut doc = ResumeDocument::default();
        doc.personal_info.full_name = "Short".to_string();
        doc.summary = "Brief.".to_string();
        let out = layout(&doc, &StyleSelection::default(), RenderMode::Export);
        assert_eq!(out.fill.verdict, page_fill::PageFillVerdict::TooMuchWhitespace);
        assert_eq!(recommend_fill_action(&out.fill), FillAdvice::AddContent);
    }
}
