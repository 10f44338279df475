//! PDF export.
//!
//! Runs the same layout as the preview in export mode (paginated, no sample
//! content) and writes the scene with printpdf using the built-in Helvetica and
//! Times faces. CPU-bound; call from `tokio::task::spawn_blocking`.

use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point,
};
use tracing::{debug, info};

use crate::layout::{self, Element, FontFamily, Page, RenderMode, Weight};
use crate::models::resume::{Photo, ResumeDocument};
use crate::models::style::{Rgb, StyleSelection};

/// Source DPI handed to printpdf for the embedded photo before scaling.
const IMAGE_DPI: f32 = 300.0;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("profile photo could not be decoded: {0}")]
    Image(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// `<FullName>-resume.pdf` with whitespace as `_` and anything outside
/// `[A-Za-z0-9_-]` dropped. Falls back to `Untitled`.
pub fn download_filename(full_name: &str) -> String {
    let stem: String = full_name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    let stem = if stem.trim_matches('_').is_empty() {
        "Untitled"
    } else {
        stem.as_str()
    };
    format!("{stem}-resume.pdf")
}

pub fn export_pdf(doc: &ResumeDocument, style: &StyleSelection) -> Result<ExportedPdf, ExportError> {
    let out = layout::layout(doc, style, RenderMode::Export);

    let uses_photo = out
        .document
        .pages
        .iter()
        .flat_map(|p| p.elements.iter())
        .any(|e| matches!(e, Element::Photo { .. }));
    let photo = match (&doc.personal_info.photo, uses_photo) {
        (Some(photo), true) => Some(decode_photo(photo)?),
        _ => None,
    };

    let filename = download_filename(&doc.personal_info.full_name);
    let title = match doc.personal_info.full_name.trim() {
        "" => "Resume".to_string(),
        name => format!("{name} - Resume"),
    };

    let first = out
        .document
        .pages
        .first()
        .ok_or_else(|| ExportError::Pdf("layout produced no pages".to_string()))?;
    let (width, height) = (first.size.width_pt, first.size.height_pt);
    let (pdf, page1, layer1) = PdfDocument::new(title, mm(width), mm(height), "Layer 1");
    let fonts = FontSet::load(&pdf, style.font.family())?;

    for (index, page) in out.document.pages.iter().enumerate() {
        let layer = if index == 0 {
            pdf.get_page(page1).get_layer(layer1)
        } else {
            let (p, l) = pdf.add_page(mm(width), mm(height), format!("Layer {}", index + 1));
            pdf.get_page(p).get_layer(l)
        };
        write_page(&layer, page, &fonts, photo.as_ref(), style);
    }

    let pages = out.document.pages.len();
    let bytes = pdf
        .save_to_bytes()
        .map_err(|e| ExportError::Pdf(format!("{e:?}")))?;

    info!(
        template = %style.template,
        pages,
        size_bytes = bytes.len(),
        filename = %filename,
        "resume exported"
    );

    Ok(ExportedPdf {
        filename,
        bytes,
        pages,
    })
}

fn decode_photo(photo: &Photo) -> Result<DynamicImage, ExportError> {
    let image = image_crate::load_from_memory(&photo.bytes)
        .map_err(|e| ExportError::Image(e.to_string()))?;
    debug!(
        media_type = %photo.media_type,
        width = image.width(),
        height = image.height(),
        "decoded profile photo"
    );
    // printpdf embeds RGB8 without an alpha channel.
    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}

// ────────────────────────────────────────────────────────────────────────────
// Fonts
// ────────────────────────────────────────────────────────────────────────────

struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl FontSet {
    fn load(pdf: &PdfDocumentReference, family: FontFamily) -> Result<Self, ExportError> {
        let faces = match family {
            FontFamily::Sans => [
                BuiltinFont::Helvetica,
                BuiltinFont::HelveticaBold,
                BuiltinFont::HelveticaOblique,
                BuiltinFont::HelveticaBoldOblique,
            ],
            FontFamily::Serif => [
                BuiltinFont::TimesRoman,
                BuiltinFont::TimesBold,
                BuiltinFont::TimesItalic,
                BuiltinFont::TimesBoldItalic,
            ],
        };
        let [regular, bold, italic, bold_italic] = faces;
        let add = |face| {
            pdf.add_builtin_font(face)
                .map_err(|e| ExportError::Pdf(format!("{e:?}")))
        };
        Ok(Self {
            regular: add(regular)?,
            bold: add(bold)?,
            italic: add(italic)?,
            bold_italic: add(bold_italic)?,
        })
    }

    fn pick(&self, weight: Weight, italic: bool) -> &IndirectFontRef {
        match (weight, italic) {
            (Weight::Regular, false) => &self.regular,
            (Weight::Bold, false) => &self.bold,
            (Weight::Regular, true) => &self.italic,
            (Weight::Bold, true) => &self.bold_italic,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Drawing
// ────────────────────────────────────────────────────────────────────────────

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

fn color(rgb: Rgb) -> Color {
    let (r, g, b) = rgb.unit();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

/// Scene coordinates are top-left based; PDF user space is bottom-left.
fn point(x: f32, y: f32, page_height: f32) -> Point {
    Point::new(mm(x), mm(page_height - y))
}

/// Horizontal stroke of `thickness` points centred on `y`.
fn stroke(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32, thickness: f32, rgb: Rgb, h: f32) {
    layer.set_outline_color(color(rgb));
    layer.set_outline_thickness(thickness);
    layer.add_line(Line {
        points: vec![(point(x1, y, h), false), (point(x2, y, h), false)],
        is_closed: false,
    });
}

fn write_page(
    layer: &PdfLayerReference,
    page: &Page,
    fonts: &FontSet,
    photo: Option<&DynamicImage>,
    style: &StyleSelection,
) {
    let h = page.size.height_pt;
    for element in &page.elements {
        match element {
            Element::Text {
                x,
                y,
                content,
                size,
                weight,
                italic,
                color: rgb,
            } => {
                layer.set_fill_color(color(*rgb));
                layer.use_text(
                    pdf_text(content),
                    *size,
                    mm(*x),
                    mm(h - *y),
                    fonts.pick(*weight, *italic),
                );
            }
            Element::Rule {
                x1,
                x2,
                y,
                thickness,
                color: rgb,
            } => stroke(layer, *x1, *x2, *y, *thickness, *rgb, h),
            Element::Fill {
                x,
                y,
                width,
                height,
                color: rgb,
            } => {
                if *width > 0.0 && *height > 0.0 {
                    stroke(layer, *x, *x + *width, *y + *height / 2.0, *height, *rgb, h);
                }
            }
            Element::Frame {
                x,
                y,
                width,
                height,
                color: rgb,
            } => {
                layer.set_outline_color(color(*rgb));
                layer.set_outline_thickness(1.0);
                layer.add_line(Line {
                    points: vec![
                        (point(*x, *y, h), false),
                        (point(*x + *width, *y, h), false),
                        (point(*x + *width, *y + *height, h), false),
                        (point(*x, *y + *height, h), false),
                    ],
                    is_closed: true,
                });
            }
            Element::Bullet {
                cx,
                cy,
                radius,
                color: rgb,
            } => stroke(layer, *cx - *radius, *cx + *radius, *cy, *radius * 2.0, *rgb, h),
            Element::Photo {
                x,
                y,
                width,
                height,
            } => match photo {
                Some(image) => place_photo(layer, image, *x, *y, *width, *height, h),
                None => {
                    let muted = style.palette().muted;
                    stroke(layer, *x, *x + *width, *y + *height / 2.0, *height, muted, h);
                }
            },
        }
    }
}

/// Fits the photo inside the slot, keeping its aspect ratio, centred.
fn place_photo(
    layer: &PdfLayerReference,
    image: &DynamicImage,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    page_height: f32,
) {
    let (px_w, px_h) = image.dimensions();
    if px_w == 0 || px_h == 0 {
        return;
    }
    let natural_w = px_w as f32 * 72.0 / IMAGE_DPI;
    let natural_h = px_h as f32 * 72.0 / IMAGE_DPI;
    let scale = (width / natural_w).min(height / natural_h);
    let drawn_w = natural_w * scale;
    let drawn_h = natural_h * scale;
    let left = x + (width - drawn_w) / 2.0;
    let bottom = y + (height + drawn_h) / 2.0;

    Image::from_dynamic_image(image).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(left)),
            translate_y: Some(mm(page_height - bottom)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
}

/// Maps text onto what the built-in (WinAnsi) faces can show.
fn pdf_text(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' | '\u{2022}' => '-',
            '\t' => ' ',
            c if (c as u32) < 0x20 => ' ',
            c if (c as u32) > 0xFF => '?',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EntryId, Experience};
    use crate::templates::{list, TemplateId};
    use bytes::Bytes;

    fn document() -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        doc.personal_info.full_name = "Jane Doe".to_string();
        doc.personal_info.email = "jane@example.com".to_string();
        doc.summary = "Builds reliable systems.".to_string();
        doc.experience.push(Experience {
            id: EntryId(1),
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: "2020".to_string(),
            current: true,
            description: "Shipped things\nFixed things".to_string(),
            ..Default::default()
        });
        doc
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(download_filename("Jane Doe"), "Jane_Doe-resume.pdf");
        assert_eq!(download_filename("  "), "Untitled-resume.pdf");
        assert_eq!(download_filename("José O'Neil"), "Jos_ONeil-resume.pdf");
        assert_eq!(download_filename("a-b c"), "a-b_c-resume.pdf");
        assert_eq!(download_filename("日本"), "Untitled-resume.pdf");
    }

    #[test]
    fn test_export_every_template_produces_pdf() {
        let doc = document();
        for t in list() {
            let style = StyleSelection::for_template(t.id);
            let pdf = export_pdf(&doc, &style).unwrap();
            assert!(pdf.bytes.starts_with(b"%PDF"), "template {}", t.id);
            assert_eq!(pdf.filename, "Jane_Doe-resume.pdf");
            assert_eq!(pdf.pages, 1);
        }
    }

    #[test]
    fn test_export_of_empty_document_is_untitled() {
        let pdf = export_pdf(&ResumeDocument::default(), &StyleSelection::default()).unwrap();
        assert_eq!(pdf.filename, "Untitled-resume.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_document_spans_pages() {
        let mut doc = document();
        let entry = doc.experience[0].clone();
        for i in 0..30 {
            doc.experience.push(Experience {
                id: EntryId(i + 2),
                ..entry.clone()
            });
        }
        let pdf = export_pdf(&doc, &StyleSelection::default()).unwrap();
        assert!(pdf.pages > 1);
    }

    #[test]
    fn test_undecodable_photo_fails_photo_template() {
        let mut doc = document();
        doc.personal_info.photo = Some(Photo {
            media_type: "image/png".to_string(),
            bytes: Bytes::from_static(b"definitely not an image"),
        });
        let style = StyleSelection::for_template(TemplateId::Profile);
        let err = export_pdf(&doc, &style).unwrap_err();
        assert!(matches!(err, ExportError::Image(_)));

        // Templates without a photo slot never decode it.
        let style = StyleSelection::for_template(TemplateId::Classic);
        assert!(export_pdf(&doc, &style).is_ok());
    }

    #[test]
    fn test_pdf_text_replaces_unsupported_glyphs() {
        assert_eq!(pdf_text("it\u{2019}s \u{2013} ok"), "it's - ok");
        assert_eq!(pdf_text("caf\u{e9}"), "caf\u{e9}");
        assert_eq!(pdf_text("\u{1F600}"), "?");
    }
}
