use axum::{extract::Path, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::layout::FontFamily;
use crate::models::style::{ColorScheme, FontChoice, Palette, Rgb, DEFAULT_ACCENT};
use crate::templates::{descriptor, list, sections_for, SectionSet, TemplateDescriptor, TemplateId};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateView {
    #[serde(flatten)]
    pub descriptor: &'static TemplateDescriptor,
    pub sections: SectionSet,
}

impl TemplateView {
    fn of(descriptor: &'static TemplateDescriptor) -> Self {
        TemplateView {
            sections: sections_for(descriptor.id),
            descriptor,
        }
    }
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateView>> {
    Json(list().iter().map(TemplateView::of).collect())
}

/// GET /api/v1/templates/:id
pub async fn handle_get_template(Path(id): Path<String>) -> Result<Json<TemplateView>, AppError> {
    let id: TemplateId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("Template '{id}' not found")))?;
    Ok(Json(TemplateView::of(descriptor(id))))
}

#[derive(Serialize)]
pub struct FontOption {
    pub id: FontChoice,
    pub name: &'static str,
    pub family: FontFamily,
}

#[derive(Serialize)]
pub struct SchemeOption {
    pub id: ColorScheme,
    pub palette: Palette,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
    pub fonts: Vec<FontOption>,
    pub color_schemes: Vec<SchemeOption>,
    pub default_accent: Rgb,
}

/// GET /api/v1/styles
/// Everything a style picker needs to offer, independent of any session.
pub async fn handle_style_options() -> Json<StyleOptions> {
    Json(StyleOptions {
        fonts: FontChoice::ALL
            .iter()
            .map(|&id| FontOption {
                id,
                name: id.display_name(),
                family: id.family(),
            })
            .collect(),
        color_schemes: ColorScheme::ALL
            .iter()
            .map(|&id| SchemeOption {
                id,
                palette: id.palette(),
            })
            .collect(),
        default_accent: DEFAULT_ACCENT,
    })
}
