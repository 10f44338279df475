//! Static template catalog.
//!
//! Descriptors are compiled in and never change at runtime. The section
//! exception table lives next to them so the wizard and the renderer read the
//! same answer.

pub mod handlers;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::resume::UnknownName;

// ────────────────────────────────────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Classic,
    Modern,
    Elegant,
    Creative,
    Technical,
    Corporate,
    Profile,
}

impl TemplateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::Modern => "modern",
            TemplateId::Elegant => "elegant",
            TemplateId::Creative => "creative",
            TemplateId::Technical => "technical",
            TemplateId::Corporate => "corporate",
            TemplateId::Profile => "profile",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TEMPLATES
            .iter()
            .map(|t| t.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownName::new("template", s))
    }
}

impl Serialize for TemplateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Descriptors
// ────────────────────────────────────────────────────────────────────────────

/// Structural arrangement a template uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    SingleColumn,
    TwoColumn,
    Corporate,
    PhotoSidebar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    Traditional,
    Contemporary,
    Corporate,
    Personal,
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub const fn uniform(pt: f32) -> Self {
        Self {
            top: pt,
            right: pt,
            bottom: pt,
            left: pt,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub category: TemplateCategory,
    pub layout: LayoutKind,
    /// Page margins used when exporting (and for the preview page frame).
    pub margins: Margins,
}

static TEMPLATES: [TemplateDescriptor; 7] = [
    TemplateDescriptor {
        id: TemplateId::Classic,
        name: "Classic",
        description: "Centered header and a single full-width column. Reads well in any ATS.",
        tags: &["ats-friendly", "single-column", "traditional"],
        category: TemplateCategory::Traditional,
        layout: LayoutKind::SingleColumn,
        margins: Margins::uniform(54.0),
    },
    TemplateDescriptor {
        id: TemplateId::Modern,
        name: "Modern",
        description: "Skills sidebar on the left, experience on the right.",
        tags: &["two-column", "skill-bars", "popular"],
        category: TemplateCategory::Contemporary,
        layout: LayoutKind::TwoColumn,
        margins: Margins::uniform(36.0),
    },
    TemplateDescriptor {
        id: TemplateId::Elegant,
        name: "Elegant",
        description: "Airy two-column layout with serif-friendly spacing.",
        tags: &["two-column", "clean", "serif"],
        category: TemplateCategory::Contemporary,
        layout: LayoutKind::TwoColumn,
        margins: Margins {
            top: 48.0,
            right: 54.0,
            bottom: 48.0,
            left: 54.0,
        },
    },
    TemplateDescriptor {
        id: TemplateId::Creative,
        name: "Creative",
        description: "Two columns with bold section rules for design roles.",
        tags: &["two-column", "skill-bars", "colorful"],
        category: TemplateCategory::Contemporary,
        layout: LayoutKind::TwoColumn,
        margins: Margins {
            top: 32.0,
            right: 30.0,
            bottom: 32.0,
            left: 30.0,
        },
    },
    TemplateDescriptor {
        id: TemplateId::Technical,
        name: "Technical",
        description: "Dense two-column layout that puts tools and projects forward.",
        tags: &["two-column", "projects", "engineering"],
        category: TemplateCategory::Contemporary,
        layout: LayoutKind::TwoColumn,
        margins: Margins {
            top: 36.0,
            right: 32.0,
            bottom: 36.0,
            left: 32.0,
        },
    },
    TemplateDescriptor {
        id: TemplateId::Corporate,
        name: "Corporate",
        description: "Conservative two-column layout focused on education and work history.",
        tags: &["two-column", "conservative", "finance"],
        category: TemplateCategory::Corporate,
        layout: LayoutKind::Corporate,
        margins: Margins {
            top: 40.0,
            right: 44.0,
            bottom: 40.0,
            left: 44.0,
        },
    },
    TemplateDescriptor {
        id: TemplateId::Profile,
        name: "Profile",
        description: "Sidebar with a profile photo and contact details.",
        tags: &["photo", "sidebar", "personal"],
        category: TemplateCategory::Personal,
        layout: LayoutKind::PhotoSidebar,
        margins: Margins::uniform(30.0),
    },
];

/// All templates in catalog order.
pub fn list() -> &'static [TemplateDescriptor] {
    &TEMPLATES
}

pub fn descriptor(id: TemplateId) -> &'static TemplateDescriptor {
    TEMPLATES
        .iter()
        .find(|t| t.id == id)
        .unwrap_or(&TEMPLATES[0])
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Named content blocks of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Tools,
    Languages,
    Certifications,
    Projects,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Summary => "Summary",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Tools => "Tools",
            Section::Languages => "Languages",
            Section::Certifications => "Certifications",
            Section::Projects => "Projects",
        }
    }

    /// Sections every template renders.
    pub const CORE: [Section; 4] = [
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
    ];
}

/// Which optional sections a template carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionSet {
    pub tools: bool,
    pub languages: bool,
    pub certifications: bool,
    pub projects: bool,
}

impl SectionSet {
    pub const ALL: SectionSet = SectionSet {
        tools: true,
        languages: true,
        certifications: true,
        projects: true,
    };

    pub const NONE: SectionSet = SectionSet {
        tools: false,
        languages: false,
        certifications: false,
        projects: false,
    };

    pub fn contains(&self, section: Section) -> bool {
        match section {
            Section::Tools => self.tools,
            Section::Languages => self.languages,
            Section::Certifications => self.certifications,
            Section::Projects => self.projects,
            core => Section::CORE.contains(&core),
        }
    }
}

/// Static exception table: the corporate category drops every optional section.
pub fn sections_for(id: TemplateId) -> SectionSet {
    match descriptor(id).category {
        TemplateCategory::Corporate => SectionSet::NONE,
        _ => SectionSet::ALL,
    }
}
