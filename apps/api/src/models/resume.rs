use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize, Serializer};

// ────────────────────────────────────────────────────────────────────────────
// Identifiers and collections
// ────────────────────────────────────────────────────────────────────────────

/// Identifier of an entry inside one collection.
///
/// Allocated from a per-collection counter by the store. Only unique within its
/// collection and only for the lifetime of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ordered entry collections of a [`ResumeDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Experience,
    Education,
    Skills,
    Tools,
    Languages,
    Certifications,
    Projects,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Experience,
        Collection::Education,
        Collection::Skills,
        Collection::Tools,
        Collection::Languages,
        Collection::Certifications,
        Collection::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Experience => "experience",
            Collection::Education => "education",
            Collection::Skills => "skills",
            Collection::Tools => "tools",
            Collection::Languages => "languages",
            Collection::Certifications => "certifications",
            Collection::Projects => "projects",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownName::new("collection", s))
    }
}

/// Returned when a client-supplied name does not match any known variant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown {kind} '{name}'")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl UnknownName {
    pub fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

/// Profile photo bytes as uploaded. Decoding is deferred to export time.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub media_type: String,
    pub bytes: Bytes,
}

impl Serialize for Photo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Photo", 2)?;
        s.serialize_field("mediaType", &self.media_type)?;
        s.serialize_field("byteLength", &self.bytes.len())?;
        s.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
    pub photo: Option<Photo>,
}

impl PersonalInfo {
    /// Non-blank contact details in display order.
    pub fn contact_items(&self) -> Vec<&str> {
        [
            &self.email,
            &self.phone,
            &self.location,
            &self.linkedin,
            &self.github,
            &self.website,
        ]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: EntryId,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    /// Newline-separated bullet points.
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: EntryId,
    pub school: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub honors: String,
}

pub const MIN_SKILL_LEVEL: u8 = 1;
pub const MAX_SKILL_LEVEL: u8 = 10;
pub const DEFAULT_SKILL_LEVEL: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: EntryId,
    pub name: String,
    /// Proficiency on a 1–10 scale.
    pub level: u8,
}

impl Default for Skill {
    fn default() -> Self {
        Self {
            id: EntryId::default(),
            name: String::new(),
            level: DEFAULT_SKILL_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: EntryId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Native,
    Fluent,
    Advanced,
    #[default]
    Intermediate,
    Basic,
}

impl Proficiency {
    pub const ALL: [Proficiency; 5] = [
        Proficiency::Native,
        Proficiency::Fluent,
        Proficiency::Advanced,
        Proficiency::Intermediate,
        Proficiency::Basic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Native => "native",
            Proficiency::Fluent => "fluent",
            Proficiency::Advanced => "advanced",
            Proficiency::Intermediate => "intermediate",
            Proficiency::Basic => "basic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Proficiency::Native => "Native",
            Proficiency::Fluent => "Fluent",
            Proficiency::Advanced => "Advanced",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Basic => "Basic",
        }
    }
}

impl FromStr for Proficiency {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Proficiency::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| UnknownName::new("proficiency", s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: EntryId,
    pub name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: EntryId,
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntryId,
    pub name: String,
    pub description: String,
    pub technologies: String,
    pub live_url: String,
    pub repo_url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Root aggregate
// ────────────────────────────────────────────────────────────────────────────

/// Everything the user has entered in one editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub tools: Vec<Tool>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names_round_trip() {
        for c in Collection::ALL {
            assert_eq!(c.as_str().parse::<Collection>().unwrap(), c);
        }
        assert!("hobbies".parse::<Collection>().is_err());
    }

    #[test]
    fn test_proficiency_parse_is_case_insensitive() {
        assert_eq!("Fluent".parse::<Proficiency>().unwrap(), Proficiency::Fluent);
        assert_eq!(" native ".parse::<Proficiency>().unwrap(), Proficiency::Native);
        assert!("expert".parse::<Proficiency>().is_err());
    }

    #[test]
    fn test_contact_items_skip_blank_fields() {
        let info = PersonalInfo {
            email: "ada@example.com".to_string(),
            phone: "   ".to_string(),
            github: "github.com/ada".to_string(),
            ..Default::default()
        };
        assert_eq!(info.contact_items(), vec!["ada@example.com", "github.com/ada"]);
    }

    #[test]
    fn test_photo_serializes_without_bytes() {
        let photo = Photo {
            media_type: "image/png".to_string(),
            bytes: Bytes::from_static(&[1, 2, 3]),
        };
        let json = serde_json::to_value(&photo).unwrap();
        assert_eq!(json["mediaType"], "image/png");
        assert_eq!(json["byteLength"], 3);
    }
}
