//! Field-level editing of document entries.
//!
//! Clients address fields by their camelCase wire names. Every entry type maps
//! those names onto its own struct fields and checks the value shape; the store
//! only ever sees a typed success or a [`FieldError`].

use serde::Deserialize;

use crate::models::resume::{
    Certification, Collection, Education, EntryId, Experience, Language, Proficiency, Project,
    Skill, Tool, UnknownName, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL,
};

/// A value sent by the client for a single field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl FieldValue {
    fn into_text(self, field: &str) -> Result<String, FieldError> {
        match self {
            FieldValue::Text(s) => Ok(s),
            _ => Err(FieldError::invalid(field, "text")),
        }
    }

    fn into_flag(self, field: &str) -> Result<bool, FieldError> {
        match self {
            FieldValue::Flag(b) => Ok(b),
            FieldValue::Text(s) if s == "true" => Ok(true),
            FieldValue::Text(s) if s == "false" => Ok(false),
            _ => Err(FieldError::invalid(field, "boolean")),
        }
    }

    fn into_number(self, field: &str) -> Result<i64, FieldError> {
        match self {
            FieldValue::Number(n) => Ok(n),
            FieldValue::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| FieldError::invalid(field, "integer")),
            FieldValue::Flag(_) => Err(FieldError::invalid(field, "integer")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("{collection} entries have no field '{field}'")]
    UnknownField {
        collection: Collection,
        field: String,
    },

    #[error("field '{field}' expects {expected}")]
    InvalidValue {
        field: String,
        expected: &'static str,
    },

    #[error(transparent)]
    UnknownName(#[from] UnknownName),
}

impl FieldError {
    fn invalid(field: &str, expected: &'static str) -> Self {
        FieldError::InvalidValue {
            field: field.to_string(),
            expected,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry trait
// ────────────────────────────────────────────────────────────────────────────

/// Behaviour shared by every collection entry.
pub trait Entry: Default {
    const COLLECTION: Collection;

    fn id(&self) -> EntryId;

    /// A blank entry carrying `id`.
    fn blank(id: EntryId) -> Self;

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError>;

    fn unknown(field: &str) -> FieldError {
        FieldError::UnknownField {
            collection: Self::COLLECTION,
            field: field.to_string(),
        }
    }
}

impl Entry for Experience {
    const COLLECTION: Collection = Collection::Experience;

    fn id(&self) -> EntryId {
        self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match field {
            "company" => self.company = value.into_text(field)?,
            "position" => self.position = value.into_text(field)?,
            "location" => self.location = value.into_text(field)?,
            "startDate" => self.start_date = value.into_text(field)?,
            "endDate" => self.end_date = value.into_text(field)?,
            "current" => self.current = value.into_flag(field)?,
            "description" => self.description = value.into_text(field)?,
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

impl Entry for Education {
    const COLLECTION: Collection = Collection::Education;

    fn id(&self) -> EntryId {
        self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match field {
            "school" => self.school = value.into_text(field)?,
            "degree" => self.degree = value.into_text(field)?,
            "field" => self.field = value.into_text(field)?,
            "location" => self.location = value.into_text(field)?,
            "startDate" => self.start_date = value.into_text(field)?,
            "endDate" => self.end_date = value.into_text(field)?,
            "current" => self.current = value.into_flag(field)?,
            "honors" => self.honors = value.into_text(field)?,
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

impl Entry for Skill {
    const COLLECTION: Collection = Collection::Skills;

    fn id(&self) -> EntryId {
        self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.into_text(field)?,
            "level" => {
                let level = value.into_number(field)?;
                self.level = level.clamp(MIN_SKILL_LEVEL as i64, MAX_SKILL_LEVEL as i64) as u8;
            }
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

impl Entry for Tool {
    const COLLECTION: Collection = Collection::Tools;

    fn id(&self) -> EntryId {
        self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.into_text(field)?,
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

impl Entry for Language {
    const COLLECTION: Collection = Collection::Languages;

    fn id(&self) -> EntryId {
        self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.into_text(field)?,
            "proficiency" => {
                let text = value.into_text(field)?;
                self.proficiency = text.parse::<Proficiency>()?;
            }
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

impl Entry for Certification {
    const COLLECTION: Collection = Collection::Certifications;

    fn id(&self) -> EntryId {
        self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.into_text(field)?,
            "issuer" => self.issuer = value.into_text(field)?,
            "date" => self.date = value.into_text(field)?,
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

impl Entry for Project {
    const COLLECTION: Collection = Collection::Projects;

    fn id(&self) -> EntryId {
        self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.into_text(field)?,
            "description" => self.description = value.into_text(field)?,
            "technologies" => self.technologies = value.into_text(field)?,
            "liveUrl" => self.live_url = value.into_text(field)?,
            "repoUrl" => self.repo_url = value.into_text(field)?,
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_untagged_decoding() {
        let v: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, FieldValue::Flag(true));
        let v: FieldValue = serde_json::from_str("7").unwrap();
        assert_eq!(v, FieldValue::Number(7));
        let v: FieldValue = serde_json::from_str("\"Acme\"").unwrap();
        assert_eq!(v, FieldValue::Text("Acme".to_string()));
    }

    #[test]
    fn test_experience_rejects_unknown_field() {
        let mut e = Experience::blank(EntryId(1));
        let err = e.set_field("salary", "100".into()).unwrap_err();
        assert!(matches!(err, FieldError::UnknownField { .. }));
        assert_eq!(e, Experience::blank(EntryId(1)));
    }

    #[test]
    fn test_current_flag_accepts_bool_and_text() {
        let mut e = Experience::blank(EntryId(1));
        e.set_field("current", true.into()).unwrap();
        assert!(e.current);
        e.set_field("current", "false".into()).unwrap();
        assert!(!e.current);
        assert!(e.set_field("current", 3i64.into()).is_err());
    }

    #[test]
    fn test_skill_level_is_clamped() {
        let mut s = Skill::blank(EntryId(1));
        assert_eq!(s.level, 5);
        s.set_field("level", 42i64.into()).unwrap();
        assert_eq!(s.level, 10);
        s.set_field("level", "0".into()).unwrap();
        assert_eq!(s.level, 1);
        assert!(s.set_field("level", "high".into()).is_err());
    }

    #[test]
    fn test_language_proficiency_parses_tier() {
        let mut l = Language::blank(EntryId(2));
        l.set_field("proficiency", "Fluent".into()).unwrap();
        assert_eq!(l.proficiency, Proficiency::Fluent);
        assert!(matches!(
            l.set_field("proficiency", "guru".into()),
            Err(FieldError::UnknownName(_))
        ));
    }

    #[test]
    fn test_text_field_rejects_number() {
        let mut p = Project::blank(EntryId(1));
        assert!(matches!(
            p.set_field("name", 5i64.into()),
            Err(FieldError::InvalidValue { .. })
        ));
    }
}
