//! In-memory resume data store.
//!
//! Owns the [`ResumeDocument`] of one editing session together with one id
//! counter per collection. Mutations are synchronous and never fail on valid
//! input; malformed field names or value shapes are rejected before anything is
//! written.

pub mod fields;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::models::resume::{Collection, EntryId, Photo, ResumeDocument, UnknownName};

pub use fields::{Entry, FieldError, FieldValue};

// ────────────────────────────────────────────────────────────────────────────
// Scalar fields
// ────────────────────────────────────────────────────────────────────────────

/// Free-text fields outside the entry collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    FullName,
    Title,
    Email,
    Phone,
    Location,
    Linkedin,
    Github,
    Website,
    Summary,
}

impl ScalarField {
    pub const ALL: [ScalarField; 9] = [
        ScalarField::FullName,
        ScalarField::Title,
        ScalarField::Email,
        ScalarField::Phone,
        ScalarField::Location,
        ScalarField::Linkedin,
        ScalarField::Github,
        ScalarField::Website,
        ScalarField::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarField::FullName => "fullName",
            ScalarField::Title => "title",
            ScalarField::Email => "email",
            ScalarField::Phone => "phone",
            ScalarField::Location => "location",
            ScalarField::Linkedin => "linkedin",
            ScalarField::Github => "github",
            ScalarField::Website => "website",
            ScalarField::Summary => "summary",
        }
    }
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarField::Summary => f.write_str("summary"),
            other => write!(f, "personalInfo.{}", other.as_str()),
        }
    }
}

impl FromStr for ScalarField {
    type Err = UnknownName;

    /// Accepts `fullName` as well as `personalInfo.fullName`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("personalInfo.").unwrap_or(s);
        ScalarField::ALL
            .into_iter()
            .filter(|f| *f != ScalarField::Summary || name == s)
            .find(|f| f.as_str() == name)
            .ok_or_else(|| UnknownName::new("field", s))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

/// The document plus the bookkeeping needed to mutate it.
#[derive(Debug, Clone, Default)]
pub struct ResumeStore {
    doc: ResumeDocument,
    /// Last id handed out per collection. Ids are never reused, even after removal.
    last_ids: BTreeMap<Collection, u64>,
    revision: u64,
}

/// Result of `add_entry`, for callers that want the fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddedEntry {
    pub collection: Collection,
    pub id: EntryId,
}

impl ResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.doc
    }

    /// Counts successful mutations; bumps even when a value is rewritten unchanged.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn update(&mut self, field: ScalarField, value: impl Into<String>) {
        let value = value.into();
        let info = &mut self.doc.personal_info;
        let slot = match field {
            ScalarField::FullName => &mut info.full_name,
            ScalarField::Title => &mut info.title,
            ScalarField::Email => &mut info.email,
            ScalarField::Phone => &mut info.phone,
            ScalarField::Location => &mut info.location,
            ScalarField::Linkedin => &mut info.linkedin,
            ScalarField::Github => &mut info.github,
            ScalarField::Website => &mut info.website,
            ScalarField::Summary => &mut self.doc.summary,
        };
        *slot = value;
        self.touch();
        debug!(%field, revision = self.revision, "scalar field updated");
    }

    pub fn set_photo(&mut self, photo: Option<Photo>) {
        self.doc.personal_info.photo = photo;
        self.touch();
    }

    /// Appends a blank entry with a fresh id.
    pub fn add_entry(&mut self, collection: Collection) -> AddedEntry {
        let id = self.next_id(collection);
        match collection {
            Collection::Experience => push_blank(&mut self.doc.experience, id),
            Collection::Education => push_blank(&mut self.doc.education, id),
            Collection::Skills => push_blank(&mut self.doc.skills, id),
            Collection::Tools => push_blank(&mut self.doc.tools, id),
            Collection::Languages => push_blank(&mut self.doc.languages, id),
            Collection::Certifications => push_blank(&mut self.doc.certifications, id),
            Collection::Projects => push_blank(&mut self.doc.projects, id),
        }
        self.touch();
        debug!(%collection, %id, "entry added");
        AddedEntry { collection, id }
    }

    /// Replaces one field of the entry with `id`.
    ///
    /// Returns `Ok(false)` when no such entry exists (nothing changes). Field
    /// names and value shapes are checked either way.
    pub fn update_entry(
        &mut self,
        collection: Collection,
        id: EntryId,
        field: &str,
        value: FieldValue,
    ) -> Result<bool, FieldError> {
        let found = match collection {
            Collection::Experience => update_in(&mut self.doc.experience, id, field, value),
            Collection::Education => update_in(&mut self.doc.education, id, field, value),
            Collection::Skills => update_in(&mut self.doc.skills, id, field, value),
            Collection::Tools => update_in(&mut self.doc.tools, id, field, value),
            Collection::Languages => update_in(&mut self.doc.languages, id, field, value),
            Collection::Certifications => {
                update_in(&mut self.doc.certifications, id, field, value)
            }
            Collection::Projects => update_in(&mut self.doc.projects, id, field, value),
        }?;
        if found {
            self.touch();
        }
        Ok(found)
    }

    /// Filters the entry out. Returns whether anything was removed.
    pub fn remove_entry(&mut self, collection: Collection, id: EntryId) -> bool {
        let removed = match collection {
            Collection::Experience => remove_from(&mut self.doc.experience, id),
            Collection::Education => remove_from(&mut self.doc.education, id),
            Collection::Skills => remove_from(&mut self.doc.skills, id),
            Collection::Tools => remove_from(&mut self.doc.tools, id),
            Collection::Languages => remove_from(&mut self.doc.languages, id),
            Collection::Certifications => remove_from(&mut self.doc.certifications, id),
            Collection::Projects => remove_from(&mut self.doc.projects, id),
        };
        if removed {
            self.touch();
            debug!(%collection, %id, "entry removed");
        }
        removed
    }

    fn next_id(&mut self, collection: Collection) -> EntryId {
        let last = self.last_ids.entry(collection).or_insert(0);
        *last += 1;
        EntryId(*last)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

fn push_blank<E: Entry>(entries: &mut Vec<E>, id: EntryId) {
    entries.push(E::blank(id));
}

fn update_in<E: Entry>(
    entries: &mut [E],
    id: EntryId,
    field: &str,
    value: FieldValue,
) -> Result<bool, FieldError> {
    match entries.iter_mut().find(|e| e.id() == id) {
        Some(entry) => {
            entry.set_field(field, value)?;
            Ok(true)
        }
        None => {
            // Absent id is a no-op, but the field name and value shape still apply.
            E::blank(id).set_field(field, value)?;
            Ok(false)
        }
    }
}

fn remove_from<E: Entry>(entries: &mut Vec<E>, id: EntryId) -> bool {
    let before = entries.len();
    entries.retain(|e| e.id() != id);
    entries.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn store_with_experience(n: usize) -> (ResumeStore, Vec<EntryId>) {
        let mut store = ResumeStore::new();
        let ids = (0..n)
            .map(|i| {
                let added = store.add_entry(Collection::Experience);
                store
                    .update_entry(
                        Collection::Experience,
                        added.id,
                        "company",
                        format!("Company {i}").into(),
                    )
                    .unwrap();
                added.id
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn test_scalar_field_parse_accepts_prefixed_names() {
        assert_eq!("fullName".parse::<ScalarField>().unwrap(), ScalarField::FullName);
        assert_eq!(
            "personalInfo.email".parse::<ScalarField>().unwrap(),
            ScalarField::Email
        );
        assert_eq!("summary".parse::<ScalarField>().unwrap(), ScalarField::Summary);
        assert!("personalInfo.summary".parse::<ScalarField>().is_err());
        assert!("nickname".parse::<ScalarField>().is_err());
    }

    #[test]
    fn test_update_replaces_scalar_value() {
        let mut store = ResumeStore::new();
        store.update(ScalarField::FullName, "Ada Lovelace");
        store.update(ScalarField::Summary, "Analyst");
        store.update(ScalarField::FullName, "Ada King");
        assert_eq!(store.document().personal_info.full_name, "Ada King");
        assert_eq!(store.document().summary, "Analyst");
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn test_add_entry_allocates_fresh_ids_even_after_removal() {
        let mut store = ResumeStore::new();
        let mut seen = HashSet::new();
        for _ in 0..5 {
            let a = store.add_entry(Collection::Skills);
            assert!(seen.insert(a.id), "id {} reused", a.id);
            store.remove_entry(Collection::Skills, a.id);
        }
        let a = store.add_entry(Collection::Skills);
        assert!(seen.insert(a.id));
    }

    #[test]
    fn test_id_counters_are_per_collection() {
        let mut store = ResumeStore::new();
        let e = store.add_entry(Collection::Experience);
        let s = store.add_entry(Collection::Skills);
        assert_eq!(e.id, EntryId(1));
        assert_eq!(s.id, EntryId(1));
    }

    #[test]
    fn test_add_entry_appends_blank_entry() {
        let mut store = ResumeStore::new();
        let a = store.add_entry(Collection::Projects);
        let p = &store.document().projects[0];
        assert_eq!(p.id, a.id);
        assert!(p.name.is_empty());
        assert!(p.live_url.is_empty());
    }

    #[test]
    fn test_remove_entry_keeps_order_and_values_of_others() {
        let (mut store, ids) = store_with_experience(4);
        assert!(store.remove_entry(Collection::Experience, ids[1]));

        let remaining = &store.document().experience;
        assert_eq!(
            remaining.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![ids[0], ids[2], ids[3]]
        );
        assert_eq!(
            remaining.iter().map(|e| e.company.as_str()).collect::<Vec<_>>(),
            vec!["Company 0", "Company 2", "Company 3"]
        );
        assert!(!remaining.iter().any(|e| e.id == ids[1]));
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let (mut store, _) = store_with_experience(2);
        let before = store.document().clone();
        let rev = store.revision();
        assert!(!store.remove_entry(Collection::Experience, EntryId(99)));
        assert_eq!(store.document(), &before);
        assert_eq!(store.revision(), rev);
    }

    #[test]
    fn test_update_entry_absent_id_is_noop() {
        let (mut store, _) = store_with_experience(1);
        let before = store.document().clone();
        let found = store
            .update_entry(Collection::Experience, EntryId(42), "company", "X".into())
            .unwrap();
        assert!(!found);
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn test_update_entry_targets_only_matching_entry() {
        let (mut store, ids) = store_with_experience(3);
        store
            .update_entry(Collection::Experience, ids[2], "current", true.into())
            .unwrap();
        let doc = store.document();
        assert!(!doc.experience[0].current);
        assert!(!doc.experience[1].current);
        assert!(doc.experience[2].current);
    }

    #[test]
    fn test_update_entry_bad_field_leaves_document_untouched() {
        let (mut store, ids) = store_with_experience(1);
        let before = store.document().clone();
        let err = store
            .update_entry(Collection::Experience, ids[0], "school", "MIT".into())
            .unwrap_err();
        assert!(matches!(err, FieldError::UnknownField { .. }));
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn test_update_entry_absent_id_still_rejects_unknown_field() {
        let (mut store, _) = store_with_experience(1);
        let before = store.document().clone();
        let rev = store.revision();
        let err = store
            .update_entry(Collection::Experience, EntryId(99), "salary", "x".into())
            .unwrap_err();
        assert!(matches!(
            err,
            FieldError::UnknownField {
                collection: Collection::Experience,
                ..
            }
        ));
        let err = store
            .update_entry(Collection::Experience, EntryId(99), "current", 7i64.into())
            .unwrap_err();
        assert!(matches!(err, FieldError::InvalidValue { .. }));
        assert_eq!(store.document(), &before);
        assert_eq!(store.revision(), rev);
    }
}
