//! Per-step validation rules. Pure reads of the document; nothing here mutates.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::models::resume::{ResumeDocument, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL};
use crate::templates::{Section, SectionSet};
use crate::wizard::Step;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles");
}

/// One failed rule, addressed by a dotted/indexed field path such as
/// `personalInfo.email` or `experience[1].company`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub fn is_valid_email(s: &str) -> bool {
    EMAIL.is_match(s.trim())
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Collects every issue for `step`. Empty means the step is valid.
pub fn validate_step(step: Step, doc: &ResumeDocument, sections: SectionSet) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    match step {
        Step::PersonalInfo => personal_info(doc, &mut issues),
        Step::Education => education(doc, &mut issues),
        Step::Experience => experience(doc, &mut issues),
        Step::SkillsExtras => skills_and_extras(doc, sections, &mut issues),
        Step::Projects => {
            if sections.contains(Section::Projects) {
                projects(doc, &mut issues)
            }
        }
    }
    issues
}

fn personal_info(doc: &ResumeDocument, issues: &mut Vec<FieldIssue>) {
    let info = &doc.personal_info;
    if blank(&info.full_name) {
        issues.push(FieldIssue::new("personalInfo.fullName", "Full name is required"));
    }
    if blank(&info.email) {
        issues.push(FieldIssue::new("personalInfo.email", "Email is required"));
    } else if !is_valid_email(&info.email) {
        issues.push(FieldIssue::new("personalInfo.email", "Enter a valid email address"));
    }
    if blank(&info.phone) {
        issues.push(FieldIssue::new("personalInfo.phone", "Phone is required"));
    }
    if blank(&info.location) {
        issues.push(FieldIssue::new("personalInfo.location", "Location is required"));
    }
}

fn education(doc: &ResumeDocument, issues: &mut Vec<FieldIssue>) {
    if doc.education.is_empty() {
        issues.push(FieldIssue::new("education", "Add at least one education entry"));
        return;
    }
    for (i, e) in doc.education.iter().enumerate() {
        let at = |f: &str| format!("education[{i}].{f}");
        if blank(&e.school) {
            issues.push(FieldIssue::new(at("school"), "School is required"));
        }
        if blank(&e.degree) {
            issues.push(FieldIssue::new(at("degree"), "Degree is required"));
        }
        if blank(&e.start_date) {
            issues.push(FieldIssue::new(at("startDate"), "Start date is required"));
        }
        if blank(&e.end_date) && !e.current {
            issues.push(FieldIssue::new(
                at("endDate"),
                "End date is required unless you are currently studying here",
            ));
        }
    }
}

fn experience(doc: &ResumeDocument, issues: &mut Vec<FieldIssue>) {
    if doc.experience.is_empty() {
        issues.push(FieldIssue::new("experience", "Add at least one position"));
        return;
    }
    for (i, e) in doc.experience.iter().enumerate() {
        let at = |f: &str| format!("experience[{i}].{f}");
        if blank(&e.company) {
            issues.push(FieldIssue::new(at("company"), "Company is required"));
        }
        if blank(&e.position) {
            issues.push(FieldIssue::new(at("position"), "Position is required"));
        }
        if blank(&e.start_date) {
            issues.push(FieldIssue::new(at("startDate"), "Start date is required"));
        }
        if blank(&e.end_date) && !e.current {
            issues.push(FieldIssue::new(
                at("endDate"),
                "End date is required unless this is your current role",
            ));
        }
        if blank(&e.description) {
            issues.push(FieldIssue::new(at("description"), "Describe what you did in this role"));
        }
    }
}

fn skills_and_extras(doc: &ResumeDocument, sections: SectionSet, issues: &mut Vec<FieldIssue>) {
    if doc.skills.is_empty() {
        issues.push(FieldIssue::new("skills", "Add at least one skill"));
    }
    for (i, s) in doc.skills.iter().enumerate() {
        if blank(&s.name) {
            issues.push(FieldIssue::new(format!("skills[{i}].name"), "Skill name is required"));
        }
        if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&s.level) {
            issues.push(FieldIssue::new(
                format!("skills[{i}].level"),
                format!("Level must be between {MIN_SKILL_LEVEL} and {MAX_SKILL_LEVEL}"),
            ));
        }
    }
    if sections.contains(Section::Tools) {
        for (i, t) in doc.tools.iter().enumerate() {
            if blank(&t.name) {
                issues.push(FieldIssue::new(format!("tools[{i}].name"), "Tool name is required"));
            }
        }
    }
    if sections.contains(Section::Languages) {
        for (i, l) in doc.languages.iter().enumerate() {
            if blank(&l.name) {
                issues.push(FieldIssue::new(
                    format!("languages[{i}].name"),
                    "Language name is required",
                ));
            }
        }
    }
    if sections.contains(Section::Certifications) {
        for (i, c) in doc.certifications.iter().enumerate() {
            if blank(&c.name) {
                issues.push(FieldIssue::new(
                    format!("certifications[{i}].name"),
                    "Certification name is required",
                ));
            }
            if blank(&c.issuer) {
                issues.push(FieldIssue::new(
                    format!("certifications[{i}].issuer"),
                    "Issuer is required",
                ));
            }
        }
    }
}

fn projects(doc: &ResumeDocument, issues: &mut Vec<FieldIssue>) {
    for (i, p) in doc.projects.iter().enumerate() {
        if blank(&p.name) {
            issues.push(FieldIssue::new(format!("projects[{i}].name"), "Project name is required"));
        }
        if blank(&p.description) {
            issues.push(FieldIssue::new(
                format!("projects[{i}].description"),
                "Project description is required",
            ));
        }
    }
}
