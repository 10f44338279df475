// Guided, step-by-step editing flow. The wizard owns only navigation state;
// the document lives in the store and is passed in for validation.

pub mod validation;

use serde::Serialize;
use tracing::debug;

use crate::models::resume::ResumeDocument;
use crate::templates::{sections_for, Section, SectionSet, TemplateId};

pub use validation::{validate_step, FieldIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    PersonalInfo,
    Education,
    Experience,
    SkillsExtras,
    Projects,
}

impl Step {
    pub fn title(&self) -> &'static str {
        match self {
            Step::PersonalInfo => "Personal Info",
            Step::Education => "Education",
            Step::Experience => "Experience",
            Step::SkillsExtras => "Skills & Extras",
            Step::Projects => "Projects",
        }
    }

    /// Document sections edited on this step.
    #[cfg(test)]
    pub fn sections(&self) -> &'static [Section] {
        match self {
            Step::PersonalInfo => &[Section::Summary],
            Step::Education => &[Section::Education],
            Step::Experience => &[Section::Experience],
            Step::SkillsExtras => &[
                Section::Skills,
                Section::Tools,
                Section::Languages,
                Section::Certifications,
            ],
            Step::Projects => &[Section::Projects],
        }
    }
}

/// Steps shown for a template; projects is dropped when the template has none.
pub fn steps_for(sections: SectionSet) -> Vec<Step> {
    let mut steps = vec![
        Step::PersonalInfo,
        Step::Education,
        Step::Experience,
        Step::SkillsExtras,
    ];
    if sections.contains(Section::Projects) {
        steps.push(Step::Projects);
    }
    steps
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Transition {
    /// Now on `step` (possibly unchanged when already at the last step).
    Moved { step: usize },
    /// Validation failed; `focus` is the first invalid field.
    Blocked { step: usize, focus: String },
    /// `back` from the first step: the caller leaves the wizard.
    Exit,
    /// Every step validated.
    Completed,
}

#[derive(Debug, Clone)]
pub struct Wizard {
    sections: SectionSet,
    steps: Vec<Step>,
    current: usize,
    errors: Vec<FieldIssue>,
    completed: bool,
}

impl Wizard {
    pub fn new(template: TemplateId) -> Self {
        let sections = sections_for(template);
        Self {
            sections,
            steps: steps_for(sections),
            current: 0,
            errors: Vec::new(),
            completed: false,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Step {
        self.steps[self.current]
    }

    pub fn errors(&self) -> &[FieldIssue] {
        &self.errors
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Recomputes the step list for a new template and clamps the index.
    pub fn set_template(&mut self, template: TemplateId) {
        self.sections = sections_for(template);
        self.steps = steps_for(self.sections);
        self.current = self.current.min(self.steps.len() - 1);
        self.errors.clear();
    }

    pub fn next(&mut self, doc: &ResumeDocument) -> Transition {
        let issues = validate_step(self.current_step(), doc, self.sections);
        if let Some(first) = issues.first() {
            let focus = first.field.clone();
            debug!(step = ?self.current_step(), errors = issues.len(), "wizard step blocked");
            self.errors = issues;
            return Transition::Blocked {
                step: self.current,
                focus,
            };
        }
        self.errors.clear();
        self.current = (self.current + 1).min(self.steps.len() - 1);
        Transition::Moved { step: self.current }
    }

    pub fn back(&mut self) -> Transition {
        self.errors.clear();
        self.completed = false;
        if self.current == 0 {
            return Transition::Exit;
        }
        self.current -= 1;
        Transition::Moved { step: self.current }
    }

    pub fn jump_to(&mut self, step: usize) -> Transition {
        self.errors.clear();
        self.completed = false;
        self.current = step.min(self.steps.len() - 1);
        Transition::Moved { step: self.current }
    }

    /// Validates every step; on failure lands on the first invalid one.
    pub fn finish(&mut self, doc: &ResumeDocument) -> Transition {
        for (index, step) in self.steps.iter().enumerate() {
            let issues = validate_step(*step, doc, self.sections);
            if let Some(first) = issues.first() {
                let focus = first.field.clone();
                self.current = index;
                self.errors = issues;
                self.completed = false;
                return Transition::Blocked { step: index, focus };
            }
        }
        self.errors.clear();
        self.completed = true;
        Transition::Completed
    }

    pub fn view(&self) -> WizardView {
        WizardView {
            steps: self
                .steps
                .iter()
                .map(|s| StepView {
                    id: *s,
                    title: s.title(),
                })
                .collect(),
            current: self.current,
            is_first: self.current == 0,
            is_last: self.current + 1 == self.steps.len(),
            errors: self.errors.clone(),
            completed: self.completed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub id: Step,
    pub title: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub steps: Vec<StepView>,
    pub current: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub errors: Vec<FieldIssue>,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutStrategy;
    use crate::models::resume::{Education, EntryId, Experience, Skill};
    use crate::templates::list;
    use std::collections::BTreeSet;

    fn complete_document() -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        let info = &mut doc.personal_info;
        info.full_name = "Jane Doe".to_string();
        info.email = "jane@example.com".to_string();
        info.phone = "555-0100".to_string();
        info.location = "Austin, TX".to_string();
        doc.education.push(Education {
            id: EntryId(1),
            school: "State U".to_string(),
            degree: "BSc".to_string(),
            start_date: "2012".to_string(),
            end_date: "2016".to_string(),
            ..Default::default()
        });
        doc.experience.push(Experience {
            id: EntryId(1),
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: "2016".to_string(),
            current: true,
            description: "Built things".to_string(),
            ..Default::default()
        });
        doc.skills.push(Skill {
            id: EntryId(1),
            name: "Rust".to_string(),
            level: 8,
        });
        doc
    }

    #[test]
    fn test_steps_follow_template_sections() {
        assert_eq!(Wizard::new(TemplateId::Modern).steps().len(), 5);
        let corporate = Wizard::new(TemplateId::Corporate);
        assert_eq!(corporate.steps().len(), 4);
        assert!(!corporate.steps().contains(&Step::Projects));
    }

    #[test]
    fn test_next_blocks_and_focuses_first_invalid_field() {
        let mut wizard = Wizard::new(TemplateId::Classic);
        let mut doc = ResumeDocument::default();
        doc.personal_info.email = "jane@example.com".to_string();
        let t = wizard.next(&doc);
        assert_eq!(
            t,
            Transition::Blocked {
                step: 0,
                focus: "personalInfo.fullName".to_string()
            }
        );
        assert_eq!(wizard.current(), 0);
        assert_eq!(wizard.errors().len(), 3);
    }

    #[test]
    fn test_next_advances_and_clears_errors() {
        let mut wizard = Wizard::new(TemplateId::Classic);
        let doc = complete_document();
        wizard.next(&ResumeDocument::default());
        assert!(!wizard.errors().is_empty());
        assert_eq!(wizard.next(&doc), Transition::Moved { step: 1 });
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_next_is_capped_at_last_step() {
        let mut wizard = Wizard::new(TemplateId::Modern);
        let doc = complete_document();
        wizard.jump_to(4);
        assert_eq!(wizard.next(&doc), Transition::Moved { step: 4 });
    }

    #[test]
    fn test_back_from_first_step_exits() {
        let mut wizard = Wizard::new(TemplateId::Modern);
        assert_eq!(wizard.back(), Transition::Exit);
        wizard.jump_to(2);
        assert_eq!(wizard.back(), Transition::Moved { step: 1 });
    }

    #[test]
    fn test_jump_is_clamped() {
        let mut wizard = Wizard::new(TemplateId::Corporate);
        assert_eq!(wizard.jump_to(99), Transition::Moved { step: 3 });
    }

    #[test]
    fn test_switch_to_corporate_clamps_index_and_keeps_projects_data() {
        let mut wizard = Wizard::new(TemplateId::Modern);
        wizard.jump_to(4);
        let mut doc = complete_document();
        doc.projects.push(Default::default());
        wizard.set_template(TemplateId::Corporate);
        assert_eq!(wizard.current(), 3);
        assert_eq!(wizard.current_step(), Step::SkillsExtras);
        assert_eq!(doc.projects.len(), 1);
        // Blank project no longer blocks completion.
        assert_eq!(wizard.finish(&doc), Transition::Completed);
    }

    #[test]
    fn test_finish_lands_on_first_invalid_step() {
        let mut wizard = Wizard::new(TemplateId::Modern);
        let mut doc = complete_document();
        doc.experience.clear();
        doc.skills.clear();
        wizard.jump_to(4);
        let t = wizard.finish(&doc);
        assert_eq!(
            t,
            Transition::Blocked {
                step: 2,
                focus: "experience".to_string()
            }
        );
        assert_eq!(wizard.current_step(), Step::Experience);
        assert!(!wizard.completed());
    }

    #[test]
    fn test_finish_marks_completion() {
        let mut wizard = Wizard::new(TemplateId::Modern);
        let doc = complete_document();
        assert_eq!(wizard.finish(&doc), Transition::Completed);
        assert!(wizard.completed());
        assert!(wizard.view().completed);
    }

    #[test]
    fn test_validation_does_not_mutate() {
        let mut wizard = Wizard::new(TemplateId::Modern);
        let doc = ResumeDocument::default();
        let before = doc.clone();
        wizard.finish(&doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_wizard_and_layout_agree_on_sections() {
        for t in list() {
            let wizard = Wizard::new(t.id);
            let from_wizard: BTreeSet<Section> = wizard
                .steps()
                .iter()
                .flat_map(|s| s.sections().iter().copied())
                .filter(|s| sections_for(t.id).contains(*s))
                .collect();
            let from_layout: BTreeSet<Section> = LayoutStrategy::from(t.layout)
                .sections(sections_for(t.id))
                .into_iter()
                .collect();
            assert_eq!(from_wizard, from_layout, "template {}", t.id);
        }
    }
}
