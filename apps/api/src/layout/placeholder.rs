//! Hard-coded sample content shown in the preview for empty sections.

use crate::models::resume::{
    Certification, Education, EntryId, Experience, Language, Proficiency, Project, Skill, Tool,
};

pub const NAME: &str = "Your Name";
pub const TITLE: &str = "Professional Title";
pub const CONTACT: [&str; 3] = ["you@example.com", "(555) 123-4567", "City, State"];

pub const SUMMARY: &str = "Results-driven professional with a track record of delivering \
measurable impact. Summarise your strengths, focus areas and what you are looking for next \
in two or three sentences.";

pub fn experience() -> Vec<Experience> {
    vec![
        Experience {
            id: EntryId(0),
            company: "Company Name".to_string(),
            position: "Job Title".to_string(),
            location: "City, State".to_string(),
            start_date: "Jan 2021".to_string(),
            end_date: String::new(),
            current: true,
            description: "Led a key initiative that improved a core metric by 25%\n\
                          Collaborated with cross-functional teams to ship features on schedule\n\
                          Mentored junior colleagues and improved team processes"
                .to_string(),
        },
        Experience {
            id: EntryId(0),
            company: "Previous Company".to_string(),
            position: "Previous Role".to_string(),
            location: "City, State".to_string(),
            start_date: "Jun 2018".to_string(),
            end_date: "Dec 2020".to_string(),
            current: false,
            description: "Describe an accomplishment with a concrete result\n\
                          Highlight a responsibility relevant to the role you want"
                .to_string(),
        },
    ]
}

pub fn education() -> Vec<Education> {
    vec![Education {
        id: EntryId(0),
        school: "University Name".to_string(),
        degree: "Bachelor of Science".to_string(),
        field: "Field of Study".to_string(),
        location: "City, State".to_string(),
        start_date: "2014".to_string(),
        end_date: "2018".to_string(),
        current: false,
        honors: "Honors or GPA".to_string(),
    }]
}

pub fn skills() -> Vec<Skill> {
    [("Skill One", 9), ("Skill Two", 7), ("Skill Three", 6), ("Skill Four", 4)]
        .into_iter()
        .map(|(name, level)| Skill {
            id: EntryId(0),
            name: name.to_string(),
            level,
        })
        .collect()
}

pub fn tools() -> Vec<Tool> {
    ["Tool One", "Tool Two", "Tool Three"]
        .into_iter()
        .map(|name| Tool {
            id: EntryId(0),
            name: name.to_string(),
        })
        .collect()
}

pub fn languages() -> Vec<Language> {
    vec![
        Language {
            id: EntryId(0),
            name: "English".to_string(),
            proficiency: Proficiency::Native,
        },
        Language {
            id: EntryId(0),
            name: "Spanish".to_string(),
            proficiency: Proficiency::Intermediate,
        },
    ]
}

pub fn certifications() -> Vec<Certification> {
    vec![Certification {
        id: EntryId(0),
        name: "Certification Name".to_string(),
        issuer: "Issuing Organization".to_string(),
        date: "2022".to_string(),
    }]
}

pub fn projects() -> Vec<Project> {
    vec![Project {
        id: EntryId(0),
        name: "Project Name".to_string(),
        description: "What the project does and the problem it solves\n\
                      Your role and a measurable outcome"
            .to_string(),
        technologies: "Technology A, Technology B".to_string(),
        live_url: "example.com".to_string(),
        repo_url: String::new(),
    }]
}
