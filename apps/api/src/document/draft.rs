//! CV draft — the editable document model behind the builder form.
//!
//! Owned and passed explicitly; CRUD operations mutate in place and report whether the
//! targeted item existed.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::contact::extract_contact;

const SUMMARY_CHARS: usize = 500;
/// Date lines at or above this length are prose, not job headers.
const MAX_DATE_LINE_CHARS: usize = 50;
const DATE_LINE_PATTERN: &str = r"(?i)\b(20\d{2}|19\d{2}|Present|Current)\b";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceField {
    Title,
    Company,
    Date,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationField {
    School,
    Degree,
    Date,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvDraft {
    pub personal: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
}

fn date_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATE_LINE_PATTERN).expect("date line pattern is valid"))
}

impl CvDraft {
    /// Pre-fills a draft from extracted CV text.
    ///
    /// Short lines carrying a year or "Present"/"Current" are taken as job headers,
    /// titled by the line above them.
    pub fn from_text(text: &str) -> Self {
        let contact = extract_contact(text);
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let experience = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| {
                line.chars().count() < MAX_DATE_LINE_CHARS && date_line_regex().is_match(line)
            })
            .map(|(i, line)| ExperienceItem {
                id: Uuid::new_v4(),
                title: i
                    .checked_sub(1)
                    .and_then(|prev| lines.get(prev))
                    .unwrap_or(&"Job Role")
                    .to_string(),
                company: "Extracted from CV".to_string(),
                date: line.to_string(),
                description: "Description extracted from uploaded file.".to_string(),
            })
            .collect();

        let summary: String = text.chars().take(SUMMARY_CHARS).collect();

        CvDraft {
            personal: PersonalInfo {
                name: contact.name.unwrap_or_default(),
                email: contact.email.unwrap_or_default(),
                phone: contact.phone.unwrap_or_default(),
                ..PersonalInfo::default()
            },
            summary: summary.split_whitespace().collect::<Vec<_>>().join(" "),
            experience,
            education: Vec::new(),
        }
    }

    /// Appends an empty experience item and returns its id.
    pub fn add_experience(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.experience.push(ExperienceItem {
            id,
            title: String::new(),
            company: String::new(),
            date: String::new(),
            description: String::new(),
        });
        id
    }

    pub fn update_experience(&mut self, id: Uuid, field: ExperienceField, value: &str) -> bool {
        let Some(item) = self.experience.iter_mut().find(|x| x.id == id) else {
            return false;
        };
        let slot = match field {
            ExperienceField::Title => &mut item.title,
            ExperienceField::Company => &mut item.company,
            ExperienceField::Date => &mut item.date,
            ExperienceField::Description => &mut item.description,
        };
        *slot = value.to_string();
        true
    }

    pub fn remove_experience(&mut self, id: Uuid) -> bool {
        let before = self.experience.len();
        self.experience.retain(|x| x.id != id);
        self.experience.len() != before
    }

    pub fn add_education(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.education.push(EducationItem {
            id,
            school: String::new(),
            degree: String::new(),
            date: String::new(),
        });
        id
    }

    pub fn update_education(&mut self, id: Uuid, field: EducationField, value: &str) -> bool {
        let Some(item) = self.education.iter_mut().find(|x| x.id == id) else {
            return false;
        };
        let slot = match field {
            EducationField::School => &mut item.school,
            EducationField::Degree => &mut item.degree,
            EducationField::Date => &mut item.date,
        };
        *slot = value.to_string();
        true
    }

    pub fn remove_education(&mut self, id: Uuid) -> bool {
        let before = self.education.len();
        self.education.retain(|x| x.id != id);
        self.education.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CV: &str = "Jane Doe\n\
        jane@example.com\n\
        Staff Engineer\n\
        2019 - Present\n\
        Led the storage team through a zero-downtime migration to a new engine\n\
        Backend Developer\n\
        2015 - 2019\n";

    #[test]
    fn test_from_text_extracts_job_headers() {
        let draft = CvDraft::from_text(CV);
        assert_eq!(draft.experience.len(), 2);
        assert_eq!(draft.experience[0].title, "Staff Engineer");
        assert_eq!(draft.experience[0].date, "2019 - Present");
        assert_eq!(draft.experience[1].title, "Backend Developer");
        assert_eq!(draft.experience[1].company, "Extracted from CV");
    }

    #[test]
    fn test_from_text_fills_contact_and_summary() {
        let draft = CvDraft::from_text(CV);
        assert_eq!(draft.personal.name, "Jane Doe");
        assert_eq!(draft.personal.email, "jane@example.com");
        assert!(draft.summary.starts_with("Jane Doe jane@example.com Staff Engineer"));
        assert!(!draft.summary.contains('\n'));
    }

    #[test]
    fn test_date_on_first_line_uses_fallback_title() {
        let draft = CvDraft::from_text("2020 - Current\nsomething");
        assert_eq!(draft.experience[0].title, "Job Role");
    }

    #[test]
    fn test_long_lines_with_years_are_ignored() {
        let draft = CvDraft::from_text(
            "Name\nIn 2018 I shipped a payments platform used by millions of customers worldwide",
        );
        assert!(draft.experience.is_empty());
    }

    #[test]
    fn test_experience_crud() {
        let mut draft = CvDraft::default();
        let id = draft.add_experience();
        assert!(draft.update_experience(id, ExperienceField::Company, "Acme"));
        assert_eq!(draft.experience[0].company, "Acme");
        assert!(!draft.update_experience(Uuid::new_v4(), ExperienceField::Title, "x"));
        assert!(draft.remove_experience(id));
        assert!(!draft.remove_experience(id));
        assert!(draft.experience.is_empty());
    }

    #[test]
    fn test_education_crud() {
        let mut draft = CvDraft::default();
        let keep = draft.add_education();
        let drop = draft.add_education();
        assert!(draft.update_education(keep, EducationField::School, "MIT"));
        assert!(draft.remove_education(drop));
        assert_eq!(draft.education.len(), 1);
        assert_eq!(draft.education[0].school, "MIT");
    }

    #[test]
    fn test_field_names_deserialize_snake_case() {
        let field: ExperienceField = serde_json::from_str(r#""description""#).unwrap();
        assert_eq!(field, ExperienceField::Description);
    }
}
