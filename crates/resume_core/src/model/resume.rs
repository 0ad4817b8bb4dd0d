//! Resume document schema.
//!
//! # Responsibility
//! - Define the canonical document shape shared by editor and preview.
//! - Provide the built-in sample document and the "add" templates.
//! - Provide positional list primitives used by the document store.
//!
//! # Invariants
//! - List fields are never absent: missing keys and JSON `null` deserialize
//!   to empty sequences, missing/`null` strings to `""`.
//! - List order is display order; primitives never reorder survivors.

use super::address::{
    BasicsField, EducationField, ExperienceField, FieldPath, ListItem, ListName, ProjectField,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Contact and headline block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
}

impl Basics {
    pub fn field(&self, field: BasicsField) -> &str {
        match field {
            BasicsField::Name => &self.name,
            BasicsField::Title => &self.title,
            BasicsField::Email => &self.email,
            BasicsField::Phone => &self.phone,
            BasicsField::Location => &self.location,
            BasicsField::Website => &self.website,
            BasicsField::Summary => &self.summary,
        }
    }

    pub fn field_mut(&mut self, field: BasicsField) -> &mut String {
        match field {
            BasicsField::Name => &mut self.name,
            BasicsField::Title => &mut self.title,
            BasicsField::Email => &mut self.email,
            BasicsField::Phone => &mut self.phone,
            BasicsField::Location => &mut self.location,
            BasicsField::Website => &mut self.website,
            BasicsField::Summary => &mut self.summary,
        }
    }
}

/// One work experience entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    /// Free text, conventionally `YYYY-MM`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: String,
    /// Free text, conventionally `YYYY-MM` or `Present`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub end: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bullets: Vec<String>,
}

impl ExperienceEntry {
    /// Entry inserted by the "add experience" action.
    pub fn template() -> Self {
        Self {
            company: "Company".to_string(),
            role: "Role".to_string(),
            start: "2024-01".to_string(),
            end: "Present".to_string(),
            location: "City, Country".to_string(),
            bullets: vec!["Describe your impact".to_string()],
        }
    }

    pub fn field(&self, field: ExperienceField) -> &str {
        match field {
            ExperienceField::Company => &self.company,
            ExperienceField::Role => &self.role,
            ExperienceField::Start => &self.start,
            ExperienceField::End => &self.end,
            ExperienceField::Location => &self.location,
        }
    }

    pub fn field_mut(&mut self, field: ExperienceField) -> &mut String {
        match field {
            ExperienceField::Company => &mut self.company,
            ExperienceField::Role => &mut self.role,
            ExperienceField::Start => &mut self.start,
            ExperienceField::End => &mut self.end,
            ExperienceField::Location => &mut self.location,
        }
    }
}

/// One education entry. Education has no bullet list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub school: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
}

impl EducationEntry {
    /// Entry inserted by the "add education" action.
    pub fn template() -> Self {
        Self {
            school: "School".to_string(),
            degree: "Degree".to_string(),
            start: "2020".to_string(),
            end: "2024".to_string(),
            location: "City".to_string(),
        }
    }

    pub fn field(&self, field: EducationField) -> &str {
        match field {
            EducationField::School => &self.school,
            EducationField::Degree => &self.degree,
            EducationField::Start => &self.start,
            EducationField::End => &self.end,
            EducationField::Location => &self.location,
        }
    }

    pub fn field_mut(&mut self, field: EducationField) -> &mut String {
        match field {
            EducationField::School => &mut self.school,
            EducationField::Degree => &mut self.degree,
            EducationField::Start => &mut self.start,
            EducationField::End => &mut self.end,
            EducationField::Location => &mut self.location,
        }
    }
}

/// One project entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bullets: Vec<String>,
}

impl ProjectEntry {
    /// Entry inserted by the "add project" action.
    pub fn template() -> Self {
        Self {
            name: "Project".to_string(),
            link: "https://".to_string(),
            bullets: vec!["What did you build and why it matters".to_string()],
        }
    }

    pub fn field(&self, field: ProjectField) -> &str {
        match field {
            ProjectField::Name => &self.name,
            ProjectField::Link => &self.link,
        }
    }

    pub fn field_mut(&mut self, field: ProjectField) -> &mut String {
        match field {
            ProjectField::Name => &mut self.name,
            ProjectField::Link => &mut self.link,
        }
    }
}

/// Root resume document.
///
/// `Default` is the *empty* document (what a partial import falls back to
/// field by field). The first-run document is [`ResumeDocument::sample`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub basics: Basics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectEntry>,
}

impl ResumeDocument {
    /// Built-in document shown on first run or after unreadable storage.
    pub fn sample() -> Self {
        Self {
            basics: Basics {
                name: "Amit Kumar".to_string(),
                title: "FullStack Developer".to_string(),
                email: "amit@example.com".to_string(),
                phone: "+91 9523599608".to_string(),
                location: "Buxar, Bihar".to_string(),
                website: "https://your-portfolio.com".to_string(),
                summary: "Avid tech explorer with a keen interest in modern web development \
                          and building delightful user experiences."
                    .to_string(),
            },
            skills: ["JavaScript", "React", "Node.js", "MongoDB", "Tailwind CSS"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            experience: vec![ExperienceEntry {
                company: "Your Company".to_string(),
                role: "Full Stack Developer".to_string(),
                start: "2023-01".to_string(),
                end: "Present".to_string(),
                location: "Remote".to_string(),
                bullets: vec![
                    "Built responsive UI components with React and Tailwind.".to_string(),
                    "Improved performance with code-splitting and memoization.".to_string(),
                ],
            }],
            education: vec![EducationEntry {
                school: "Budge Budge Institute of Technology".to_string(),
                degree: "B.Tech in Computer Science Engineerig".to_string(),
                start: "2022".to_string(),
                end: "2026".to_string(),
                location: "Kolkata, West Bengal".to_string(),
            }],
            projects: vec![ProjectEntry {
                name: "Ayurveda AI".to_string(),
                link: "https://github.com/username/ayurveda-AI".to_string(),
                bullets: vec![
                    "Developed an AI-Chatbot specialized in Ayurvedic Knowledge".to_string(),
                ],
            }],
        }
    }

    /// Reads one scalar field. Returns `None` when an index does not resolve.
    pub fn field(&self, path: &FieldPath) -> Option<&str> {
        match *path {
            FieldPath::Basics(field) => Some(self.basics.field(field)),
            FieldPath::Skill { index } => self.skills.get(index).map(String::as_str),
            FieldPath::Experience { index, field } => {
                self.experience.get(index).map(|entry| entry.field(field))
            }
            FieldPath::Education { index, field } => {
                self.education.get(index).map(|entry| entry.field(field))
            }
            FieldPath::Project { index, field } => {
                self.projects.get(index).map(|entry| entry.field(field))
            }
            FieldPath::Bullet {
                list,
                entry,
                bullet,
            } => self
                .bullets(list, entry)
                .and_then(|bullets| bullets.get(bullet))
                .map(String::as_str),
        }
    }

    /// Mutable access to one scalar field; never creates missing entries.
    pub fn field_mut(&mut self, path: &FieldPath) -> Option<&mut String> {
        match *path {
            FieldPath::Basics(field) => Some(self.basics.field_mut(field)),
            FieldPath::Skill { index } => self.skills.get_mut(index),
            FieldPath::Experience { index, field } => self
                .experience
                .get_mut(index)
                .map(|entry| entry.field_mut(field)),
            FieldPath::Education { index, field } => self
                .education
                .get_mut(index)
                .map(|entry| entry.field_mut(field)),
            FieldPath::Project { index, field } => self
                .projects
                .get_mut(index)
                .map(|entry| entry.field_mut(field)),
            FieldPath::Bullet {
                list,
                entry,
                bullet,
            } => self
                .bullets_mut(list, entry)
                .and_then(|bullets| bullets.get_mut(bullet)),
        }
    }

    pub fn list_len(&self, list: ListName) -> usize {
        match list {
            ListName::Skills => self.skills.len(),
            ListName::Experience => self.experience.len(),
            ListName::Education => self.education.len(),
            ListName::Projects => self.projects.len(),
        }
    }

    /// Returns a copy of the element at `index`.
    pub fn item(&self, list: ListName, index: usize) -> Option<ListItem> {
        match list {
            ListName::Skills => self.skills.get(index).cloned().map(ListItem::Skill),
            ListName::Experience => self
                .experience
                .get(index)
                .cloned()
                .map(ListItem::Experience),
            ListName::Education => self.education.get(index).cloned().map(ListItem::Education),
            ListName::Projects => self.projects.get(index).cloned().map(ListItem::Project),
        }
    }

    /// Appends at the tail of the list the item belongs to.
    pub fn push_item(&mut self, item: ListItem) {
        match item {
            ListItem::Skill(skill) => self.skills.push(skill),
            ListItem::Experience(entry) => self.experience.push(entry),
            ListItem::Education(entry) => self.education.push(entry),
            ListItem::Project(entry) => self.projects.push(entry),
        }
    }

    /// Order-preserving removal. Returns `None` when `index` is out of range.
    pub fn remove_item(&mut self, list: ListName, index: usize) -> Option<ListItem> {
        if index >= self.list_len(list) {
            return None;
        }
        let removed = match list {
            ListName::Skills => ListItem::Skill(self.skills.remove(index)),
            ListName::Experience => ListItem::Experience(self.experience.remove(index)),
            ListName::Education => ListItem::Education(self.education.remove(index)),
            ListName::Projects => ListItem::Project(self.projects.remove(index)),
        };
        Some(removed)
    }

    /// Replaces the element at `index` in the list `item` belongs to.
    ///
    /// Returns the previous element, or gives `item` back in `Err` when
    /// `index` is out of range.
    pub fn replace_item(&mut self, index: usize, item: ListItem) -> Result<ListItem, ListItem> {
        fn swap<T>(slot: Option<&mut T>, value: T) -> Result<T, T> {
            match slot {
                Some(slot) => Ok(std::mem::replace(slot, value)),
                None => Err(value),
            }
        }

        match item {
            ListItem::Skill(skill) => swap(self.skills.get_mut(index), skill)
                .map(ListItem::Skill)
                .map_err(ListItem::Skill),
            ListItem::Experience(entry) => swap(self.experience.get_mut(index), entry)
                .map(ListItem::Experience)
                .map_err(ListItem::Experience),
            ListItem::Education(entry) => swap(self.education.get_mut(index), entry)
                .map(ListItem::Education)
                .map_err(ListItem::Education),
            ListItem::Project(entry) => swap(self.projects.get_mut(index), entry)
                .map(ListItem::Project)
                .map_err(ListItem::Project),
        }
    }

    /// Bullets of one experience/project entry. `None` for lists without
    /// bullets or an out-of-range entry.
    pub fn bullets(&self, list: ListName, entry: usize) -> Option<&[String]> {
        match list {
            ListName::Experience => self.experience.get(entry).map(|e| e.bullets.as_slice()),
            ListName::Projects => self.projects.get(entry).map(|e| e.bullets.as_slice()),
            ListName::Skills | ListName::Education => None,
        }
    }

    pub fn bullets_mut(&mut self, list: ListName, entry: usize) -> Option<&mut Vec<String>> {
        match list {
            ListName::Experience => self.experience.get_mut(entry).map(|e| &mut e.bullets),
            ListName::Projects => self.projects.get_mut(entry).map(|e| &mut e.bullets),
            ListName::Skills | ListName::Education => None,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
