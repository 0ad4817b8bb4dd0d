//! Typed addressing into a resume document.
//!
//! # Responsibility
//! - Name the top-level lists and the items they hold.
//! - Name every editable scalar field as a closed set of variants.
//! - Parse dotted paths (`basics.email`, `projects.1.bullets.0`) into those
//!   variants and render them back.
//!
//! # Invariants
//! - Parsing is purely syntactic; whether an index exists is decided against
//!   a concrete document by the store.
//! - `FieldPath::parse(p.to_string())` yields `p` again for every path.

use super::resume::{EducationEntry, ExperienceEntry, ProjectEntry};
use std::fmt::{Display, Formatter};

/// Top-level ordered lists of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListName {
    Skills,
    Experience,
    Education,
    Projects,
}

impl ListName {
    pub const ALL: [ListName; 4] = [
        ListName::Skills,
        ListName::Experience,
        ListName::Education,
        ListName::Projects,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Projects => "projects",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|list| list.as_str() == value)
    }

    /// Whether entries of this list carry a `bullets` sequence.
    pub fn has_bullets(self) -> bool {
        matches!(self, Self::Experience | Self::Projects)
    }
}

impl Display for ListName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a top-level list, tagged with its list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    Skill(String),
    Experience(ExperienceEntry),
    Education(EducationEntry),
    Project(ProjectEntry),
}

impl ListItem {
    /// The list this item can be stored in.
    pub fn list(&self) -> ListName {
        match self {
            Self::Skill(_) => ListName::Skills,
            Self::Experience(_) => ListName::Experience,
            Self::Education(_) => ListName::Education,
            Self::Project(_) => ListName::Projects,
        }
    }

    /// Placeholder item inserted by the "add" action of `list`.
    pub fn template(list: ListName) -> Self {
        match list {
            ListName::Skills => Self::Skill(NEW_SKILL_TEXT.to_string()),
            ListName::Experience => Self::Experience(ExperienceEntry::template()),
            ListName::Education => Self::Education(EducationEntry::template()),
            ListName::Projects => Self::Project(ProjectEntry::template()),
        }
    }
}

/// Text of a freshly added skill.
pub const NEW_SKILL_TEXT: &str = "New Skill";
/// Text of a freshly added bullet.
pub const NEW_BULLET_TEXT: &str = "New bullet";

macro_rules! field_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($key => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

field_enum!(
    /// Scalar fields of `basics`.
    BasicsField {
        Name => "name",
        Title => "title",
        Email => "email",
        Phone => "phone",
        Location => "location",
        Website => "website",
        Summary => "summary",
    }
);

field_enum!(
    /// Scalar fields of an experience entry.
    ExperienceField {
        Company => "company",
        Role => "role",
        Start => "start",
        End => "end",
        Location => "location",
    }
);

field_enum!(
    /// Scalar fields of an education entry.
    EducationField {
        School => "school",
        Degree => "degree",
        Start => "start",
        End => "end",
        Location => "location",
    }
);

field_enum!(
    /// Scalar fields of a project entry.
    ProjectField {
        Name => "name",
        Link => "link",
    }
);

/// Address of one editable string in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Basics(BasicsField),
    Skill {
        index: usize,
    },
    Experience {
        index: usize,
        field: ExperienceField,
    },
    Education {
        index: usize,
        field: EducationField,
    },
    Project {
        index: usize,
        field: ProjectField,
    },
    Bullet {
        list: ListName,
        entry: usize,
        bullet: usize,
    },
}

impl FieldPath {
    /// Parses a dotted path. Returns `None` for unknown names, non-numeric
    /// indices, wrong segment counts, or paths to non-scalar values.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('.').collect();
        match segments.as_slice() {
            ["basics", field] => BasicsField::parse(field).map(Self::Basics),
            ["skills", index] => Some(Self::Skill {
                index: parse_index(index)?,
            }),
            [list @ ("experience" | "projects"), entry, "bullets", bullet] => Some(Self::Bullet {
                list: ListName::parse(list)?,
                entry: parse_index(entry)?,
                bullet: parse_index(bullet)?,
            }),
            ["experience", index, field] => Some(Self::Experience {
                index: parse_index(index)?,
                field: ExperienceField::parse(field)?,
            }),
            ["education", index, field] => Some(Self::Education {
                index: parse_index(index)?,
                field: EducationField::parse(field)?,
            }),
            ["projects", index, field] => Some(Self::Project {
                index: parse_index(index)?,
                field: ProjectField::parse(field)?,
            }),
            _ => None,
        }
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basics(field) => write!(f, "basics.{}", field.as_str()),
            Self::Skill { index } => write!(f, "skills.{index}"),
            Self::Experience { index, field } => {
                write!(f, "experience.{index}.{}", field.as_str())
            }
            Self::Education { index, field } => write!(f, "education.{index}.{}", field.as_str()),
            Self::Project { index, field } => write!(f, "projects.{index}.{}", field.as_str()),
            Self::Bullet {
                list,
                entry,
                bullet,
            } => write!(f, "{list}.{entry}.bullets.{bullet}"),
        }
    }
}

fn parse_index(segment: &str) -> Option<usize> {
    // `usize::from_str` accepts a leading `+`; paths only use plain digits.
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
