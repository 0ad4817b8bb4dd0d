//! Preview color themes.
//!
//! Themes only affect how the preview is styled; they are chosen per session
//! and never stored with the document.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Accent palette for the preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Indigo,
    Emerald,
    Rose,
    Sky,
    Amber,
}

/// Style tokens a renderer applies for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    /// Header accent bar.
    pub bar: &'static str,
    /// Skill chip background/text/border.
    pub chip: &'static str,
    /// Section heading text.
    pub heading: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Indigo,
        Theme::Emerald,
        Theme::Rose,
        Theme::Sky,
        Theme::Amber,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Indigo => "indigo",
            Self::Emerald => "emerald",
            Self::Rose => "rose",
            Self::Sky => "sky",
            Self::Amber => "amber",
        }
    }

    /// Resolves a theme name; unknown names fall back to [`Theme::Indigo`].
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == normalized)
            .unwrap_or_default()
    }

    pub fn palette(self) -> ThemePalette {
        match self {
            Self::Indigo => ThemePalette {
                bar: "bg-indigo-600",
                chip: "bg-indigo-50 text-indigo-700 border-indigo-200",
                heading: "text-indigo-700",
            },
            Self::Emerald => ThemePalette {
                bar: "bg-emerald-600",
                chip: "bg-emerald-50 text-emerald-700 border-emerald-200",
                heading: "text-emerald-700",
            },
            Self::Rose => ThemePalette {
                bar: "bg-rose-600",
                chip: "bg-rose-50 text-rose-700 border-rose-200",
                heading: "text-rose-700",
            },
            Self::Sky => ThemePalette {
                bar: "bg-sky-600",
                chip: "bg-sky-50 text-sky-700 border-sky-200",
                heading: "text-sky-700",
            },
            // Amber bar is one shade lighter than the rest.
            Self::Amber => ThemePalette {
                bar: "bg-amber-500",
                chip: "bg-amber-50 text-amber-700 border-amber-200",
                heading: "text-amber-700",
            },
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
