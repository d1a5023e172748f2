//! Layout variant metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Template categories used to group variants in a gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Minimal,
    Modern,
    Corporate,
    Creative,
    Tech,
    Ats,
}

impl Category {
    /// All categories in gallery tab order.
    pub const ALL: [Category; 6] = [
        Category::Minimal,
        Category::Modern,
        Category::Corporate,
        Category::Creative,
        Category::Tech,
        Category::Ats,
    ];

    /// Stable id, also used as the styling hook in markup.
    pub fn id(self) -> &'static str {
        match self {
            Category::Minimal => "minimal",
            Category::Modern => "modern",
            Category::Corporate => "corporate",
            Category::Creative => "creative",
            Category::Tech => "tech",
            Category::Ats => "ats",
        }
    }

    /// Human-readable tab label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Minimal => "Minimal",
            Category::Modern => "Modern",
            Category::Corporate => "Corporate",
            Category::Creative => "Creative",
            Category::Tech => "Technical",
            Category::Ats => "ATS-Friendly",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// One selectable template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutVariant {
    /// Unique key, e.g. `template-07`
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: Category,
    /// Stylesheet holding this variant's visual rules
    pub style_ref: &'static str,
}
