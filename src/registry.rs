//! Template catalog and active-variant selection.
//!
//! The catalog is fixed at compile time. Selection state is owned by a
//! [`TemplateRegistry`] value rather than a global, and the active id is
//! passed explicitly to the layout engine.

use crate::error::{Error, Result};
use crate::model::{Category, LayoutVariant};
use std::collections::HashSet;
use std::str::FromStr;

/// Id of the variant that is active at start-up and used for fallback.
pub const DEFAULT_VARIANT: &str = "template-01";

const fn variant(
    id: &'static str,
    display_name: &'static str,
    category: Category,
    style_ref: &'static str,
) -> LayoutVariant {
    LayoutVariant {
        id,
        display_name,
        category,
        style_ref,
    }
}

/// Every available template, in gallery order.
pub static TEMPLATES: [LayoutVariant; 20] = [
    variant("template-01", "Minimal Classic", Category::Minimal, "css/templates/template-01-minimal.css"),
    variant("template-02", "Modern Professional", Category::Modern, "css/templates/template-02-modern.css"),
    variant("template-03", "Executive Corporate", Category::Corporate, "css/templates/template-03-executive.css"),
    variant("template-04", "Creative Designer", Category::Creative, "css/templates/template-04-creative.css"),
    variant("template-05", "ATS-Friendly", Category::Ats, "css/templates/template-05-ats.css"),
    variant("template-06", "Compact One Page", Category::Minimal, "css/templates/template-06-compact.css"),
    variant("template-07", "Sidebar Layout", Category::Modern, "css/templates/template-07-sidebar.css"),
    variant("template-08", "Two Column Clean", Category::Modern, "css/templates/template-08-two-column.css"),
    variant("template-09", "Elegant Serif", Category::Creative, "css/templates/template-09-serif.css"),
    variant("template-10", "Dark Header Accent", Category::Corporate, "css/templates/template-10-dark-header.css"),
    variant("template-11", "Timeline Style", Category::Creative, "css/templates/template-11-timeline.css"),
    variant("template-12", "Fresher Format", Category::Minimal, "css/templates/template-12-fresher.css"),
    variant("template-13", "Technical Resume", Category::Tech, "css/templates/template-13-technical.css"),
    variant("template-14", "Business Analyst", Category::Corporate, "css/templates/template-14-business-analyst.css"),
    variant("template-15", "Software Developer", Category::Tech, "css/templates/template-15-software-dev.css"),
    variant("template-16", "Marketing Pro", Category::Creative, "css/templates/template-16-marketing.css"),
    variant("template-17", "Academic CV", Category::Ats, "css/templates/template-17-academic.css"),
    variant("template-18", "Simple Minimal", Category::Minimal, "css/templates/template-18-simple.css"),
    variant("template-19", "Bold Name Header", Category::Modern, "css/templates/template-19-bold-header.css"),
    variant("template-20", "Premium Gold", Category::Creative, "css/templates/template-20-premium.css"),
];

/// Look up a variant by id.
pub fn find_variant(id: &str) -> Option<&'static LayoutVariant> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// The default variant.
pub fn default_variant() -> &'static LayoutVariant {
    &TEMPLATES[0]
}

/// Gallery filter; `All` matches every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Check if a variant passes the filter.
    pub fn matches(&self, variant: &LayoutVariant) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => variant.category == *category,
        }
    }

    /// Filter id, `all` or a category id.
    pub fn id(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.id(),
        }
    }

    /// Tab label.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Templates",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    /// Every filter tab in display order.
    pub fn tabs() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

/// Holds the single active variant.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    active: &'static LayoutVariant,
}

impl TemplateRegistry {
    /// Create a registry with the default variant active.
    pub fn new() -> Self {
        Self {
            active: default_variant(),
        }
    }

    /// All variants.
    pub fn all(&self) -> &'static [LayoutVariant] {
        &TEMPLATES
    }

    /// Variants passing a filter, in catalog order.
    pub fn filter(&self, filter: CategoryFilter) -> Vec<&'static LayoutVariant> {
        TEMPLATES.iter().filter(|t| filter.matches(t)).collect()
    }

    /// The active variant.
    pub fn active(&self) -> &'static LayoutVariant {
        self.active
    }

    /// Id of the active variant.
    pub fn active_id(&self) -> &'static str {
        self.active.id
    }

    /// Make `id` the active variant.
    ///
    /// Returns `Ok(true)` when the selection changed and `Ok(false)` when
    /// `id` was already active. An unknown id leaves the selection alone.
    pub fn set_active(&mut self, id: &str) -> Result<bool> {
        let variant = find_variant(id).ok_or_else(|| Error::UnknownVariant(id.to_string()))?;
        let changed = self.active.id != variant.id;
        self.active = variant;
        log::debug!("Active template: {} (changed: {})", variant.id, changed);
        Ok(changed)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks which stylesheets have already been handed to the host.
#[derive(Debug, Clone, Default)]
pub struct StyleLoader {
    loaded: HashSet<&'static str>,
}

impl StyleLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the variant's style ref the first time it is requested, `None`
    /// afterwards.
    pub fn ensure(&mut self, variant: &LayoutVariant) -> Option<&'static str> {
        if self.loaded.insert(variant.style_ref) {
            Some(variant.style_ref)
        } else {
            None
        }
    }

    /// Number of stylesheets loaded so far.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}
