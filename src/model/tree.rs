//! The abstract document tree shared by every render adapter.
//!
//! The layout engine produces it; adapters only read it. Nothing in here
//! knows what a job or a degree is: sections are titled lists of generic
//! entries with a display hint.

use super::Category;
use serde::{Deserialize, Serialize};

/// Arrangement algorithm a variant uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutFamily {
    /// Single column
    Standard,
    /// Narrow sidebar next to a main column
    Sidebar,
    /// Full-width header and summary over two columns
    TwoColumn,
}

/// Where the header block sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPlacement {
    /// Centered above the content
    #[default]
    Top,
    /// Wrapped in a left-aligned group
    LeftAligned,
    /// Inside the sidebar stream
    Sidebar,
}

/// A labelled personal detail such as a date of birth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailLine {
    pub label: String,
    pub value: String,
}

/// The distinguished header node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderNode {
    pub name: String,
    /// Contact parts in display order
    pub contact_lines: Vec<String>,
    /// Encoded image handle
    pub image_ref: Option<String>,
    pub details: Vec<DetailLine>,
    pub placement: HeaderPlacement,
}

impl HeaderNode {
    /// Create a header with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact_lines: Vec::new(),
            image_ref: None,
            details: Vec::new(),
            placement: HeaderPlacement::Top,
        }
    }
}

/// How an adapter should present a section's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionDisplay {
    /// A single block of running text (entry description)
    Prose,
    /// Title/date line, optional subtitle and description per entry
    Entries,
    /// Short inline chips (entry title only)
    Tags,
    /// Bulleted list: bold title, subtitle and date as trailing detail
    List,
}

/// One item within a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryNode {
    pub title: String,
    pub subtitle: Option<String>,
    pub date_range: Option<String>,
    pub description: Option<String>,
}

impl EntryNode {
    /// Create an entry with a title only.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Create an entry that only carries running text.
    pub fn prose(text: impl Into<String>) -> Self {
        Self {
            description: Some(text.into()),
            ..Default::default()
        }
    }

    /// Set the subtitle; empty strings leave it unset.
    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = non_empty(subtitle);
        self
    }

    /// Set the date range.
    pub fn with_date_range(mut self, range: Option<String>) -> Self {
        self.date_range = range;
        self
    }

    /// Set the description; empty strings leave it unset.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = non_empty(description);
        self
    }

    /// All text carried by this entry, in reading order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str())
            .chain(self.subtitle.as_deref())
            .chain(self.date_range.as_deref())
            .chain(self.description.as_deref())
            .filter(|s| !s.is_empty())
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// A titled section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionNode {
    pub title: String,
    pub display: SectionDisplay,
    pub entries: Vec<EntryNode>,
}

impl SectionNode {
    /// Create a section.
    pub fn new(title: impl Into<String>, display: SectionDisplay, entries: Vec<EntryNode>) -> Self {
        Self {
            title: title.into(),
            display,
            entries,
        }
    }

    /// Entry titles in order.
    pub fn entry_titles(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.title.as_str()).collect()
    }
}

/// A region of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Main,
    FullWidth,
    Sidebar,
    Left,
    Right,
}

impl Region {
    /// Class hook for markup.
    pub fn class_name(self) -> &'static str {
        match self {
            Region::Main => "resume-main",
            Region::FullWidth => "resume-full",
            Region::Sidebar => "resume-sidebar",
            Region::Left => "resume-left",
            Region::Right => "resume-right",
        }
    }
}

/// An ordered run of sections placed in one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamNode {
    pub region: Region,
    pub sections: Vec<SectionNode>,
}

/// Output of the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTree {
    /// Variant the tree was laid out for (after fallback)
    pub variant_id: String,
    pub category: Category,
    pub family: LayoutFamily,
    pub header: HeaderNode,
    pub streams: Vec<StreamNode>,
}

impl DocumentTree {
    /// Get the stream for a region.
    pub fn stream(&self, region: Region) -> Option<&StreamNode> {
        self.streams.iter().find(|s| s.region == region)
    }

    /// All sections across streams, in stream order.
    pub fn sections(&self) -> impl Iterator<Item = &SectionNode> {
        self.streams.iter().flat_map(|s| s.sections.iter())
    }

    /// Find the first section with the given title.
    pub fn find_section(&self, title: &str) -> Option<&SectionNode> {
        self.sections().find(|s| s.title == title)
    }

    /// Regions containing a section with the given title.
    pub fn regions_of(&self, title: &str) -> Vec<Region> {
        self.streams
            .iter()
            .filter(|s| s.sections.iter().any(|sec| sec.title == title))
            .map(|s| s.region)
            .collect()
    }

    /// Total number of sections.
    pub fn section_count(&self) -> usize {
        self.sections().count()
    }

    /// Total number of entries across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections().map(|s| s.entries.len()).sum()
    }

    /// Whether the tree carries nothing beyond the header.
    pub fn is_header_only(&self) -> bool {
        self.section_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> DocumentTree {
        DocumentTree {
            variant_id: "template-08".into(),
            category: Category::Modern,
            family: LayoutFamily::TwoColumn,
            header: HeaderNode::new("Ada"),
            streams: vec![
                StreamNode {
                    region: Region::Left,
                    sections: vec![SectionNode::new(
                        "Experience",
                        SectionDisplay::Entries,
                        vec![EntryNode::titled("Analyst").with_subtitle("Engines Ltd")],
                    )],
                },
                StreamNode {
                    region: Region::Right,
                    sections: vec![SectionNode::new(
                        "Skills",
                        SectionDisplay::Tags,
                        vec![EntryNode::titled("Math"), EntryNode::titled("C++")],
                    )],
                },
            ],
        }
    }

    #[test]
    fn test_tree_queries() {
        let tree = sample_tree();
        assert_eq!(tree.section_count(), 2);
        assert_eq!(tree.entry_count(), 3);
        assert_eq!(tree.regions_of("Skills"), vec![Region::Right]);
        assert!(tree.stream(Region::Main).is_none());
        assert_eq!(
            tree.find_section("Skills").unwrap().entry_titles(),
            vec!["Math", "C++"]
        );
        assert!(!tree.is_header_only());
    }

    #[test]
    fn test_entry_builders_skip_empty() {
        let entry = EntryNode::titled("Engine")
            .with_subtitle("")
            .with_description("Difference engine notes");
        assert!(entry.subtitle.is_none());
        assert_eq!(
            entry.texts().collect::<Vec<_>>(),
            vec!["Engine", "Difference engine notes"]
        );
    }
}
