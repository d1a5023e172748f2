//! Rendering result with statistics.

use crate::model::{DocumentTree, SectionDisplay};
use serde::{Deserialize, Serialize};

/// Result of rendering a tree, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered markup
    pub content: String,

    /// Variant the tree was laid out for
    pub variant_id: String,

    /// Content statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, variant_id: impl Into<String>, stats: RenderStats) -> Self {
        Self {
            content,
            variant_id: variant_id.into(),
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics about the rendered tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of non-empty streams
    pub stream_count: u32,

    /// Number of sections
    pub section_count: u32,

    /// Number of entries across all sections
    pub entry_count: u32,

    /// Number of tag-style entries (skills)
    pub tag_count: u32,

    /// Number of images emitted
    pub image_count: u32,

    /// Approximate word count of user text (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count of user text (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a tree.
    pub fn from_tree(tree: &DocumentTree) -> Self {
        let mut stats = Self::new();
        stats.stream_count = tree.streams.len() as u32;

        stats.count_text(&tree.header.name);
        for line in &tree.header.contact_lines {
            stats.count_text(line);
        }
        for detail in &tree.header.details {
            stats.count_text(&detail.value);
        }

        for section in tree.sections() {
            stats.section_count += 1;
            stats.entry_count += section.entries.len() as u32;
            if section.display == SectionDisplay::Tags {
                stats.tag_count += section.entries.len() as u32;
            }
            for entry in &section.entries {
                for text in entry.texts() {
                    stats.count_text(text);
                }
            }
        }
        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_count_text() {
        let mut stats = RenderStats::new();
        stats.count_text("Analytical Engine notes");

        assert_eq!(stats.word_count, 3);
        assert_eq!(stats.char_count, 21);
    }

    #[test]
    fn test_stats_from_tree() {
        let mut record = crate::model::ResumeRecord::new();
        record.personal.full_name = "Ada Lovelace".into();
        record.skills = vec!["Math".into(), "C++".into()];

        let tree = crate::layout::layout(&record, "template-01");
        let stats = RenderStats::from_tree(&tree);
        assert_eq!(stats.section_count, 1);
        assert_eq!(stats.tag_count, 2);
        assert_eq!(stats.word_count, 4);
    }
}
