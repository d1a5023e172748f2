//! Layout engine: `(record, variant id)` to [`DocumentTree`].
//!
//! Every variant belongs to one of three families. A family is described by
//! a static [`Arrangement`] table listing, per region, which sections go
//! there and in what order; a single [`arrange`] routine interprets the
//! table. Adding a family means adding a table, not another code path.
//!
//! # Example
//!
//! ```
//! use resumake::layout::layout;
//! use resumake::model::{LayoutFamily, ResumeRecord};
//!
//! let mut record = ResumeRecord::new();
//! record.personal.full_name = "Ada Lovelace".into();
//! record.skills = vec!["Math".into()];
//!
//! let tree = layout(&record, "template-08");
//! assert_eq!(tree.family, LayoutFamily::TwoColumn);
//! assert_eq!(tree.header.name, "Ada Lovelace");
//! ```

mod contact;
mod sections;

pub use contact::{
    address_line, contact_lines, detail_lines, display_name, CONTACT_SEPARATOR, PLACEHOLDER_NAME,
};
pub use sections::SectionKind;

use crate::model::{
    DocumentTree, HeaderNode, HeaderPlacement, LayoutFamily, LayoutVariant, Region, ResumeRecord,
    StreamNode,
};
use crate::registry::{default_variant, find_variant};
use SectionKind::*;

/// Declarative description of a layout family.
#[derive(Debug)]
pub struct Arrangement {
    pub family: LayoutFamily,
    pub placement: HeaderPlacement,
    /// Title given to the summary section
    pub summary_title: &'static str,
    /// Regions in document order with the sections each one holds
    pub regions: &'static [(Region, &'static [SectionKind])],
}

/// Single column.
pub const STANDARD: Arrangement = Arrangement {
    family: LayoutFamily::Standard,
    placement: HeaderPlacement::Top,
    summary_title: "Profile Summary",
    regions: &[(
        Region::Main,
        &[
            Summary,
            Experience,
            Education,
            Skills,
            Projects,
            Certifications,
            Languages,
            Interests,
        ],
    )],
};

/// Single column with a left-aligned header group.
pub const STANDARD_LEFT_HEADER: Arrangement = Arrangement {
    placement: HeaderPlacement::LeftAligned,
    ..STANDARD
};

/// Sidebar next to a main column. Contact details move out of the header.
pub const SIDEBAR: Arrangement = Arrangement {
    family: LayoutFamily::Sidebar,
    placement: HeaderPlacement::Sidebar,
    summary_title: "Profile",
    regions: &[
        (Region::Sidebar, &[Contact, Skills, Languages, Interests]),
        (
            Region::Main,
            &[Summary, Experience, Education, Projects, Certifications],
        ),
    ],
};

/// Full-width summary over two columns.
pub const TWO_COLUMN: Arrangement = Arrangement {
    family: LayoutFamily::TwoColumn,
    placement: HeaderPlacement::Top,
    summary_title: "Profile Summary",
    regions: &[
        (Region::FullWidth, &[Summary]),
        (Region::Left, &[Experience, Projects]),
        (Region::Right, &[Education, Skills, Certifications, Languages]),
    ],
};

/// The arrangement a known variant uses.
pub fn arrangement_for(variant: &LayoutVariant) -> &'static Arrangement {
    match variant.id {
        "template-07" => &SIDEBAR,
        "template-08" => &TWO_COLUMN,
        "template-10" => &STANDARD_LEFT_HEADER,
        _ => &STANDARD,
    }
}

/// Lay out a record for a variant.
///
/// Unknown variant ids fall back to the default variant; the returned tree
/// names the variant actually used. An empty record yields a header-only
/// tree with [`PLACEHOLDER_NAME`].
pub fn layout(record: &ResumeRecord, variant_id: &str) -> DocumentTree {
    let variant = find_variant(variant_id).unwrap_or_else(|| {
        log::warn!("Unknown template '{}', using default layout", variant_id);
        default_variant()
    });
    arrange(record, variant, arrangement_for(variant))
}

/// Build a tree from an explicit arrangement.
pub fn arrange(
    record: &ResumeRecord,
    variant: &LayoutVariant,
    arrangement: &Arrangement,
) -> DocumentTree {
    let streams: Vec<StreamNode> = arrangement
        .regions
        .iter()
        .map(|(region, kinds)| StreamNode {
            region: *region,
            sections: kinds
                .iter()
                .filter_map(|kind| sections::build(*kind, record, arrangement.summary_title))
                .collect(),
        })
        .filter(|stream| !stream.sections.is_empty())
        .collect();

    let tree = DocumentTree {
        variant_id: variant.id.to_string(),
        category: variant.category,
        family: arrangement.family,
        header: header(record, arrangement.placement),
        streams,
    };
    log::debug!(
        "Laid out {} as {:?}: {} sections",
        tree.variant_id,
        tree.family,
        tree.section_count()
    );
    tree
}

fn header(record: &ResumeRecord, placement: HeaderPlacement) -> HeaderNode {
    let personal = &record.personal;
    let mut header = HeaderNode::new(display_name(personal));
    header.placement = placement;
    header.image_ref = Some(personal.profile_image.clone()).filter(|s| !s.is_empty());

    // The sidebar family shows contact data as its own section
    if placement != HeaderPlacement::Sidebar {
        header.contact_lines = contact_lines(personal);
        header.details = detail_lines(personal);
    }
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExperienceEntry, LanguageEntry, ProjectEntry};
    use std::collections::HashSet;

    fn full_record() -> ResumeRecord {
        let mut record = ResumeRecord::new();
        record.personal.full_name = "Ada Lovelace".into();
        record.personal.email = "ada@example.com".into();
        record.summary = "Mathematician".into();
        record.experience.push(ExperienceEntry {
            job_title: "Analyst".into(),
            ..Default::default()
        });
        record.education.push(crate::model::EducationEntry {
            degree: "Mathematics".into(),
            ..Default::default()
        });
        record.skills = vec!["Math".into()];
        record.projects.push(ProjectEntry {
            name: "Engine".into(),
            ..Default::default()
        });
        record.certifications.push(crate::model::CertificationEntry {
            name: "Cert".into(),
            ..Default::default()
        });
        record.languages.push(LanguageEntry {
            name: "French".into(),
            ..Default::default()
        });
        record.interests = vec!["Poetry".into()];
        record
    }

    fn titles(tree: &DocumentTree, region: Region) -> Vec<String> {
        tree.stream(region)
            .map(|s| s.sections.iter().map(|sec| sec.title.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_standard_order() {
        let tree = layout(&full_record(), "template-01");
        assert_eq!(tree.family, LayoutFamily::Standard);
        assert_eq!(
            titles(&tree, Region::Main),
            vec![
                "Profile Summary",
                "Experience",
                "Education",
                "Skills",
                "Projects",
                "Certifications",
                "Languages",
                "Interests"
            ]
        );
        assert_eq!(tree.header.contact_lines, vec!["ada@example.com"]);
    }

    #[test]
    fn test_left_header_variant() {
        let tree = layout(&full_record(), "template-10");
        assert_eq!(tree.header.placement, HeaderPlacement::LeftAligned);
        assert_eq!(tree.family, LayoutFamily::Standard);
    }

    #[test]
    fn test_sidebar_partition() {
        let tree = layout(&full_record(), "template-07");
        assert_eq!(
            titles(&tree, Region::Sidebar),
            vec!["Contact", "Skills", "Languages", "Interests"]
        );
        assert_eq!(
            titles(&tree, Region::Main),
            vec!["Profile", "Experience", "Education", "Projects", "Certifications"]
        );
        assert!(tree.header.contact_lines.is_empty());
        assert_eq!(tree.header.placement, HeaderPlacement::Sidebar);
    }

    #[test]
    fn test_two_column_partition() {
        let tree = layout(&full_record(), "template-08");
        assert_eq!(titles(&tree, Region::FullWidth), vec!["Profile Summary"]);
        assert_eq!(titles(&tree, Region::Left), vec!["Experience", "Projects"]);
        assert_eq!(
            titles(&tree, Region::Right),
            vec!["Education", "Skills", "Certifications", "Languages"]
        );
        // Interests has no place in this family
        assert!(tree.find_section("Interests").is_none());
    }

    #[test]
    fn test_no_section_in_two_streams() {
        for id in ["template-01", "template-07", "template-08", "template-10"] {
            let tree = layout(&full_record(), id);
            let mut seen = HashSet::new();
            for section in tree.sections() {
                assert!(seen.insert(section.title.clone()), "{} duplicated in {}", section.title, id);
            }
        }
    }

    #[test]
    fn test_unknown_variant_falls_back() {
        let record = full_record();
        assert_eq!(layout(&record, "template-99"), layout(&record, "template-01"));
        assert_eq!(layout(&record, ""), layout(&record, "template-01"));
    }

    #[test]
    fn test_empty_record_header_only() {
        let tree = layout(&ResumeRecord::new(), "template-07");
        assert!(tree.is_header_only());
        assert!(tree.streams.is_empty());
        assert_eq!(tree.header.name, PLACEHOLDER_NAME);
        assert!(tree.header.image_ref.is_none());
    }

    #[test]
    fn test_layout_idempotent() {
        let record = full_record();
        for variant in crate::registry::TEMPLATES.iter() {
            assert_eq!(layout(&record, variant.id), layout(&record, variant.id));
        }
    }

    #[test]
    fn test_tree_carries_category() {
        let tree = layout(&full_record(), "template-13");
        assert_eq!(tree.category, crate::model::Category::Tech);
        assert_eq!(tree.variant_id, "template-13");
    }
}
