//! Feeds a document tree to a [`DocumentBuilder`].
//!
//! Streams are written one after another in tree order. Nothing here looks
//! at section titles; formatting follows each section's display hint.

use super::builder::{Alignment, DocumentBuilder, PageGeometry, ParagraphStyle, RunStyle};
use crate::layout::CONTACT_SEPARATOR;
use crate::model::{DocumentTree, EntryNode, HeaderNode, HeaderPlacement, SectionDisplay, SectionNode};

const BODY_SIZE: f32 = 11.0;
const NAME_COLOR: &str = "0f172a";
const HEADING_COLOR: &str = "1e293b";
const RULE_COLOR: &str = "334155";
const MUTED_COLOR: &str = "475569";
const DATE_COLOR: &str = "64748b";
const SEPARATOR_COLOR: &str = "94a3b8";
const TAG_SEPARATOR: &str = "  •  ";

/// Write the whole tree as a single section.
pub fn write_tree(tree: &DocumentTree, builder: &mut dyn DocumentBuilder, geometry: PageGeometry) {
    builder.add_section();
    builder.set_page_geometry(geometry);

    write_header(&tree.header, builder);
    for section in tree.sections() {
        write_section(section, builder);
    }
}

fn write_header(header: &HeaderNode, builder: &mut dyn DocumentBuilder) {
    let alignment = match header.placement {
        HeaderPlacement::Top => Alignment::Center,
        HeaderPlacement::LeftAligned | HeaderPlacement::Sidebar => Alignment::Left,
    };

    builder.add_paragraph(ParagraphStyle::new().aligned(alignment).spacing(0.0, 4.0));
    builder.add_styled_run(&header.name, RunStyle::sized(16.0).bold().colored(NAME_COLOR));

    if !header.contact_lines.is_empty() {
        builder.add_paragraph(ParagraphStyle::new().aligned(alignment).spacing(0.0, 4.0));
        for (i, line) in header.contact_lines.iter().enumerate() {
            if i > 0 {
                builder.add_styled_run(
                    CONTACT_SEPARATOR,
                    RunStyle::sized(BODY_SIZE).colored(SEPARATOR_COLOR),
                );
            }
            builder.add_styled_run(line, RunStyle::sized(BODY_SIZE).colored(MUTED_COLOR));
        }
    }

    if !header.details.is_empty() {
        builder.add_paragraph(ParagraphStyle::new().aligned(alignment).spacing(0.0, 4.0));
        for (i, detail) in header.details.iter().enumerate() {
            if i > 0 {
                builder.add_styled_run(
                    CONTACT_SEPARATOR,
                    RunStyle::sized(BODY_SIZE).colored(SEPARATOR_COLOR),
                );
            }
            builder.add_styled_run(
                &format!("{}: ", detail.label),
                RunStyle::sized(BODY_SIZE).bold().colored(MUTED_COLOR),
            );
            builder.add_styled_run(&detail.value, RunStyle::sized(BODY_SIZE).colored(MUTED_COLOR));
        }
    }

    builder.add_paragraph(
        ParagraphStyle::new()
            .spacing(6.0, 4.0)
            .with_border_bottom(RULE_COLOR),
    );
}

fn write_section(section: &SectionNode, builder: &mut dyn DocumentBuilder) {
    builder.add_paragraph(ParagraphStyle::new().spacing(12.0, 2.0).keep_next(true));
    builder.add_styled_run(
        &section.title.to_uppercase(),
        RunStyle::sized(13.0).bold().colored(HEADING_COLOR),
    );

    match section.display {
        SectionDisplay::Prose => {
            for text in section.entries.iter().filter_map(|e| e.description.as_deref()) {
                builder.add_paragraph(ParagraphStyle::new().spacing(4.0, 6.0));
                builder.add_styled_run(text, RunStyle::sized(BODY_SIZE));
            }
        }
        SectionDisplay::Entries => {
            for entry in &section.entries {
                write_entry(entry, builder);
            }
        }
        SectionDisplay::Tags => {
            let joined = section
                .entries
                .iter()
                .map(|e| e.title.as_str())
                .collect::<Vec<_>>()
                .join(TAG_SEPARATOR);
            builder.add_paragraph(ParagraphStyle::new().spacing(4.0, 6.0));
            builder.add_styled_run(&joined, RunStyle::sized(BODY_SIZE));
        }
        SectionDisplay::List => {
            for entry in &section.entries {
                write_list_item(entry, builder);
            }
        }
    }
}

fn write_entry(entry: &EntryNode, builder: &mut dyn DocumentBuilder) {
    let has_more = entry.subtitle.is_some() || entry.description.is_some();

    if !entry.title.is_empty() || entry.date_range.is_some() {
        builder.add_paragraph(
            ParagraphStyle::new()
                .spacing(6.0, 0.0)
                .with_right_tab()
                .keep_next(has_more),
        );
        builder.add_styled_run(&entry.title, RunStyle::sized(10.5).bold());
        if let Some(date) = &entry.date_range {
            builder.add_styled_run("\t", RunStyle::sized(BODY_SIZE));
            builder.add_styled_run(date, RunStyle::sized(BODY_SIZE).colored(DATE_COLOR));
        }
    }

    if let Some(subtitle) = &entry.subtitle {
        builder.add_paragraph(
            ParagraphStyle::new()
                .spacing(0.0, 0.0)
                .keep_next(entry.description.is_some()),
        );
        builder.add_styled_run(subtitle, RunStyle::sized(BODY_SIZE).italic().colored(MUTED_COLOR));
    }

    if let Some(description) = &entry.description {
        builder.add_paragraph(ParagraphStyle::new().spacing(2.0, 4.0));
        builder.add_styled_run(description, RunStyle::sized(BODY_SIZE));
    }
}

fn write_list_item(entry: &EntryNode, builder: &mut dyn DocumentBuilder) {
    builder.add_paragraph(ParagraphStyle::new().spacing(3.0, 2.0));
    builder.add_styled_run(&entry.title, RunStyle::sized(BODY_SIZE).bold());
    if let Some(subtitle) = &entry.subtitle {
        builder.add_styled_run(&format!(" — {}", subtitle), RunStyle::sized(BODY_SIZE));
    }
    if let Some(date) = &entry.date_range {
        builder.add_styled_run(
            &format!(" ({})", date),
            RunStyle::sized(BODY_SIZE).colored(DATE_COLOR),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::layout::layout;
    use crate::model::{ExperienceEntry, ResumeRecord};

    /// Records every builder call as a line of text.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl DocumentBuilder for Recorder {
        fn add_section(&mut self) {
            self.calls.push("section".into());
        }

        fn set_page_geometry(&mut self, geometry: PageGeometry) {
            self.calls
                .push(format!("geometry {}x{}", geometry.width, geometry.height));
        }

        fn add_paragraph(&mut self, style: ParagraphStyle) {
            self.calls.push(format!(
                "paragraph tab={} keep={}",
                style.right_tab, style.keep_with_next
            ));
        }

        fn add_styled_run(&mut self, text: &str, style: RunStyle) {
            self.calls.push(format!("run bold={} {}", style.bold, text));
        }

        fn serialize(self: Box<Self>) -> Result<Vec<u8>> {
            Ok(self.calls.join("\n").into_bytes())
        }
    }

    fn ada() -> ResumeRecord {
        let mut record = ResumeRecord::new();
        record.personal.full_name = "Ada Lovelace".into();
        record.personal.email = "ada@example.com".into();
        record.personal.phone = "555".into();
        record.skills = vec!["Math".into(), "C++".into()];
        record.experience.push(ExperienceEntry {
            job_title: "Analyst".into(),
            company: "Engines Ltd".into(),
            start_date: "2023-06".into(),
            ..Default::default()
        });
        record
    }

    #[test]
    fn test_page_geometry_first() {
        let mut recorder = Recorder::default();
        write_tree(&layout(&ada(), "template-01"), &mut recorder, PageGeometry::a4());
        assert_eq!(recorder.calls[0], "section");
        assert_eq!(recorder.calls[1], "geometry 595x842");
        assert_eq!(recorder.calls[3], "run bold=true Ada Lovelace");
    }

    #[test]
    fn test_entry_uses_right_tab() {
        let mut recorder = Recorder::default();
        write_tree(&layout(&ada(), "template-01"), &mut recorder, PageGeometry::a4());
        let calls = recorder.calls.join("\n");
        assert!(calls.contains(
            "paragraph tab=true keep=true\nrun bold=true Analyst\nrun bold=false \t\nrun bold=false Jun 2023 – Present"
        ));
        assert!(calls.contains("run bold=false Math  •  C++"));
        assert!(calls.contains("run bold=true EXPERIENCE"));
    }

    #[test]
    fn test_contact_separator_between_lines() {
        let mut recorder = Recorder::default();
        write_tree(&layout(&ada(), "template-01"), &mut recorder, PageGeometry::a4());
        let calls = recorder.calls.join("\n");
        assert!(calls.contains("run bold=false ada@example.com\nrun bold=false  | \nrun bold=false 555"));
    }
}
