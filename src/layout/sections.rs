//! Section builders: one record collection in, one titled section out.
//!
//! Each builder returns `None` for an empty collection so the arranger
//! never emits an empty section.

use super::contact;
use crate::format::{format_date, format_date_range};
use crate::model::{EntryNode, ResumeRecord, SectionDisplay, SectionNode};

/// A section a layout can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Contact lines and personal details as a section of their own
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Interests,
}

/// Build one section, or `None` when the record has nothing for it.
pub(crate) fn build(
    kind: SectionKind,
    record: &ResumeRecord,
    summary_title: &str,
) -> Option<SectionNode> {
    match kind {
        SectionKind::Contact => contact_section(record),
        SectionKind::Summary => summary_section(record, summary_title),
        SectionKind::Experience => experience_section(record),
        SectionKind::Education => education_section(record),
        SectionKind::Skills => tag_section("Skills", &record.skills),
        SectionKind::Projects => projects_section(record),
        SectionKind::Certifications => certifications_section(record),
        SectionKind::Languages => languages_section(record),
        SectionKind::Interests => list_section("Interests", &record.interests),
    }
}

fn non_empty(title: &str, display: SectionDisplay, entries: Vec<EntryNode>) -> Option<SectionNode> {
    if entries.is_empty() {
        None
    } else {
        Some(SectionNode::new(title, display, entries))
    }
}

fn contact_section(record: &ResumeRecord) -> Option<SectionNode> {
    let personal = &record.personal;
    let entries = contact::contact_lines(personal)
        .into_iter()
        .map(EntryNode::titled)
        .chain(
            contact::detail_lines(personal)
                .into_iter()
                .map(|d| EntryNode::titled(format!("{}: {}", d.label, d.value))),
        )
        .collect();
    non_empty("Contact", SectionDisplay::List, entries)
}

fn summary_section(record: &ResumeRecord, title: &str) -> Option<SectionNode> {
    if record.summary.is_empty() {
        return None;
    }
    Some(SectionNode::new(
        title,
        SectionDisplay::Prose,
        vec![EntryNode::prose(record.summary.as_str())],
    ))
}

fn experience_section(record: &ResumeRecord) -> Option<SectionNode> {
    let entries = record
        .experience
        .iter()
        .map(|e| {
            EntryNode::titled(e.job_title.as_str())
                .with_subtitle(&e.company)
                .with_date_range(Some(format_date_range(
                    &e.start_date,
                    &e.end_date,
                    e.current,
                )))
                .with_description(&e.description)
        })
        .collect();
    non_empty("Experience", SectionDisplay::Entries, entries)
}

fn education_section(record: &ResumeRecord) -> Option<SectionNode> {
    let entries = record
        .education
        .iter()
        .map(|e| {
            EntryNode::titled(e.degree.as_str())
                .with_subtitle(&e.institution)
                .with_date_range(Some(format_date_range(&e.start_date, &e.end_date, false)))
                .with_description(&e.description)
        })
        .collect();
    non_empty("Education", SectionDisplay::Entries, entries)
}

fn projects_section(record: &ResumeRecord) -> Option<SectionNode> {
    let entries = record
        .projects
        .iter()
        .map(|p| {
            EntryNode::titled(p.name.as_str())
                .with_subtitle(&p.link)
                .with_description(&p.description)
        })
        .collect();
    non_empty("Projects", SectionDisplay::Entries, entries)
}

fn certifications_section(record: &ResumeRecord) -> Option<SectionNode> {
    let entries = record
        .certifications
        .iter()
        .map(|c| {
            let date = (!c.date.is_empty()).then(|| format_date(&c.date));
            EntryNode::titled(c.name.as_str())
                .with_subtitle(&c.issuer)
                .with_date_range(date)
        })
        .collect();
    non_empty("Certifications", SectionDisplay::List, entries)
}

fn languages_section(record: &ResumeRecord) -> Option<SectionNode> {
    let entries = record
        .languages
        .iter()
        .map(|l| EntryNode::titled(l.name.as_str()).with_subtitle(&l.proficiency))
        .collect();
    non_empty("Languages", SectionDisplay::List, entries)
}

fn tag_section(title: &str, items: &[String]) -> Option<SectionNode> {
    let entries = items.iter().map(|s| EntryNode::titled(s.as_str())).collect();
    non_empty(title, SectionDisplay::Tags, entries)
}

fn list_section(title: &str, items: &[String]) -> Option<SectionNode> {
    let entries = items.iter().map(|s| EntryNode::titled(s.as_str())).collect();
    non_empty(title, SectionDisplay::List, entries)
}
