//! Integration tests for the form → record → tree → HTML pipeline.

use std::collections::HashSet;

use resumake::assemble::fields;
use resumake::model::{
    CertificationEntry, EducationEntry, ExperienceEntry, LanguageEntry, ProjectEntry, Region,
};
use resumake::render::{to_html, to_json, RenderOptions};
use resumake::{
    assemble, layout, EntryKind, FormSnapshot, JsonFormat, LayoutFamily, ResumeRecord, TEMPLATES,
};

fn ada_form() -> FormSnapshot {
    let mut form = FormSnapshot::new();
    form.set_field(fields::FULL_NAME, "Ada Lovelace");
    form.set_field(fields::EMAIL, "ada@example.com");
    form.add_skills("Math");
    form.push_entry(
        EntryKind::Experience,
        [
            ("jobTitle", "Analyst"),
            ("company", "Engines Ltd"),
            ("startDate", "2023-06"),
        ],
    );
    form
}

/// A record with every section populated.
fn full_record() -> ResumeRecord {
    let mut record = ResumeRecord::new();
    record.personal.full_name = "Ada Lovelace".into();
    record.personal.email = "ada@example.com".into();
    record.personal.phone = "555 0100".into();
    record.summary = "Mathematician.".into();
    record.experience.push(ExperienceEntry {
        job_title: "Analyst".into(),
        company: "Engines Ltd".into(),
        start_date: "1842-01".into(),
        current: true,
        ..Default::default()
    });
    record.education.push(EducationEntry {
        degree: "Mathematics".into(),
        institution: "Home".into(),
        ..Default::default()
    });
    record.skills = vec!["Math".into(), "Math".into()];
    record.projects.push(ProjectEntry {
        name: "Notes".into(),
        ..Default::default()
    });
    record.certifications.push(CertificationEntry {
        name: "Society".into(),
        ..Default::default()
    });
    record.languages.push(LanguageEntry {
        name: "French".into(),
        proficiency: "Fluent".into(),
    });
    record.interests = vec!["Poetry".into()];
    record
}

#[test]
fn test_ada_skills_only_scenario() {
    let mut record = ResumeRecord::new();
    record.personal.full_name = "Ada Lovelace".into();
    record.personal.email = "a@x.com".into();
    record.summary = String::new();
    record.skills = vec!["C++".into(), "Math".into()];

    let tree = layout(&record, "template-01");
    assert_eq!(tree.header.name, "Ada Lovelace");
    assert_eq!(tree.header.contact_lines, vec!["a@x.com".to_string()]);

    let sections: Vec<_> = tree.sections().collect();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "Skills");
    let skills: Vec<&str> = sections[0].entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(skills, vec!["C++", "Math"]);
}

#[test]
fn test_assembled_form_scenario() {
    let record = assemble(&ada_form());
    let tree = layout(&record, "template-01");

    assert_eq!(tree.header.name, "Ada Lovelace");
    assert_eq!(tree.header.contact_lines, vec!["ada@example.com".to_string()]);

    let titles: Vec<&str> = tree.sections().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Experience", "Skills"]);

    let experience = tree.find_section("Experience").unwrap();
    assert_eq!(experience.entries[0].title, "Analyst");
    assert_eq!(experience.entries[0].subtitle.as_deref(), Some("Engines Ltd"));
    assert_eq!(
        experience.entries[0].date_range.as_deref(),
        Some("Jun 2023 – Present")
    );
}

#[test]
fn test_empty_experience_entry_excluded() {
    let mut form = ada_form();
    form.push_entry(
        EntryKind::Experience,
        [("jobTitle", ""), ("company", "  "), ("startDate", "")],
    );
    let record = assemble(&form);
    assert_eq!(record.experience.len(), 1);
}

#[test]
fn test_current_forces_present() {
    let mut record = ResumeRecord::new();
    record.experience.push(ExperienceEntry {
        job_title: "Analyst".into(),
        start_date: "2020-01".into(),
        end_date: "2021-03".into(),
        current: true,
        ..Default::default()
    });
    let tree = layout(&record, "template-03");
    let entry = &tree.find_section("Experience").unwrap().entries[0];
    assert_eq!(entry.date_range.as_deref(), Some("Jan 2020 – Present"));
}

#[test]
fn test_layout_idempotent_for_every_template() {
    let record = full_record();
    let options = RenderOptions::default();
    for variant in TEMPLATES.iter() {
        let a = to_html(&layout(&record, variant.id), &options).unwrap();
        let b = to_html(&layout(&record, variant.id), &options).unwrap();
        assert_eq!(a, b, "{} is not deterministic", variant.id);
    }
}

#[test]
fn test_sections_in_exactly_one_stream() {
    let record = full_record();
    for variant in TEMPLATES.iter() {
        let tree = layout(&record, variant.id);
        let mut seen = HashSet::new();
        for section in tree.sections() {
            assert!(
                seen.insert(section.title.clone()),
                "{} repeats {}",
                variant.id,
                section.title
            );
        }
    }
}

#[test]
fn test_family_streams() {
    let record = full_record();

    let sidebar = layout(&record, "template-07");
    assert_eq!(sidebar.family, LayoutFamily::Sidebar);
    assert_eq!(sidebar.regions_of("Skills"), vec![Region::Sidebar]);
    assert_eq!(sidebar.regions_of("Profile"), vec![Region::Main]);
    assert!(sidebar.header.contact_lines.is_empty());

    let two = layout(&record, "template-08");
    assert_eq!(two.regions_of("Profile Summary"), vec![Region::FullWidth]);
    assert_eq!(two.regions_of("Experience"), vec![Region::Left]);
    assert_eq!(two.regions_of("Education"), vec![Region::Right]);
    assert_eq!(two.regions_of("Skills"), vec![Region::Right]);
}

#[test]
fn test_unknown_variant_matches_default() {
    let record = full_record();
    let options = RenderOptions::default();
    let unknown = to_html(&layout(&record, "template-42"), &options).unwrap();
    let default = to_html(&layout(&record, "template-01"), &options).unwrap();
    assert_eq!(unknown, default);
}

/// Distinct user text carrying every HTML-significant character.
fn marked(n: u32) -> String {
    format!("<f{:02}&\"'>", n)
}

fn escaped(n: u32) -> String {
    format!("&lt;f{:02}&amp;&quot;&#39;&gt;", n)
}

#[test]
fn test_every_text_field_escaped_once() {
    let mut record = ResumeRecord::new();
    record.personal.full_name = marked(1);
    record.personal.email = marked(2);
    record.personal.phone = marked(3);
    record.personal.address = marked(4);
    record.personal.linkedin = marked(5);
    record.personal.portfolio = marked(6);
    record.personal.father_name = marked(7);
    record.personal.dob = marked(8);
    record.summary = marked(9);
    record.experience.push(ExperienceEntry {
        job_title: marked(10),
        company: marked(11),
        description: marked(12),
        ..Default::default()
    });
    record.education.push(EducationEntry {
        degree: marked(13),
        institution: marked(14),
        description: marked(15),
        ..Default::default()
    });
    record.skills = vec![marked(16), marked(17)];
    record.projects.push(ProjectEntry {
        name: marked(18),
        description: marked(19),
        link: marked(20),
    });
    record.certifications.push(CertificationEntry {
        name: marked(21),
        issuer: marked(22),
        ..Default::default()
    });
    record.languages.push(LanguageEntry {
        name: marked(23),
        proficiency: marked(24),
    });
    record.interests = vec![marked(25)];

    for id in ["template-01", "template-07", "template-08", "template-10"] {
        let html = to_html(&layout(&record, id), &RenderOptions::default()).unwrap();
        for n in 1..=25 {
            // The two-column family has no place for Interests
            let expected = if id == "template-08" && n == 25 { 0 } else { 1 };
            assert_eq!(html.matches(&escaped(n)).count(), expected, "{} field {}", id, n);
        }
        assert!(!html.contains("<f"), "{}", id);
        assert!(!html.contains("&amp;amp;"), "{}", id);
    }
}

#[test]
fn test_skills_only_record_in_each_family() {
    let mut record = ResumeRecord::new();
    record.skills = vec!["Math".into()];

    let standard = layout(&record, "template-01");
    assert_eq!(standard.sections().count(), 1);
    assert_eq!(standard.regions_of("Skills"), vec![Region::Main]);

    let sidebar = layout(&record, "template-07");
    assert_eq!(sidebar.sections().count(), 1);
    assert_eq!(sidebar.regions_of("Skills"), vec![Region::Sidebar]);

    let two = layout(&record, "template-08");
    assert_eq!(two.sections().count(), 1);
    assert_eq!(two.regions_of("Skills"), vec![Region::Right]);
}

#[test]
fn test_empty_record_header_only() {
    let tree = layout(&ResumeRecord::new(), "template-01");
    assert!(tree.is_header_only());
    assert_eq!(tree.header.name, "Your Name");
}

#[test]
fn test_tree_json_is_domain_neutral() {
    let tree = layout(&full_record(), "template-08");
    let json = to_json(&tree, JsonFormat::Compact).unwrap();
    assert!(json.contains("\"variantId\":\"template-08\""));
    assert!(!json.contains("jobTitle"));
}

#[test]
fn test_record_json_round_trip() {
    let record = full_record();
    let json = to_json(&record, JsonFormat::Pretty).unwrap();
    let back: ResumeRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}
