//! Integration tests for the preview session.

use std::sync::Arc;

use resumake::assemble::fields;
use resumake::error::{Error, Result};
use resumake::export::{BackendSource, DocumentBackend, ExportOptions, ExportOutcome, Exporter};
use resumake::storage::DEFAULT_KEY;
use resumake::{
    CategoryFilter, EntryKind, FileStore, FormSnapshot, MemoryStore, PreviewSession,
    RenderOptions, StateStore,
};
use tempfile::TempDir;

fn ada_form() -> FormSnapshot {
    let mut form = FormSnapshot::new();
    form.set_field(fields::FULL_NAME, "Ada Lovelace");
    form.set_field(fields::EMAIL, "ada@example.com");
    form.set_field(fields::SUMMARY, "Mathematician.");
    form.add_skills("Math, Poetry");
    form.push_entry(
        EntryKind::Experience,
        [("jobTitle", "Analyst"), ("startDate", "2023-06")],
    );
    form
}

struct Offline;

impl BackendSource for Offline {
    fn acquire(&self, name: &str) -> Result<Arc<dyn DocumentBackend>> {
        Err(Error::MissingCapability(name.to_string()))
    }
}

#[test]
fn test_form_edit_updates_preview() {
    let mut session = PreviewSession::default();
    let mut form = ada_form();
    session.on_form_change(&form).unwrap();
    assert!(session.markup().contains("resume-skill-item\">Poetry"));

    form.remove_skill(1);
    session.on_form_change(&form).unwrap();
    assert!(!session.markup().contains("Poetry"));
    assert_eq!(session.record().skills, vec!["Math".to_string()]);
}

#[test]
fn test_switching_templates_keeps_record() {
    let mut session = PreviewSession::default();
    session.on_form_change(&ada_form()).unwrap();
    let record = session.record().clone();

    for id in ["template-07", "template-08", "template-10", "template-01"] {
        session.select_variant(id).unwrap();
        assert_eq!(session.record(), &record);
        assert_eq!(session.tree().unwrap().variant_id, id);
        assert!(session.markup().contains(&format!("resume {} ", id)));
    }
}

#[test]
fn test_unknown_template_is_ignored() {
    let mut session = PreviewSession::default();
    session.on_form_change(&ada_form()).unwrap();
    session.select_variant("template-08").unwrap();
    let before = session.markup().to_string();

    assert!(!session.select_variant("template-42").unwrap());
    assert_eq!(session.active_variant().id, "template-08");
    assert_eq!(session.markup(), before);
}

#[test]
fn test_load_sample() {
    let store = MemoryStore::new();
    let mut session = PreviewSession::default();
    session.load_sample(&store, DEFAULT_KEY).unwrap();

    assert!(session.markup().contains("Priya Sharma"));
    assert_eq!(store.load(DEFAULT_KEY).as_ref(), Some(session.record()));
}

#[test]
fn test_select_before_any_form_keeps_placeholder() {
    let mut session = PreviewSession::default();
    session.select_variant("template-05").unwrap();
    assert!(session.markup().contains("resume-placeholder"));
    assert_eq!(session.active_variant().id, "template-05");
}

#[test]
fn test_failed_export_leaves_preview_untouched() {
    let exporter = Exporter::new(Arc::new(Offline), ExportOptions::default());
    let mut session = PreviewSession::with_exporter(RenderOptions::default(), exporter);
    session.on_form_change(&ada_form()).unwrap();
    let before = session.markup().to_string();

    assert!(matches!(session.export(), Err(Error::MissingCapability(_))));
    assert_eq!(session.markup(), before);
}

#[test]
fn test_export_with_empty_name() {
    let mut form = ada_form();
    form.set_field(fields::FULL_NAME, "");
    let mut session = PreviewSession::default();
    session.on_form_change(&form).unwrap();
    let before = session.markup().to_string();

    let err = session.export().err().unwrap();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(err.is_user_facing());
    assert_eq!(session.markup(), before);
    assert!(before.contains("Your Name"));
}

#[test]
fn test_export_from_session() {
    let mut session = PreviewSession::default();
    session.on_form_change(&ada_form()).unwrap();
    session.select_variant("template-07").unwrap();

    match session.export().unwrap() {
        ExportOutcome::Done(doc) => {
            assert_eq!(doc.filename, "Ada_Lovelace_Resume.pdf");
            assert!(doc.bytes.starts_with(b"%PDF"));
        }
        ExportOutcome::Busy => panic!("no export was running"),
    }
}

#[test]
fn test_restore_from_file_store() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());

    let mut first = PreviewSession::default();
    first.on_form_change(&ada_form()).unwrap();
    first.save(&store, DEFAULT_KEY).unwrap();

    let mut second = PreviewSession::default();
    assert!(second.restore(&store, DEFAULT_KEY).unwrap());
    assert_eq!(second.record(), first.record());
    assert_eq!(second.markup(), first.markup());
}

#[test]
fn test_restore_malformed_is_no_saved_state() {
    let store = MemoryStore::new();
    store.insert_raw(DEFAULT_KEY, "{\"experience\": 12}");
    let mut session = PreviewSession::default();
    assert!(!session.restore(&store, DEFAULT_KEY).unwrap());
    assert!(session.tree().is_none());
    assert!(store.load(DEFAULT_KEY).is_none());
}

#[test]
fn test_print_page() {
    let mut session = PreviewSession::default();
    session.on_form_change(&ada_form()).unwrap();
    let page = session.print_markup().unwrap();
    assert!(page.contains("<title>Resume</title>"));
    assert_eq!(page.matches("Ada Lovelace").count(), 1);
    assert!(page.contains("@page { size: A4; margin: 0; }"));
    assert!(page.contains("media-print"));
}

#[test]
fn test_gallery_tabs() {
    let session = PreviewSession::default();
    assert_eq!(session.variants(CategoryFilter::All).len(), 20);
    let tabs = CategoryFilter::tabs();
    let total: usize = tabs
        .iter()
        .skip(1)
        .map(|tab| session.variants(*tab).len())
        .sum();
    assert_eq!(total, 20);
}
