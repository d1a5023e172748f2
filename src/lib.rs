//! # resumake
//!
//! Résumé rendering core: one structured record, twenty templates, three
//! outputs.
//!
//! A form is assembled into a [`ResumeRecord`], the layout engine arranges it
//! into a [`DocumentTree`] for the active template, and render adapters turn
//! that tree into preview HTML, a print-ready page or a PDF.
//!
//! ## Quick Start
//!
//! ```
//! use resumake::{layout, render, ResumeRecord};
//!
//! fn main() -> resumake::Result<()> {
//!     let mut record = ResumeRecord::new();
//!     record.personal.full_name = "Ada Lovelace".into();
//!     record.skills = vec!["Mathematics".into()];
//!
//!     let tree = layout(&record, "template-07");
//!     let html = render::to_html(&tree, &render::RenderOptions::default())?;
//!     assert!(html.contains("Ada Lovelace"));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Three layout families**: single column, sidebar, two-column
//! - **Screen and print HTML**: fragment or standalone A4 page
//! - **PDF export**: A4 pages with real line wrapping, no fonts to ship
//! - **Live preview session**: form, template and output kept in step
//! - **Persisted state**: JSON record store that shrugs off bad data
//! - **Sample résumé**: bundled record to try templates with

pub mod assemble;
pub mod error;
pub mod export;
pub mod format;
pub mod layout;
pub mod model;
pub mod registry;
pub mod render;
pub mod sample;
pub mod session;
pub mod storage;
pub mod validate;

// Re-export commonly used types
pub use assemble::{assemble, FieldValue, FormSnapshot, FormState, RawEntry};
pub use error::{Error, Result};
pub use export::{
    BackendRegistry, DocumentBackend, DocumentBuilder, ExportOptions, ExportOutcome,
    ExportedDocument, Exporter,
};
pub use layout::{layout, SectionKind};
pub use model::{
    Category, DocumentTree, EntryKind, HeaderPlacement, LayoutFamily, LayoutVariant, Region,
    ResumeRecord, SectionDisplay,
};
pub use registry::{find_variant, CategoryFilter, TemplateRegistry, DEFAULT_VARIANT, TEMPLATES};
pub use render::{JsonFormat, Media, RenderOptions};
pub use session::PreviewSession;
pub use storage::{FileStore, MemoryStore, StateStore};
pub use validate::Validator;

use export::{export_tree, BackendSource};
use std::path::Path;

/// Read a saved record from a JSON file.
///
/// Unlike [`StateStore::load`], a malformed file is an error here.
///
/// # Example
///
/// ```no_run
/// use resumake::load_record;
///
/// let record = load_record("resume.json").unwrap();
/// println!("{}", record.personal.full_name);
/// ```
pub fn load_record<P: AsRef<Path>>(path: P) -> Result<ResumeRecord> {
    let blob = std::fs::read_to_string(path)?;
    storage::decode_record(&blob)
}

/// Read a form snapshot from a JSON file and assemble it.
pub fn load_form<P: AsRef<Path>>(path: P) -> Result<ResumeRecord> {
    let blob = std::fs::read_to_string(path)?;
    let form: FormSnapshot = serde_json::from_str(&blob)?;
    Ok(assemble(&form))
}

/// Render a record as HTML.
///
/// # Example
///
/// ```
/// use resumake::{render_html, RenderOptions, ResumeRecord};
///
/// let html = render_html(&ResumeRecord::new(), "template-01", &RenderOptions::default()).unwrap();
/// assert!(html.contains("Your Name"));
/// ```
pub fn render_html(record: &ResumeRecord, variant_id: &str, options: &RenderOptions) -> Result<String> {
    let tree = layout(record, variant_id);
    render::to_html(&tree, options)
}

/// Export a record straight to a document, without an in-flight guard.
///
/// # Example
///
/// ```no_run
/// use resumake::{export_document, ExportOptions, ResumeRecord};
///
/// let mut record = ResumeRecord::new();
/// record.personal.full_name = "Ada Lovelace".into();
/// let doc = export_document(&record, "template-01", &ExportOptions::default()).unwrap();
/// doc.save_in(".").unwrap();
/// ```
pub fn export_document(
    record: &ResumeRecord,
    variant_id: &str,
    options: &ExportOptions,
) -> Result<ExportedDocument> {
    validate::require_name(record)?;
    let backend = BackendRegistry::with_defaults().acquire(&options.backend)?;
    let tree = layout(record, variant_id);
    export_tree(&tree, backend.as_ref(), options)
}

/// Builder for rendering one record several ways.
///
/// # Example
///
/// ```
/// use resumake::{Resumake, ResumeRecord};
///
/// let mut record = ResumeRecord::new();
/// record.personal.full_name = "Ada Lovelace".into();
///
/// let page = Resumake::new()
///     .with_template("template-08")
///     .print()
///     .load(record)
///     .to_html()?;
/// assert!(page.starts_with("<!DOCTYPE html>"));
/// # Ok::<(), resumake::Error>(())
/// ```
pub struct Resumake {
    variant_id: String,
    render_options: RenderOptions,
    export_options: ExportOptions,
}

impl Resumake {
    /// Create a new builder using the default template.
    pub fn new() -> Self {
        Self {
            variant_id: DEFAULT_VARIANT.to_string(),
            render_options: RenderOptions::default(),
            export_options: ExportOptions::default(),
        }
    }

    /// Set the template id.
    pub fn with_template(mut self, id: impl Into<String>) -> Self {
        self.variant_id = id.into();
        self
    }

    /// Render standalone print pages.
    pub fn print(mut self) -> Self {
        self.render_options = self
            .render_options
            .with_media(Media::Print)
            .with_standalone(true);
        self
    }

    /// Enable or disable the profile image.
    pub fn with_images(mut self, include: bool) -> Self {
        self.render_options = self.render_options.with_images(include);
        self
    }

    /// Set export options.
    pub fn with_export_options(mut self, options: ExportOptions) -> Self {
        self.export_options = options;
        self
    }

    /// Lay out a record.
    pub fn load(self, record: ResumeRecord) -> ResumakeResult {
        let tree = layout(&record, &self.variant_id);
        ResumakeResult {
            record,
            tree,
            render_options: self.render_options,
            export_options: self.export_options,
        }
    }

    /// Load a saved record file and lay it out.
    pub fn load_file<P: AsRef<Path>>(self, path: P) -> Result<ResumakeResult> {
        let record = load_record(path)?;
        Ok(self.load(record))
    }
}

impl Default for Resumake {
    fn default() -> Self {
        Self::new()
    }
}

/// A laid-out record ready for output.
pub struct ResumakeResult {
    /// The record
    pub record: ResumeRecord,
    /// Tree for the chosen template
    pub tree: DocumentTree,
    render_options: RenderOptions,
    export_options: ExportOptions,
}

impl ResumakeResult {
    /// Convert to HTML.
    ///
    /// A standalone page is only printed for a record with a name.
    pub fn to_html(&self) -> Result<String> {
        if self.render_options.standalone {
            validate::require_name(&self.record)?;
        }
        render::to_html(&self.tree, &self.render_options)
    }

    /// Serialize the tree as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.tree, format)
    }

    /// Export to a document.
    pub fn export(&self) -> Result<ExportedDocument> {
        export_document(&self.record, &self.tree.variant_id, &self.export_options)
    }

    /// Get the tree.
    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }
}
