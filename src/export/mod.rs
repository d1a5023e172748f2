//! Document export: tree in, downloadable binary document out.
//!
//! A [`DocumentBackend`] hands out [`DocumentBuilder`]s. Backends are
//! obtained through a [`BackendSource`] by a [`Capability`], which caches the
//! first successful acquisition. The [`Exporter`] ties it together and makes
//! sure only one export runs at a time.
//!
//! # Example
//!
//! ```
//! use resumake::export::{ExportOptions, ExportOutcome, Exporter};
//! use resumake::model::ResumeRecord;
//!
//! fn main() -> resumake::Result<()> {
//!     let mut record = ResumeRecord::new();
//!     record.personal.full_name = "Ada Lovelace".into();
//!
//!     let exporter = Exporter::with_defaults(ExportOptions::default());
//!     if let ExportOutcome::Done(doc) = exporter.export(&record, "template-01")? {
//!         assert_eq!(doc.filename, "Ada_Lovelace_Resume.pdf");
//!     }
//!     Ok(())
//! }
//! ```

mod builder;
mod metrics;
mod pdf;
mod transcode;

pub use builder::{
    parse_hex_color, Alignment, DocumentBuilder, PageGeometry, ParagraphStyle, RunStyle, PT_PER_CM,
};
pub use metrics::{metrics_for, FontMetricTable, HELVETICA, HELVETICA_BOLD};
pub use pdf::{encode_win_ansi, PdfBackend, PdfBuilder};
pub use transcode::write_tree;

use crate::error::{Error, Result};
use crate::format::filename_stem;
use crate::layout::layout;
use crate::model::{DocumentTree, ResumeRecord};
use crate::validate::require_name;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Options for document export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Backend name to acquire
    pub backend: String,

    /// Page size and margins
    pub geometry: PageGeometry,

    /// Compress content streams
    pub compress: bool,

    /// Author recorded in document metadata
    pub author: Option<String>,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend name.
    pub fn with_backend(mut self, name: impl Into<String>) -> Self {
        self.backend = name.into();
        self
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            backend: "pdf".to_string(),
            geometry: PageGeometry::a4(),
            compress: true,
            author: None,
        }
    }
}

/// Trait for document backends.
///
/// Implement this trait to add support for a new binary format.
pub trait DocumentBackend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// File extension without the leading dot.
    fn extension(&self) -> &str;

    /// MIME type of the produced bytes.
    fn mime_type(&self) -> &str;

    /// Create a fresh builder for one document.
    fn create_builder(&self, title: &str, options: &ExportOptions) -> Result<Box<dyn DocumentBuilder>>;
}

/// Somewhere backends can be acquired from.
pub trait BackendSource: Send + Sync {
    /// Acquire a backend by name, or fail with [`Error::MissingCapability`].
    fn acquire(&self, name: &str) -> Result<Arc<dyn DocumentBackend>>;
}

/// Registry for document backends.
pub struct BackendRegistry {
    by_name: HashMap<String, Arc<dyn DocumentBackend>>,
}

impl BackendRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with default backends (PDF).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfBackend::new()));
        registry
    }

    /// Register a backend under its name.
    pub fn register(&mut self, backend: Arc<dyn DocumentBackend>) {
        self.by_name.insert(backend.name().to_lowercase(), backend);
    }

    /// Get a backend by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn DocumentBackend>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Names of all registered backends, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl BackendSource for BackendRegistry {
    fn acquire(&self, name: &str) -> Result<Arc<dyn DocumentBackend>> {
        self.get(name)
            .ok_or_else(|| Error::MissingCapability(format!("no '{}' document backend", name)))
    }
}

/// Lazily acquired backend.
///
/// The first successful acquisition is cached. A failure is returned to the
/// caller and nothing is cached, so the next call tries again.
pub struct Capability {
    name: String,
    cached: Mutex<Option<Arc<dyn DocumentBackend>>>,
}

impl Capability {
    /// Create a capability for the named backend.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cached: Mutex::new(None),
        }
    }

    /// Name of the backend this capability acquires.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a backend has been acquired.
    pub fn is_ready(&self) -> bool {
        self.cached.lock().map(|c| c.is_some()).unwrap_or(false)
    }

    /// Get the backend, acquiring it from `source` on first use.
    pub fn get(&self, source: &dyn BackendSource) -> Result<Arc<dyn DocumentBackend>> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| Error::Export("capability lock poisoned".into()))?;
        if let Some(backend) = cached.as_ref() {
            return Ok(Arc::clone(backend));
        }

        let backend = source.acquire(&self.name)?;
        log::debug!("Acquired '{}' document backend", self.name);
        *cached = Some(Arc::clone(&backend));
        Ok(backend)
    }
}

/// A finished document ready to be saved or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    /// Write the document into `dir` under its filename.
    pub fn save_in(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// What an export trigger did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The document was produced.
    Done(ExportedDocument),
    /// Another export was already running; nothing was done.
    Busy,
}

/// Output filename for a person's name and a file extension.
pub fn output_filename(name: &str, extension: &str) -> String {
    format!("{}_Resume.{}", filename_stem(name), extension)
}

/// Encode a tree with a backend.
pub fn export_tree(
    tree: &DocumentTree,
    backend: &dyn DocumentBackend,
    options: &ExportOptions,
) -> Result<ExportedDocument> {
    let mut builder = backend.create_builder(&tree.header.name, options)?;
    write_tree(tree, builder.as_mut(), options.geometry);
    let bytes = builder.serialize()?;

    Ok(ExportedDocument {
        filename: output_filename(&tree.header.name, backend.extension()),
        mime_type: backend.mime_type().to_string(),
        bytes,
    })
}

/// Clears the in-flight flag when dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Single-flight document exporter.
pub struct Exporter {
    source: Arc<dyn BackendSource>,
    capability: Capability,
    options: ExportOptions,
    in_flight: AtomicBool,
}

impl Exporter {
    /// Create an exporter acquiring backends from `source`.
    pub fn new(source: Arc<dyn BackendSource>, options: ExportOptions) -> Self {
        Self {
            source,
            capability: Capability::new(options.backend.clone()),
            options,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Create an exporter backed by the default registry.
    pub fn with_defaults(options: ExportOptions) -> Self {
        Self::new(Arc::new(BackendRegistry::with_defaults()), options)
    }

    /// Export options in use.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// The backend capability.
    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Whether an export is currently running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Export a record laid out for `variant_id`.
    ///
    /// Fails with [`Error::InvalidInput`] when the record has no name, before
    /// any layout or encoding work. Returns [`ExportOutcome::Busy`] if another
    /// export is in flight.
    pub fn export(&self, record: &ResumeRecord, variant_id: &str) -> Result<ExportOutcome> {
        require_name(record)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("Export already in progress, ignoring trigger");
            return Ok(ExportOutcome::Busy);
        }
        let _guard = InFlight(&self.in_flight);

        let backend = self.capability.get(self.source.as_ref())?;
        let tree = layout(record, variant_id);
        let document = export_tree(&tree, backend.as_ref(), &self.options)?;
        log::info!(
            "Exported {} ({} bytes)",
            document.filename,
            document.bytes.len()
        );
        Ok(ExportOutcome::Done(document))
    }

    /// Export on a blocking worker thread.
    #[cfg(feature = "async")]
    pub async fn export_async(
        self: &Arc<Self>,
        record: ResumeRecord,
        variant_id: String,
    ) -> Result<ExportOutcome> {
        let exporter = Arc::clone(self);
        tokio::task::spawn_blocking(move || exporter.export(&record, &variant_id))
            .await
            .map_err(|e| Error::Export(format!("export task failed: {}", e)))?
    }
}
