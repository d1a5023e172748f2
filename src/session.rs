//! Keeps form state, template selection and rendered output in step.
//!
//! Every event re-runs the whole pipeline from a fresh record:
//!
//! ```text
//! form change ─┐
//! image change ├─> assemble ─> layout(active) ─> render ─> replace output
//! restore ─────┘                  ▲
//! select_variant ─────────────────┘ (same record, new id)
//! ```
//!
//! Output is replaced only after a render succeeds, so a failed pass leaves
//! the previous preview on screen.

use crate::assemble::{assemble, FormState};
use crate::error::Result;
use crate::export::{ExportOptions, ExportOutcome, Exporter};
use crate::layout::layout;
use crate::model::{DocumentTree, LayoutVariant, ResumeRecord};
use crate::registry::{CategoryFilter, StyleLoader, TemplateRegistry};
use crate::render::{placeholder_html, thumbnails, to_html, PreviewScale, RenderOptions, Thumbnail};
use crate::storage::StateStore;
use crate::validate::require_name;

/// A live preview bound to one form.
pub struct PreviewSession {
    registry: TemplateRegistry,
    styles: StyleLoader,
    options: RenderOptions,
    exporter: Exporter,
    record: ResumeRecord,
    tree: Option<DocumentTree>,
    markup: String,
    scale: PreviewScale,
    /// Stylesheets requested since the host last drained them
    pending_styles: Vec<&'static str>,
}

impl PreviewSession {
    /// Create a session with the default template active and no record.
    pub fn new(options: RenderOptions) -> Self {
        Self::with_exporter(options, Exporter::with_defaults(ExportOptions::default()))
    }

    /// Create a session exporting through `exporter`.
    pub fn with_exporter(options: RenderOptions, exporter: Exporter) -> Self {
        let registry = TemplateRegistry::new();
        let mut styles = StyleLoader::new();
        let pending_styles = styles.ensure(registry.active()).into_iter().collect();
        let markup = placeholder_html(&options);

        Self {
            registry,
            styles,
            options,
            exporter,
            record: ResumeRecord::new(),
            tree: None,
            markup,
            scale: PreviewScale::default(),
            pending_styles,
        }
    }

    /// Current record.
    pub fn record(&self) -> &ResumeRecord {
        &self.record
    }

    /// Tree behind the current markup, if anything has been rendered.
    pub fn tree(&self) -> Option<&DocumentTree> {
        self.tree.as_ref()
    }

    /// Current preview markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Active template.
    pub fn active_variant(&self) -> &'static LayoutVariant {
        self.registry.active()
    }

    /// Template catalog filtered for a gallery tab.
    pub fn variants(&self, filter: CategoryFilter) -> Vec<&'static LayoutVariant> {
        self.registry.filter(filter)
    }

    /// Current preview scale.
    pub fn scale(&self) -> PreviewScale {
        self.scale
    }

    /// The exporter.
    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// Take the stylesheets that have been requested but not yet loaded.
    pub fn take_pending_styles(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.pending_styles)
    }

    /// Re-assemble from the form and refresh the preview.
    pub fn on_form_change<F: FormState + ?Sized>(&mut self, form: &F) -> Result<&str> {
        let record = assemble(form);
        self.show(record)
    }

    /// Replace the profile image and refresh the preview.
    pub fn on_image_change(&mut self, image: impl Into<String>) -> Result<&str> {
        let mut record = self.record.clone();
        record.personal.profile_image = image.into();
        self.show(record)
    }

    /// Make `id` the active template and re-render the current record.
    ///
    /// Selecting the already-active template re-renders as well. An unknown id
    /// is logged and ignored: the current template stays active and
    /// `Ok(false)` is returned.
    pub fn select_variant(&mut self, id: &str) -> Result<bool> {
        let changed = match self.registry.set_active(id) {
            Ok(changed) => changed,
            Err(e) => {
                log::warn!("{}; keeping {}", e, self.registry.active_id());
                return Ok(false);
            }
        };
        if let Some(style) = self.styles.ensure(self.registry.active()) {
            self.pending_styles.push(style);
        }

        if self.tree.is_some() {
            let record = self.record.clone();
            self.show(record)?;
        }
        Ok(changed)
    }

    /// Load a saved record and show it.
    ///
    /// Returns `false` when nothing usable is saved; the session is left as it
    /// was.
    pub fn restore(&mut self, store: &dyn StateStore, key: &str) -> Result<bool> {
        match store.load(key) {
            Some(record) => {
                self.show(record)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Save the bundled sample résumé under `key` and show it.
    pub fn load_sample(&mut self, store: &dyn StateStore, key: &str) -> Result<&str> {
        let record = ResumeRecord::sample()?;
        store.save(key, &record)?;
        self.show(record)
    }

    /// Save the current record.
    pub fn save(&self, store: &dyn StateStore, key: &str) -> Result<()> {
        store.save(key, &self.record)
    }

    /// Recompute the preview scale for a container width.
    pub fn resize(&mut self, container_width: f64) -> PreviewScale {
        self.scale = PreviewScale::fit(container_width);
        self.scale
    }

    /// Export the current record with the active template.
    ///
    /// Never touches the preview, whatever the outcome.
    pub fn export(&self) -> Result<ExportOutcome> {
        self.exporter.export(&self.record, self.registry.active_id())
    }

    /// Standalone print page for the current record.
    pub fn print_markup(&self) -> Result<String> {
        require_name(&self.record)?;
        let tree = layout(&self.record, self.registry.active_id());
        let options = RenderOptions::print().with_images(self.options.include_images);
        to_html(&tree, &options)
    }

    /// Gallery cards for every template.
    pub fn thumbnails(&self) -> Vec<Thumbnail> {
        thumbnails(self.registry.all(), &self.record, self.registry.active_id())
    }

    fn show(&mut self, record: ResumeRecord) -> Result<&str> {
        let tree = layout(&record, self.registry.active_id());
        let markup = to_html(&tree, &self.options)?;
        log::debug!(
            "Preview refreshed: {} with {} section(s)",
            tree.variant_id,
            tree.section_count()
        );

        self.record = record;
        self.tree = Some(tree);
        self.markup = markup;
        Ok(&self.markup)
    }
}

impl Default for PreviewSession {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}
