//! Data types for the rendering pipeline.
//!
//! [`ResumeRecord`] is what the assembler produces and what gets persisted;
//! [`DocumentTree`] is what the layout engine hands to render adapters.
//! Variant metadata lives here too so both sides can name a category.

mod record;
mod tree;
mod variant;

pub use record::{
    CertificationEntry, EducationEntry, Entry, EntryKind, ExperienceEntry, LanguageEntry,
    PersonalInfo, ProjectEntry, ResumeRecord,
};
pub use tree::{
    DetailLine, DocumentTree, EntryNode, HeaderNode, HeaderPlacement, LayoutFamily, Region,
    SectionDisplay, SectionNode, StreamNode,
};
pub use variant::{Category, LayoutVariant};
