//! Bundled sample résumé.
//!
//! Gives a first-time user something to look at before they fill in the form.

use crate::error::Result;
use crate::model::ResumeRecord;
use crate::storage::decode_record;

/// The sample résumé in the persisted JSON shape.
pub const SAMPLE_RESUME: &str = include_str!("../data/sample-resume.json");

impl ResumeRecord {
    /// Decode the bundled sample résumé.
    pub fn sample() -> Result<Self> {
        decode_record(SAMPLE_RESUME)
    }
}
