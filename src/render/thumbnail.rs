//! Gallery cards with miniature previews.
//!
//! Only the first few templates get a live miniature; the rest show a fixed
//! skeleton so the gallery stays cheap to refresh on every keystroke.

use crate::format::{escape_html, truncate_text};
use crate::model::{LayoutVariant, ResumeRecord};
use crate::layout::PLACEHOLDER_NAME;

/// Number of templates that get a live miniature.
pub const LIVE_THUMBNAILS: usize = 4;

/// Summary characters shown in a miniature.
pub const SUMMARY_CHARS: usize = 100;

/// One gallery card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub variant_id: &'static str,
    /// Whether the card shows record data rather than a skeleton
    pub live: bool,
    pub markup: String,
}

/// Build a card for every variant.
///
/// A record without a name yields skeletons only.
pub fn thumbnails(variants: &[LayoutVariant], record: &ResumeRecord, active: &str) -> Vec<Thumbnail> {
    let show_live = record.has_name();
    variants
        .iter()
        .enumerate()
        .map(|(i, variant)| {
            let live = show_live && i < LIVE_THUMBNAILS;
            let inner = if live {
                miniature(record)
            } else {
                skeleton()
            };
            Thumbnail {
                variant_id: variant.id,
                live,
                markup: card(variant, variant.id == active, &inner),
            }
        })
        .collect()
}

fn card(variant: &LayoutVariant, active: bool, inner: &str) -> String {
    format!(
        concat!(
            "<div class=\"template-card{}\" data-template-id=\"{}\" data-category=\"{}\" title=\"{}\">",
            "<div class=\"template-preview\"><div class=\"template-preview-inner\">{}</div></div>",
            "<div class=\"template-info\"><div class=\"template-name\">{}</div>",
            "<div class=\"template-category\">{}</div></div></div>"
        ),
        if active { " active" } else { "" },
        variant.id,
        variant.category.id(),
        escape_html(variant.display_name),
        inner,
        escape_html(variant.display_name),
        variant.category.label(),
    )
}

fn miniature(record: &ResumeRecord) -> String {
    let personal = &record.personal;
    let name = if personal.full_name.is_empty() {
        PLACEHOLDER_NAME
    } else {
        personal.full_name.as_str()
    };
    let summary = truncate_text(&record.summary, SUMMARY_CHARS);
    format!(
        concat!(
            "<div class=\"thumb\"><div class=\"thumb-name\">{}</div>",
            "<div class=\"thumb-contact\">{}</div><div class=\"thumb-rule\"></div>",
            "<div class=\"thumb-summary\">{}</div>",
            "<div class=\"thumb-sections\">Experience • Education • Skills</div></div>"
        ),
        escape_html(name),
        escape_html(&personal.email),
        escape_html(&summary),
    )
}

fn skeleton() -> String {
    let bars: String = [40, 60, 100, 80, 90, 70, 100, 85, 75]
        .iter()
        .map(|w| format!("<div class=\"thumb-bar\" style=\"width:{}%\"></div>", w))
        .collect();
    format!("<div class=\"thumb thumb-skeleton\">{}</div>", bars)
}
