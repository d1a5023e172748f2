//! Header contact lines and personal details.

use crate::model::{DetailLine, PersonalInfo};

/// Name shown when the record has none.
pub const PLACEHOLDER_NAME: &str = "Your Name";

/// Separator used when contact lines are rendered inline.
pub const CONTACT_SEPARATOR: &str = " | ";

/// Contact lines in display order: email, phone, address, linkedin,
/// portfolio. Empty values are skipped.
pub fn contact_lines(personal: &PersonalInfo) -> Vec<String> {
    let address = address_line(personal);
    [
        personal.email.as_str(),
        personal.phone.as_str(),
        address.as_str(),
        personal.linkedin.as_str(),
        personal.portfolio.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .map(String::from)
    .collect()
}

/// Address as a single line.
///
/// Sub-fields win over the free-text address as soon as any of them is set.
/// Village, post office and police station carry a label; city, state and
/// pincode do not.
pub fn address_line(personal: &PersonalInfo) -> String {
    if !personal.has_address_parts() {
        return personal.address.clone();
    }

    let labelled = [
        ("Vill", &personal.vill),
        ("PO", &personal.po),
        ("PS", &personal.ps),
    ]
    .into_iter()
    .filter(|(_, v)| !v.is_empty())
    .map(|(label, v)| format!("{}: {}", label, v));

    let plain = [&personal.city, &personal.state, &personal.pincode]
        .into_iter()
        .filter(|v| !v.is_empty())
        .cloned();

    labelled.chain(plain).collect::<Vec<_>>().join(", ")
}

/// Labelled personal details (father's name, date of birth).
pub fn detail_lines(personal: &PersonalInfo) -> Vec<DetailLine> {
    [("Father", &personal.father_name), ("DOB", &personal.dob)]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(label, v)| DetailLine {
            label: label.to_string(),
            value: v.clone(),
        })
        .collect()
}

/// Display name, falling back to [`PLACEHOLDER_NAME`].
pub fn display_name(personal: &PersonalInfo) -> String {
    let name = personal.full_name.trim();
    if name.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        name.to_string()
    }
}
