//! Data model assembler: form state in, [`ResumeRecord`] out.
//!
//! The form itself belongs to the host. The assembler reads it through the
//! [`FormState`] trait once per render and never fails: missing fields
//! become empty strings and missing collections become empty vectors.
//!
//! # Example
//!
//! ```
//! use resumake::assemble::{assemble, fields, FormSnapshot};
//! use resumake::model::EntryKind;
//!
//! let mut form = FormSnapshot::new();
//! form.set_field(fields::FULL_NAME, "Ada Lovelace");
//! form.add_skills("Math, C++");
//! form.push_entry(EntryKind::Experience, [("jobTitle", "Analyst")]);
//!
//! let record = assemble(&form);
//! assert_eq!(record.skills, vec!["Math", "C++"]);
//! assert_eq!(record.experience[0].job_title, "Analyst");
//! ```

use crate::format::split_list;
use crate::model::{
    CertificationEntry, EducationEntry, Entry, EntryKind, ExperienceEntry, LanguageEntry,
    PersonalInfo, ProjectEntry, ResumeRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Names of the single-value form fields.
pub mod fields {
    pub const FULL_NAME: &str = "fullName";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const ADDRESS: &str = "address";
    pub const LINKEDIN: &str = "linkedin";
    pub const PORTFOLIO: &str = "portfolio";
    pub const VILL: &str = "vill";
    pub const PO: &str = "po";
    pub const PS: &str = "ps";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const PINCODE: &str = "pincode";
    pub const FATHER_NAME: &str = "fatherName";
    pub const DOB: &str = "dob";
    pub const SUMMARY: &str = "summary";
    /// Comma-separated free text
    pub const INTERESTS: &str = "interests";
}

/// A single value inside a dynamic entry: text input or checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s.trim(),
            FieldValue::Flag(_) => "",
        }
    }

    fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// One dynamic entry as the form holds it: field name to value.
pub type RawEntry = BTreeMap<String, FieldValue>;

/// Read access to the host's current form state.
pub trait FormState {
    /// Current value of a named single-value field, or `None` if the field
    /// does not exist.
    fn field(&self, name: &str) -> Option<String>;

    /// Entries of one dynamic collection, in insertion order.
    fn entries(&self, kind: EntryKind) -> Vec<RawEntry>;

    /// Skill tags, in insertion order.
    fn skill_tags(&self) -> Vec<String>;

    /// Encoded profile image, or empty.
    fn profile_image(&self) -> String;
}

/// Build a record from the current form state.
pub fn assemble<F: FormState + ?Sized>(form: &F) -> ResumeRecord {
    let text = |name: &str| form.field(name).unwrap_or_default().trim().to_string();

    let personal = PersonalInfo {
        full_name: text(fields::FULL_NAME),
        email: text(fields::EMAIL),
        phone: text(fields::PHONE),
        address: text(fields::ADDRESS),
        linkedin: text(fields::LINKEDIN),
        portfolio: text(fields::PORTFOLIO),
        profile_image: form.profile_image(),
        vill: text(fields::VILL),
        po: text(fields::PO),
        ps: text(fields::PS),
        city: text(fields::CITY),
        state: text(fields::STATE),
        pincode: text(fields::PINCODE),
        father_name: text(fields::FATHER_NAME),
        dob: text(fields::DOB),
    };

    let record = ResumeRecord {
        personal,
        summary: text(fields::SUMMARY),
        education: collect(form, education_from),
        experience: collect(form, experience_from),
        skills: form
            .skill_tags()
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        projects: collect(form, project_from),
        certifications: collect(form, certification_from),
        languages: collect(form, language_from),
        interests: split_list(&text(fields::INTERESTS)),
    };

    log::debug!(
        "Assembled record: {} experience, {} education, {} skills",
        record.experience.len(),
        record.education.len(),
        record.skills.len()
    );
    record
}

fn collect<F, E>(form: &F, convert: fn(&RawEntry) -> E) -> Vec<E>
where
    F: FormState + ?Sized,
    E: Entry,
{
    form.entries(E::KIND)
        .iter()
        .map(convert)
        .filter(Entry::is_populated)
        .collect()
}

fn text(raw: &RawEntry, key: &str) -> String {
    raw.get(key).map(|v| v.as_text().to_string()).unwrap_or_default()
}

fn flag(raw: &RawEntry, key: &str) -> bool {
    raw.get(key).is_some_and(FieldValue::as_flag)
}

fn education_from(raw: &RawEntry) -> EducationEntry {
    EducationEntry {
        degree: text(raw, "degree"),
        institution: text(raw, "institution"),
        start_date: text(raw, "startDate"),
        end_date: text(raw, "endDate"),
        description: text(raw, "description"),
    }
}

fn experience_from(raw: &RawEntry) -> ExperienceEntry {
    ExperienceEntry {
        job_title: text(raw, "jobTitle"),
        company: text(raw, "company"),
        start_date: text(raw, "startDate"),
        end_date: text(raw, "endDate"),
        current: flag(raw, "current"),
        description: text(raw, "description"),
    }
}

fn project_from(raw: &RawEntry) -> ProjectEntry {
    ProjectEntry {
        name: text(raw, "name"),
        description: text(raw, "description"),
        link: text(raw, "link"),
    }
}

fn certification_from(raw: &RawEntry) -> CertificationEntry {
    CertificationEntry {
        name: text(raw, "name"),
        issuer: text(raw, "issuer"),
        date: text(raw, "date"),
    }
}

fn language_from(raw: &RawEntry) -> LanguageEntry {
    LanguageEntry {
        name: text(raw, "name"),
        proficiency: text(raw, "proficiency"),
    }
}

/// An in-memory form, deserializable from a JSON snapshot.
///
/// ```json
/// {
///   "fields": { "fullName": "Ada Lovelace", "interests": "chess, poetry" },
///   "entries": { "experience": [ { "jobTitle": "Analyst", "current": true } ] },
///   "skillTags": ["Math"],
///   "profileImage": ""
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSnapshot {
    pub fields: BTreeMap<String, String>,
    pub entries: BTreeMap<EntryKind, Vec<RawEntry>>,
    pub skill_tags: Vec<String>,
    pub profile_image: String,
}

impl FormSnapshot {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single-value field.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Append a dynamic entry.
    pub fn push_entry<I, K, V>(&mut self, kind: EntryKind, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let entry = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.entries.entry(kind).or_default().push(entry);
    }

    /// Remove the entry at `index`; returns whether anything was removed.
    pub fn remove_entry(&mut self, kind: EntryKind, index: usize) -> bool {
        match self.entries.get_mut(&kind) {
            Some(list) if index < list.len() => {
                list.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Add skill tags; comma-separated input adds several at once.
    pub fn add_skills(&mut self, input: &str) {
        self.skill_tags.extend(split_list(input));
    }

    /// Remove the skill tag at `index`.
    pub fn remove_skill(&mut self, index: usize) -> Option<String> {
        (index < self.skill_tags.len()).then(|| self.skill_tags.remove(index))
    }

    /// Replace the profile image handle; empty clears it.
    pub fn set_profile_image(&mut self, image: impl Into<String>) {
        self.profile_image = image.into();
    }

    /// Rebuild a form from a record, the way a host repopulates its inputs
    /// after loading saved state.
    pub fn from_record(record: &ResumeRecord) -> Self {
        let mut form = FormSnapshot::new();
        let p = &record.personal;
        for (name, value) in [
            (fields::FULL_NAME, &p.full_name),
            (fields::EMAIL, &p.email),
            (fields::PHONE, &p.phone),
            (fields::ADDRESS, &p.address),
            (fields::LINKEDIN, &p.linkedin),
            (fields::PORTFOLIO, &p.portfolio),
            (fields::VILL, &p.vill),
            (fields::PO, &p.po),
            (fields::PS, &p.ps),
            (fields::CITY, &p.city),
            (fields::STATE, &p.state),
            (fields::PINCODE, &p.pincode),
            (fields::FATHER_NAME, &p.father_name),
            (fields::DOB, &p.dob),
            (fields::SUMMARY, &record.summary),
        ] {
            if !value.is_empty() {
                form.set_field(name, value.as_str());
            }
        }
        if !record.interests.is_empty() {
            form.set_field(fields::INTERESTS, record.interests.join(", "));
        }
        form.profile_image = p.profile_image.clone();
        form.skill_tags = record.skills.clone();

        for e in &record.education {
            form.push_entry(
                EntryKind::Education,
                [
                    ("degree", e.degree.as_str()),
                    ("institution", e.institution.as_str()),
                    ("startDate", e.start_date.as_str()),
                    ("endDate", e.end_date.as_str()),
                    ("description", e.description.as_str()),
                ],
            );
        }
        for e in &record.experience {
            let mut entry: RawEntry = [
                ("jobTitle", e.job_title.as_str()),
                ("company", e.company.as_str()),
                ("startDate", e.start_date.as_str()),
                ("endDate", e.end_date.as_str()),
                ("description", e.description.as_str()),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), FieldValue::from(v)))
            .collect();
            entry.insert("current".to_string(), FieldValue::Flag(e.current));
            form.entries
                .entry(EntryKind::Experience)
                .or_default()
                .push(entry);
        }
        for e in &record.projects {
            form.push_entry(
                EntryKind::Projects,
                [
                    ("name", e.name.as_str()),
                    ("description", e.description.as_str()),
                    ("link", e.link.as_str()),
                ],
            );
        }
        for e in &record.certifications {
            form.push_entry(
                EntryKind::Certifications,
                [("name", e.name.as_str()), ("issuer", e.issuer.as_str()), ("date", e.date.as_str())],
            );
        }
        for e in &record.languages {
            form.push_entry(
                EntryKind::Languages,
                [("name", e.name.as_str()), ("proficiency", e.proficiency.as_str())],
            );
        }
        form
    }
}

impl FormState for FormSnapshot {
    fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    fn entries(&self, kind: EntryKind) -> Vec<RawEntry> {
        self.entries.get(&kind).cloned().unwrap_or_default()
    }

    fn skill_tags(&self) -> Vec<String> {
        self.skill_tags.clone()
    }

    fn profile_image(&self) -> String {
        self.profile_image.clone()
    }
}
