//! The canonical résumé record.

use serde::{Deserialize, Serialize};

/// Personal and contact details.
///
/// Every field is a plain string; an empty string means the field is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Free-text address, used when no address sub-field is filled in
    pub address: String,
    pub linkedin: String,
    pub portfolio: String,
    /// Encoded image handle (typically a data URL), empty when there is none
    pub profile_image: String,

    /// Village
    pub vill: String,
    /// Post office
    pub po: String,
    /// Police station
    pub ps: String,
    pub city: String,
    pub state: String,
    pub pincode: String,

    pub father_name: String,
    /// Date of birth, kept as typed
    pub dob: String,
}

impl PersonalInfo {
    /// Whether any composite-address sub-field is filled in.
    pub fn has_address_parts(&self) -> bool {
        [
            &self.vill,
            &self.po,
            &self.ps,
            &self.city,
            &self.state,
            &self.pincode,
        ]
        .iter()
        .any(|s| !s.is_empty())
    }
}

/// The kinds of repeatable entries a form collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Education,
    Experience,
    Projects,
    Certifications,
    Languages,
}

impl EntryKind {
    /// All entry kinds in form order.
    pub const ALL: [EntryKind; 5] = [
        EntryKind::Education,
        EntryKind::Experience,
        EntryKind::Projects,
        EntryKind::Certifications,
        EntryKind::Languages,
    ];

    /// Collection key used by the form and by the persisted JSON.
    pub fn key(self) -> &'static str {
        match self {
            EntryKind::Education => "education",
            EntryKind::Experience => "experience",
            EntryKind::Projects => "projects",
            EntryKind::Certifications => "certifications",
            EntryKind::Languages => "languages",
        }
    }

    /// Field names the form exposes for this kind.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            EntryKind::Education => &["degree", "institution", "startDate", "endDate", "description"],
            EntryKind::Experience => &[
                "jobTitle",
                "company",
                "startDate",
                "endDate",
                "current",
                "description",
            ],
            EntryKind::Projects => &["name", "description", "link"],
            EntryKind::Certifications => &["name", "issuer", "date"],
            EntryKind::Languages => &["name", "proficiency"],
        }
    }
}

/// Behaviour shared by every repeatable entry type.
pub trait Entry {
    /// Which collection this entry belongs to.
    const KIND: EntryKind;

    /// An entry is kept only if at least one declared field is a non-empty
    /// string or a `true` flag.
    fn is_populated(&self) -> bool;
}

fn any_filled(fields: &[&String]) -> bool {
    fields.iter().any(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl Entry for EducationEntry {
    const KIND: EntryKind = EntryKind::Education;

    fn is_populated(&self) -> bool {
        any_filled(&[
            &self.degree,
            &self.institution,
            &self.start_date,
            &self.end_date,
            &self.description,
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    /// Still in this position; forces the end date to "Present"
    pub current: bool,
    pub description: String,
}

impl Entry for ExperienceEntry {
    const KIND: EntryKind = EntryKind::Experience;

    fn is_populated(&self) -> bool {
        self.current
            || any_filled(&[
                &self.job_title,
                &self.company,
                &self.start_date,
                &self.end_date,
                &self.description,
            ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub link: String,
}

impl Entry for ProjectEntry {
    const KIND: EntryKind = EntryKind::Projects;

    fn is_populated(&self) -> bool {
        any_filled(&[&self.name, &self.description, &self.link])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

impl Entry for CertificationEntry {
    const KIND: EntryKind = EntryKind::Certifications;

    fn is_populated(&self) -> bool {
        any_filled(&[&self.name, &self.issuer, &self.date])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageEntry {
    pub name: String,
    pub proficiency: String,
}

impl Entry for LanguageEntry {
    const KIND: EntryKind = EntryKind::Languages;

    fn is_populated(&self) -> bool {
        any_filled(&[&self.name, &self.proficiency])
    }
}

/// A fully assembled résumé.
///
/// This is also the persisted JSON schema: field names serialize in
/// camelCase and missing keys default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    pub personal: PersonalInfo,
    pub summary: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub languages: Vec<LanguageEntry>,
    pub interests: Vec<String>,
}

impl ResumeRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a non-blank full name is present.
    pub fn has_name(&self) -> bool {
        !self.personal.full_name.trim().is_empty()
    }

    /// Whether nothing at all has been filled in.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Drop entries that carry no data and blank list items.
    ///
    /// Records coming from storage or hand-written JSON go through this so
    /// they obey the same inclusion rules as freshly assembled ones.
    pub fn normalized(mut self) -> Self {
        self.education.retain(Entry::is_populated);
        self.experience.retain(Entry::is_populated);
        self.projects.retain(Entry::is_populated);
        self.certifications.retain(Entry::is_populated);
        self.languages.retain(Entry::is_populated);
        self.skills.retain(|s| !s.trim().is_empty());
        self.interests.retain(|s| !s.trim().is_empty());
        self
    }
}
