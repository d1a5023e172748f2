//! Field-pattern checks.
//!
//! Empty optional fields are always valid; a pattern only applies once
//! something has been typed. The one required field is the full name, and
//! only exporting or printing insists on it.

use crate::error::{Error, Result};
use crate::model::ResumeRecord;
use regex::Regex;
use serde::Serialize;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^\+?\(?[0-9]{1,4}\)?[-\s./0-9]*$";
const URL_PATTERN: &str =
    r"^(https?://)?([\w-]+\.)+[\w-]{2,}(/[\w\-._~:/?#\[\]@!$&'()*+,;=]*)?$";

/// Message shown when the name is missing at export or print time.
pub const NAME_REQUIRED: &str = "Please enter your name first.";

/// Kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    Required,
    Email,
    Phone,
    Url,
}

impl Rule {
    /// Message shown when a value breaks this rule.
    pub fn message(self) -> &'static str {
        match self {
            Rule::Required => "This field is required",
            Rule::Email => "Please enter a valid email address",
            Rule::Phone => "Please enter a valid phone number",
            Rule::Url => "Please enter a valid URL",
        }
    }
}

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Form field name, e.g. `email` or `projects[1].link`
    pub field: String,
    pub rule: Rule,
    pub message: &'static str,
}

impl FieldIssue {
    fn new(field: impl Into<String>, rule: Rule) -> Self {
        Self {
            field: field.into(),
            rule,
            message: rule.message(),
        }
    }
}

/// Compiled field patterns.
#[derive(Debug, Clone)]
pub struct Validator {
    email: Regex,
    phone: Regex,
    url: Regex,
}

impl Validator {
    /// Compile the patterns.
    pub fn new() -> Result<Self> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN)?,
            phone: Regex::new(PHONE_PATTERN)?,
            url: Regex::new(URL_PATTERN)?,
        })
    }

    /// Whether `value` satisfies `rule`. Surrounding whitespace is ignored.
    pub fn check(&self, rule: Rule, value: &str) -> bool {
        let value = value.trim();
        match rule {
            Rule::Required => !value.is_empty(),
            _ if value.is_empty() => true,
            Rule::Email => self.email.is_match(value),
            Rule::Phone => self.phone.is_match(value),
            Rule::Url => self.url.is_match(value),
        }
    }

    /// Check every pattern-bearing field of a record.
    ///
    /// The name is not required here; see [`require_name`].
    pub fn validate_record(&self, record: &ResumeRecord) -> Vec<FieldIssue> {
        let personal = &record.personal;
        let mut issues = Vec::new();

        let fields = [
            ("email", Rule::Email, &personal.email),
            ("phone", Rule::Phone, &personal.phone),
            ("linkedin", Rule::Url, &personal.linkedin),
            ("portfolio", Rule::Url, &personal.portfolio),
        ];
        for (field, rule, value) in fields {
            if !self.check(rule, value) {
                issues.push(FieldIssue::new(field, rule));
            }
        }

        for (i, project) in record.projects.iter().enumerate() {
            if !self.check(Rule::Url, &project.link) {
                issues.push(FieldIssue::new(format!("projects[{}].link", i), Rule::Url));
            }
        }

        issues
    }
}

/// Fail with [`Error::InvalidInput`] when the record has no name.
pub fn require_name(record: &ResumeRecord) -> Result<()> {
    if record.has_name() {
        Ok(())
    } else {
        Err(Error::InvalidInput(NAME_REQUIRED.to_string()))
    }
}
