//! Stored profile record.

use serde::{Deserialize, Serialize};

/// A portfolio project listed on a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub title: String,
    /// Comma separated.
    pub skills: String,
    pub description: String,
}

impl Project {
    /// Skills split on commas, trimmed, blanks dropped.
    pub fn skill_list(&self) -> Vec<&str> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub number: String,
    pub earned_date: String,
    pub expiry_date: String,
}

/// Flattened signup record, keyed by full name in the user directory.
///
/// Sections that were skipped in the form are stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub age: u32,

    // work
    pub company: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,

    // education
    pub university: String,
    pub major: String,
    pub edu_start_date: String,
    pub edu_end_date: String,

    // citizenship
    pub country: String,
    pub visa_type: String,
    pub seeking_work_auth: bool,

    // additional
    pub about_me: String,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub profile_picture_name: Option<String>,
}

impl Profile {
    /// `"First Last"`, the key the profile is stored under.
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

pub(crate) fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}
