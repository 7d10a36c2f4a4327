//! Core data model: the raw profile record and the normalized output.
//!
//! ```text
//! Profile (camelCase JSON, every field lenient)
//! ├── identity: username, urn, firstName, lastName, headline, ...
//! ├── positions: Vec<Position>     (start/end: PartialDate)
//! ├── educations: Vec<Education>   (start/end: PartialDate, year only)
//! ├── skills, languages: Vec<NamedEntity>
//! └── supportedLocales: Vec<SupportedLocale>
//!
//!         ↓ normalize()
//!
//! NormalizedProfile (snake_case JSON)
//! ├── identity + linkedin_url
//! ├── keywords, skills, languages, companies (joined strings)
//! ├── experiences: Vec<ExperienceGroup> → jobs: Vec<Job>
//! ├── years_of_experience
//! ├── current_* (CurrentPosition, flattened)
//! ├── educations: Vec<EducationEntry>, degrees, schools
//! └── profil_details (verbatim input)
//! ```
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::NormalizeError;
use crate::lenient;

/// Value of `years_of_experience` when no qualifying position exists.
pub const UNKNOWN_YEARS_OF_EXPERIENCE: u32 = 99;

/// A raw profile record as supplied by the caller.
///
/// Decoding never fails on individual fields: wrong types and missing
/// fields become empty values. Use [`Profile::from_value`] to decode.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient::string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub urn: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub headline: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub profile_picture: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub is_open_to_work: bool,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub is_hiring: bool,
    #[serde(default, deserialize_with = "lenient::object")]
    pub geo: Option<Geo>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub positions: Vec<Position>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub educations: Vec<Education>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub skills: Vec<NamedEntity>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub languages: Vec<NamedEntity>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub supported_locales: Vec<SupportedLocale>,
}

impl Profile {
    /// Decodes a profile from a JSON value.
    ///
    /// # Errors
    ///
    /// [`NormalizeError::MalformedRecord`] if `value` is not a JSON object.
    ///
    /// ```rust
    /// use normalize::Profile;
    /// use serde_json::json;
    ///
    /// let profile = Profile::from_value(&json!({ "urn": "u1", "positions": "junk" })).unwrap();
    /// assert_eq!(profile.urn, "u1");
    /// assert!(profile.positions.is_empty());
    ///
    /// assert!(Profile::from_value(&json!([1, 2])).is_err());
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, NormalizeError> {
        if !value.is_object() {
            return Err(NormalizeError::MalformedRecord(format!(
                "expected a JSON object, found {}",
                json_kind(value)
            )));
        }
        Profile::deserialize(value).map_err(|e| NormalizeError::MalformedRecord(e.to_string()))
    }

    /// `geo.full`, or `""`.
    pub fn location(&self) -> &str {
        self.geo.as_ref().map(|g| g.full.as_str()).unwrap_or_default()
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Geo {
    #[serde(default, deserialize_with = "lenient::string")]
    pub full: String,
}

/// One job entry of the work history.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub employment_type: String,
    #[serde(default, deserialize_with = "lenient::object")]
    pub start: Option<PartialDate>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub end: Option<PartialDate>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_id: String,
    #[serde(rename = "companyURL", default, deserialize_with = "lenient::string")]
    pub company_url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_logo: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_staff_count_range: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_industry: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_description: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub company_specialties: Vec<String>,
}

impl Position {
    /// A position is ongoing when it has no end, or an end without a year.
    pub fn is_ongoing(&self) -> bool {
        self.end
            .as_ref()
            .and_then(PartialDate::year)
            .is_none()
    }
}

/// A date with a mandatory year and optional month/day.
///
/// Zero values count as absent, matching how the upstream exports encode
/// "unknown".
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct PartialDate {
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub year: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub month: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub day: Option<u32>,
}

impl PartialDate {
    pub fn new(year: u32, month: Option<u32>, day: Option<u32>) -> Self {
        Self {
            year: Some(year),
            month,
            day,
        }
    }

    pub fn year(&self) -> Option<u32> {
        self.year.filter(|y| *y != 0)
    }

    pub fn month(&self) -> Option<u32> {
        self.month.filter(|m| *m != 0)
    }

    pub fn day(&self) -> Option<u32> {
        self.day.filter(|d| *d != 0)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub field_of_study: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub school_name: String,
    #[serde(default, deserialize_with = "lenient::object")]
    pub start: Option<PartialDate>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub end: Option<PartialDate>,
}

/// A skill or language entry (`{name}`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct NamedEntity {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SupportedLocale {
    #[serde(default, deserialize_with = "lenient::string")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub language: String,
}

/// The flat, analytics-friendly record produced by [`normalize`](crate::normalize).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedProfile {
    pub urn: String,
    pub username: String,
    pub public_linkedin_identifier: String,
    pub linkedin_url: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub headline: String,
    pub summary: String,
    pub profile_picture: String,
    pub location: String,
    pub is_open_to_work: bool,
    pub is_hiring: bool,
    /// Space-joined whitespace tokens, first occurrence order, no repeats.
    pub keywords: String,
    pub skills: String,
    pub languages: String,
    pub companies: String,
    pub experiences: Vec<ExperienceGroup>,
    /// Rounded years since the earliest qualifying position, or
    /// [`UNKNOWN_YEARS_OF_EXPERIENCE`].
    pub years_of_experience: u32,
    #[serde(flatten)]
    pub current: CurrentPosition,
    pub educations: Vec<EducationEntry>,
    pub degrees: String,
    pub schools: String,
    /// The input record, untouched.
    pub profil_details: Value,
}

/// Consecutive positions at one employer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExperienceGroup {
    pub company_name: String,
    pub company_id: String,
    pub company_url: String,
    pub company_logo: String,
    pub company_staff_count_range: String,
    pub company_industry: String,
    pub company_description: String,
    pub company_specialties: Vec<String>,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub title: String,
    pub description: String,
    pub employment_type: String,
    /// `"Jul 2020 - Present"`, or `""` when the start is unknown.
    pub date_range: String,
    /// Rounded 30-day months, `0` when the start is unknown.
    pub duration_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
}

/// Snapshot of the first ongoing position; every field is `""` when there
/// is none.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentPosition {
    #[serde(rename = "current_title")]
    pub title: String,
    #[serde(rename = "current_company_name")]
    pub company_name: String,
    #[serde(rename = "current_company_id")]
    pub company_id: String,
    #[serde(rename = "current_company_url")]
    pub company_url: String,
    #[serde(rename = "current_company_logo")]
    pub company_logo: String,
    #[serde(rename = "current_company_industry")]
    pub company_industry: String,
    #[serde(rename = "current_company_staff_count_range")]
    pub company_staff_count_range: String,
    #[serde(rename = "current_employment_type")]
    pub employment_type: String,
    #[serde(rename = "current_date_range")]
    pub date_range: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EducationEntry {
    pub school_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
