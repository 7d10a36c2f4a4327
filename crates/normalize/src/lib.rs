//! Profile normalization core.
//!
//! This is where a raw LinkedIn-style profile record becomes a flat,
//! analytics-friendly record. The function is pure: no I/O, no shared state,
//! and the current time is a parameter, so the same input and the same `now`
//! always produce the same output.
//!
//! ## What we do here
//!
//! - **Decode leniently** - every optional field is defaulted on its own; a
//!   wrong type in one field never rejects the record
//! - **Extract keywords** - whitespace tokens of the free-text fields,
//!   deduplicated in first-occurrence order
//! - **Group experience** - consecutive positions at the same employer nest
//!   under one block
//! - **Estimate seniority** - years since the earliest real (non-intern,
//!   non-volunteer, long enough) position, or the `99` sentinel
//! - **Clean education and languages** - display strings, locale-implied
//!   languages
//! - **Decode the public identifier** - strict percent-decoding of `username`
//!
//! ## Main entry point
//!
//! Call [`normalize`] with the raw JSON value, the instant to measure
//! durations against, and a [`NormalizeConfig`].
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use normalize::{normalize, NormalizeConfig};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "urn": "ACoAAA123",
//!     "username": "ada-lovelace",
//!     "headline": "Engineer Engineer",
//!     "positions": [
//!         {"title": "Engineer", "companyId": "1", "companyName": "Analytical",
//!          "start": {"year": 2015}}
//!     ],
//!     "supportedLocales": [{"country": "FR"}]
//! });
//! let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
//!
//! let record = normalize(&raw, now, &NormalizeConfig::default()).unwrap();
//!
//! assert_eq!(record.keywords, "Engineer");
//! assert_eq!(record.years_of_experience, 10);
//! assert_eq!(record.languages, "Français");
//! assert_eq!(record.linkedin_url, "https://www.linkedin.com/in/ada-lovelace");
//! ```
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn, Level};

mod config;
mod dates;
mod education;
mod error;
mod experience;
mod identity;
mod keywords;
mod languages;
mod lenient;
mod types;

pub use crate::config::{ConfigError, LocaleLanguage, NormalizeConfig};
pub use crate::dates::{format_month_year, months_between, reconstruct_date, years_since};
pub use crate::education::{clean_education, clean_educations};
pub use crate::error::NormalizeError;
pub use crate::experience::{
    build_job, career_start, current_position, group_experiences, years_of_experience,
};
pub use crate::identity::{decode_identifier, profile_url};
pub use crate::keywords::{extract_keywords, KeywordSet};
pub use crate::languages::infer_languages;
pub use crate::types::{
    CurrentPosition, Education, EducationEntry, ExperienceGroup, Geo, Job, NamedEntity,
    NormalizedProfile, PartialDate, Position, Profile, SupportedLocale,
    UNKNOWN_YEARS_OF_EXPERIENCE,
};

/// Normalize a raw profile record.
///
/// `now` is the instant every duration is measured against; capture it once
/// per call (or once per batch) so all computations agree.
///
/// # Errors
///
/// - [`NormalizeError::MalformedRecord`] when `raw` is not a JSON object
/// - [`NormalizeError::InvalidIdentifier`] when `username` is not valid
///   percent-encoding
pub fn normalize(
    raw: &Value,
    now: DateTime<Utc>,
    cfg: &NormalizeConfig,
) -> Result<NormalizedProfile, NormalizeError> {
    let start = Instant::now();

    let profile = match Profile::from_value(raw) {
        Ok(profile) => profile,
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(error = %err, elapsed_micros, "normalize_failure");
            return Err(err);
        }
    };

    let span = tracing::span!(
        Level::INFO,
        "normalize.normalize",
        urn = %profile.urn,
        positions = profile.positions.len()
    );
    let _guard = span.enter();

    match normalize_profile(&profile, raw, now, cfg) {
        Ok(record) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                experiences = record.experiences.len(),
                educations = record.educations.len(),
                years_of_experience = record.years_of_experience,
                elapsed_micros,
                "normalize_success"
            );
            Ok(record)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(
                username = %profile.username,
                error = %err,
                elapsed_micros,
                "normalize_failure"
            );
            Err(err)
        }
    }
}

/// Normalize an already-decoded profile. `raw` is embedded verbatim as
/// `profil_details`.
///
/// A missing or empty `username` yields an empty `linkedin_url`, not the
/// bare `profile_url_base`.
pub fn normalize_profile(
    profile: &Profile,
    raw: &Value,
    now: DateTime<Utc>,
    cfg: &NormalizeConfig,
) -> Result<NormalizedProfile, NormalizeError> {
    let identifier = decode_identifier(&profile.username)?;
    let linkedin_url = profile_url(&cfg.profile_url_base, &identifier);
    let separator = cfg.list_separator.as_str();

    let experiences = group_experiences(&profile.positions, now, cfg);
    let companies = experience::company_names(&experiences).join(separator);
    let educations = clean_educations(&profile.educations);
    let (degrees, schools) = education::summarize(&educations, separator);

    let skills: Vec<&str> = profile
        .skills
        .iter()
        .map(|s| s.name.trim())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(NormalizedProfile {
        urn: profile.urn.clone(),
        username: profile.username.clone(),
        public_linkedin_identifier: identifier,
        linkedin_url,
        first_name: profile.first_name.trim().to_string(),
        last_name: profile.last_name.trim().to_string(),
        full_name: full_name(&profile.first_name, &profile.last_name),
        headline: profile.headline.clone(),
        summary: profile.summary.clone(),
        profile_picture: profile.profile_picture.clone(),
        location: profile.location().to_string(),
        is_open_to_work: profile.is_open_to_work,
        is_hiring: profile.is_hiring,
        keywords: extract_keywords(profile).join(),
        skills: skills.join(separator),
        languages: infer_languages(profile, cfg).join(separator),
        companies,
        experiences,
        years_of_experience: years_of_experience(&profile.positions, now, cfg),
        current: current_position(&profile.positions, cfg),
        educations,
        degrees,
        schools,
        profil_details: raw.clone(),
    })
}

fn full_name(first: &str, last: &str) -> String {
    [first.trim(), last.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
