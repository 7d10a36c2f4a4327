//! Configuration types for the normalizer.
//!
//! [`NormalizeConfig`] holds the policy constants of the normalization
//! algorithm: the mid-year default for partial dates, the seniority filter,
//! locale-to-language rules and the display strings of the output record.
//! Every field has a default, so an empty JSON/YAML object is a valid config.
//!
//! # Quick Start
//!
//! ```rust
//! use normalize::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! config.validate().expect("default config is valid");
//! ```
//!
//! # Custom Configuration
//!
//! ```rust
//! use normalize::{LocaleLanguage, NormalizeConfig};
//!
//! let config = NormalizeConfig {
//!     min_tenure_months: 12.0,
//!     locale_languages: vec![LocaleLanguage {
//!         countries: vec!["DE".into()],
//!         language: "Deutsch".into(),
//!         aliases: vec!["Deutsch".into(), "German".into()],
//!     }],
//!     ..Default::default()
//! };
//!
//! assert!(config.validate().is_ok());
//! ```
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime configuration for profile normalization.
///
/// Cheap to clone and serializable, so it can be embedded in application
/// config files:
///
/// ```json
/// {
///   "version": 1,
///   "default_month": 7,
///   "min_tenure_months": 7.0,
///   "excluded_markers": ["intern", "stagiaire", "volunteer", "bénévole"],
///   "present_label": "Present",
///   "month_year_format": "%b %Y",
///   "list_separator": ", ",
///   "profile_url_base": "https://www.linkedin.com/in/"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Version of the normalization policy, for tracking config changes.
    ///
    /// Default: `1`
    pub version: u32,

    /// Month (1-indexed) used when a partial date only carries a year.
    ///
    /// July places a year-only date in the middle of its year, which keeps
    /// tenure estimates unbiased when the month is unknown.
    ///
    /// Default: `7`
    pub default_month: u32,

    /// Minimum position length, in 30-day months, for a position to count
    /// toward the start of a career.
    ///
    /// Default: `7.0`
    pub min_tenure_months: f64,

    /// Lowercase substrings that mark a position as an internship or
    /// volunteer work. Matched against the lowercased `employmentType` and
    /// `title`; matching positions are ignored by the seniority calculation.
    ///
    /// Default: `["intern", "stagiaire", "volunteer", "bénévole"]`
    pub excluded_markers: Vec<String>,

    /// Languages implied by the profile's first supported locale.
    ///
    /// Default: `FR → Français`, `US`/`EN → English`.
    pub locale_languages: Vec<LocaleLanguage>,

    /// Label used as the end of a date range for ongoing positions.
    ///
    /// Default: `"Present"`
    pub present_label: String,

    /// `chrono` format string for the month-year parts of a date range.
    ///
    /// Default: `"%b %Y"` (e.g. `Jul 2020`)
    pub month_year_format: String,

    /// Separator used for every comma-joined summary field.
    ///
    /// Default: `", "`
    pub list_separator: String,

    /// Prefix of `linkedin_url`; the decoded identifier is appended.
    ///
    /// Default: `"https://www.linkedin.com/in/"`
    pub profile_url_base: String,
}

/// One locale-implied language.
///
/// When the profile's first supported locale has a country listed in
/// `countries`, `language` is appended to the language list unless one of
/// `aliases` is already present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleLanguage {
    /// Upper-case country codes that imply this language.
    pub countries: Vec<String>,
    /// Display name appended to the language list.
    pub language: String,
    /// Names that count as "already listed" (compared case-insensitively).
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl LocaleLanguage {
    /// Whether this rule applies to `country`.
    pub fn matches_country(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }

    /// Whether `names` already contains this language or one of its aliases.
    pub fn is_listed<S: AsRef<str>>(&self, names: &[S]) -> bool {
        let known: Vec<String> = std::iter::once(&self.language)
            .chain(self.aliases.iter())
            .map(|alias| alias.to_lowercase())
            .collect();
        names
            .iter()
            .any(|name| known.contains(&name.as_ref().to_lowercase()))
    }
}

/// Errors that can occur when validating a [`NormalizeConfig`].
///
/// These are start-up issues, meant to be surfaced before any record is
/// processed.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// `default_month` is not a calendar month.
    #[error("default_month must be between 1 and 12, got {0}")]
    InvalidDefaultMonth(u32),

    /// `min_tenure_months` is negative or not finite.
    #[error("min_tenure_months must be a finite, non-negative number, got {0}")]
    InvalidTenure(f64),

    /// An excluded marker is empty and would match every position.
    #[error("excluded_markers must not contain empty strings")]
    EmptyMarker,

    /// A locale rule has no country or no language.
    #[error("locale rule #{index} must name at least one country and a language")]
    InvalidLocaleRule {
        /// Position of the offending rule in `locale_languages`.
        index: usize,
    },

    /// `month_year_format` is empty.
    #[error("month_year_format must not be empty")]
    EmptyDateFormat,

    /// `month_year_format` contains an unknown `%` specifier.
    #[error("month_year_format {0:?} is not a valid strftime format")]
    InvalidDateFormat(String),
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            default_month: 7,
            min_tenure_months: 7.0,
            excluded_markers: ["intern", "stagiaire", "volunteer", "bénévole"]
                .into_iter()
                .map(String::from)
                .collect(),
            locale_languages: vec![
                LocaleLanguage {
                    countries: vec!["FR".into()],
                    language: "Français".into(),
                    aliases: vec!["Français".into(), "French".into()],
                },
                LocaleLanguage {
                    countries: vec!["US".into(), "EN".into()],
                    language: "English".into(),
                    aliases: vec!["English".into()],
                },
            ],
            present_label: "Present".into(),
            month_year_format: "%b %Y".into(),
            list_separator: ", ".into(),
            profile_url_base: "https://www.linkedin.com/in/".into(),
        }
    }
}

impl NormalizeConfig {
    /// Validates internal consistency of this configuration.
    ///
    /// In-memory checks only; call once at start-up.
    ///
    /// ```rust
    /// use normalize::NormalizeConfig;
    ///
    /// let bad = NormalizeConfig {
    ///     default_month: 13,
    ///     ..Default::default()
    /// };
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=12).contains(&self.default_month) {
            return Err(ConfigError::InvalidDefaultMonth(self.default_month));
        }
        if !self.min_tenure_months.is_finite() || self.min_tenure_months < 0.0 {
            return Err(ConfigError::InvalidTenure(self.min_tenure_months));
        }
        if self.excluded_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::EmptyMarker);
        }
        for (index, rule) in self.locale_languages.iter().enumerate() {
            if rule.countries.is_empty() || rule.language.trim().is_empty() {
                return Err(ConfigError::InvalidLocaleRule { index });
            }
        }
        if self.month_year_format.is_empty() {
            return Err(ConfigError::EmptyDateFormat);
        }
        if StrftimeItems::new(&self.month_year_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidDateFormat(
                self.month_year_format.clone(),
            ));
        }
        Ok(())
    }

    /// Whether a position with this employment type and title is an
    /// internship or volunteer role.
    pub fn is_excluded_role(&self, employment_type: &str, title: &str) -> bool {
        let employment_type = employment_type.to_lowercase();
        let title = title.to_lowercase();
        self.excluded_markers.iter().any(|marker| {
            let marker = marker.to_lowercase();
            employment_type.contains(&marker) || title.contains(&marker)
        })
    }
}
