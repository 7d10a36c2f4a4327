//! Language list inference.
//!
//! Explicit language entries win; the first supported locale only adds the
//! language it implies when that language is not already listed.
use crate::config::NormalizeConfig;
use crate::types::Profile;

/// Explicit language names, augmented by the locale rules, in output order.
pub fn infer_languages(profile: &Profile, cfg: &NormalizeConfig) -> Vec<String> {
    let mut names: Vec<String> = profile
        .languages
        .iter()
        .map(|l| l.name.trim())
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect();

    let Some(locale) = profile.supported_locales.first() else {
        return names;
    };
    let country = locale.country.trim().to_uppercase();

    for rule in cfg
        .locale_languages
        .iter()
        .filter(|rule| rule.matches_country(&country))
    {
        if !rule.is_listed(names.as_slice()) {
            names.push(rule.language.clone());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NamedEntity, SupportedLocale};

    fn profile(languages: &[&str], country: Option<&str>) -> Profile {
        Profile {
            languages: languages
                .iter()
                .map(|name| NamedEntity {
                    name: name.to_string(),
                })
                .collect(),
            supported_locales: country
                .map(|c| {
                    vec![SupportedLocale {
                        country: c.into(),
                        language: String::new(),
                    }]
                })
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    fn infer(languages: &[&str], country: Option<&str>) -> Vec<String> {
        infer_languages(&profile(languages, country), &NormalizeConfig::default())
    }

    #[test]
    fn french_locale_without_languages_falls_back() {
        assert_eq!(infer(&[], Some("FR")), vec!["Français"]);
    }

    #[test]
    fn us_and_en_locales_imply_english() {
        assert_eq!(infer(&[], Some("US")), vec!["English"]);
        assert_eq!(infer(&[], Some("EN")), vec!["English"]);
        assert_eq!(infer(&["Spanish"], Some("US")), vec!["Spanish", "English"]);
    }

    #[test]
    fn listed_language_is_not_duplicated() {
        assert_eq!(infer(&["French", "German"], Some("FR")), vec!["French", "German"]);
        assert_eq!(infer(&["Français"], Some("FR")), vec!["Français"]);
        assert_eq!(infer(&["english"], Some("US")), vec!["english"]);
    }

    #[test]
    fn french_locale_appends_to_explicit_languages() {
        assert_eq!(infer(&["English"], Some("FR")), vec!["English", "Français"]);
    }

    #[test]
    fn unknown_or_missing_locale_adds_nothing() {
        assert!(infer(&[], Some("DE")).is_empty());
        assert!(infer(&[], None).is_empty());
        assert_eq!(infer(&["Italiano"], Some("IT")), vec!["Italiano"]);
    }

    #[test]
    fn only_the_first_locale_counts() {
        let mut p = profile(&[], Some("DE"));
        p.supported_locales.push(SupportedLocale {
            country: "FR".into(),
            language: "fr".into(),
        });
        assert!(infer_languages(&p, &NormalizeConfig::default()).is_empty());
    }

    #[test]
    fn country_code_case_is_ignored() {
        assert_eq!(infer(&[], Some("fr")), vec!["Français"]);
    }
}
