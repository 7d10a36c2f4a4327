use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use normalize::{
    normalize, reconstruct_date, NormalizeConfig, NormalizedProfile, PartialDate,
    UNKNOWN_YEARS_OF_EXPERIENCE,
};
use serde_json::{json, Value};

fn fixed_now() -> DateTime<Utc> {
    let Some(now) = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).single() else {
        panic!("invalid timestamp components");
    };
    now
}

fn run(raw: Value) -> NormalizedProfile {
    normalize(&raw, fixed_now(), &NormalizeConfig::default()).expect("normalize should succeed")
}

#[test]
fn repeated_tokens_are_kept_once() {
    let record = run(json!({"urn": "u", "headline": "Go Go"}));
    assert_eq!(record.keywords, "Go");
}

#[test]
fn tokens_are_case_sensitive_and_ordered() {
    let record = run(json!({
        "urn": "u",
        "summary": "Rust rust",
        "headline": "Rust, Go",
        "skills": [{"name": "Go"}],
        "positions": [{"title": "Rust Engineer", "description": "Writes rust"}]
    }));
    assert_eq!(record.keywords, "Rust rust Rust, Go Engineer Writes");
}

#[test]
fn consecutive_same_employer_positions_group() {
    let record = run(json!({
        "urn": "u",
        "positions": [
            {"title": "Senior", "companyId": "A", "companyName": "Acme"},
            {"title": "Junior", "companyId": "A", "companyName": "Acme"},
            {"title": "Founder", "companyId": "B", "companyName": "Bolt"}
        ]
    }));
    let sizes: Vec<usize> = record.experiences.iter().map(|g| g.jobs.len()).collect();
    assert_eq!(sizes, vec![2, 1]);
    assert_eq!(record.companies, "Acme, Bolt");
}

#[test]
fn no_positions_means_unknown_seniority() {
    let record = run(json!({"urn": "u", "positions": []}));
    assert_eq!(record.years_of_experience, UNKNOWN_YEARS_OF_EXPERIENCE);
    assert_eq!(record.years_of_experience, 99);
}

#[test]
fn year_only_date_lands_mid_year() {
    assert_eq!(
        reconstruct_date(&PartialDate::new(2020, None, None), 7),
        NaiveDate::from_ymd_opt(2020, 7, 1)
    );
}

#[test]
fn french_locale_fills_empty_languages() {
    let record = run(json!({"urn": "u", "supportedLocales": [{"country": "FR"}]}));
    assert_eq!(record.languages, "Français");
}

#[test]
fn open_position_is_current_even_between_closed_ones() {
    let record = run(json!({
        "urn": "u",
        "positions": [
            {"title": "Old", "companyId": "1", "start": {"year": 2010}, "end": {"year": 2012}},
            {"title": "Ongoing", "companyId": "2", "companyName": "Now Corp",
             "start": {"year": 2012, "month": 2}},
            {"title": "Side", "companyId": "3", "start": {"year": 2013}, "end": {"year": 2014}}
        ]
    }));
    assert_eq!(record.current.title, "Ongoing");
    assert_eq!(record.current.company_name, "Now Corp");
    assert!(record.experiences[1].jobs[0].is_current);
    assert!(!record.experiences[2].jobs[0].is_current);
}

#[test]
fn closed_position_with_month_overflow_is_not_ongoing() {
    let record = run(json!({
        "urn": "u",
        "positions": [{"title": "Eng", "start": {"year": 2015}, "end": {"year": 2016, "month": 13}}]
    }));
    let job = &record.experiences[0].jobs[0];
    assert!(!job.is_current);
    assert_eq!(job.date_range, "Jul 2015 - Jan 2017");
    assert_eq!(job.duration_months, 18);
    assert_eq!(record.current.title, "");
}

#[test]
fn education_without_degree_or_school_is_dropped() {
    let record = run(json!({
        "urn": "u",
        "educations": [
            {"degree": "", "schoolName": "", "start": {"year": 2000}, "end": {"year": 2004}},
            {"schoolName": "MIT"}
        ]
    }));
    assert_eq!(record.educations.len(), 1);
    assert_eq!(record.educations[0].school_name, "MIT");
    assert_eq!(record.schools, "MIT");
    assert_eq!(record.degrees, "");
}

#[test]
fn volunteer_and_intern_roles_do_not_count() {
    let record = run(json!({
        "urn": "u",
        "positions": [
            {"title": "Bénévole", "start": {"year": 2005}, "end": {"year": 2010}},
            {"title": "Engineer", "employmentType": "Internship",
             "start": {"year": 2011}, "end": {"year": 2013}},
            {"title": "Engineer", "start": {"year": 2016, "month": 7}}
        ]
    }));
    assert_eq!(record.years_of_experience, 8);
}

#[test]
fn wrongly_typed_fields_default_instead_of_failing() {
    let record = run(json!({
        "urn": "u",
        "firstName": ["Ada"],
        "isOpenToWork": "yes",
        "positions": {"not": "a list"},
        "skills": [{"name": "Rust"}, "loose string", {"name": null}],
        "geo": "Paris"
    }));
    assert_eq!(record.first_name, "");
    assert!(!record.is_open_to_work);
    assert!(record.experiences.is_empty());
    assert_eq!(record.skills, "Rust");
    assert_eq!(record.location, "");
}

#[test]
fn input_is_embedded_verbatim() {
    let raw = json!({"urn": "u", "custom": {"nested": [1, 2, 3]}});
    let record = run(raw.clone());
    assert_eq!(record.profil_details, raw);
}
