//! Education cleaning.
//!
//! Each entry is reduced to a school name plus optional display strings for
//! the degree and the years attended. Entries with neither a degree nor a
//! school are dropped, even when they carry dates.
use crate::types::{Education, EducationEntry};

/// `"{start} - {end}"`, `"Depuis {start}"` or `"Jusqu'à {end}"`.
pub fn education_date(start: Option<u32>, end: Option<u32>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{start} - {end}")),
        (Some(start), None) => Some(format!("Depuis {start}")),
        (None, Some(end)) => Some(format!("Jusqu'à {end}")),
        (None, None) => None,
    }
}

/// `"{degree}, {field}"`, or whichever of the two is present.
pub fn education_degree(degree: &str, field_of_study: &str) -> Option<String> {
    match (degree.trim(), field_of_study.trim()) {
        ("", "") => None,
        (degree, "") => Some(degree.to_string()),
        ("", field) => Some(field.to_string()),
        (degree, field) => Some(format!("{degree}, {field}")),
    }
}

/// Cleans one entry; `None` when it has neither degree nor school.
pub fn clean_education(education: &Education) -> Option<EducationEntry> {
    let degree = education_degree(&education.degree, &education.field_of_study);
    let school_name = education.school_name.trim();
    if degree.is_none() && school_name.is_empty() {
        return None;
    }
    let start = education.start.as_ref().and_then(|d| d.year());
    let end = education.end.as_ref().and_then(|d| d.year());
    Some(EducationEntry {
        school_name: school_name.to_string(),
        degree,
        date: education_date(start, end),
    })
}

pub fn clean_educations(educations: &[Education]) -> Vec<EducationEntry> {
    educations.iter().filter_map(clean_education).collect()
}

/// Joined degree strings and joined non-empty school names of kept entries.
pub fn summarize(entries: &[EducationEntry], separator: &str) -> (String, String) {
    let degrees: Vec<&str> = entries.iter().filter_map(|e| e.degree.as_deref()).collect();
    let schools: Vec<&str> = entries
        .iter()
        .map(|e| e.school_name.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    (degrees.join(separator), schools.join(separator))
}
