//! Work-history processing: employer grouping, seniority and the current
//! position snapshot.
//!
//! Grouping is adjacency-based. Consecutive positions with the same company
//! id nest under one employer block, the way a résumé lists promotions; the
//! same employer after an intervening one starts a new block.
use chrono::{DateTime, NaiveDate, Utc};

use crate::config::NormalizeConfig;
use crate::dates::{years_since, Span};
use crate::types::{
    CurrentPosition, ExperienceGroup, Job, Position, UNKNOWN_YEARS_OF_EXPERIENCE,
};

fn span_of(position: &Position, cfg: &NormalizeConfig) -> Span {
    Span::resolve(position.start.as_ref(), position.end.as_ref(), cfg)
}

/// Builds the display job for one position.
pub fn build_job(position: &Position, now: DateTime<Utc>, cfg: &NormalizeConfig) -> Job {
    let span = span_of(position, cfg);
    Job {
        title: position.title.clone(),
        description: position.description.clone(),
        employment_type: position.employment_type.clone(),
        date_range: span.date_range(cfg),
        duration_months: span.duration_months(now),
        start_date: span.start,
        end_date: span.end,
        is_current: position.is_ongoing(),
    }
}

impl ExperienceGroup {
    fn open(position: &Position, job: Job) -> Self {
        Self {
            company_name: position.company_name.clone(),
            company_id: position.company_id.clone(),
            company_url: position.company_url.clone(),
            company_logo: position.company_logo.clone(),
            company_staff_count_range: position.company_staff_count_range.clone(),
            company_industry: position.company_industry.clone(),
            company_description: position.company_description.clone(),
            company_specialties: position.company_specialties.clone(),
            jobs: vec![job],
        }
    }
}

/// Groups positions into employer blocks, preserving position order.
///
/// A position joins the previous block when its company id equals the
/// immediately preceding position's id, compared as-is. Two adjacent
/// positions without an id therefore share a block.
pub fn group_experiences(
    positions: &[Position],
    now: DateTime<Utc>,
    cfg: &NormalizeConfig,
) -> Vec<ExperienceGroup> {
    let (groups, _) = positions.iter().fold(
        (Vec::<ExperienceGroup>::new(), None::<&str>),
        |(mut groups, previous_id), position| {
            let job = build_job(position, now, cfg);
            let company_id = Some(position.company_id.as_str());
            let continues = company_id == previous_id;
            match groups.last_mut().filter(|_| continues) {
                Some(group) => group.jobs.push(job),
                None => groups.push(ExperienceGroup::open(position, job)),
            }
            (groups, company_id)
        },
    );
    groups
}

/// Earliest start among non-intern, non-volunteer positions lasting at least
/// `min_tenure_months`.
pub fn career_start(
    positions: &[Position],
    now: DateTime<Utc>,
    cfg: &NormalizeConfig,
) -> Option<NaiveDate> {
    positions
        .iter()
        .filter(|p| !cfg.is_excluded_role(&p.employment_type, &p.title))
        .filter_map(|p| {
            let span = span_of(p, cfg);
            let months = span.months(now)?;
            span.start.filter(|_| months >= cfg.min_tenure_months)
        })
        .min()
}

/// Rounded years since [`career_start`], or [`UNKNOWN_YEARS_OF_EXPERIENCE`].
pub fn years_of_experience(
    positions: &[Position],
    now: DateTime<Utc>,
    cfg: &NormalizeConfig,
) -> u32 {
    career_start(positions, now, cfg)
        .map(|start| years_since(start, now))
        .unwrap_or(UNKNOWN_YEARS_OF_EXPERIENCE)
}

/// Snapshot of the first ongoing position in list order.
pub fn current_position(positions: &[Position], cfg: &NormalizeConfig) -> CurrentPosition {
    let Some(position) = positions.iter().find(|p| p.is_ongoing()) else {
        return CurrentPosition::default();
    };
    CurrentPosition {
        title: position.title.clone(),
        company_name: position.company_name.clone(),
        company_id: position.company_id.clone(),
        company_url: position.company_url.clone(),
        company_logo: position.company_logo.clone(),
        company_industry: position.company_industry.clone(),
        company_staff_count_range: position.company_staff_count_range.clone(),
        employment_type: position.employment_type.clone(),
        date_range: span_of(position, cfg).date_range(cfg),
    }
}

/// Employer names of `groups`, first occurrence order, blanks and repeats dropped.
pub fn company_names(groups: &[ExperienceGroup]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for name in groups.iter().map(|g| g.company_name.trim()) {
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
