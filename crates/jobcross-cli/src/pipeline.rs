/// Client-side filter/sort pipeline over the last search's results.
///
/// Recomputed from scratch on every invocation; the server-returned list is
/// never mutated. Filters intersect: free-text, minimum score, location
/// mode, mentor presence.
use std::collections::HashSet;

use clap::ValueEnum;

use jobcross_common::model::Job;

use crate::locality::{matches_remote, UserLocality};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LocationMode {
    /// No location filtering
    #[default]
    All,
    /// Only jobs local to the user's city/state
    Local,
    /// Only remote/work-from-home jobs
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    /// Highest match score first
    #[default]
    ScoreDesc,
    /// Lowest match score first
    ScoreAsc,
    /// Alphabetical by title
    TitleAsc,
    /// Alphabetical by company
    CompanyAsc,
    /// Alphabetical by location
    LocationAsc,
}

#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Case-insensitive substring over title, company, and location
    pub text: Option<String>,
    /// Minimum match score; absent scores read as 0
    pub min_score: Option<f64>,
    pub location_mode: LocationMode,
    /// Keep only jobs whose company has known mentor connections
    pub mentors_only: bool,
    pub sort: SortKey,
}

/// Filter and sort the job list. `mentored` holds the ids of jobs whose
/// company resolved to a non-empty mentor list.
pub fn apply<'a>(
    jobs: &'a [Job],
    opts: &FilterOptions,
    locality: &UserLocality,
    mentored: &HashSet<String>,
) -> Vec<&'a Job> {
    let needle = opts
        .text
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());

    let mut filtered: Vec<&Job> = jobs
        .iter()
        .filter(|job| {
            let matches_text = match &needle {
                None => true,
                Some(needle) => {
                    job.title.to_lowercase().contains(needle)
                        || job.company.to_lowercase().contains(needle)
                        || job
                            .location
                            .as_deref()
                            .is_some_and(|l| l.to_lowercase().contains(needle))
                }
            };

            let matches_score = opts.min_score.map_or(true, |min| job.score() >= min);

            let location = job.location.as_deref().unwrap_or("");
            let matches_location = match opts.location_mode {
                LocationMode::All => true,
                LocationMode::Local => locality.is_local(location, &job.title),
                LocationMode::Remote => matches_remote(location, &job.title),
            };

            let matches_mentor = !opts.mentors_only || mentored.contains(&job.id());

            matches_text && matches_score && matches_location && matches_mentor
        })
        .collect();

    sort_jobs(&mut filtered, opts.sort);
    filtered
}

fn sort_jobs(jobs: &mut [&Job], key: SortKey) {
    match key {
        SortKey::ScoreDesc => jobs.sort_by(|a, b| b.score().total_cmp(&a.score())),
        SortKey::ScoreAsc => jobs.sort_by(|a, b| a.score().total_cmp(&b.score())),
        SortKey::TitleAsc => {
            jobs.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortKey::CompanyAsc => {
            jobs.sort_by(|a, b| a.company.to_lowercase().cmp(&b.company.to_lowercase()))
        }
        SortKey::LocationAsc => jobs.sort_by(|a, b| {
            let a = a.location.as_deref().unwrap_or("").to_lowercase();
            let b = b.location.as_deref().unwrap_or("").to_lowercase();
            a.cmp(&b)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: &str, location: &str, score: f64) -> Job {
        Job {
            title: title.to_string(),
            company: company.to_string(),
            location: Some(location.to_string()),
            description: None,
            salary_min: None,
            salary_max: None,
            source: None,
            match_score: Some(score),
            url: None,
        }
    }

    fn no_mentors() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn score_desc_orders_highest_first() {
        let jobs = vec![
            job("A", "X", "Denver, CO", 10.0),
            job("B", "Y", "Denver, CO", 90.0),
            job("C", "Z", "Denver, CO", 50.0),
        ];
        let opts = FilterOptions::default();
        let out = apply(&jobs, &opts, &UserLocality::default(), &no_mentors());
        let scores: Vec<f64> = out.iter().map(|j| j.score()).collect();
        assert_eq!(scores, vec![90.0, 50.0, 10.0]);
    }

    #[test]
    fn text_filter_covers_title_company_location() {
        let jobs = vec![
            job("Rust Engineer", "Acme", "Denver, CO", 50.0),
            job("Data Analyst", "Rustic Co", "Austin, TX", 50.0),
            job("Product Manager", "Globex", "Rustburg, VA", 50.0),
            job("Designer", "Initech", "Boston, MA", 50.0),
        ];
        let opts = FilterOptions {
            text: Some("rust".to_string()),
            ..Default::default()
        };
        let out = apply(&jobs, &opts, &UserLocality::default(), &no_mentors());
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn score_threshold_treats_missing_as_zero() {
        let mut unscored = job("A", "X", "Denver, CO", 0.0);
        unscored.match_score = None;
        let jobs = vec![unscored, job("B", "Y", "Denver, CO", 60.0)];
        let opts = FilterOptions {
            min_score: Some(50.0),
            ..Default::default()
        };
        let out = apply(&jobs, &opts, &UserLocality::default(), &no_mentors());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "B");
    }

    #[test]
    fn local_mode_excludes_remote_regardless_of_state() {
        let jobs = vec![
            job("A", "X", "Remote - Denver, CO", 50.0),
            job("B", "Y", "Denver, CO", 50.0),
        ];
        let opts = FilterOptions {
            location_mode: LocationMode::Local,
            ..Default::default()
        };
        let locality = UserLocality::parse("Denver, CO");
        let out = apply(&jobs, &opts, &locality, &no_mentors());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "B");
    }

    #[test]
    fn remote_mode_keeps_only_remote() {
        let jobs = vec![
            job("A", "X", "Remote", 50.0),
            job("B", "Y", "Denver, CO", 50.0),
        ];
        let opts = FilterOptions {
            location_mode: LocationMode::Remote,
            ..Default::default()
        };
        let out = apply(&jobs, &opts, &UserLocality::default(), &no_mentors());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "A");
    }

    #[test]
    fn mentors_only_uses_job_ids() {
        let jobs = vec![
            job("Engineer", "Acme", "Denver, CO", 50.0),
            job("Engineer", "Globex", "Denver, CO", 50.0),
        ];
        let mut mentored = HashSet::new();
        mentored.insert(jobs[0].id());
        let opts = FilterOptions {
            mentors_only: true,
            ..Default::default()
        };
        let out = apply(&jobs, &opts, &UserLocality::default(), &mentored);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].company, "Acme");
    }

    #[test]
    fn alphabetical_sorts_ignore_case() {
        let jobs = vec![
            job("beta", "b", "b", 10.0),
            job("Alpha", "a", "a", 20.0),
        ];
        let opts = FilterOptions {
            sort: SortKey::TitleAsc,
            ..Default::default()
        };
        let out = apply(&jobs, &opts, &UserLocality::default(), &no_mentors());
        assert_eq!(out[0].title, "Alpha");
    }
}
