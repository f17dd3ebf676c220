/// Command handlers: each one wires the API client, the lookup directory,
/// and the client-side pipeline together, then prints to stdout. Failures
/// that would leave nothing to show propagate; everything else degrades
/// with a warning.
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use jobcross_common::api::ApiClient;
use jobcross_common::model::{Job, Mentor, SearchRequest};

use crate::bookmarks::BookmarkSet;
use crate::error::AppError;
use crate::history::{RecentSearch, RecentSearches};
use crate::locality::UserLocality;
use crate::mentors::{MentorDirectory, MentorFetch};
use crate::pipeline::{self, FilterOptions};
use crate::render;

/// Run a backend search and render the filtered result page.
pub async fn run_search(
    api: &ApiClient,
    history: &RecentSearches,
    mut request: SearchRequest,
    opts: &FilterOptions,
    resume: Option<&Path>,
    bookmark_toggles: &[usize],
) -> Result<(), AppError> {
    // Resume upload prefills skills/location; a failed extract is not fatal.
    if let Some(path) = resume {
        match api.upload_resume(path).await {
            Ok(extract) => {
                if request.skills.is_empty() && !extract.skills.is_empty() {
                    info!(skills = extract.skills.len(), "skills prefilled from resume");
                    request.skills = extract.skills;
                }
                if request.location.trim().is_empty() {
                    if let Some(location) = extract.location {
                        request.location = location;
                    }
                }
            }
            Err(e) => warn!(error = %e, "resume extract failed, continuing without it"),
        }
    }

    request.skills.retain(|s| !s.trim().is_empty());
    if request.skills.is_empty() {
        return Err(AppError::InvalidInput(
            "at least one skill is required (use --skills or --resume)".to_string(),
        ));
    }

    let response = api.search(&request).await?;
    history.record(RecentSearch::from_request(&request));

    let (total_jobs, high_matches) = match &response.stats {
        Some(stats) => (stats.total_jobs, stats.high_matches),
        None => (
            response.jobs.len(),
            response.jobs.iter().filter(|j| j.score() >= 50.0).count(),
        ),
    };
    println!("{total_jobs} jobs found | {high_matches} high matches (>=50%)");

    let directory = MentorDirectory::new(Arc::new(api.clone()));
    let (mentors_by_company, mentored_ids) = resolve_mentors(&directory, &response.jobs).await;

    let locality = UserLocality::parse(&request.location);
    let filtered = pipeline::apply(&response.jobs, opts, &locality, &mentored_ids);

    let mut bookmarks = BookmarkSet::load(api).await;

    println!(
        "{}",
        render::render_summary(filtered.len(), response.jobs.len(), mentored_ids.len())
    );
    println!();

    if filtered.is_empty() {
        println!("{}", render::render_empty_notice());
    } else {
        for (i, job) in filtered.iter().enumerate() {
            let mentors = mentors_for_job(&mentors_by_company, job);
            let card = render::render_card(i + 1, job, bookmarks.contains(&job.id()), mentors);
            println!("{card}");
        }
    }

    for &index in bookmark_toggles {
        match filtered.get(index.wrapping_sub(1)) {
            Some(job) => match bookmarks.toggle(api, job).await {
                Ok(true) => println!("Saved: {} at {}", job.title, job.company),
                Ok(false) => println!("Removed bookmark: {} at {}", job.title, job.company),
                Err(e) => eprintln!("Error saving bookmark for card {index}: {e}"),
            },
            None => eprintln!("No card {index} to bookmark (showing {})", filtered.len()),
        }
    }

    if let Some(csv) = response.csv_report.as_deref() {
        println!("CSV report:  jobcross report {}", report_filename(csv));
    }
    if let Some(html) = response.html_report.as_deref() {
        println!("HTML report: jobcross report {}", report_filename(html));
    }

    Ok(())
}

/// Resolve mentor connections for every company on the result page,
/// concurrently; lookups are coalesced per company by the directory.
/// Returns the per-company mentor lists and the set of job ids with at
/// least one connection.
async fn resolve_mentors<F: MentorFetch>(
    directory: &MentorDirectory<F>,
    jobs: &[Job],
) -> (HashMap<String, Vec<Mentor>>, HashSet<String>) {
    let lookups = jobs.iter().map(|job| {
        let company = job.company.clone();
        async move { (company.trim().to_lowercase(), directory.lookup(&company).await) }
    });

    let mut by_company: HashMap<String, Vec<Mentor>> = HashMap::new();
    for (key, mentors) in join_all(lookups).await {
        by_company.insert(key, mentors);
    }

    let mentored: HashSet<String> = jobs
        .iter()
        .filter(|job| {
            by_company
                .get(&job.company.trim().to_lowercase())
                .is_some_and(|m| !m.is_empty())
        })
        .map(|job| job.id())
        .collect();

    (by_company, mentored)
}

fn mentors_for_job<'a>(by_company: &'a HashMap<String, Vec<Mentor>>, job: &Job) -> &'a [Mentor] {
    by_company
        .get(&job.company.trim().to_lowercase())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Mentor dataset statistics.
pub async fn run_stats(api: &ApiClient) -> Result<(), AppError> {
    let stats = api.mentor_stats().await?;
    println!("Mentors:   {}", stats.total_mentors);
    println!("Companies: {}", stats.unique_companies);
    println!("Skills:    {}", stats.unique_skills);
    if !stats.top_skills.is_empty() {
        println!("Top skills: {}", stats.top_skills.join(", "));
    }
    Ok(())
}

/// Direct company lookup through the same cache used by search.
pub async fn run_mentors(api: &ApiClient, company: &str) -> Result<(), AppError> {
    let directory = MentorDirectory::new(Arc::new(api.clone()));
    let mentors = directory.lookup(company).await;
    if mentors.is_empty() {
        println!("No mentor connections found at {company}");
        return Ok(());
    }
    println!("{} mentor(s) at {company}:", mentors.len());
    for mentor in &mentors {
        let title = mentor.title.as_deref().unwrap_or("N/A");
        match mentor.linkedin.as_deref() {
            Some(linkedin) => println!("  - {} - {title} ({linkedin})", mentor.display_name()),
            None => println!("  - {} - {title}", mentor.display_name()),
        }
    }
    Ok(())
}

/// List saved jobs.
pub async fn run_bookmarks_list(api: &ApiClient) -> Result<(), AppError> {
    let list = api.bookmarks().await?;
    if list.bookmarks.is_empty() {
        println!("No saved jobs.");
        return Ok(());
    }
    println!("{} saved job(s):\n", list.bookmarks.len());
    for (i, bookmark) in list.bookmarks.iter().enumerate() {
        let card = render::render_card(i + 1, &bookmark.job_data, true, &[]);
        println!("{card}");
    }
    Ok(())
}

/// Remove a saved job by id.
pub async fn run_bookmarks_remove(api: &ApiClient, job_id: &str) -> Result<(), AppError> {
    let mut bookmarks = BookmarkSet::load(api).await;
    bookmarks.remove(api, job_id).await?;
    println!("Removed bookmark {job_id}");
    Ok(())
}

/// List recent searches, or replay one of them.
pub async fn run_recent(
    api: &ApiClient,
    history: &RecentSearches,
    run: Option<usize>,
) -> Result<(), AppError> {
    let entries = history.load();

    let Some(index) = run else {
        if entries.is_empty() {
            println!("No recent searches.");
            return Ok(());
        }
        for (i, entry) in entries.iter().enumerate() {
            let location = if entry.location.trim().is_empty() {
                "US-wide"
            } else {
                entry.location.as_str()
            };
            println!(
                "{}. skills: {} | {} | {}",
                i + 1,
                entry.skills.join(", "),
                location,
                entry.timestamp.format("%Y-%m-%d")
            );
        }
        return Ok(());
    };

    let entry = entries.get(index.wrapping_sub(1)).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "no recent search {index} (have {})",
            entries.len()
        ))
    })?;

    run_search(
        api,
        history,
        entry.to_request(),
        &FilterOptions::default(),
        None,
        &[],
    )
    .await
}

/// Download a generated report next to the current directory.
pub async fn run_report(
    api: &ApiClient,
    filename: &str,
    out: Option<&Path>,
) -> Result<(), AppError> {
    let name = report_filename(filename);
    let bytes = api.download_report(name).await?;
    let target = out.map(Path::to_path_buf).unwrap_or_else(|| name.into());
    tokio::fs::write(&target, &bytes).await.map_err(AppError::Io)?;
    println!("Wrote {} bytes to {}", bytes.len(), target.display());
    Ok(())
}

/// Reports come back from the search response as paths; the download
/// endpoint wants the bare file name.
fn report_filename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    use jobcross_common::error::CommonError;
    use jobcross_common::model::CompanyMentors;

    struct FixedFetcher;

    impl MentorFetch for FixedFetcher {
        fn fetch(
            &self,
            company: &str,
        ) -> impl std::future::Future<Output = Result<CompanyMentors, CommonError>> + Send
        {
            let mentors = if company == "Acme" {
                vec![Mentor {
                    name: Some("Ada".into()),
                    full_name: None,
                    title: None,
                    company: None,
                    linkedin: None,
                }]
            } else {
                Vec::new()
            };
            let count = mentors.len();
            async move {
                Ok(CompanyMentors {
                    company: None,
                    mentors,
                    count,
                })
            }
        }
    }

    fn job(title: &str, company: &str) -> Job {
        Job {
            title: title.to_string(),
            company: company.to_string(),
            location: None,
            description: None,
            salary_min: None,
            salary_max: None,
            source: None,
            match_score: None,
            url: None,
        }
    }

    #[tokio::test]
    async fn resolve_mentors_flags_only_connected_jobs() {
        let directory = MentorDirectory::new(Arc::new(FixedFetcher));
        let jobs = vec![job("Engineer", "Acme"), job("Analyst", "Globex")];

        let (by_company, mentored) = resolve_mentors(&directory, &jobs).await;

        assert_eq!(by_company.get("acme").map(Vec::len), Some(1));
        assert_eq!(by_company.get("globex").map(Vec::len), Some(0));
        assert!(mentored.contains(&jobs[0].id()));
        assert!(!mentored.contains(&jobs[1].id()));
    }

    #[test]
    fn report_filename_takes_the_last_segment() {
        assert_eq!(report_filename("reports/run.csv"), "run.csv");
        assert_eq!(report_filename("run.csv"), "run.csv");
    }
}
