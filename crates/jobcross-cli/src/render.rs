/// Plain-text job cards for the terminal.
use jobcross_common::model::{Job, Mentor};

const DESCRIPTION_PREVIEW_CHARS: usize = 300;

/// Render one job card. `index` is the 1-based position in the filtered
/// list (used by `--bookmark N`).
pub fn render_card(index: usize, job: &Job, bookmarked: bool, mentors: &[Mentor]) -> String {
    let mut out = String::new();

    let score = job.score();
    let band = match score_band(score) {
        "" => String::new(),
        band => format!(" [{band}]"),
    };
    out.push_str(&format!(
        "{index}. {} - {:.1}% match{band}\n",
        display_or_na(&job.title),
        score
    ));
    out.push_str(&format!("   Company:  {}\n", display_or_na(&job.company)));
    out.push_str(&format!(
        "   Location: {}\n",
        display_or_na(job.location.as_deref().unwrap_or(""))
    ));
    if let Some(salary) = format_salary(job.salary_min, job.salary_max) {
        out.push_str(&format!("   Salary:   {salary}\n"));
    }
    out.push_str(&format!(
        "   Source:   {}\n",
        display_or_na(job.source.as_deref().unwrap_or(""))
    ));

    if let Some(description) = job.description.as_deref() {
        let description = description.trim();
        if !description.is_empty() {
            out.push_str(&format!("   {}\n", truncate_chars(description, DESCRIPTION_PREVIEW_CHARS)));
        }
    }

    if !mentors.is_empty() {
        let plural = if mentors.len() > 1 { "s" } else { "" };
        out.push_str(&format!(
            "   {} mentor connection{plural} at {}:\n",
            mentors.len(),
            display_or_na(&job.company)
        ));
        for mentor in mentors {
            let mut line = format!("     - {}", mentor.display_name());
            if let Some(title) = mentor.title.as_deref() {
                line.push_str(&format!(" - {title}"));
            }
            if let Some(linkedin) = mentor.linkedin.as_deref() {
                line.push_str(&format!(" ({linkedin})"));
            }
            out.push_str(&line);
            out.push('\n');
        }
    }

    let marker = if bookmarked { "[saved]" } else { "[not saved]" };
    match job.url.as_deref() {
        Some(url) => out.push_str(&format!("   {marker} {url}\n")),
        None => out.push_str(&format!("   {marker}\n")),
    }

    out
}

/// "Showing X of Y jobs" summary with the mentor-connection count.
pub fn render_summary(shown: usize, total: usize, mentored: usize) -> String {
    let mentor_part = if mentored > 0 {
        format!(" | {mentored} with mentor connections")
    } else {
        String::new()
    };
    format!("Showing {shown} of {total} jobs{mentor_part}")
}

pub fn render_empty_notice() -> &'static str {
    "No jobs match your filters. Try adjusting your search criteria."
}

/// Salary range line: "$70,000 - $90,000", or "$70,000+" when only a
/// minimum is known.
pub fn format_salary(min: Option<i64>, max: Option<i64>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) => Some(format!(
            "${} - ${}",
            group_thousands(min),
            group_thousands(max)
        )),
        (Some(min), None) => Some(format!("${}+", group_thousands(min))),
        _ => None,
    }
}

fn score_band(score: f64) -> &'static str {
    if score >= 50.0 {
        "high"
    } else if score >= 30.0 {
        "medium"
    } else {
        ""
    }
}

fn display_or_na(value: &str) -> &str {
    if value.trim().is_empty() { "N/A" } else { value }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        format!("{}...", text.chars().take(limit).collect::<String>())
    } else {
        text.to_string()
    }
}

fn group_thousands(n: i64) -> String {
    let negative = n < 0;
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        Job {
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: Some("Denver, CO".to_string()),
            description: Some("Build services.".to_string()),
            salary_min: Some(70_000),
            salary_max: Some(90_000),
            source: Some("adzuna".to_string()),
            match_score: Some(72.5),
            url: Some("https://example.com/job".to_string()),
        }
    }

    #[test]
    fn salary_grouping() {
        assert_eq!(group_thousands(90000), "90,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(
            format_salary(Some(70_000), None).as_deref(),
            Some("$70,000+")
        );
        assert_eq!(format_salary(None, Some(1)), None);
    }

    #[test]
    fn card_shows_score_band_and_salary() {
        let card = render_card(1, &job(), true, &[]);
        assert!(card.contains("72.5% match [high]"));
        assert!(card.contains("$70,000 - $90,000"));
        assert!(card.contains("[saved]"));
    }

    #[test]
    fn card_lists_mentor_connections() {
        let mentors = vec![Mentor {
            name: None,
            full_name: Some("Ada Lovelace".to_string()),
            title: Some("Engineer".to_string()),
            company: None,
            linkedin: Some("https://linkedin.com/in/ada".to_string()),
        }];
        let card = render_card(2, &job(), false, &mentors);
        assert!(card.contains("1 mentor connection at Acme:"));
        assert!(card.contains("Ada Lovelace - Engineer"));
        assert!(card.contains("[not saved]"));
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let mut j = job();
        j.description = Some("x".repeat(400));
        let card = render_card(1, &j, false, &[]);
        assert!(card.contains(&format!("{}...", "x".repeat(300))));
        assert!(!card.contains(&"x".repeat(301)));
    }

    #[test]
    fn summary_line_counts() {
        assert_eq!(render_summary(3, 10, 0), "Showing 3 of 10 jobs");
        assert_eq!(
            render_summary(3, 10, 2),
            "Showing 3 of 10 jobs | 2 with mentor connections"
        );
    }
}
