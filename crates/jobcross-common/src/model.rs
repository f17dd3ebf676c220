use serde::{Deserialize, Serialize};

/// A single job posting as returned by the backend search.
///
/// The backend owns validation; every field here is tolerant of absence so
/// a partially-populated posting still round-trips and renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Job title, e.g. "Senior Backend Engineer"
    #[serde(default)]
    pub title: String,
    /// Hiring company name
    #[serde(default)]
    pub company: String,
    /// Free-text location, e.g. "Birmingham, AL" or "Remote"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Posting description (may be long; truncated at render time)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<i64>,
    /// Which job board the posting came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Backend-computed 0-100 relevance score for the user's skills
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Job {
    /// Match score with absent values reading as 0.
    pub fn score(&self) -> f64 {
        self.match_score.unwrap_or(0.0)
    }

    /// Bookmark identifier for this posting.
    pub fn id(&self) -> String {
        job_id(&self.title, &self.company)
    }
}

/// Derive the bookmark identifier for a posting: title and company joined
/// with an underscore, every non-ASCII-alphanumeric character replaced by `_`.
pub fn job_id(title: &str, company: &str) -> String {
    format!("{title}_{company}")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Body for POST /api/search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_true")]
    pub us_wide: bool,
}

fn default_true() -> bool {
    true
}

/// Response envelope for POST /api/search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub top_matches: Vec<Job>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<SearchStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_report: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_report: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    #[serde(default)]
    pub total_jobs: usize,
    #[serde(default)]
    pub high_matches: usize,
    /// Backend-shaped blob; displayed opaquely if at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentor_stats: Option<serde_json::Value>,
}

/// Response for GET /api/mentors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorStats {
    #[serde(default)]
    pub total_mentors: usize,
    #[serde(default)]
    pub unique_companies: usize,
    #[serde(default)]
    pub unique_skills: usize,
    #[serde(default)]
    pub top_skills: Vec<String>,
}

/// A parsed mentor profile. Field set mirrors the lookbook extraction:
/// loosely typed, anything may be missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mentor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl Mentor {
    /// Display name, preferring `name` over `full_name`.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.full_name.as_deref())
            .unwrap_or("N/A")
    }
}

/// Response for GET /api/mentors/company/{name}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyMentors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default)]
    pub mentors: Vec<Mentor>,
    #[serde(default)]
    pub count: usize,
}

/// One saved job, as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub job_id: String,
    pub job_data: Job,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarked_at: Option<String>,
}

/// Envelope for GET /api/bookmarks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookmarkList {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

/// Acknowledgement for bookmark POST/DELETE.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub bookmarked: Option<bool>,
    #[serde(default)]
    pub removed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for POST /api/upload-resume: skills and location the backend
/// extracted from the uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeExtract {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_strips_non_alphanumerics() {
        assert_eq!(
            job_id("Sr. Engineer (Backend)", "Acme, Inc."),
            "Sr__Engineer__Backend__Acme__Inc_"
        );
    }

    #[test]
    fn job_id_keeps_ascii_alphanumerics() {
        assert_eq!(job_id("Dev2", "Acme"), "Dev2_Acme");
    }

    #[test]
    fn job_tolerates_sparse_payload() {
        let job: Job = serde_json::from_str(r#"{"title": "Dev"}"#).unwrap();
        assert_eq!(job.title, "Dev");
        assert_eq!(job.company, "");
        assert!(job.location.is_none());
        assert_eq!(job.score(), 0.0);
    }

    #[test]
    fn mentor_display_name_prefers_name() {
        let m = Mentor {
            name: Some("Ada".into()),
            full_name: Some("Ada Lovelace".into()),
            title: None,
            company: None,
            linkedin: None,
        };
        assert_eq!(m.display_name(), "Ada");

        let m = Mentor {
            name: None,
            full_name: Some("Ada Lovelace".into()),
            title: None,
            company: None,
            linkedin: None,
        };
        assert_eq!(m.display_name(), "Ada Lovelace");
    }
}
