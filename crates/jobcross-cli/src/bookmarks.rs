/// Mirrored bookmark state.
///
/// The backend owns persistence; this holds only the set of bookmarked job
/// ids so cards can show toggle state without a round-trip. The mirror is
/// updated only after the backend acknowledges a change.
use std::collections::HashSet;

use tracing::warn;

use jobcross_common::api::ApiClient;
use jobcross_common::error::CommonError;
use jobcross_common::model::Job;

#[derive(Debug, Default)]
pub struct BookmarkSet {
    ids: HashSet<String>,
}

impl BookmarkSet {
    /// Refresh the mirror from the backend. Failure degrades to an empty
    /// set; the session stays usable.
    pub async fn load(api: &ApiClient) -> Self {
        match api.bookmarks().await {
            Ok(list) => Self {
                ids: list.bookmarks.into_iter().map(|b| b.job_id).collect(),
            },
            Err(e) => {
                warn!(error = %e, "could not load bookmarks, starting empty");
                Self::default()
            }
        }
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.ids.contains(job_id)
    }

    /// Toggle a job's bookmark. Returns the new state (`true` = saved).
    /// The mirror changes only when the backend call succeeds.
    pub async fn toggle(&mut self, api: &ApiClient, job: &Job) -> Result<bool, CommonError> {
        let job_id = job.id();
        if self.ids.contains(&job_id) {
            api.remove_bookmark(&job_id).await?;
            self.ids.remove(&job_id);
            Ok(false)
        } else {
            api.add_bookmark(&job_id, job).await?;
            self.ids.insert(job_id);
            Ok(true)
        }
    }

    /// Remove by id without needing the full job record.
    pub async fn remove(&mut self, api: &ApiClient, job_id: &str) -> Result<(), CommonError> {
        api.remove_bookmark(job_id).await?;
        self.ids.remove(job_id);
        Ok(())
    }
}
