/// Session-scoped mentor-connection lookup cache.
///
/// One map from normalized company key to lookup state: either a shared
/// in-flight future or a resolved mentor list. Concurrent lookups for the
/// same company await the same future, so at most one request per company
/// ever leaves the process. Fetch failures resolve to an empty list and are
/// cached, so a re-render never re-triggers a failing request.
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::warn;

use jobcross_common::api::ApiClient;
use jobcross_common::error::CommonError;
use jobcross_common::model::{CompanyMentors, Mentor};

/// Seam for the company-lookup endpoint, so the directory can be exercised
/// without a live backend.
pub trait MentorFetch: Send + Sync + 'static {
    fn fetch(
        &self,
        company: &str,
    ) -> impl Future<Output = Result<CompanyMentors, CommonError>> + Send;
}

impl MentorFetch for ApiClient {
    fn fetch(
        &self,
        company: &str,
    ) -> impl Future<Output = Result<CompanyMentors, CommonError>> + Send {
        self.mentors_for_company(company)
    }
}

enum LookupEntry {
    InFlight(Shared<BoxFuture<'static, Vec<Mentor>>>),
    Resolved(Vec<Mentor>),
}

pub struct MentorDirectory<F: MentorFetch> {
    fetcher: Arc<F>,
    entries: Mutex<HashMap<String, LookupEntry>>,
}

impl<F: MentorFetch> MentorDirectory<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Mentors for a company, from cache when possible.
    ///
    /// A blank company resolves to no mentors without touching the cache.
    pub async fn lookup(&self, company: &str) -> Vec<Mentor> {
        let trimmed = company.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let key = trimmed.to_lowercase();

        let shared = {
            let mut entries = self.entries.lock().await;
            match entries.get(&key) {
                Some(LookupEntry::Resolved(mentors)) => return mentors.clone(),
                Some(LookupEntry::InFlight(shared)) => shared.clone(),
                None => {
                    let fetcher = Arc::clone(&self.fetcher);
                    let owned = trimmed.to_string();
                    let future: BoxFuture<'static, Vec<Mentor>> = async move {
                        match fetcher.fetch(&owned).await {
                            Ok(result) => result.mentors,
                            Err(e) => {
                                warn!(company = %owned, error = %e, "mentor lookup failed, caching empty result");
                                Vec::new()
                            }
                        }
                    }
                    .boxed();
                    let shared = future.shared();
                    entries.insert(key.clone(), LookupEntry::InFlight(shared.clone()));
                    shared
                }
            }
        };

        let mentors = shared.await;

        let mut entries = self.entries.lock().await;
        entries.insert(key, LookupEntry::Resolved(mentors.clone()));
        mentors
    }
}
