// Company research: curated table and Wikipedia lookups behind a TTL'd disk cache.
// Never fails; when every source is down the caller gets a flagged fallback record.

pub mod cache;
pub mod handlers;
pub mod models;
pub mod source;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use crate::research::cache::ResearchCache;
use crate::research::models::CompanyResearch;
use crate::research::source::ResearchSource;

pub struct CompanyResearchAgent {
    sources: Vec<Arc<dyn ResearchSource>>,
    cache: Option<ResearchCache>,
    /// Serializes lookups per company key so one cache file has one writer.
    key_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl CompanyResearchAgent {
    pub fn new(sources: Vec<Arc<dyn ResearchSource>>, cache: Option<ResearchCache>) -> Self {
        Self {
            sources,
            cache,
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_for(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .key_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(key.to_string()).or_default().clone()
    }

    pub async fn research_company(&self, company_name: &str) -> CompanyResearch {
        self.research_company_at(company_name, Utc::now()).await
    }

    /// Cache first, then each source in order. Only real results are cached.
    #[instrument(skip(self, now))]
    pub async fn research_company_at(
        &self,
        company_name: &str,
        now: DateTime<Utc>,
    ) -> CompanyResearch {
        let key = ResearchCache::key_for(company_name);
        if key.is_empty() {
            return CompanyResearch::fallback(
                company_name,
                "company name is empty",
                now.date_naive(),
            );
        }

        let lock = self.lock_for(&key);
        let research = {
            let _guard = lock.lock().await;
            self.lookup_locked(&key, company_name, now).await
        };
        self.release_lock(&key, lock);
        research
    }

    /// Drops the map entry once no other lookup holds or awaits it.
    fn release_lock(&self, key: &str, lock: Arc<tokio::sync::Mutex<()>>) {
        let mut locks = self
            .key_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // One reference in the map, one here
        if Arc::strong_count(&lock) == 2 {
            locks.remove(key);
        }
        // Released under the map lock so the next caller sees the new count
        drop(lock);
    }

    async fn lookup_locked(
        &self,
        key: &str,
        company_name: &str,
        now: DateTime<Utc>,
    ) -> CompanyResearch {
        if let Some(cache) = &self.cache {
            match cache.get(key, now.timestamp()).await {
                Ok(Some(hit)) => return hit,
                Ok(None) => {}
                Err(e) => warn!("Ignoring unreadable research cache entry for {key}: {e}"),
            }
        }

        let mut last_error = None;
        for source in &self.sources {
            match source.lookup(company_name).await {
                Ok(research) if research.is_empty() => {
                    debug!(source = source.name(), "Research source returned nothing");
                    last_error = Some(format!("{} returned no research", source.name()));
                }
                Ok(mut research) => {
                    debug!(source = source.name(), "Research lookup succeeded");
                    research.sort_news();
                    research.error = None;
                    if let Some(cache) = &self.cache {
                        if let Err(e) = cache.put(key, &research, now.timestamp()).await {
                            warn!("Failed to write research cache for {key}: {e}");
                        }
                    }
                    return research;
                }
                Err(e) => {
                    debug!(source = source.name(), error = %e, "Research lookup failed");
                    last_error = Some(e.to_string());
                }
            }
        }

        let reason = last_error.unwrap_or_else(|| "no research sources configured".to_string());
        warn!("All research sources failed for {company_name}, using fallback: {reason}");
        CompanyResearch::fallback(company_name, reason, now.date_naive())
    }

    /// Research rendered as labeled paragraphs. Always non-empty.
    pub async fn get_structured_research(&self, company_name: &str) -> String {
        self.research_company(company_name)
            .await
            .to_structured_text()
    }
}
