//! One popup session: the loaded job, its prediction cache and the
//! persisted lookup history.
//!
//! Flow: lookup(url) → history push → get_or_fetch(url) → cache hit, or
//! predict → fragments → drive → cache insert on clean completion.

use posting::{parse_ashby_url, JobPosting};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::cache::PredictionCache;
use crate::errors::ClientError;
use crate::history::{History, HistoryItem};
use crate::store::LocalStore;
use crate::stream::{drive, fragments};
use crate::view::{PopupView, Renderer};

/// The job currently shown; `url` is exactly what was looked up.
#[derive(Debug, Clone)]
pub struct CurrentJob {
    pub url: String,
    pub posting: JobPosting,
}

/// Where a displayed prediction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSource {
    Cache,
    Network,
}

pub struct Session {
    api: ApiClient,
    store: LocalStore,
    cache: PredictionCache,
    history: History,
    current: Option<CurrentJob>,
}

impl Session {
    pub fn open(api: ApiClient, store: LocalStore) -> Self {
        let history = History::load(&store);
        Self {
            api,
            store,
            cache: PredictionCache::new(),
            history,
            current: None,
        }
    }

    pub fn history(&self) -> &[HistoryItem] {
        self.history.items()
    }

    #[cfg(test)]
    pub fn cache(&self) -> &PredictionCache {
        &self.cache
    }

    pub fn current(&self) -> Option<&CurrentJob> {
        self.current.as_ref()
    }

    /// Fetches the posting behind `url` and records it in history.
    ///
    /// URLs that are not Ashby job pages are rejected without a request.
    pub async fn lookup(&mut self, url: &str) -> Result<&CurrentJob, ClientError> {
        if parse_ashby_url(url).is_none() {
            return Err(ClientError::NotAshbyUrl);
        }

        let lookup = self.api.lookup_job(url).await?;

        self.history.push(url, lookup.posting.title.clone());
        if let Err(e) = self.history.save(&self.store) {
            warn!("Could not persist history: {e}");
        }

        info!("Loaded '{}'", lookup.posting.title);
        Ok(&*self.current.insert(CurrentJob {
            url: url.to_string(),
            posting: lookup.posting,
        }))
    }

    /// Shows the prediction for the current job.
    pub async fn predict<R: Renderer>(
        &mut self,
        view: &mut PopupView<R>,
    ) -> Result<PredictionSource, ClientError> {
        let job = match &self.current {
            Some(job) => job.clone(),
            None => {
                view.show_error(&ClientError::NoJob.to_string());
                return Err(ClientError::NoJob);
            }
        };
        self.get_or_fetch(&job.url, &job.posting, view).await
    }

    /// Serves `key` from the cache, or streams a fresh prediction for
    /// `posting` and caches it once the stream completes cleanly.
    ///
    /// The view is never left busy, whatever the outcome.
    pub async fn get_or_fetch<R: Renderer>(
        &mut self,
        key: &str,
        posting: &JobPosting,
        view: &mut PopupView<R>,
    ) -> Result<PredictionSource, ClientError> {
        if let Some(text) = self.cache.get(key) {
            info!("Serving prediction for {key} from cache");
            view.show_cached(text);
            return Ok(PredictionSource::Cache);
        }

        view.begin_prediction();
        let result = self.stream_prediction(posting, view).await;
        match &result {
            Ok(()) => self.cache.insert(key, view.prediction()),
            Err(e) => view.show_error(&e.to_string()),
        }
        view.end_prediction();

        result.map(|()| PredictionSource::Network)
    }

    async fn stream_prediction<R: Renderer>(
        &self,
        posting: &JobPosting,
        view: &mut PopupView<R>,
    ) -> Result<(), ClientError> {
        let body = self.api.predict(posting).await?;
        let applied = drive(fragments(body), view).await?;
        info!("Prediction complete ({applied} fragments)");
        Ok(())
    }
}
