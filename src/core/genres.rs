//! Genre id to name cache.
//!
//! Movie and TV genres live in separate namespaces. Each list is fetched once
//! and kept for the process lifetime; there is no TTL. A namespace whose fetch
//! failed stays empty and is fetched again on the next [`GenreCache::ensure_warm`].

use crate::models::media::MediaKind;
use crate::models::tmdb::{Genre, GenreList};
use crate::services::tmdb::{fetch, Gateway};
use serde::Serialize;
use std::sync::{PoisonError, RwLock};

/// Snapshot of both genre namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Genres {
    pub movies: Vec<Genre>,
    pub tv: Vec<Genre>,
}

impl Genres {
    pub fn list(&self, kind: MediaKind) -> &[Genre] {
        match kind {
            MediaKind::Movie => &self.movies,
            MediaKind::Tv => &self.tv,
        }
    }

    /// One name per id, in input order. Unknown ids become `"Unknown (<id>)"`.
    pub fn resolve_names(&self, ids: &[u64], kind: MediaKind) -> Vec<String> {
        let genres = self.list(kind);
        ids.iter()
            .map(|id| {
                genres
                    .iter()
                    .find(|g| g.id == *id)
                    .map(|g| g.name.clone())
                    .unwrap_or_else(|| format!("Unknown ({})", id))
            })
            .collect()
    }
}

/// Process-lifetime genre cache, shared by all tool calls.
///
/// Writes replace a whole namespace at once, so two calls racing to warm the
/// same namespace at worst fetch it twice.
#[derive(Debug, Default)]
pub struct GenreCache {
    inner: RwLock<Genres>,
}

impl GenreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-filled with known lists.
    pub fn with_genres(genres: Genres) -> Self {
        Self {
            inner: RwLock::new(genres),
        }
    }

    /// Current contents without touching the network.
    pub fn snapshot(&self) -> Genres {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn is_empty(&self, kind: MediaKind) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .list(kind)
            .is_empty()
    }

    fn store(&self, kind: MediaKind, genres: Vec<Genre>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match kind {
            MediaKind::Movie => inner.movies = genres,
            MediaKind::Tv => inner.tv = genres,
        }
    }

    /// Fetch any namespace that is still empty, then return a snapshot.
    ///
    /// Failures are logged and leave the namespace empty; they never fail the
    /// caller.
    pub async fn ensure_warm(&self, gateway: &dyn Gateway) -> Genres {
        tokio::join!(
            self.warm_namespace(gateway, MediaKind::Movie),
            self.warm_namespace(gateway, MediaKind::Tv),
        );
        self.snapshot()
    }

    async fn warm_namespace(&self, gateway: &dyn Gateway, kind: MediaKind) {
        if !self.is_empty(kind) {
            return;
        }

        let endpoint = format!("/genre/{}/list", kind);
        match fetch::<GenreList>(gateway, &endpoint, Vec::new()).await {
            Ok(list) => {
                let genres = list.into_genres();
                tracing::debug!("Cached {} {} genres", genres.len(), kind);
                self.store(kind, genres);
            }
            Err(e) => {
                tracing::warn!("Failed to load {} genres: {}", kind, e);
            }
        }
    }
}
