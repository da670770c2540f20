//! Allocation of short, human-readable ids of the form `<prefix><4 digits>`.
//!
//! The existence check is advisory: two callers can draw the same free
//! candidate concurrently. The UNIQUE index on `unique_id` is what actually
//! settles the race, and [`IdAllocator::create_with_unique_id`] retries the
//! loser with a fresh candidate.

use std::future::Future;
use std::sync::Arc;
use rand::Rng;
use tracing::{debug, warn};

use crate::domain::models::identity::EntityKind;
use crate::domain::ports::UniqueIdStore;
use crate::error::AppError;

pub const DEFAULT_MAX_RETRIES: u32 = 10;
pub const DEFAULT_BACKFILL_MAX_RETRIES: u32 = 20;

pub const UNIQUE_ID_COLUMN: &str = "unique_id";

/// Number of distinct 4-digit suffixes per prefix.
pub const SUFFIX_SPACE: u16 = 10_000;

pub trait SuffixSource: Send + Sync {
    /// A value in `0..SUFFIX_SPACE`.
    fn next_suffix(&self) -> u16;
}

/// Uniform suffixes from the thread-local RNG.
pub struct RandomSuffix;

impl SuffixSource for RandomSuffix {
    fn next_suffix(&self) -> u16 {
        rand::thread_rng().gen_range(0..SUFFIX_SPACE)
    }
}

pub fn format_candidate(prefix: &str, suffix: u16) -> String {
    format!("{}{:04}", prefix, suffix % SUFFIX_SPACE)
}

pub struct IdAllocator {
    store: Arc<dyn UniqueIdStore>,
    suffixes: Arc<dyn SuffixSource>,
    max_retries: u32,
}

impl IdAllocator {
    pub fn new(store: Arc<dyn UniqueIdStore>, max_retries: u32) -> Self {
        Self {
            store,
            suffixes: Arc::new(RandomSuffix),
            max_retries,
        }
    }

    pub fn with_suffix_source(mut self, suffixes: Arc<dyn SuffixSource>) -> Self {
        self.suffixes = suffixes;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub async fn allocate(&self, prefix: &str, kind: EntityKind) -> Result<String, AppError> {
        self.allocate_with_retries(prefix, kind, self.max_retries).await
    }

    /// Draws candidates until one is absent from the store, issuing one
    /// existence query per attempt. Store errors are returned as-is.
    pub async fn allocate_with_retries(&self, prefix: &str, kind: EntityKind, max_retries: u32) -> Result<String, AppError> {
        if prefix.is_empty() {
            return Err(AppError::Validation("Unique id prefix must not be empty".into()));
        }

        for attempt in 1..=max_retries {
            let candidate = format_candidate(prefix, self.suffixes.next_suffix());
            if !self.store.exists(kind, &candidate).await? {
                debug!(kind = %kind, candidate = %candidate, attempt, "Allocated unique id");
                return Ok(candidate);
            }
            debug!(kind = %kind, candidate = %candidate, attempt, "Unique id collision");
        }

        warn!(kind = %kind, prefix = %prefix, attempts = max_retries, "Exhausted unique id retries");
        Err(AppError::ExhaustedRetries {
            prefix: prefix.to_string(),
            attempts: max_retries,
        })
    }

    pub async fn create_with_unique_id<T, F, Fut>(&self, prefix: &str, kind: EntityKind, insert: F) -> Result<T, AppError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        self.create_with_retries(prefix, kind, self.max_retries, insert).await
    }

    /// Allocates a candidate and hands it to `insert`. A unique violation on the
    /// `unique_id` column means another writer took the candidate after our
    /// check, so the whole allocate+insert is repeated, at most `max_retries`
    /// times. Violations of any other constraint are returned unchanged.
    ///
    /// Each attempt runs a full `allocate_with_retries` with the same bound, so
    /// the worst case is `max_retries * max_retries` existence checks plus
    /// `max_retries` inserts.
    pub async fn create_with_retries<T, F, Fut>(&self, prefix: &str, kind: EntityKind, max_retries: u32, mut insert: F) -> Result<T, AppError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        for attempt in 1..=max_retries {
            let candidate = self.allocate_with_retries(prefix, kind, max_retries).await?;
            match insert(candidate.clone()).await {
                Ok(created) => return Ok(created),
                Err(e) if e.is_unique_violation_on(UNIQUE_ID_COLUMN) => {
                    warn!(kind = %kind, candidate = %candidate, attempt, "Unique id taken concurrently, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::ExhaustedRetries {
            prefix: prefix.to_string(),
            attempts: max_retries,
        })
    }
}
