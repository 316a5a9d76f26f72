//! In-process store backing both repositories.
//!
//! Used when `STORE_BACKEND=memory` and by the integration tests. The counter
//! increment follows the same optimistic protocol as the PostgreSQL backend:
//! read a versioned snapshot, then commit only if nobody else committed in
//! between, retrying through [`run_transaction`] otherwise.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::tx::{TxError, TxPolicy, run_transaction};
use crate::domain::entities::{CounterRecord, GLOBAL_COUNTER_KEY, NewUrlMapping, UrlMapping};
use crate::domain::repositories::{CounterRepository, UrlMappingRepository};
use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
struct VersionedCounter {
    count: u64,
    version: u64,
}

#[derive(Debug, Default)]
struct State {
    counter: Option<VersionedCounter>,
    by_code: HashMap<String, UrlMapping>,
    code_by_url: HashMap<String, String>,
}

/// Volatile store implementing [`CounterRepository`] and [`UrlMappingRepository`].
pub struct MemoryStore {
    state: RwLock<State>,
    offline: AtomicBool,
    policy: TxPolicy,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(TxPolicy::default())
    }
}

impl MemoryStore {
    pub fn new(policy: TxPolicy) -> Self {
        Self {
            state: RwLock::new(State::default()),
            offline: AtomicBool::new(false),
            policy,
        }
    }

    /// Simulates losing the store: while offline every call fails with
    /// [`AppError::StoreUnavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::store_unavailable(
                "Store unavailable",
                json!({ "backend": "memory" }),
            ));
        }
        Ok(())
    }

    async fn try_increment(&self) -> Result<u64, TxError> {
        self.check_online()?;

        let snapshot = self.state.read().await.counter.ok_or_else(|| {
            AppError::store_unavailable("Counter record missing", json!({ "id": GLOBAL_COUNTER_KEY }))
        })?;

        let next = CounterRecord::new(snapshot.count).successor().ok_or_else(|| {
            AppError::store_unavailable("Counter overflow", json!({ "count": snapshot.count }))
        })?;

        // Let concurrent increments interleave between read and commit.
        tokio::task::yield_now().await;

        let mut state = self.state.write().await;
        match state.counter {
            Some(current) if current.version == snapshot.version => {
                state.counter = Some(VersionedCounter {
                    count: next,
                    version: current.version + 1,
                });
                Ok(next)
            }
            _ => Err(TxError::Conflict),
        }
    }
}

#[async_trait]
impl CounterRepository for MemoryStore {
    async fn get(&self) -> Result<Option<CounterRecord>, AppError> {
        self.check_online()?;
        let state = self.state.read().await;
        Ok(state.counter.map(|c| CounterRecord::new(c.count)))
    }

    async fn create_if_absent(&self, seed: u64) -> Result<bool, AppError> {
        self.check_online()?;
        let mut state = self.state.write().await;
        if state.counter.is_some() {
            return Ok(false);
        }
        state.counter = Some(VersionedCounter {
            count: seed,
            version: 0,
        });
        Ok(true)
    }

    async fn increment(&self) -> Result<u64, AppError> {
        run_transaction(&self.policy, || self.try_increment()).await
    }
}

#[async_trait]
impl UrlMappingRepository for MemoryStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>, AppError> {
        self.check_online()?;
        let state = self.state.read().await;
        Ok(state.by_code.get(code).cloned())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlMapping>, AppError> {
        self.check_online()?;
        let state = self.state.read().await;
        Ok(state
            .code_by_url
            .get(url)
            .and_then(|code| state.by_code.get(code))
            .cloned())
    }

    async fn create_if_absent(&self, mapping: NewUrlMapping) -> Result<bool, AppError> {
        self.check_online()?;
        let mut state = self.state.write().await;
        if state.by_code.contains_key(&mapping.code) || state.code_by_url.contains_key(&mapping.url)
        {
            return Ok(false);
        }

        state
            .code_by_url
            .insert(mapping.url.clone(), mapping.code.clone());
        state.by_code.insert(
            mapping.code.clone(),
            UrlMapping::new(mapping.code, mapping.url, Utc::now()),
        );
        Ok(true)
    }

    async fn is_empty(&self) -> Result<bool, AppError> {
        self.check_online()?;
        Ok(self.state.read().await.by_code.is_empty())
    }

    async fn count(&self) -> Result<u64, AppError> {
        self.check_online()?;
        Ok(self.state.read().await.by_code.len() as u64)
    }
}
