#![allow(dead_code)]

use axum_test::TestServer;
use counter_shortener::application::services::DEFAULT_COUNTER_SEED;
use counter_shortener::domain::entities::NewUrlMapping;
use counter_shortener::infrastructure::persistence::{MemoryStore, TxPolicy};
use counter_shortener::routes::app_router;
use counter_shortener::state::AppState;
use std::sync::Arc;
use std::time::Duration;

pub const SEED: u64 = DEFAULT_COUNTER_SEED;

/// Short retries with a generous budget, so contention never exhausts them.
pub fn fast_policy() -> TxPolicy {
    TxPolicy {
        op_timeout: Duration::from_secs(5),
        max_retries: 10_000,
        retry_base_delay: Duration::from_millis(1),
        retry_max_delay: Duration::from_millis(20),
    }
}

pub fn sentinel() -> NewUrlMapping {
    NewUrlMapping::new("0", "https://www.example.com")
}

pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new(fast_policy()))
}

pub fn state_with(store: Arc<MemoryStore>, public_host: Option<&str>, sentinel: NewUrlMapping) -> AppState {
    AppState::new(
        store.clone(),
        store,
        SEED,
        sentinel,
        public_host.map(str::to_string),
    )
}

pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    let store = memory_store();
    (state_with(store.clone(), None, sentinel()), store)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}
