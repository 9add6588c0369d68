#![allow(dead_code)]

use booking_sync::lifecycle::{AppStore, DurableStorage, MemoryStorage, StoreConfig};
use std::sync::Arc;
use sync_framework::mock::MockTransport;
use sync_framework::SettlementPolicy;
use tracing_subscriber::EnvFilter;

/// Route store logs through the test harness; `RUST_LOG=debug cargo test` shows them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub async fn store(mock: &MockTransport) -> AppStore {
    store_with(mock, Arc::new(MemoryStorage::new()), SettlementPolicy::default()).await
}

pub async fn store_with(
    mock: &MockTransport,
    storage: Arc<dyn DurableStorage>,
    settlement: SettlementPolicy,
) -> AppStore {
    init_tracing();
    let config = StoreConfig {
        buffer_size: 16,
        settlement,
        ..StoreConfig::default()
    };
    AppStore::new(Arc::new(mock.clone()), storage, &config).await
}
