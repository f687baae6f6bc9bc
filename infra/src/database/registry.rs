//! Process-wide connection-pool registry
//!
//! Pools are created lazily per logical database name and cached for
//! the lifetime of the process, so every request task shares one pool
//! per database. First access is serialized by the registry mutex;
//! later lookups hit the cache.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tokio::sync::Mutex;

use um_shared::config::DatabaseConfig;

use crate::InfrastructureError;

use super::connection::DatabasePool;

static POOLS: Lazy<Mutex<HashMap<String, DatabasePool>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Get or lazily create the pool for the configured database
pub async fn pool_for(config: &DatabaseConfig) -> Result<DatabasePool, InfrastructureError> {
    let mut pools = POOLS.lock().await;

    if let Some(pool) = pools.get(&config.database) {
        return Ok(pool.clone());
    }

    let pool = DatabasePool::new(config).await?;
    pools.insert(config.database.clone(), pool.clone());
    Ok(pool)
}

/// Close and drop every registered pool
///
/// For shutdown paths and test isolation.
pub async fn close_all() {
    let mut pools = POOLS.lock().await;
    for (name, pool) in pools.drain() {
        tracing::info!(database = %name, "Closing pooled connections");
        pool.close().await;
    }
}
