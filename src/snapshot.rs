//! The pool-data boundary. Reserve snapshots arrive already materialized
//! from a collaborator (chain client, indexer); the core never fetches
//! reserves itself and never retries the collaborator.

use crate::core::types::{Pool, Token};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;

/// Supplies the raw pool snapshot for a token pair. Transport failures
/// surface unchanged; retry policy belongs to the implementation.
#[async_trait]
pub trait PoolProvider: Send + Sync {
    async fn fetch_pools(
        &self,
        token_a: &Token,
        token_b: &Token,
        allowlist: &[String],
    ) -> anyhow::Result<Vec<Pool>>;
}

/// Provider over an already-materialized snapshot: tests, and callers
/// whose own indexer holds the reserve data.
pub struct StaticPoolProvider {
    pools: Vec<Pool>,
}

impl StaticPoolProvider {
    pub fn new(pools: Vec<Pool>) -> Self {
        Self { pools }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self::new(read_snapshot(path)?))
    }
}

#[async_trait]
impl PoolProvider for StaticPoolProvider {
    async fn fetch_pools(
        &self,
        _token_a: &Token,
        _token_b: &Token,
        _allowlist: &[String],
    ) -> anyhow::Result<Vec<Pool>> {
        Ok(self.pools.clone())
    }
}

pub fn write_snapshot<P: AsRef<Path>>(path: P, pools: &[Pool]) -> anyhow::Result<()> {
    let snapshot = SnapshotFile {
        pools: pools.to_vec(),
    };
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, json).context("writing pool snapshot")?;
    Ok(())
}

pub fn read_snapshot<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Pool>> {
    let json = fs::read_to_string(path).context("reading pool snapshot")?;
    let snapshot: SnapshotFile = serde_json::from_str(&json)?;
    Ok(snapshot.pools)
}

// Serializable wrapper so snapshots round-trip as plain JSON documents.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct SnapshotFile {
    pools: Vec<Pool>,
}

/// Read-mostly cache for snapshots shared across estimation calls.
/// Entries older than `max_age` are never served: stale reserves produce
/// economically wrong quotes.
pub struct SnapshotCache {
    max_age: Duration,
    inner: RwLock<HashMap<(String, String), CachedSnapshot>>,
}

struct CachedSnapshot {
    pools: Vec<Pool>,
    fetched_at: Instant,
}

impl SnapshotCache {
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, token_a: &Token, token_b: &Token) -> Option<Vec<Pool>> {
        let cache = self.inner.read().unwrap();
        cache
            .get(&pair_key(token_a, token_b))
            .filter(|entry| entry.fetched_at.elapsed() <= self.max_age)
            .map(|entry| entry.pools.clone())
    }

    pub fn put(&self, token_a: &Token, token_b: &Token, pools: Vec<Pool>) {
        let mut cache = self.inner.write().unwrap();
        cache.insert(
            pair_key(token_a, token_b),
            CachedSnapshot {
                pools,
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&self) {
        self.inner.write().unwrap().clear();
    }
}

fn pair_key(token_a: &Token, token_b: &Token) -> (String, String) {
    let a = token_a.address_key();
    let b = token_b.address_key();
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Wraps a provider with snapshot reuse inside the staleness bound.
pub struct CachedPoolProvider<P> {
    inner: P,
    cache: SnapshotCache,
}

impl<P> CachedPoolProvider<P> {
    pub fn new(inner: P, max_age: Duration) -> Self {
        Self {
            inner,
            cache: SnapshotCache::new(max_age),
        }
    }
}

#[async_trait]
impl<P: PoolProvider> PoolProvider for CachedPoolProvider<P> {
    async fn fetch_pools(
        &self,
        token_a: &Token,
        token_b: &Token,
        allowlist: &[String],
    ) -> anyhow::Result<Vec<Pool>> {
        if let Some(pools) = self.cache.get(token_a, token_b) {
            debug!("serving pool snapshot from cache");
            return Ok(pools);
        }
        let pools = self.inner.fetch_pools(token_a, token_b, allowlist).await?;
        self.cache.put(token_a, token_b, pools.clone());
        Ok(pools)
    }
}
