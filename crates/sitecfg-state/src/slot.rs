//! # Snapshot Slot

use std::ops::Deref;
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use sitecfg_core::{sha256_digest, CanonicalBytes, CanonicalizationError, ContentDigest};
use thiserror::Error;

/// One immutable version of the configuration.
#[derive(Debug)]
pub struct Snapshot<T> {
    value: T,
    generation: u64,
    digest: ContentDigest,
    loaded_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Starts at 0 and increases by one on every swap.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Digest of the canonical JSON form of the value.
    pub fn digest(&self) -> ContentDigest {
        self.digest
    }

    /// When this snapshot was installed. Kept across reloads that change
    /// nothing or fail.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Time since this snapshot was installed, as of `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.loaded_at
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

/// What a successful reload did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// A new snapshot was installed.
    Swapped {
        generation: u64,
        digest: ContentDigest,
    },
    /// The loaded value has the same digest as the current snapshot. The
    /// current snapshot was kept.
    Unchanged { generation: u64 },
}

/// A reload that left the current snapshot in place.
#[derive(Error, Debug)]
pub enum ReloadError<E> {
    /// The loader returned an error.
    #[error("configuration reload rejected: {0}")]
    Rejected(E),

    /// The loaded value could not be canonicalized for digesting.
    #[error("configuration reload failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Holder of the current configuration snapshot.
#[derive(Debug)]
pub struct ConfigSlot<T> {
    current: ArcSwap<Snapshot<T>>,
    reload_lock: Mutex<()>,
}

impl<T: Serialize> ConfigSlot<T> {
    /// Create a slot holding `value` as generation 0.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError` if `value` cannot be serialized.
    pub fn new(value: T) -> Result<Self, CanonicalizationError> {
        let digest = digest_of(&value)?;
        Ok(Self {
            current: ArcSwap::from_pointee(Snapshot {
                value,
                generation: 0,
                digest,
                loaded_at: Utc::now(),
            }),
            reload_lock: Mutex::new(()),
        })
    }

    /// The current snapshot. Never blocks, even while a reload runs.
    pub fn current(&self) -> Arc<Snapshot<T>> {
        self.current.load_full()
    }

    /// Generation of the current snapshot.
    pub fn generation(&self) -> u64 {
        self.current.load().generation
    }

    /// Run `load` and install its result as the new snapshot.
    ///
    /// Reloads are serialized. If the loaded value has the same digest as
    /// the current snapshot nothing is swapped and the generation stays.
    ///
    /// # Errors
    ///
    /// Returns `ReloadError::Rejected` with the loader's error, or
    /// `ReloadError::Canonicalization` if the value cannot be digested.
    /// In both cases the previous snapshot remains current.
    pub fn reload<E, F>(&self, load: F) -> Result<ReloadOutcome, ReloadError<E>>
    where
        E: std::fmt::Display,
        F: FnOnce() -> Result<T, E>,
    {
        let _reloading = self.reload_lock.lock();
        let previous = self.current();

        let value = load().map_err(|err| {
            tracing::warn!(
                generation = previous.generation,
                error = %err,
                "configuration reload rejected; keeping current snapshot"
            );
            ReloadError::Rejected(err)
        })?;
        let digest = digest_of(&value)?;

        if digest == previous.digest {
            tracing::debug!(
                generation = previous.generation,
                digest = %digest,
                "configuration unchanged"
            );
            return Ok(ReloadOutcome::Unchanged {
                generation: previous.generation,
            });
        }

        let generation = previous.generation + 1;
        let loaded_at = Utc::now();
        self.current.store(Arc::new(Snapshot {
            value,
            generation,
            digest,
            loaded_at,
        }));
        tracing::info!(
            generation,
            digest = %digest,
            loaded_at = %loaded_at.to_rfc3339(),
            "configuration snapshot swapped"
        );
        Ok(ReloadOutcome::Swapped { generation, digest })
    }

    /// Install an already-validated value.
    pub fn replace(&self, value: T) -> Result<ReloadOutcome, CanonicalizationError> {
        self.reload(|| Ok::<T, std::convert::Infallible>(value))
            .map_err(|err| match err {
                ReloadError::Canonicalization(e) => e,
                ReloadError::Rejected(never) => match never {},
            })
    }
}

fn digest_of<T: Serialize>(value: &T) -> Result<ContentDigest, CanonicalizationError> {
    Ok(sha256_digest(&CanonicalBytes::new(value)?))
}
