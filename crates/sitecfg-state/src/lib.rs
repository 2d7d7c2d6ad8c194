//! # sitecfg-state — Current Configuration Snapshot
//!
//! A long-running preview server re-reads its configuration documents when
//! they change on disk. [`ConfigSlot`] holds the current validated document
//! as an immutable [`Snapshot`] and replaces it atomically on reload.
//!
//! ## Invariant
//!
//! The slot always holds a validated value. A reload whose loader fails
//! leaves the previous snapshot in place; readers never observe a
//! half-applied configuration.
//!
//! ## Concurrency
//!
//! - Readers call [`ConfigSlot::current`], which loads the current `Arc`
//!   from an `arc_swap::ArcSwap` without taking a lock. A reader keeps its
//!   snapshot alive for as long as it needs it, even across later swaps.
//! - Reloads are serialized by a `parking_lot` mutex, so two concurrent
//!   reloads never race on the generation counter. The new snapshot is
//!   stored with a single pointer swap after the loader returns.

pub mod slot;

pub use slot::{ConfigSlot, ReloadError, ReloadOutcome, Snapshot};
