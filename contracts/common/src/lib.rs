//! Shared utilities for the Cologne Protocol contract suite.
//!
//! This crate provides the single-owner authorization helpers used by both
//! the perfumer and the cologne token contracts. The owner address is the
//! capability required for restricted operations (pool registration, weight
//! changes, phase rescheduling, minting) and is injected once at
//! initialization.

#![cfg_attr(not(feature = "std"), no_std)]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod ownable;

pub use ownable::*;
