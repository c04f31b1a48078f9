//! Core scalar types and error kinds shared across the hold'em table core.
//!
//! This crate provides the foundational types used throughout the workspace:
//! chip counts, seat identifiers, and the `ErrorKind` taxonomy every fallible
//! operation in the core returns instead of panicking.

mod error;

pub use error::{CoreError, ErrorKind};

/// Chip count. Non-negative in every reachable state; signed so that
/// intermediate accounting (deltas, deficits while validating an action)
/// can be expressed without a separate subtraction type.
pub type Chips = i64;

/// Fixed seat index at a table, `0..n`, stable for the duration of a hand.
pub type SeatId = usize;

/// Monotonic hand counter, incremented on every `START_HAND`.
pub type HandNumber = u64;
