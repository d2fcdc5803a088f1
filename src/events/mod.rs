//! Event-driven adapter: relays records as the record store reports their creation.
//!
//! The store's change notifications arrive as [`MessageCreated`] events on a
//! stream (see [`feed`] for the newline-delimited JSON source). Each event is
//! relayed independently; the outcome is only logged because nothing is
//! waiting on it. Missing fields are a silent skip, provider failures are
//! logged and dropped.

mod dispatch;
pub mod feed;


pub use dispatch::{DispatchSummary, MessageCreated, dispatch, run, run_until};
