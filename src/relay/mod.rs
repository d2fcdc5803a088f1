//! Relay core: maps one outbound-message record to one gateway send attempt.
//!
//! [`Relay::relay`] validates the recipient and body, calls the
//! [`MessagingGateway`](crate::gateway::MessagingGateway) once and reports a
//! [`SendOutcome`]. Both the HTTP adapter ([`crate::server`]) and the
//! change-feed adapter ([`crate::events`]) wrap this one function.
//!
//! Delivery is at-most-once per invocation: no retries, no deduplication.
//! A record relayed twice is sent twice.

mod outcome;
mod record;
mod trigger;


pub use outcome::{RelayError, SendOutcome};
pub use record::{OutboundMessageRecord, field, mask_phone};
pub use trigger::Relay;
