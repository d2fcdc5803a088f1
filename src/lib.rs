//! WhatsApp relay: forwards newly created reminder messages to WhatsApp.
//!
//! A library for relaying outbound-message records to a messaging provider
//! (Twilio) exactly once per trigger, from either an HTTP request or a
//! record-store change feed.

pub mod config;
pub mod events;
pub mod gateway;
pub mod relay;
pub mod server;

#[cfg(test)]
mod test_fixtures;
