//! Messaging gateway layer: everything needed to hand one message to the provider.
//!
//! This module provides types and traits for:
//! - The provider transport: a form POST ([`FormPost`]) answered by an [`HttpReply`],
//!   sent through [`HttpClient`] (reqwest-backed in [`ReqwestClient`])
//! - Channel-prefixed addressing ([`Channel`])
//! - The send capability itself ([`MessagingGateway`]) and its Twilio implementation
//!   ([`TwilioGateway`])
//!
//! A gateway performs exactly one provider call per [`MessagingGateway::send`];
//! it neither retries nor classifies failures.

mod channel;
mod client;
mod error;
mod http;
mod twilio;

#[cfg(test)]
mod channel_tests;
#[cfg(test)]
mod client_tests;

pub use channel::Channel;
pub use client::ReqwestClient;
pub use error::{HttpError, ProviderError};
pub use http::{FormPost, HttpClient, HttpReply};
pub use twilio::{Credentials, MessagingGateway, ProviderMessageId, TwilioGateway};
