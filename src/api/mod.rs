//! Client for the external registration webhooks.

pub mod client;
pub mod payload;
pub mod sentinel;

pub use client::RemoteClient;
