//! Client for the Wikibase REST API.
//!
//! [`RestApi`] exposes the resources one call at a time. [`Entity`] keeps a
//! local copy of an item or property, records edits, and on
//! [`Entity::submit`] sends either a full create or a JSON Patch computed
//! against the state it was loaded with.

pub mod api;
pub mod client;
pub mod connection;
pub mod error;
pub mod model;
pub mod payload;
pub mod retry;

pub use api::{EntityScope, Part, RestApi};
pub use client::{Client, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use connection::{Connection, ConnectionConfig, WIKIDATA_ENDPOINT};
pub use error::{Error, Result};
pub use model::*;
pub use payload::{CLIENT_TAG, EditOptions, Payload, PayloadBody};
pub use retry::{RetryPolicy, RetrySettings};
