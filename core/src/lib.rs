//! Test harness for a storefront REST API (products, carts, users, auth).
//!
//! # Overview
//! `ApiClient` is the single network access point: one session, one set of
//! default headers, one base URL. Scenario tests pull request bodies from
//! `fixtures`, issue requests, and judge the returned `Outcome` themselves.
//!
//! # Design
//! - Status codes are data, not errors. `HarnessError` is reserved for
//!   transport failures, unsupported verbs, undecodable payloads and use of a
//!   closed client.
//! - JSON is parsed on demand; an empty body or `null` is an absent value.
//! - Fixtures are typed and returned by value, so tests may modify them.

pub mod checks;
pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod http;

pub use client::ApiClient;
pub use config::Config;
pub use error::HarnessError;
pub use http::{HttpMethod, HttpRequest, Outcome};
