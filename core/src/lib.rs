//! Synchronous client core for a remote item collection.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the view state a
//! presentation layer renders: the item list, a pending flag, the last error
//! and the backend's health.
//!
//! # Design
//! - `ItemClient` is stateless; it holds only `base_url`.
//! - `ItemCollection` owns `ViewState` and mutates it only through explicit
//!   `begin_*` / `finish_*` transitions, one operation in flight at a time.
//! - Hosts plug real I/O in through the `Transport` trait.
//! - DTOs are defined independently from the item-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod collection;
pub mod config;
pub mod error;
pub mod http;
pub mod state;
pub mod types;

pub use client::ItemClient;
pub use collection::{CollectionError, ItemCollection, Operation};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use state::{Draft, Health, ViewState};
pub use types::{HealthReport, Item, ItemId, NewItem};
