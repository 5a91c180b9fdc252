//! Search service integration: typed request/response shapes, the HTTP
//! client for the hosted backend, and the adapter that short-circuits
//! blank queries before they reach the network.

pub mod adapter;
pub mod client;
pub mod types;

pub use adapter::SearchAdapter;
pub use client::{SearchClient, SearchError};
pub use types::{Hit, SearchParams, SearchRequest, SearchResponse};
