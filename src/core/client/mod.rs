//! Outbound vendor calls
//!
//! [`ApiClient`] composes the request cache, the rate limiter, the timeout
//! guard, retry with backoff and envelope validation behind a single
//! [`call_service`](ApiClient::call_service).

mod api_client;


pub use api_client::ApiClient;
