//! HTTP client plumbing shared by catalog adapters

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
