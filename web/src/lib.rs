//! HTTP layer for the weather station.
//!
//! Owns everything around the streaming core: route registration, the
//! per-request lifecycle of `/sse` connections, the ingest endpoint the
//! station firmware posts to, and the human-readable rendering of sensor
//! values. The core protocol and channel semantics live in the `sse` crate.

mod controller;
mod router;
mod sink;

pub use router::define_routes;
