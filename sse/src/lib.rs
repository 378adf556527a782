//! Server-Sent Events core for the weather station.
//!
//! This crate owns the two concerns with real protocol and concurrency
//! stakes:
//!
//! - **Wire encoding**: [`Event`] renders one update into the line-oriented
//!   SSE record format (`id:`/`data:`/`event:`/`retry:`/comment lines, blank
//!   line terminator).
//! - **Update multiplexing**: [`Broadcaster`] holds one single-slot channel
//!   per sensor kind; the ingest path publishes into it and every connected
//!   stream loop races to drain it. A publish to a full slot suspends the
//!   publisher, so at most one reading per kind is ever pending.
//!
//! [`stream_updates`] is the per-connection consumption loop: it waits on
//! all slots and the shutdown signal at once, encodes whatever arrives and
//! hands each complete record to an [`EventSink`], which must flush it to
//! the client before returning.
//!
//! Everything else (routing, request lifecycle, response plumbing, the
//! human-readable rendering of values) belongs to the `web` crate.
//!
//! # Delivery semantics
//!
//! Delivery is best-effort by design. A reading that no stream drains before
//! the next publish of the same kind simply delays that publisher; when
//! several clients are connected they compete for each slot and any given
//! reading reaches exactly one of them.

pub mod broadcaster;
pub mod event;
pub mod stream;

pub use broadcaster::Broadcaster;
pub use event::Event;
pub use stream::{stream_updates, EventSink};
