//! Phase workers: the long-running side of an extraction invocation.
//!
//! A worker receives the validated event, its phase state and an adapter
//! giving access to the source API, repositories and packaged documents. It
//! must close its invocation with exactly one terminal event; the
//! [`emitter`] types enforce that.
//!
//! - Terminal events, source records and normalizers in [`domain`]
//! - Source API, repository, transport and worker contracts in [`ports`]
//! - The four phase workers and their registry in [`services`]
//! - In-memory adapters in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod emitter;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
