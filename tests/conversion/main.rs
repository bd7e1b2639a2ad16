//! Conversion Test Suite
//!
//! End-to-end coverage of the converter through the `kvmarshal` facade.
//!
//! ## Modules
//!
//! - `scenarios`: plain record, batch miss, digest-only key
//! - `key_validity`: which key shapes parse and which fail
//! - `context`: context path step typing
//! - `record_shapes`: bin shapes on the read path, metadata, strict mode
//! - `roundtrip`: property tests for round-trip and flatten parity
//! - `config`: loading converter configuration from disk
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test conversion
//! cargo test --test conversion roundtrip::
//! ```

mod common;

mod config;
mod context;
mod key_validity;
mod record_shapes;
mod roundtrip;
mod scenarios;
