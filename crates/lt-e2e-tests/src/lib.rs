//! End-to-end tests for logtriage live under `tests/`.
//!
//! They drive `lt-ingest` with a mock source and in-memory sink so every
//! run goes through format detection, parsing, classification and batching.
