//! No library surface of its own; this crate exists to hold the
//! integration tests under `tests/`.
