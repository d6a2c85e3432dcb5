//! Integration test modules.

mod fit_roundtrip_test;
mod write_guard_test;
