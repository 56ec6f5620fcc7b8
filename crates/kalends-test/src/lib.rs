//! Integration test support for the kalends workspace.
//!
//! Shared calendar documents live in [`fixtures`]; the tests themselves are
//! under `tests/` and only use the public API of the workspace crates.

pub mod fixtures;
