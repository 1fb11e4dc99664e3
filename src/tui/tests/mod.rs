//! TUI subsystem integration tests
//!
//! These live inside `src/tui/` because they exercise `pub(crate)` internals
//! (the input router, the background worker, the message enums) that are not
//! part of the public API and therefore unreachable from top-level `tests/`.

mod input_tests;
