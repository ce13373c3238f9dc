//! Test modules for the scanner
//!
//! `fake` is shared by the unit tests in `checker`, `enumerator` and
//! `manager`; the orchestrator's own suite lives in `manager`.
