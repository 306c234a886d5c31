//! Integration Tests
//!
//! End-to-end exercises of the escalation engine with deterministic stub
//! collaborators, and of the HTTP surface via `tower::ServiceExt::oneshot`.
//! No network access anywhere.

// Shared stub collaborators
mod stubs;

// Escalation engine behavior
mod escalation_test;

// HTTP API behavior
mod api_test;
