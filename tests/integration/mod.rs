//! Integration Tests Module
//!
//! End-to-end tests for Promptory over the embedded backend, with a mock
//! completion provider standing in for the LLM endpoint.

// Shared fixtures: mock provider, counting data layer, signed-in backends
mod common;

// Ownership, sharing and the public read path
mod sharing_test;

// Content limits and write blocking
mod validation_test;

// Description generation and category inference
mod enrichment_test;

// Dashboard, edit page and delete confirmation flows
mod dashboard_test;

// Session store, login form and app state wiring
mod session_test;
