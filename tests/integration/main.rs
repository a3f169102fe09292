//! Integration tests for the crawl engine
//!
//! These tests drive the orchestrator and pagination driver against a
//! scripted in-memory page capability, end to end, with no browser and no
//! network.

mod crawl_tests;
mod support;
