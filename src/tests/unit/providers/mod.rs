//! LLM Provider Unit Tests
//!
//! Uses wiremock for HTTP mocking to test:
//! - API request formatting
//! - Response parsing (success and error cases)
//! - Image extraction from inline data

mod google_tests;
