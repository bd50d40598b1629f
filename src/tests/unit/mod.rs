//! Unit Tests
//!
//! - `copilot_tests`: co-pilot, AI DM and illustrator against mocked providers
//! - `providers`: HTTP-level provider tests with wiremock
//! - `social`: social hub rules and role permissions

mod copilot_tests;
mod providers;
mod social;
