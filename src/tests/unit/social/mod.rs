//! Social Hub Unit Tests

mod calendar_tests;
mod hub_tests;
mod messaging_tests;
