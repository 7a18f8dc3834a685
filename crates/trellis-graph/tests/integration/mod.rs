//! Integration tests.

mod properties;
mod scenarios;
