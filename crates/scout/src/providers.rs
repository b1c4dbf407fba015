pub mod anthropic;
pub mod base;
pub mod brave;
pub mod configs;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
