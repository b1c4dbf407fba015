pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod prompt_template;
pub mod providers;
pub mod search;
pub mod tools;
