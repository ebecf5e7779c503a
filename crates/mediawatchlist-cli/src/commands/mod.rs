pub mod config;
pub mod prompts;
pub mod query;
pub mod search;
pub mod status;
pub mod submit;
pub mod ui;
