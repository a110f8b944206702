pub mod chat;
pub mod clear;
pub mod config;
pub mod history;
pub mod prompts;
pub mod search;
pub mod stats;
