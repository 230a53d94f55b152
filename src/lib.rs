pub mod app;
pub mod card;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod csv;
pub mod deck;
pub mod output;
pub mod pagination;
pub mod record;
pub mod runner;
pub mod search;
pub mod store;

#[cfg(test)]
mod tests;
