// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod compose;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod file;
pub mod geo;
pub mod matching;
pub mod precomp;
pub mod progress;
pub mod scrape;
pub mod specs;
