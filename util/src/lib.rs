pub mod config;
pub mod dates;
