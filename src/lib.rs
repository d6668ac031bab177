pub mod config;
pub mod error;
pub mod fs;
pub mod shell;

pub mod core;
pub mod highlight;
pub mod input;
