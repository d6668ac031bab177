pub mod commands;
pub mod line;
pub mod window;
