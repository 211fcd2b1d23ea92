// Module exports for models

pub mod board;
pub mod client;
pub mod schedule;
pub mod settings;
pub mod ticket;
pub mod ui;
