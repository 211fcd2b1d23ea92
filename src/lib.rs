// Release Calendar Library
// Exports all modules for testing and reuse

pub mod calendar;
pub mod dashboard;
pub mod models;
pub mod services;
pub mod utils;
