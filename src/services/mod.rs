// Service module exports

pub mod database;
pub mod external_calendar;
pub mod settings;
pub mod ticket;
