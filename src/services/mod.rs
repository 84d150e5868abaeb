//! Long-running services

pub mod background;

pub use background::{BackgroundSchedule, BackgroundTasks};
