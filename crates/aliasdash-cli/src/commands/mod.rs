//! Command handlers

pub mod aliases;
pub mod analytics;
pub mod prefs;
pub mod theme;
pub mod tools;
