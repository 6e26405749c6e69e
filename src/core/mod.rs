//! Configuration and domain types

pub mod config;
pub mod models;
