//! Configuration and the message data model

pub mod config;
pub mod models;
