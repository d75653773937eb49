//! Core types shared by every module: errors and configuration.

pub mod config;
pub mod errors;
