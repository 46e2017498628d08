//! linkmark - URL shortener with click tracking and per-user bookmarks
//!
//! # Architecture
//! - `storage`: sea-orm data access (users, urls, bookmarks)
//! - `services`: business logic (short-code allocation, login upsert, owner scoping)
//! - `api`: HTTP services, extractors and middleware
//! - `interfaces`: command-line interface
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging initialization

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
