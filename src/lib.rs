//! timereport - work-time reports and yearly statistics
//!
//! A small REST service that stores daily work-time reports (arrival, leave,
//! lunch and total worked time) and derives per-year aggregates from them.
//!
//! # Features
//! - **cli**: Account and configuration management commands
//!
//! # Architecture
//! - `api`: HTTP routes and middleware (Basic auth, request id, timing)
//! - `services`: Report CRUD, statistics aggregation, account management
//! - `storage`: SeaORM backend (SQLite, MySQL, PostgreSQL)
//! - `config`: TOML + environment configuration
//! - `runtime`: Server startup and shutdown
//! - `interfaces`: CLI commands
//! - `system`: Logging

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
