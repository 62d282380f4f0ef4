//! # Roster API Server Library
//!
//! This library provides the core functionality for the Roster API server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `bootstrap`: Tracing setup and store construction from configuration
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Validating JSON extractor
//! - `routes`: API route handlers

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
