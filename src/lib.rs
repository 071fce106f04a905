//! otpdesk - login, OTP verification and user records over JSON files
//!
//! A small HTTP service. Every endpoint reads a whole collection, changes
//! it in memory and writes it back:
//!
//! - [`store`]: collection persistence behind the [`store::RecordStore`] trait
//! - [`auth`]: login submission and OTP format checks, logged to the
//!   login attempts collection
//! - [`users`]: user upsert and typed single-field updates
//! - [`http_server`]: axum routers mapping the services to HTTP
//! - [`cli`]: `serve`, `init` and `dump` commands

pub mod auth;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod store;
pub mod users;
