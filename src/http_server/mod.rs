//! # otpdesk HTTP Server Module
//!
//! # Endpoints
//!
//! - `POST /login` - submit credentials, receive a verification code
//! - `POST /verify` - submit an OTP
//! - `GET /users`, `GET /otp-attempts` - the login attempts log
//! - `POST /save-user` - insert or replace a user
//! - `POST /update-user/:id` - change one field of a user
//! - `GET /health` - health check

pub mod auth_routes;
pub mod config;
pub mod observability_routes;
pub mod response;
pub mod server;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
