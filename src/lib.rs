#![warn(missing_docs)]
//! Agrispray is the control gateway for an agricultural spraying robot.
//!
//! It serves a small dashboard and a JSON API whose endpoints each run one
//! configured sensor or actuator command, relaying its output or a canned
//! fallback when the command fails.

pub mod client;
pub mod cmd;
pub mod config;
pub mod context;
pub mod devices;
pub mod executor;
pub mod gateway;
pub mod http_server;
pub mod models;
