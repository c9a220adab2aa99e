//! bfhl - JSON endpoint for Fibonacci, prime filtering, LCM/HCF and one-word AI answers

pub mod config;
pub mod error;
pub mod math;
pub mod request;

pub mod ai;
pub mod dispatch;
pub mod api;

pub use config::Config;
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use request::{Operation, Output};
