//! RS3 XP calculator client: boost request collection, the calculation API
//! client, a state-owning controller, and a small reference backend.

pub mod boost;
pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod server;

pub use error::{ClientError, Result};
