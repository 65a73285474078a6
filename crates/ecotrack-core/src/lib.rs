pub mod action;
pub mod config;
pub mod error;
pub mod io;
pub mod paths;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{Result, TrackerError};
