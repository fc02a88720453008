pub mod config;
pub mod error;
pub mod models;
pub mod resources;
pub mod storage;

pub use error::{AppError, Result};
