//! Core types shared by the vitrine exhibits

pub mod config;
pub mod error;
pub mod types;
pub mod variate;

pub use config::*;
pub use error::{Error, Result};
pub use types::*;
pub use variate::*;
