pub mod auth;
pub mod config;
pub mod credential;
pub mod error;
pub mod io;
pub mod paths;
pub mod report;
pub mod smoke;

pub use error::{CheckError, Result};
