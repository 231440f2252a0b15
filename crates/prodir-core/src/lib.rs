//! Domain layer for prodir.
//!
//! Holds the profession entity model, its coercion and validation rules, the
//! repository interfaces the operations engine is written against, and the
//! shared error and response types.

pub mod config;
pub mod error;
pub mod profession;
pub mod response;
pub mod user;

// Re-export common error type
pub use error::ProdirError;
