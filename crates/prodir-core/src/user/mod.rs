//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User identity and record (`UserId`, `User`)
//! - `repository`: Repository trait for the user flag write
//!
//! # Usage
//!
//! ```ignore
//! use prodir_core::user::{User, UserId, UserRepository};
//! ```

mod model;
mod repository;

// Re-export public API
pub use model::{User, UserId};
pub use repository::UserRepository;
