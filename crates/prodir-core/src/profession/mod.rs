//! Profession domain module.
//!
//! This module contains the profession entity model, the presence-aware
//! request types built from raw payloads, and the repository interface.
//!
//! # Module Structure
//!
//! - `model`: Core domain model (`Profession`) and wire field names
//! - `patch`: Presence-aware field value (`Patch`)
//! - `coercion`: Casting and price parsing rules (`RawFields`, `PriceInput`)
//! - `schema`: Constraints checked on every write (`ProfessionSchema`)
//! - `request`: Creation candidate and update patch (`NewProfession`, `ProfessionPatch`)
//! - `query`: Directory lookup (`ServiceNameQuery`)
//! - `repository`: Repository trait for profession persistence
//!
//! # Usage
//!
//! ```ignore
//! use prodir_core::profession::{Profession, ProfessionRepository, ProfessionPatch};
//! ```

pub mod coercion;
mod model;
mod patch;
mod query;
mod repository;
mod request;
mod schema;

// Re-export public API
pub use coercion::{PriceInput, RawFields};
pub use model::{DEFAULT_PRICE_UNIT, Profession, field};
pub use patch::Patch;
pub use query::{SERVICE_NAME_REQUIRED, ServiceNameQuery};
pub use repository::ProfessionRepository;
pub use request::{NewProfession, ProfessionPatch};
pub use schema::{ProfessionSchema, SchemaFields};
