//! Application layer for prodir.
//!
//! This crate provides the profile operations engine, coordinating the
//! domain model with whichever repositories the caller wires in.

pub mod api;
pub mod profession;
pub mod profession_usecase;
pub mod reconciliation;

pub use api::ProfessionApi;
pub use profession_usecase::ProfessionUseCase;
pub use reconciliation::{ProfessionFlagReconciler, ReconcileReport};
