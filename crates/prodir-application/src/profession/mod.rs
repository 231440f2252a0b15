//! Profession application helpers.

mod updater;

pub use updater::ProfessionUpdater;
