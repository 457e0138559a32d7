//! CLI command groups.

pub mod attention;
pub mod config;
pub mod schedule;
pub mod task;

use attune_core::{BehaviorConfig, Planner, StateStore};

/// Load settings and the persisted planner.
pub(crate) fn open_planner() -> Result<(StateStore, Planner), Box<dyn std::error::Error>> {
    let settings = BehaviorConfig::load()?;
    let store = StateStore::open()?;
    let planner = store.load(settings)?;
    tracing::debug!(
        path = %store.path().display(),
        tasks = planner.tasks().len(),
        "planner loaded"
    );
    Ok((store, planner))
}
