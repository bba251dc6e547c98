use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::state::{Action, ResumeState};

/// Apply a JSON array of actions to a fresh state.
pub fn replay_file(path: &Path, seed_edits: bool) -> Result<ResumeState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;
    let actions: Vec<Action> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid action script: {}", path.display()))?;

    info!("replaying {} action(s) from {}", actions.len(), path.display());
    let mut state = ResumeState::new(seed_edits);
    for action in actions {
        state.apply(action);
    }
    Ok(state)
}
