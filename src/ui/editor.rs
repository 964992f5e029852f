/// What the options page does with each edit, independent of the view

use crate::error::LinkError;
use crate::links::LinkConfig;
use crate::storage::{LinkRepository, LinkStore};
use log::error;

/// A transient message shown after a save
#[derive(Clone, PartialEq, Debug)]
pub enum Status {
    Saved(String),
    Failed(String),
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageState {
    Loading,
    Idle,
    /// Stored links couldn't be read; the page stays read-only
    Error(String),
}

impl PageState {
    /// Only a page whose stored list was read can be edited.
    pub fn accepts_edits(&self) -> bool {
        matches!(self, PageState::Idle)
    }
}

/// One user action on the link list
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Add { name: String, url: String },
    SetEnabled { index: usize, enabled: bool },
    Remove(usize),
    Move { from: usize, to: usize },
}

/// The list after `edit`, or why it was refused. `config` is left untouched.
pub fn apply_edit(state: &PageState, config: &LinkConfig, edit: &Edit) -> Result<LinkConfig, LinkError> {
    if !state.accepts_edits() {
        return Err(LinkError::Locked);
    }

    let mut next = config.clone();
    match edit {
        Edit::Add { name, url } => {
            next.add_custom(name, url)?;
        }
        Edit::SetEnabled { index, enabled } => next.set_enabled(*index, *enabled)?,
        Edit::Remove(index) => {
            next.remove(*index)?;
        }
        Edit::Move { from, to } => next.move_entry(*from, *to)?,
    }
    Ok(next)
}

/// Load the list for editing. Seeded defaults are saved without a status message.
///
/// A read failure leaves the page empty and locked.
pub async fn open<S: LinkStore>(repository: &LinkRepository<S>) -> (LinkConfig, PageState) {
    match repository.load_or_seed().await {
        Ok(config) => (config, PageState::Idle),
        Err(e) => {
            error!("Failed to load links: {}", e);
            (
                LinkConfig::default(),
                PageState::Error(format!("Failed to load settings: {}", e)),
            )
        }
    }
}

/// Write the whole list and describe the outcome for the user.
pub async fn save_with_status<S: LinkStore>(repository: &LinkRepository<S>, config: &LinkConfig) -> Status {
    match repository.save(config).await {
        Ok(()) => Status::Saved("Settings saved.".to_string()),
        Err(e) => {
            error!("Failed to save links: {}", e);
            Status::Failed(format!("Failed to save settings: {}", e))
        }
    }
}
