use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::models::{FieldKey, ResumeData};

/// Every state transition the builder supports. Input surfaces translate
/// their events into these and hand them to [`ResumeState::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// A form input changed; `value` is the input's full new content.
    Change { field: FieldKey, value: String },
    SetPendingSkill { text: String },
    AddSkill,
    RemoveSkill { index: usize },
    Submit,
    BeginEdit { field: FieldKey },
    SaveEdit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "field", rename_all = "camelCase")]
pub enum EditMode {
    #[default]
    Viewing,
    Editing(FieldKey),
}

impl EditMode {
    pub fn field(self) -> Option<FieldKey> {
        match self {
            EditMode::Viewing => None,
            EditMode::Editing(field) => Some(field),
        }
    }

    pub fn is_editing(self, key: FieldKey) -> bool {
        self.field() == Some(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeState {
    pub draft: ResumeData,
    pub snapshot: Option<ResumeData>,
    pub pending_skill: String,
    pub mode: EditMode,
    /// Copy the snapshot's value into the draft when an edit begins.
    #[serde(skip)]
    seed_edits: bool,
}

impl Default for ResumeState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ResumeState {
    pub fn new(seed_edits: bool) -> Self {
        Self {
            draft: ResumeData::default(),
            snapshot: None,
            pending_skill: String::new(),
            mode: EditMode::Viewing,
            seed_edits,
        }
    }

    pub fn apply(&mut self, action: Action) {
        debug!("apply {:?}", action);
        match action {
            Action::Change { field, value } => self.change(field, &value),
            Action::SetPendingSkill { text } => self.pending_skill = text,
            Action::AddSkill => self.add_skill(),
            Action::RemoveSkill { index } => self.remove_skill(index),
            Action::Submit => self.submit(),
            Action::BeginEdit { field } => self.begin_edit(field),
            Action::SaveEdit => self.save_edit(),
        }
    }

    pub fn change(&mut self, field: FieldKey, value: &str) {
        self.draft.set(field, value);
    }

    /// Appends the pending text untrimmed. Blank text is ignored and kept.
    pub fn add_skill(&mut self) {
        if self.pending_skill.trim().is_empty() {
            debug!("ignoring blank skill");
            return;
        }
        let skill = std::mem::take(&mut self.pending_skill);
        self.draft.skills.push(skill);
    }

    /// Out-of-range indices are ignored.
    pub fn remove_skill(&mut self, index: usize) {
        if index < self.draft.skills.len() {
            self.draft.skills.remove(index);
        } else {
            debug!(
                "ignoring remove of skill {} ({} present)",
                index,
                self.draft.skills.len()
            );
        }
    }

    /// Replaces the snapshot. The edit cursor is left alone; only a save clears it.
    pub fn submit(&mut self) {
        let draft = std::mem::take(&mut self.draft);
        info!(
            "resume submitted for '{}' with {} skill(s)",
            draft.personal_info.name,
            draft.skills.len()
        );
        self.snapshot = Some(draft);
    }

    /// Points the edit cursor at `field`, replacing any previous target.
    pub fn begin_edit(&mut self, field: FieldKey) {
        let Some(snapshot) = &self.snapshot else {
            debug!("ignoring edit of '{}' with no resume", field);
            return;
        };
        if self.seed_edits {
            self.draft.copy_field_from(snapshot, field);
        }
        self.mode = EditMode::Editing(field);
    }

    /// Commits the field under the cursor into the snapshot and resets the draft.
    pub fn save_edit(&mut self) {
        let EditMode::Editing(field) = self.mode else {
            debug!("ignoring save while not editing");
            return;
        };
        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.copy_field_from(&self.draft, field);
            info!("saved '{}' = '{}'", field, snapshot.value(field));
        }
        self.mode = EditMode::Viewing;
        self.draft = ResumeData::default();
    }
}
