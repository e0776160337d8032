//! Remote list — the rows shown on the remotes page.
//!
//! Every user operation is split in two steps:
//!
//! 1. `begin_*` mutates the list right away (the optimistic state the user
//!    sees) and returns a [`PendingChange`] describing the request to send
//!    and how to undo the mutation;
//! 2. [`RemoteList::settle`] consumes that token once the request finished
//!    and, under [`FailurePolicy::Rollback`], reverts the mutation on
//!    failure.
//!
//! Rows are kept in server order and may share an id; operations apply to
//! every row with the target id.

use serde::{Deserialize, Serialize};

use somfyctl_domain::action::{RemoteAction, SettingsAction};
use somfyctl_domain::id::RemoteId;
use somfyctl_domain::remote::{Remote, RollingCode, sanitize_name};

/// What to do with an optimistic change whose request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Revert the change.
    #[default]
    Rollback,
    /// Leave the optimistic state in place.
    Keep,
}

/// A request produced by an optimistic change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Action { id: RemoteId, action: RemoteAction },
    Rename { id: RemoteId, name: String },
    Delete { id: RemoteId },
}

impl Change {
    #[must_use]
    pub fn remote_id(&self) -> RemoteId {
        match self {
            Self::Action { id, .. } | Self::Rename { id, .. } | Self::Delete { id } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Undo {
    RestoreCodes(Vec<CodeChange>),
    RestoreNames {
        previous: Vec<String>,
        applied: String,
    },
    Reinsert(Vec<(usize, Remote)>),
    Nothing,
}

/// Code a row held before a change, and the one the change gave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CodeChange {
    previous: RollingCode,
    applied: RollingCode,
}

/// Token of an applied but unconfirmed change.
#[must_use = "a pending change must be settled once its request completes"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
    change: Change,
    undo: Undo,
}

impl PendingChange {
    /// The request to send for this change.
    pub fn change(&self) -> &Change {
        &self.change
    }
}

/// How a pending change ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Confirmed,
    /// The request failed and the optimistic state was kept.
    Kept,
    RolledBack,
}

/// Ordered rows of the remotes page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteList {
    rows: Vec<Remote>,
    policy: FailurePolicy,
}

impl RemoteList {
    #[must_use]
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            rows: Vec::new(),
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    #[must_use]
    pub fn rows(&self) -> &[Remote] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row with the given id.
    #[must_use]
    pub fn find(&self, id: RemoteId) -> Option<&Remote> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Replace every row with a fresh list response.
    pub fn replace(&mut self, remotes: Vec<Remote>) {
        self.rows = remotes;
    }

    /// Append a row, e.g. the answer of a create request.
    pub fn push(&mut self, remote: Remote) {
        self.rows.push(remote);
    }

    fn matching_mut(&mut self, id: RemoteId) -> impl Iterator<Item = &mut Remote> {
        self.rows.iter_mut().filter(move |r| r.id == id)
    }

    fn update_codes(
        &mut self,
        id: RemoteId,
        update: impl Fn(RollingCode) -> RollingCode,
    ) -> Vec<CodeChange> {
        self.matching_mut(id)
            .map(|row| {
                let previous = row.rolling_code;
                row.rolling_code = update(previous);
                CodeChange {
                    previous,
                    applied: row.rolling_code,
                }
            })
            .collect()
    }

    /// Apply a remote action.
    ///
    /// Transmitting actions advance the rolling code of every matching row
    /// by one, `reset` sets it to zero, anything else leaves rows untouched.
    pub fn begin_action(&mut self, id: RemoteId, action: RemoteAction) -> PendingChange {
        let undo = if action.transmits() {
            Undo::RestoreCodes(self.update_codes(id, RollingCode::next))
        } else if action == RemoteAction::Reset {
            Undo::RestoreCodes(self.update_codes(id, |_| RollingCode::ZERO))
        } else {
            Undo::Nothing
        };

        PendingChange {
            change: Change::Action { id, action },
            undo,
        }
    }

    /// Apply a rename typed by the user.
    ///
    /// The raw text is trimmed and cut to the maximum name length; the
    /// resulting name (possibly empty) is what gets stored and sent.
    pub fn begin_rename(&mut self, id: RemoteId, raw: &str) -> PendingChange {
        self.begin_rename_to(id, sanitize_name(raw))
    }

    /// Store `name` as is.
    pub(crate) fn begin_rename_to(&mut self, id: RemoteId, name: String) -> PendingChange {
        let previous = self
            .matching_mut(id)
            .map(|row| std::mem::replace(&mut row.name, name.clone()))
            .collect();

        PendingChange {
            change: Change::Rename {
                id,
                name: name.clone(),
            },
            undo: Undo::RestoreNames {
                previous,
                applied: name,
            },
        }
    }

    /// Remove every row with the given id.
    pub fn begin_delete(&mut self, id: RemoteId) -> PendingChange {
        let mut removed = Vec::new();
        let mut index = 0;
        self.rows.retain(|row| {
            let keep = row.id != id;
            if !keep {
                removed.push((index, row.clone()));
            }
            index += 1;
            keep
        });

        PendingChange {
            change: Change::Delete { id },
            undo: Undo::Reinsert(removed),
        }
    }

    /// Apply an operation chosen in the settings panel.
    ///
    /// Only `delete` and `reset` touch the rows; any other action is just
    /// sent.
    pub fn begin_settings(&mut self, id: RemoteId, action: SettingsAction) -> PendingChange {
        match action {
            SettingsAction::Delete => self.begin_delete(id),
            SettingsAction::Send(RemoteAction::Reset) => self.begin_action(id, RemoteAction::Reset),
            SettingsAction::Send(action) => PendingChange {
                change: Change::Action { id, action },
                undo: Undo::Nothing,
            },
        }
    }

    /// Close a pending change with the outcome of its request.
    pub fn settle<T, E>(&mut self, pending: PendingChange, outcome: &Result<T, E>) -> Settlement {
        if outcome.is_ok() {
            return Settlement::Confirmed;
        }
        match self.policy {
            FailurePolicy::Keep => Settlement::Kept,
            FailurePolicy::Rollback => {
                self.rollback(pending);
                Settlement::RolledBack
            }
        }
    }

    fn rollback(&mut self, pending: PendingChange) {
        let id = pending.change.remote_id();
        match pending.undo {
            Undo::RestoreCodes(mut codes) => {
                // rows changed since, by a later change or a reload, keep their code
                for row in self.rows.iter_mut().filter(|r| r.id == id) {
                    if let Some(at) = codes.iter().position(|c| c.applied == row.rolling_code) {
                        row.rolling_code = codes.swap_remove(at).previous;
                    }
                }
            }
            Undo::RestoreNames { previous, applied } => {
                // a later rename of the same row wins over this rollback
                for (row, name) in self.matching_mut(id).zip(previous) {
                    if row.name == applied {
                        row.name = name;
                    }
                }
            }
            Undo::Reinsert(removed) => {
                if self.find(id).is_some() {
                    return;
                }
                for (index, remote) in removed {
                    let at = index.min(self.rows.len());
                    self.rows.insert(at, remote);
                }
            }
            Undo::Nothing => {}
        }
    }
}
