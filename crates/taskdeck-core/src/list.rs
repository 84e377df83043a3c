use tracing::trace;

use crate::task::{Task, TaskStatus};

/// A provisional, locally-applied edit awaiting server confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskMutation {
    ToggleStatus { id: String },
    Remove { id: String },
}

impl TaskMutation {
    fn apply(&self, tasks: &mut Vec<Task>) {
        match self {
            TaskMutation::ToggleStatus { id } => {
                for task in tasks.iter_mut() {
                    if task.id == *id {
                        task.status = task.status.toggled();
                    }
                }
            }
            TaskMutation::Remove { id } => {
                tasks.retain(|task| task.id != *id);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingMutation {
    seq: u64,
    mutation: TaskMutation,
    confirmed: bool,
}

/// Transient optimistic layer over the authoritative task snapshot.
///
/// Deltas compound in the order they were begun. A confirmed delta stays
/// applied until the next authoritative reload lands (`reconcile`), so the
/// row does not flicker back between the 2xx response and the reload. A
/// rolled-back delta disappears immediately, reverting the optimistic edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOverlay {
    pending: Vec<PendingMutation>,
}

impl ListOverlay {
    /// Records a delta under the caller-supplied sequence number.
    pub fn begin(&mut self, seq: u64, mutation: TaskMutation) {
        trace!(seq, ?mutation, "optimistic delta begun");
        self.pending.push(PendingMutation {
            seq,
            mutation,
            confirmed: false,
        });
    }

    /// Marks a delta as confirmed by the server; it is dropped on the next
    /// `reconcile` once the reload has made it authoritative.
    pub fn confirm(&mut self, seq: u64) {
        for entry in &mut self.pending {
            if entry.seq == seq {
                entry.confirmed = true;
            }
        }
    }

    /// Discards a delta whose request failed, reverting the optimistic edit.
    pub fn rollback(&mut self, seq: u64) {
        trace!(seq, "optimistic delta rolled back");
        self.pending.retain(|entry| entry.seq != seq);
    }

    /// Drops confirmed deltas. Call when a fresh authoritative snapshot
    /// arrives; unconfirmed (still in-flight) deltas stay applied on top of
    /// the new snapshot.
    pub fn reconcile(&mut self) {
        self.pending.retain(|entry| !entry.confirmed);
    }

    pub fn has_confirmed(&self) -> bool {
        self.pending.iter().any(|entry| entry.confirmed)
    }

    /// Whether any provisional edit is outstanding.
    pub fn is_transitioning(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Applies the pending deltas over the authoritative snapshot.
    pub fn project(&self, authoritative: &[Task]) -> Vec<Task> {
        let mut view = authoritative.to_vec();
        for entry in &self.pending {
            entry.mutation.apply(&mut view);
        }
        view
    }
}

/// Display order: incomplete tasks before completed ones, ties keeping the
/// backend's collection order (stable sort, no secondary key).
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| task.status == TaskStatus::Completed);
}
