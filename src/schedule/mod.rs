//! Debounced task scheduling
//!
//! At most one task is pending. Scheduling a new one cancels the previous
//! handle, so a burst of edits collapses into a single reflow once the
//! quiescence window passes. Time is supplied by the caller in
//! milliseconds, which keeps the scheduler a plain state machine.

use serde::{Deserialize, Serialize};

/// What caused a task to be scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    /// Keystrokes in the text input
    TextInput,
    /// Page or viewport resize
    Resize,
}

/// Handle identifying a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// A task waiting for its window to elapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTask {
    pub id: TaskId,
    pub kind: TaskKind,
    /// Scheduled at this timestamp (ms)
    pub scheduled_at: u64,
    /// Fires at or after this timestamp (ms)
    pub due_at: u64,
}

impl PendingTask {
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.due_at
    }
}

/// Single-slot debouncer
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<PendingTask>,
    next_id: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task `window_ms` from now, replacing any pending one
    pub fn schedule(&mut self, kind: TaskKind, now_ms: u64, window_ms: u64) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        if let Some(replaced) = self.pending.take() {
            log::trace!("debounce: task {:?} replaced by {:?}", replaced.id, id);
        }

        self.pending = Some(PendingTask {
            id,
            kind,
            scheduled_at: now_ms,
            due_at: now_ms.saturating_add(window_ms),
        });
        id
    }

    /// Drop the pending task, returning it
    pub fn cancel(&mut self) -> Option<PendingTask> {
        self.pending.take()
    }

    /// Drop the pending task only if it is of `kind`
    pub fn cancel_kind(&mut self, kind: TaskKind) -> Option<PendingTask> {
        match self.pending {
            Some(task) if task.kind == kind => self.pending.take(),
            _ => None,
        }
    }

    /// Take the pending task if its window has elapsed
    pub fn poll(&mut self, now_ms: u64) -> Option<PendingTask> {
        match self.pending {
            Some(task) if task.is_due(now_ms) => self.pending.take(),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingTask> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Get current timestamp in milliseconds
pub fn current_timestamp() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
