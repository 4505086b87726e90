//! Checklist view-model.
//!
//! # Responsibility
//! - Fetch the task list once and keep a local copy for rendering.
//! - Flip completion flags optimistically and reconcile with server replies.
//! - Derive the completion score shown next to the list.
//!
//! # Invariants
//! - Every toggle gets a fresh request token; only the reply to the latest
//!   token of a task may change that task's local state.
//! - A failed latest toggle restores the last status the server confirmed.
//! - A reply older than the newest applied confirmation is ignored outright.
//! - The state lock is never held across an `.await`.

use crate::api::TaskApi;
use crate::config::FallbackPolicy;
use crate::error::{ClientError, ClientResult};
use checklist_core::db::DEFAULT_TASKS;
use checklist_core::{completion_score, NewTask, Task, TaskId};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Where the currently shown tasks came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSource {
    Server,
    /// Built-in stand-ins shown after a failed fetch.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded(TaskSource),
    /// Only reachable with `FallbackPolicy::Surface`.
    Failed(String),
}

/// How a toggle's server reply was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Server accepted; local status now mirrors the stored task.
    Confirmed,
    /// Server call failed; local status restored.
    Reverted,
    /// A newer toggle (or reload) happened first; the reply was ignored.
    Superseded,
}

struct InFlight {
    latest_token: u64,
    confirmed_status: bool,
    /// Token behind `confirmed_status`; the entry opens with `token - 1`,
    /// so replies issued before the entry existed never count.
    confirmed_token: u64,
}

struct ViewState {
    load: LoadState,
    tasks: Vec<Task>,
    in_flight: HashMap<TaskId, InFlight>,
    next_token: u64,
}

pub struct ChecklistViewModel<A: TaskApi> {
    api: A,
    fallback: FallbackPolicy,
    state: Mutex<ViewState>,
}

/// The three incomplete tasks shown when the server cannot be reached.
pub fn placeholder_tasks() -> Vec<Task> {
    DEFAULT_TASKS
        .iter()
        .zip(1..)
        .map(|(&(name, desc), id)| NewTask::new(name, desc).into_task(id))
        .collect()
}

impl<A: TaskApi> ChecklistViewModel<A> {
    pub fn new(api: A, fallback: FallbackPolicy) -> Self {
        Self {
            api,
            fallback,
            state: Mutex::new(ViewState {
                load: LoadState::Loading,
                tasks: Vec::new(),
                in_flight: HashMap::new(),
                next_token: 0,
            }),
        }
    }

    /// Fetches the task list, replacing any local state.
    ///
    /// Replies to toggles issued before the reload are ignored afterwards.
    ///
    /// # Errors
    /// Only with `FallbackPolicy::Surface`; placeholders never fail.
    pub async fn load(&self) -> ClientResult<()> {
        self.lock().load = LoadState::Loading;
        let fetched = self.api.list_tasks().await;

        let mut state = self.lock();
        state.in_flight.clear();
        match fetched {
            Ok(tasks) => {
                info!(
                    "event=client_load module=client status=ok source=server count={}",
                    tasks.len()
                );
                state.tasks = tasks;
                state.load = LoadState::Loaded(TaskSource::Server);
                Ok(())
            }
            Err(err) => match self.fallback {
                FallbackPolicy::Placeholders => {
                    warn!(
                        "event=client_load module=client status=fallback source=placeholder error={err}"
                    );
                    state.tasks = placeholder_tasks();
                    state.load = LoadState::Loaded(TaskSource::Placeholder);
                    Ok(())
                }
                FallbackPolicy::Surface => {
                    warn!("event=client_load module=client status=error error={err}");
                    state.tasks.clear();
                    state.load = LoadState::Failed(err.to_string());
                    Err(err)
                }
            },
        }
    }

    /// Flips the completion flag of `id` and syncs it to the server.
    ///
    /// # Errors
    /// - `UnknownTask` when `id` is not in the local list; nothing is sent.
    ///
    /// Server failures are not errors; they show up as `Reverted`.
    pub async fn toggle(&self, id: TaskId) -> ClientResult<ToggleOutcome> {
        let (token, desired) = self.begin_toggle(id)?;
        let reply = self.api.update_status(id, desired).await;
        Ok(self.finish_toggle(id, token, reply))
    }

    /// Percentage of completed tasks, rounded; 0 for an empty list.
    pub fn score(&self) -> u8 {
        completion_score(&self.lock().tasks)
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.lock().load.clone()
    }

    /// Returns whether a toggle of `id` is awaiting its reply.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.lock().in_flight.contains_key(&id)
    }

    /// Applies the optimistic flip and returns `(token, new status)`.
    pub(crate) fn begin_toggle(&self, id: TaskId) -> ClientResult<(u64, bool)> {
        let mut state = self.lock();
        let ViewState {
            tasks,
            in_flight,
            next_token,
            ..
        } = &mut *state;

        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(ClientError::UnknownTask(id))?;

        *next_token += 1;
        let token = *next_token;
        in_flight
            .entry(id)
            .or_insert(InFlight {
                latest_token: token,
                confirmed_status: task.status,
                confirmed_token: token - 1,
            })
            .latest_token = token;

        task.status = !task.status;
        Ok((token, task.status))
    }

    pub(crate) fn finish_toggle(
        &self,
        id: TaskId,
        token: u64,
        reply: ClientResult<Task>,
    ) -> ToggleOutcome {
        let mut state = self.lock();
        let ViewState {
            tasks, in_flight, ..
        } = &mut *state;

        let Some(entry) = in_flight.get_mut(&id) else {
            return ToggleOutcome::Superseded;
        };
        if entry.latest_token != token {
            match &reply {
                Ok(stored) if token > entry.confirmed_token => {
                    entry.confirmed_status = stored.status;
                    entry.confirmed_token = token;
                }
                _ => {}
            }
            return ToggleOutcome::Superseded;
        }
        let confirmed_status = entry.confirmed_status;
        in_flight.remove(&id);

        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            return ToggleOutcome::Superseded;
        };
        match reply {
            Ok(stored) => {
                task.status = stored.status;
                ToggleOutcome::Confirmed
            }
            Err(err) => {
                warn!(
                    "event=client_toggle module=client status=reverted task_id={id} error={err}"
                );
                task.status = confirmed_status;
                ToggleOutcome::Reverted
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
