//! Status Transition Workflow
//!
//! Optimistic drag-and-drop status changes. A drag moves the card locally;
//! the drop either discards the move or hands back a [`CommitRequest`] for
//! the caller to send. [`TransitionWorkflow::settle`] then commits or rolls
//! back once the server answers.

use crate::board::BoardState;
use crate::config::CommitPolicy;
use crate::domain::{Task, TaskId, OTHER_STATUS};
use crate::error::ReportResult;

/// Where a card was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Task(TaskId),
    Column(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging { task: TaskId, origin: String },
    /// No drag, but at least one status change in flight.
    Committing,
}

/// A status change to send to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRequest {
    pub task_id: TaskId,
    pub issue_id: String,
    pub origin: String,
    pub target: String,
    /// Card as the server knows it, still carrying the origin status.
    pub task: Task,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Nothing to send; the card is back where it started.
    Discarded,
    Commit(CommitRequest),
    /// Refused by the commit policy; the card is back where it started.
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackReason {
    AuthRequired,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Committed { task: TaskId },
    RolledBack { task: TaskId, reason: RollbackReason },
}

impl Settlement {
    pub fn needs_login(&self) -> bool {
        matches!(self, Settlement::RolledBack { reason: RollbackReason::AuthRequired, .. })
    }

    /// Banner text for failures other than a missing login.
    pub fn banner_message(&self) -> Option<String> {
        match self {
            Settlement::RolledBack { reason: RollbackReason::Failed(msg), .. } => {
                Some(format!("Failed to update task status: {}", msg))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveDrag {
    task: TaskId,
    /// Status column the task belongs to.
    origin: String,
    /// Column the card is drawn in; differs from `origin` for the `Other Status` bucket.
    lane: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionWorkflow {
    policy: CommitPolicy,
    drag: Option<ActiveDrag>,
}

impl TransitionWorkflow {
    pub fn new(policy: CommitPolicy) -> Self {
        Self { policy, drag: None }
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    pub fn phase(&self, board: &BoardState) -> Phase {
        match &self.drag {
            Some(drag) => Phase::Dragging { task: drag.task, origin: drag.origin.clone() },
            None if !board.updating.is_empty() => Phase::Committing,
            None => Phase::Idle,
        }
    }

    pub fn dragging(&self) -> Option<TaskId> {
        self.drag.as_ref().map(|d| d.task)
    }

    /// Start dragging `task`. Refused while that task is committing.
    ///
    /// Column highlights from a status lookup stay up for the drag; only the
    /// success marker of an earlier change is dropped.
    pub fn begin_drag(&mut self, board: &mut BoardState, task: TaskId) -> bool {
        if board.is_updating(task) {
            log::debug!("[DND] Task {} is committing, drag refused", task);
            return false;
        }
        self.cancel_drag(board);
        let Some((origin, lane)) = board
            .task(task)
            .map(|t| (t.column_id.clone(), board.display_column(t).to_string()))
        else {
            return false;
        };
        board.success_task = None;
        log::debug!("[DND] Drag start task={} origin={} lane={}", task, origin, lane);
        self.drag = Some(ActiveDrag { task, origin, lane });
        true
    }

    /// Provisional local move while hovering. Never touches the network.
    pub fn hover(&mut self, board: &mut BoardState, over: &DropTarget) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        match over {
            DropTarget::Task(other) => board.reassign_over_task(drag.task, *other),
            DropTarget::Column(column) => board.reassign_over_column(drag.task, column),
        }
    }

    /// Abandon the drag and put the card back.
    pub fn cancel_drag(&mut self, board: &mut BoardState) {
        if let Some(drag) = self.drag.take() {
            restore(board, drag.task, &drag.origin);
        }
    }

    /// Release the card over `target`.
    pub fn release(&mut self, board: &mut BoardState, target: Option<&DropTarget>) -> DropOutcome {
        let Some(drag) = self.drag.take() else {
            return DropOutcome::Discarded;
        };

        let resolved = match target {
            Some(DropTarget::Task(over)) => board.task(*over).map(|t| board.display_column(t).to_string()),
            Some(DropTarget::Column(column)) => Some(column.clone()),
            None => None,
        };
        // The Other Status bucket is not a status the server knows
        let Some(target) = resolved.filter(|t| *t != drag.lane && *t != drag.origin && t != OTHER_STATUS) else {
            restore(board, drag.task, &drag.origin);
            return DropOutcome::Discarded;
        };

        if self.policy == CommitPolicy::Serialize && !board.updating.is_empty() {
            restore(board, drag.task, &drag.origin);
            log::info!("[DND] Drop on {} rejected: another status change is in flight", target);
            return DropOutcome::Rejected("Another status change is still in progress".to_string());
        }

        let Some(task) = board.task_mut(drag.task) else {
            return DropOutcome::Discarded;
        };
        task.column_id = target.clone();
        let request = CommitRequest {
            task_id: drag.task,
            issue_id: task.row.issue_id.clone(),
            origin: drag.origin,
            target,
            task: task.clone(),
        };
        board.updating.insert(drag.task);
        log::info!("[DND] Commit {} {} -> {}", request.issue_id, request.origin, request.target);
        DropOutcome::Commit(request)
    }

    /// Apply the server's answer to a commit.
    ///
    /// The task is looked up by id and issue id, so a board refreshed in the
    /// meantime is left as fetched.
    pub fn settle<T>(
        &mut self,
        board: &mut BoardState,
        request: &CommitRequest,
        result: ReportResult<T>,
    ) -> Settlement {
        board.updating.remove(&request.task_id);
        let still_present = board
            .task(request.task_id)
            .is_some_and(|t| t.row.issue_id == request.issue_id);

        match result {
            Ok(_) => {
                if still_present {
                    set_status(board, request.task_id, &request.target);
                    board.highlighted_task = None;
                    board.success_task = Some(request.task_id);
                    board.clear_column_highlights();
                } else {
                    log::warn!("[DND] {} no longer on the board, commit not applied", request.issue_id);
                }
                Settlement::Committed { task: request.task_id }
            }
            Err(err) => {
                if still_present {
                    set_status(board, request.task_id, &request.origin);
                }
                log::warn!("[DND] Rolled back {}: {}", request.issue_id, err);
                let reason = if err.is_auth_required() {
                    RollbackReason::AuthRequired
                } else {
                    RollbackReason::Failed(err.to_string())
                };
                Settlement::RolledBack { task: request.task_id, reason }
            }
        }
    }
}

fn set_status(board: &mut BoardState, task: TaskId, status: &str) {
    if let Some(task) = board.task_mut(task) {
        task.set_status(status);
    }
}

fn restore(board: &mut BoardState, task: TaskId, origin: &str) {
    if let Some(task) = board.task_mut(task) {
        task.column_id = origin.to_string();
    }
}
