//! Swap-request state machine: statuses, transition authorization, and the
//! strict/permissive policy switch.
//!
//! A swap request starts `pending` and is moved by its two parties under
//! asymmetric rules: the requested party accepts or rejects, the requester
//! cancels, and either party completes. Authorization is keyed by the
//! *target* status; the strict policy additionally gates on the *current*
//! status so settled requests cannot be reopened.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Lifecycle status of a swap request.
///
/// `Pending` is the sole initial state. The database stores the lowercase
/// string form; [`SwapStatus::as_str`] and [`FromStr`] round-trip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

/// All valid status values, in storage form.
pub const VALID_STATUSES: &[&str] = &["pending", "accepted", "rejected", "completed", "cancelled"];

impl SwapStatus {
    /// The lowercase storage/API form of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            SwapStatus::Pending => "pending",
            SwapStatus::Accepted => "accepted",
            SwapStatus::Rejected => "rejected",
            SwapStatus::Completed => "completed",
            SwapStatus::Cancelled => "cancelled",
        }
    }

    /// Whether ordinary flow models no further transition out of this status.
    ///
    /// `accepted` is terminal except for the explicit completion transition,
    /// which [`authorize_transition`] handles as its own rule.
    pub fn is_terminal(self) -> bool {
        !matches!(self, SwapStatus::Pending)
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwapStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SwapStatus::Pending),
            "accepted" => Ok(SwapStatus::Accepted),
            "rejected" => Ok(SwapStatus::Rejected),
            "completed" => Ok(SwapStatus::Completed),
            "cancelled" => Ok(SwapStatus::Cancelled),
            other => Err(format!(
                "Invalid status '{other}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }
}

/// Which side of a swap request an actor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRole {
    Requester,
    Requested,
}

/// Resolve an actor's role on a request, if they are a party to it at all.
///
/// `requester_id != requested_id` is guaranteed at creation, so an actor
/// matches at most one side.
pub fn role_of(requester_id: DbId, requested_id: DbId, actor_id: DbId) -> Option<SwapRole> {
    if actor_id == requester_id {
        Some(SwapRole::Requester)
    } else if actor_id == requested_id {
        Some(SwapRole::Requested)
    } else {
        None
    }
}

/// How strictly status transitions are gated on the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Actor checks plus from-state gating: settled requests stay settled.
    Strict,
    /// Legacy-compatible: actor checks only, any from-state accepted.
    Permissive,
}

impl TransitionPolicy {
    /// Map the `SWAP_PERMISSIVE_TRANSITIONS` config flag to a policy.
    pub fn from_permissive_flag(permissive: bool) -> Self {
        if permissive {
            TransitionPolicy::Permissive
        } else {
            TransitionPolicy::Strict
        }
    }
}

/// Why a transition or deletion was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Only the requested user can accept or reject requests")]
    OnlyRequested,

    #[error("Only the requester can cancel requests")]
    OnlyRequester,

    #[error("Not authorized to update this request")]
    NotParty,

    #[error("Only the requester can delete their own requests")]
    OnlyRequesterDelete,

    #[error("Can only delete pending requests")]
    DeleteNotPending,

    #[error("A request cannot transition back to pending")]
    PendingTarget,

    #[error("Cannot mark a {from} request as {target}")]
    SettledRequest { from: SwapStatus, target: SwapStatus },
}

impl From<TransitionError> for CoreError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::OnlyRequested
            | TransitionError::OnlyRequester
            | TransitionError::NotParty
            | TransitionError::OnlyRequesterDelete => CoreError::Forbidden(err.to_string()),
            TransitionError::DeleteNotPending
            | TransitionError::PendingTarget
            | TransitionError::SettledRequest { .. } => {
                CoreError::InvalidOperation(err.to_string())
            }
        }
    }
}

/// Authorize a status transition.
///
/// The actor check always runs, keyed by the target status:
///
/// | target    | authorized actor     |
/// |-----------|----------------------|
/// | accepted  | requested party only |
/// | rejected  | requested party only |
/// | cancelled | requester only       |
/// | completed | either party         |
///
/// Under [`TransitionPolicy::Strict`] the current status is then gated:
/// accepted/rejected/cancelled require `pending`, and completed requires
/// `pending` or `accepted`. `pending` is never a valid target.
pub fn authorize_transition(
    current: SwapStatus,
    target: SwapStatus,
    actor: Option<SwapRole>,
    policy: TransitionPolicy,
) -> Result<(), TransitionError> {
    match target {
        SwapStatus::Pending => return Err(TransitionError::PendingTarget),
        SwapStatus::Accepted | SwapStatus::Rejected => {
            if actor != Some(SwapRole::Requested) {
                return Err(TransitionError::OnlyRequested);
            }
        }
        SwapStatus::Cancelled => {
            if actor != Some(SwapRole::Requester) {
                return Err(TransitionError::OnlyRequester);
            }
        }
        SwapStatus::Completed => {
            if actor.is_none() {
                return Err(TransitionError::NotParty);
            }
        }
    }

    if policy == TransitionPolicy::Strict {
        let from_ok = match target {
            SwapStatus::Accepted | SwapStatus::Rejected | SwapStatus::Cancelled => {
                current == SwapStatus::Pending
            }
            SwapStatus::Completed => {
                current == SwapStatus::Pending || current == SwapStatus::Accepted
            }
            SwapStatus::Pending => unreachable!("pending target rejected above"),
        };
        if !from_ok {
            return Err(TransitionError::SettledRequest {
                from: current,
                target,
            });
        }
    }

    Ok(())
}

/// Authorize deletion: the requester only, and only while pending.
pub fn authorize_delete(
    current: SwapStatus,
    actor: Option<SwapRole>,
) -> Result<(), TransitionError> {
    if actor != Some(SwapRole::Requester) {
        return Err(TransitionError::OnlyRequesterDelete);
    }
    if current != SwapStatus::Pending {
        return Err(TransitionError::DeleteNotPending);
    }
    Ok(())
}

/// Direction filter for per-user request listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Requests the user initiated.
    Sent,
    /// Requests directed at the user.
    Received,
    /// Both.
    #[default]
    All,
}
