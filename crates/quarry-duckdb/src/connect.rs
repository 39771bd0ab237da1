//! Store opening with lock-contention retries and per-process fallback.
//!
//! Opening a file-backed DuckDB store can collide with another process that
//! holds the file lock. The open sequence is modeled as a small state
//! machine so the policy can be tested without an engine: each attempt
//! produces an [`AttemptOutcome`], and [`OpenState::advance`] decides what
//! happens next. [`open_with_retry`] drives the machine against the real
//! engine, sleeping between retries and switching to a per-process fallback
//! file once the primary path stays contended.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use duckdb::Connection;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Retries attempted against the primary path before falling back.
pub const MAX_OPEN_RETRIES: u32 = 5;

/// Backoff between open retries. Retry `n` waits `n * unit_delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub unit_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_OPEN_RETRIES,
            unit_delay: Duration::from_millis(500),
        }
    }
}

/// Which path an opened connection ended up bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTarget {
    Primary,
    Fallback,
}

/// Result of a single open attempt, classified by error signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Opened,
    LockContended,
    Failed,
}

/// Progress of the open sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenState {
    /// First attempt against the primary path, no delay.
    Opening,
    /// Retry `attempt` (1-based) against the primary path after a backoff.
    Retrying { attempt: u32 },
    /// Retries exhausted; attempting the per-process fallback path.
    FallingBack,
    /// A connection is bound.
    Opened(OpenTarget),
    /// The sequence gave up.
    Failed,
}

impl OpenState {
    /// Feed the outcome of the current attempt and get the next state.
    ///
    /// Lock contention on the primary path retries up to `max_retries`
    /// times, then moves to the fallback path. Any other failure is fatal,
    /// as is any failure of the fallback attempt. Terminal states absorb.
    pub fn advance(self, outcome: AttemptOutcome, max_retries: u32) -> OpenState {
        match (self, outcome) {
            (OpenState::Opening, AttemptOutcome::Opened) => OpenState::Opened(OpenTarget::Primary),
            (OpenState::Opening, AttemptOutcome::LockContended) => OpenState::Retrying { attempt: 1 },
            (OpenState::Opening, AttemptOutcome::Failed) => OpenState::Failed,

            (OpenState::Retrying { .. }, AttemptOutcome::Opened) => {
                OpenState::Opened(OpenTarget::Primary)
            }
            (OpenState::Retrying { attempt }, AttemptOutcome::LockContended) => {
                if attempt < max_retries {
                    OpenState::Retrying { attempt: attempt + 1 }
                } else {
                    OpenState::FallingBack
                }
            }
            (OpenState::Retrying { .. }, AttemptOutcome::Failed) => OpenState::Failed,

            (OpenState::FallingBack, AttemptOutcome::Opened) => {
                OpenState::Opened(OpenTarget::Fallback)
            }
            (OpenState::FallingBack, _) => OpenState::Failed,

            (state @ OpenState::Opened(_), _) | (state @ OpenState::Failed, _) => state,
        }
    }
}

/// True when an engine error message carries DuckDB's file-lock signature.
pub fn is_lock_contention(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("lock on file") || lower.contains("conflicting lock")
}

/// Per-process sibling of `primary` used when the primary stays locked.
pub fn fallback_store_path(primary: &Path) -> PathBuf {
    let dir = primary.parent().unwrap_or_else(|| Path::new("."));
    dir.join(format!("workspace_{}.duckdb", std::process::id()))
}

/// A bound connection together with where it ended up.
pub struct OpenedStore {
    pub conn: Connection,
    pub path: PathBuf,
    pub target: OpenTarget,
}

/// Open `primary`, retrying on lock contention per `policy` and falling
/// back to [`fallback_store_path`] once retries are exhausted.
pub fn open_with_retry(primary: &Path, policy: &RetryPolicy) -> StoreResult<OpenedStore> {
    let fallback = fallback_store_path(primary);
    let mut state = OpenState::Opening;

    loop {
        if let OpenState::Retrying { attempt } = state {
            thread::sleep(policy.unit_delay * attempt);
        }
        let (path, target) = match state {
            OpenState::FallingBack => (fallback.as_path(), OpenTarget::Fallback),
            _ => (primary, OpenTarget::Primary),
        };

        match Connection::open(path) {
            Ok(conn) => {
                if target == OpenTarget::Fallback {
                    warn!(
                        path = %fallback.display(),
                        "primary store stayed locked, using per-process fallback"
                    );
                }
                return Ok(OpenedStore {
                    conn,
                    path: path.to_path_buf(),
                    target,
                });
            }
            Err(err) => {
                let outcome = if is_lock_contention(&err.to_string()) {
                    AttemptOutcome::LockContended
                } else {
                    AttemptOutcome::Failed
                };
                state = state.advance(outcome, policy.max_retries);
                match state {
                    OpenState::Failed => return Err(StoreError::Open(err.to_string())),
                    OpenState::Retrying { attempt } => {
                        debug!(attempt, error = %err, "store locked, retrying");
                    }
                    OpenState::FallingBack => {
                        warn!(error = %err, "lock contention persists after retries");
                    }
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_success_binds_primary() {
        let state = OpenState::Opening.advance(AttemptOutcome::Opened, MAX_OPEN_RETRIES);
        assert_eq!(state, OpenState::Opened(OpenTarget::Primary));
    }

    #[test]
    fn non_lock_failure_is_fatal_immediately() {
        let state = OpenState::Opening.advance(AttemptOutcome::Failed, MAX_OPEN_RETRIES);
        assert_eq!(state, OpenState::Failed);
    }

    #[test]
    fn contention_walks_through_all_retries_then_falls_back() {
        let mut state = OpenState::Opening;
        state = state.advance(AttemptOutcome::LockContended, MAX_OPEN_RETRIES);
        assert_eq!(state, OpenState::Retrying { attempt: 1 });

        for expected in 2..=MAX_OPEN_RETRIES {
            state = state.advance(AttemptOutcome::LockContended, MAX_OPEN_RETRIES);
            assert_eq!(state, OpenState::Retrying { attempt: expected });
        }

        state = state.advance(AttemptOutcome::LockContended, MAX_OPEN_RETRIES);
        assert_eq!(state, OpenState::FallingBack);

        state = state.advance(AttemptOutcome::Opened, MAX_OPEN_RETRIES);
        assert_eq!(state, OpenState::Opened(OpenTarget::Fallback));
    }

    #[test]
    fn retry_can_still_win_the_primary() {
        let state = OpenState::Retrying { attempt: 3 }.advance(AttemptOutcome::Opened, MAX_OPEN_RETRIES);
        assert_eq!(state, OpenState::Opened(OpenTarget::Primary));
    }

    #[test]
    fn fallback_failure_gives_up() {
        let contended = OpenState::FallingBack.advance(AttemptOutcome::LockContended, MAX_OPEN_RETRIES);
        assert_eq!(contended, OpenState::Failed);
        let failed = OpenState::FallingBack.advance(AttemptOutcome::Failed, MAX_OPEN_RETRIES);
        assert_eq!(failed, OpenState::Failed);
    }

    #[test]
    fn terminal_states_absorb() {
        let opened = OpenState::Opened(OpenTarget::Primary);
        assert_eq!(opened.advance(AttemptOutcome::Failed, MAX_OPEN_RETRIES), opened);
        assert_eq!(OpenState::Failed.advance(AttemptOutcome::Opened, MAX_OPEN_RETRIES), OpenState::Failed);
    }

    #[test]
    fn lock_signatures_match_engine_messages() {
        assert!(is_lock_contention(
            "IO Error: Could not set lock on file \"/tmp/ws.duckdb\": Conflicting lock is held"
        ));
        assert!(is_lock_contention("could not set LOCK ON FILE elsewhere"));
        assert!(!is_lock_contention("Catalog Error: table missing"));
        assert!(!is_lock_contention("disk full"));
    }

    #[test]
    fn fallback_path_is_sibling_and_carries_pid() {
        let fallback = fallback_store_path(Path::new("/data/ws/workspace.duckdb"));
        assert_eq!(fallback.parent(), Some(Path::new("/data/ws")));
        let name = fallback.file_name().and_then(|n| n.to_str()).unwrap();
        assert_eq!(name, format!("workspace_{}.duckdb", std::process::id()));
    }

    #[test]
    fn default_policy_matches_documented_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.unit_delay, Duration::from_millis(500));
    }
}
