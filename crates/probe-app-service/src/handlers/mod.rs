//! API handlers.

use std::time::Duration;

use probe_app_store::StoreError;

pub mod apps;
pub mod checkout;
pub mod health;
pub mod notifications;
pub mod pages;
pub mod reviews;
pub mod users;

/// Maximum attempts for an optimistic write that may lose a commit race.
const CONFLICT_ATTEMPTS: u32 = 3;

/// Base backoff between conflict retries; grows linearly per attempt.
const CONFLICT_BACKOFF: Duration = Duration::from_millis(25);

/// Run an optimistic store write, retrying on commit conflicts.
///
/// Retries up to [`CONFLICT_ATTEMPTS`] times with a short linear backoff.
/// The final conflict is returned to the caller, which surfaces it as 409.
async fn with_conflict_retry<T>(
    entity: &'static str,
    mut op: impl FnMut() -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    let mut attempt = 1;
    loop {
        match op() {
            Err(e) if e.is_conflict() && attempt < CONFLICT_ATTEMPTS => {
                tracing::warn!(entity, attempt, "Optimistic commit conflict, retrying");
                tokio::time::sleep(CONFLICT_BACKOFF * attempt).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn retries_past_transient_conflicts() {
        let mut calls = 0u32;
        let result = with_conflict_retry("app", || {
            calls += 1;
            if calls < CONFLICT_ATTEMPTS {
                Err(StoreError::conflict("app", "sudoku-pro"))
            } else {
                Ok(calls)
            }
        })
        .await;

        assert_eq!(result.unwrap(), CONFLICT_ATTEMPTS);
    }

    #[tokio::test(start_paused = true)]
    async fn surfaces_conflict_after_exhausting_attempts() {
        let mut calls = 0u32;
        let result: Result<(), StoreError> = with_conflict_retry("app", || {
            calls += 1;
            Err(StoreError::conflict("app", "sudoku-pro"))
        })
        .await;

        assert!(result.unwrap_err().is_conflict());
        assert_eq!(calls, CONFLICT_ATTEMPTS);
    }

    #[tokio::test]
    async fn does_not_retry_other_store_errors() {
        let mut calls = 0u32;
        let result: Result<(), StoreError> = with_conflict_retry("app", || {
            calls += 1;
            Err(StoreError::Database("io error".into()))
        })
        .await;

        assert!(!result.unwrap_err().is_conflict());
        assert_eq!(calls, 1);
    }
}
