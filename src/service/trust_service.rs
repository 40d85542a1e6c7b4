use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::service::error::ServiceError;

pub const BASE_SCORE: i32 = 100;
pub const CANCELLATION_PENALTY: i32 = 5;
pub const COMPLETION_BONUS: i32 = 2;

/// Reputation formula: 100 base, -5 per cancellation, +2 per completion,
/// floored at zero.
pub fn compute_trust_score(cancellations: i32, completions: i32) -> i32 {
    (BASE_SCORE - CANCELLATION_PENALTY * cancellations + COMPLETION_BONUS * completions).max(0)
}

/// Applies the cancellation penalty inside the caller's transaction so the
/// counter, the score and the appointment update commit together. The score
/// is recomputed from the counters rather than adjusted in place: a running
/// score clamped at zero would drift above the formula once later
/// completions add to the floored value.
pub async fn penalize_cancellation(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
) -> Result<(), ServiceError> {
    sqlx::query(
        r#"
        UPDATE users
        SET cancelled_count = cancelled_count + 1,
            trust_score = GREATEST(0, $2 - $3 * (cancelled_count + 1) + $4 * completed_count),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(BASE_SCORE)
    .bind(CANCELLATION_PENALTY)
    .bind(COMPLETION_BONUS)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn award_completion(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
) -> Result<(), ServiceError> {
    sqlx::query(
        r#"
        UPDATE users
        SET completed_count = completed_count + 1,
            trust_score = GREATEST(0, $2 - $3 * cancelled_count + $4 * (completed_count + 1)),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(BASE_SCORE)
    .bind(CANCELLATION_PENALTY)
    .bind(COMPLETION_BONUS)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_history() {
        assert_eq!(compute_trust_score(3, 5), 95);
    }

    #[test]
    fn floors_at_zero() {
        assert_eq!(compute_trust_score(30, 0), 0);
    }

    #[test]
    fn clean_history_keeps_base() {
        assert_eq!(compute_trust_score(0, 0), BASE_SCORE);
    }

    #[test]
    fn completions_raise_above_base() {
        assert_eq!(compute_trust_score(0, 10), 120);
    }

    #[test]
    fn recomputing_from_counters_does_not_drift_past_the_floor() {
        // 25 cancellations pin the score at zero; five completions afterwards
        // must leave it at the formula value, not lift a clamped running
        // score step by step (25*5 - 5*2 would otherwise land on 10).
        let mut score = BASE_SCORE;
        let (mut cancellations, mut completions) = (0, 0);

        for _ in 0..25 {
            cancellations += 1;
            score = compute_trust_score(cancellations, completions);
        }
        assert_eq!(score, 0);

        for _ in 0..5 {
            completions += 1;
            score = compute_trust_score(cancellations, completions);
        }

        assert_eq!(score, 0);
        assert_eq!(score, compute_trust_score(25, 5));
    }
}
