use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::{service::trust_service, AppState};

const SWEEP_INTERVAL_SECS: u64 = 300;

/// Periodic sweep that settles confirmed appointments whose time window has
/// passed: each one is marked completed exactly once and its owner earns the
/// +2 trust bonus.
pub async fn start_completion_job(app_state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));

    loop {
        interval.tick().await;

        if let Err(e) = settle_elapsed_appointments(&app_state).await {
            tracing::error!("completion sweep failed: {}", e);
        }
    }
}

async fn settle_elapsed_appointments(
    app_state: &Arc<AppState>,
) -> Result<(), crate::service::error::ServiceError> {
    let mut tx = app_state.db_client.pool.begin().await?;

    let settled: Vec<(Uuid, Uuid)> = sqlx::query_as(
        r#"
        UPDATE agendamentos
        SET completed = TRUE
        WHERE status = 'confirmado'
          AND completed = FALSE
          AND scheduled_at + make_interval(mins => duration_minutes) < NOW()
        RETURNING id, user_id
        "#,
    )
    .fetch_all(&mut *tx)
    .await?;

    for (appointment_id, user_id) in &settled {
        trust_service::award_completion(&mut tx, *user_id).await?;
        tracing::debug!("appointment {} settled as completed", appointment_id);
    }

    tx.commit().await?;

    if !settled.is_empty() {
        tracing::info!("completion sweep settled {} appointment(s)", settled.len());
    }

    Ok(())
}
