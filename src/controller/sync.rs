use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    error::Error,
    model::{api::SyncReportDto, app::AppState},
    service::sync::SyncService,
};

pub static SYNC_TAG: &str = "sync";

/// Run a full contest sync now.
///
/// Idempotent trigger intended for an external timer or on-demand invocation.
/// Provider failures degrade the run instead of failing it; only an error
/// outside provider isolation produces a 500.
#[utoipa::path(
    post,
    path = "/api/sync",
    tag = SYNC_TAG,
    responses(
        (status = 200, description = "Sync completed, possibly partially", body = SyncReportDto),
        (status = 500, description = "Sync failed outside provider isolation", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn run_sync(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let report = SyncService::new(&state.db, &state.http).run_sync().await?;

    Ok((
        StatusCode::OK,
        axum::Json(SyncReportDto {
            synced: report.synced,
            errors: report.errors,
        }),
    ))
}
