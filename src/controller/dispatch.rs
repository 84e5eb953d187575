use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    error::Error,
    model::{api::DispatchReportDto, app::AppState},
    service::dispatch::DispatchService,
};

pub static DISPATCH_TAG: &str = "dispatch";

/// Dispatch due reminders now.
///
/// Idempotent trigger intended for a recurring external timer. Individual
/// reminder failures are isolated and reported in the counts.
#[utoipa::path(
    post,
    path = "/api/reminders/dispatch",
    tag = DISPATCH_TAG,
    responses(
        (status = 200, description = "Dispatch run completed", body = DispatchReportDto),
        (status = 500, description = "Dispatch run failed", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn dispatch_due(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let report = DispatchService::new(&state.db, state.notifier.as_ref())
        .dispatch_due()
        .await?;

    Ok((
        StatusCode::OK,
        axum::Json(DispatchReportDto {
            sent: report.sent,
            failed: report.failed,
            total: report.total,
        }),
    ))
}
