use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::Error,
    model::{
        api::{ErrorDto, SubscribeDto, SubscribeResultDto},
        app::AppState,
    },
    service::reminder::ReminderService,
};

pub static SUBSCRIPTION_TAG: &str = "subscriptions";

/// Subscribe a user to a contest.
///
/// Creates the subscription and its reminder instances from the user's current
/// preferences. Idempotent: re-subscribing reports zero new reminders.
#[utoipa::path(
    post,
    path = "/api/users/{user_id}/subscriptions",
    tag = SUBSCRIPTION_TAG,
    params(("user_id" = i32, Path, description = "Store-assigned profile ID")),
    request_body = SubscribeDto,
    responses(
        (status = 201, description = "Subscription created", body = SubscribeResultDto),
        (status = 404, description = "User or contest not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn subscribe(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    axum::Json(body): axum::Json<SubscribeDto>,
) -> Result<impl IntoResponse, Error> {
    let reminders_created = ReminderService::new(&state.db)
        .subscribe(user_id, body.contest_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        axum::Json(SubscribeResultDto { reminders_created }),
    ))
}

/// Unsubscribe a user from a contest.
///
/// Deletes the subscription and every pending reminder for the pair; sent and
/// failed reminders remain as delivery history.
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}/subscriptions/{contest_id}",
    tag = SUBSCRIPTION_TAG,
    params(
        ("user_id" = i32, Path, description = "Store-assigned profile ID"),
        ("contest_id" = i32, Path, description = "Store-assigned contest ID")
    ),
    responses(
        (status = 204, description = "Subscription removed"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unsubscribe(
    State(state): State<AppState>,
    Path((user_id, contest_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    ReminderService::new(&state.db)
        .unsubscribe(user_id, contest_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
