use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    data::contest::ContestRepository,
    error::Error,
    model::{
        api::{ContestDto, ErrorDto, FeatureContestDto},
        app::AppState,
    },
};

pub static CONTEST_TAG: &str = "contests";

/// Explorer page cap, matching what the dashboard renders
const MAX_LISTED_CONTESTS: u64 = 50;

#[derive(Deserialize, IntoParams)]
pub struct ContestListQuery {
    /// Canonical platform display name to filter by
    pub platform: Option<String>,
}

/// List upcoming contests ordered by start time
#[utoipa::path(
    get,
    path = "/api/contests",
    tag = CONTEST_TAG,
    params(ContestListQuery),
    responses(
        (status = 200, description = "Upcoming contests", body = Vec<ContestDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_contests(
    State(state): State<AppState>,
    Query(query): Query<ContestListQuery>,
) -> Result<impl IntoResponse, Error> {
    let contests = ContestRepository::new(&state.db)
        .get_upcoming(
            Utc::now().naive_utc(),
            query.platform.as_deref(),
            MAX_LISTED_CONTESTS,
        )
        .await?;

    let dtos: Vec<ContestDto> = contests.into_iter().map(ContestDto::from).collect();

    Ok((StatusCode::OK, axum::Json(dtos)))
}

/// Set the admin-controlled featured flag on a contest
#[utoipa::path(
    patch,
    path = "/api/contests/{contest_id}/featured",
    tag = CONTEST_TAG,
    params(("contest_id" = i32, Path, description = "Store-assigned contest ID")),
    request_body = FeatureContestDto,
    responses(
        (status = 204, description = "Flag updated"),
        (status = 404, description = "Contest not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_featured(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
    axum::Json(body): axum::Json<FeatureContestDto>,
) -> Result<impl IntoResponse, Error> {
    let updated = ContestRepository::new(&state.db)
        .set_featured(contest_id, body.is_featured)
        .await?;

    if updated == 0 {
        return Err(Error::ContestNotFound(contest_id));
    }

    Ok(StatusCode::NO_CONTENT)
}
