use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    data::profile::ProfileRepository,
    error::Error,
    model::{
        api::{CreateProfileDto, ErrorDto, ProfileDto, UpdatePreferencesDto},
        app::AppState,
    },
};

pub static PROFILE_TAG: &str = "profiles";

/// Register a user profile with default reminder preferences.
///
/// Called by the presentation layer after authentication; the external subject
/// must be unique.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = PROFILE_TAG,
    request_body = CreateProfileDto,
    responses(
        (status = 201, description = "Profile created", body = ProfileDto),
        (status = 409, description = "A profile already exists for this subject", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_profile(
    State(state): State<AppState>,
    axum::Json(body): axum::Json<CreateProfileDto>,
) -> Result<impl IntoResponse, Error> {
    let profile_repo = ProfileRepository::new(&state.db);

    if profile_repo.get_by_user_id(&body.user_id).await?.is_some() {
        return Ok((
            StatusCode::CONFLICT,
            axum::Json(ErrorDto {
                error: format!("A profile already exists for {}", body.user_id),
            }),
        )
            .into_response());
    }

    let profile = profile_repo.create(&body.user_id, body.full_name).await?;

    Ok((StatusCode::CREATED, axum::Json(ProfileDto::from(profile))).into_response())
}

/// Get a user's profile and reminder preferences
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/preferences",
    tag = PROFILE_TAG,
    params(("user_id" = i32, Path, description = "Store-assigned profile ID")),
    responses(
        (status = 200, description = "Profile found", body = ProfileDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let profile = ProfileRepository::new(&state.db)
        .get_by_id(user_id)
        .await?
        .ok_or(Error::UserNotFound(user_id))?;

    Ok((StatusCode::OK, axum::Json(ProfileDto::from(profile))))
}

/// Update a user's reminder preferences.
///
/// Partial update: absent fields keep their values. Reminder instances computed
/// under earlier preferences are intentionally not recomputed.
#[utoipa::path(
    put,
    path = "/api/users/{user_id}/preferences",
    tag = PROFILE_TAG,
    params(("user_id" = i32, Path, description = "Store-assigned profile ID")),
    request_body = UpdatePreferencesDto,
    responses(
        (status = 200, description = "Preferences updated", body = ProfileDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    axum::Json(body): axum::Json<UpdatePreferencesDto>,
) -> Result<impl IntoResponse, Error> {
    let profile = ProfileRepository::new(&state.db)
        .update_preferences(user_id, body)
        .await?
        .ok_or(Error::UserNotFound(user_id))?;

    Ok((StatusCode::OK, axum::Json(ProfileDto::from(profile))))
}
