//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI
//! documentation using utoipa. All API endpoints are registered here with their
//! OpenAPI specifications, and Swagger UI is served at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI.
///
/// # Registered Endpoints
/// - `POST /api/sync` - Run a full contest sync now
/// - `POST /api/reminders/dispatch` - Dispatch due reminders now
/// - `GET /api/contests` - List upcoming contests
/// - `PATCH /api/contests/{contest_id}/featured` - Admin featured flag
/// - `POST /api/users` - Register a profile
/// - `GET/PUT /api/users/{user_id}/preferences` - Reminder preferences
/// - `POST /api/users/{user_id}/subscriptions` - Subscribe to a contest
/// - `DELETE /api/users/{user_id}/subscriptions/{contest_id}` - Unsubscribe
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "AlgoBell", description = "AlgoBell API"), tags(
        (name = controller::sync::SYNC_TAG, description = "Contest sync trigger"),
        (name = controller::dispatch::DISPATCH_TAG, description = "Reminder dispatch trigger"),
        (name = controller::contest::CONTEST_TAG, description = "Contest browsing"),
        (name = controller::subscription::SUBSCRIPTION_TAG, description = "Contest subscriptions"),
        (name = controller::profile::PROFILE_TAG, description = "User profiles and preferences"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::sync::run_sync))
        .routes(routes!(controller::dispatch::dispatch_due))
        .routes(routes!(controller::contest::list_contests))
        .routes(routes!(controller::contest::set_featured))
        .routes(routes!(controller::profile::create_profile))
        .routes(routes!(controller::profile::get_preferences))
        .routes(routes!(controller::profile::update_preferences))
        .routes(routes!(controller::subscription::subscribe))
        .routes(routes!(controller::subscription::unsubscribe))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
