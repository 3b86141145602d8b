//! Profile endpoints under `/api/v1/users`.

use axum::{
    Json, Router,
    extract::State,
    routing::post,
};
use axum_extra::extract::WithRejection;
use serde_json::json;

use crate::AppState;
use crate::error::AppError;
use crate::profile::{UserProfile, UserProfileCreate, UserProfileUpdate};
use crate::security::UserContext;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/profile",
        post(create_profile)
            .get(get_profile)
            .put(update_profile)
            .delete(delete_profile),
    )
}

async fn create_profile(
    State(state): State<AppState>,
    user: UserContext,
    WithRejection(Json(data), _): WithRejection<Json<UserProfileCreate>, AppError>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state.profiles.create(&user.user_id, data)?;
    tracing::info!(name: "users.profile.created", user_id = %user.user_id, "Profile created");
    Ok(Json(profile))
}

async fn get_profile(
    State(state): State<AppState>,
    user: UserContext,
) -> Result<Json<UserProfile>, AppError> {
    state
        .profiles
        .get(&user.user_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))
}

async fn update_profile(
    State(state): State<AppState>,
    user: UserContext,
    WithRejection(Json(update), _): WithRejection<Json<UserProfileUpdate>, AppError>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(state.profiles.update(&user.user_id, update)?))
}

async fn delete_profile(
    State(state): State<AppState>,
    user: UserContext,
) -> Result<Json<serde_json::Value>, AppError> {
    state.profiles.delete(&user.user_id)?;
    tracing::info!(name: "users.profile.deleted", user_id = %user.user_id, "Profile deleted");
    Ok(Json(json!({ "message": "Profile deleted successfully" })))
}
