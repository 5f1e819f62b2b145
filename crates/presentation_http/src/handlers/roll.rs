//! Dice roll handler

use axum::extract::{Query, State};
use domain::PlayerName;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::ApiError, state::AppState};

/// Query string of `/rolldice`
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RollQuery {
    /// Player name; missing or empty means an anonymous player
    pub player: Option<String>,
}

/// Roll the dice
///
/// Answers with the decimal result and no trailing newline.
#[utoipa::path(
    get,
    path = "/rolldice",
    tag = "dice",
    params(RollQuery),
    responses(
        (status = 200, description = "Roll result", body = String, content_type = "text/plain"),
        (status = 500, description = "Injected error")
    )
)]
pub async fn roll_dice(
    State(state): State<AppState>,
    Query(query): Query<RollQuery>,
) -> Result<String, ApiError> {
    let player = PlayerName::from_query(query.player);
    let outcome = state.roll_service.roll(&player).await?;
    Ok(outcome.to_string())
}
