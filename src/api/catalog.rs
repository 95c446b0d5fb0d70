use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    model::{CategoryOut, ContinentOut},
    news::category::Category,
};

pub async fn list_continents(State(state): State<AppState>) -> Json<Vec<ContinentOut>> {
    let continents = state
        .aggregator
        .catalog()
        .continents()
        .iter()
        .map(ContinentOut::from)
        .collect();
    Json(continents)
}

pub async fn get_continent(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<ContinentOut>> {
    let continent = state
        .aggregator
        .catalog()
        .continent(&key)
        .ok_or_else(|| AppError::NotFound(format!("continent {key} not found")))?;
    Ok(Json(ContinentOut::from(continent)))
}

pub async fn list_categories() -> Json<Vec<CategoryOut>> {
    Json(
        Category::ALL
            .into_iter()
            .map(|label| CategoryOut {
                label,
                emoji: label.emoji(),
                color: label.badge_color(),
            })
            .collect(),
    )
}
