use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    model::{Article, CountryNewsOut, NewsQuery},
};

const MAX_ARTICLES_LIMIT: usize = 100;

pub async fn country_news(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
    Query(query): Query<NewsQuery>,
) -> AppResult<Json<Vec<Article>>> {
    let max = resolve_max(&state, query)?;
    let articles = state.aggregator.fetch_news(&country_code, max).await;
    Ok(Json(articles))
}

/// News for a country reached through its continent. Both must exist and match.
pub async fn continent_country_news(
    State(state): State<AppState>,
    Path((continent_key, country_code)): Path<(String, String)>,
    Query(query): Query<NewsQuery>,
) -> AppResult<Json<CountryNewsOut>> {
    let max = resolve_max(&state, query)?;

    let catalog = state.aggregator.catalog();
    let continent = catalog
        .continent(&continent_key)
        .ok_or_else(|| AppError::NotFound(format!("continent {continent_key} not found")))?;
    let country = continent.country(&country_code).ok_or_else(|| {
        AppError::NotFound(format!(
            "country {country_code} not found in {continent_key}"
        ))
    })?;

    tracing::info!(country = %country.name, %country_code, "fetching news");
    let articles = state.aggregator.fetch_news(&country_code, max).await;

    Ok(Json(CountryNewsOut {
        continent: continent.name.clone(),
        continent_key,
        country: country.name.clone(),
        flag: country.flag.clone(),
        country_code,
        articles,
    }))
}

fn resolve_max(state: &AppState, query: NewsQuery) -> AppResult<usize> {
    match query.max {
        None => Ok(state.default_max_articles),
        Some(max) if (1..=MAX_ARTICLES_LIMIT).contains(&max) => Ok(max),
        Some(max) => Err(AppError::BadRequest(format!(
            "max must be between 1 and {MAX_ARTICLES_LIMIT}, got {max}"
        ))),
    }
}
