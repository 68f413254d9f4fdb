/// Pintxopote endpoints
///
/// # Endpoints
///
/// - `GET /pintxopotes?city=<city>` - Today's pintxopotes in a city, best rated first
/// - `GET /pintxopotes/:id` - A single pintxopote

use axum::extract::{rejection::QueryRejection, Path, Query, State};
use chrono::Utc;
use pintxopote_shared::{models::pintxopote::Pintxopote, requests::CityQuery};
use tracing::debug;

use super::{ok, parse_id, Reply};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

fn pintxopote_not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("pintxopote with id {id} does not exist"))
}

/// Lists the pintxopotes running today (UTC) at pubs in `city`
///
/// City matching ignores case. Results are ordered by likes/dislikes ratio,
/// highest first.
///
/// # Errors
///
/// - `400 Bad Request`: Missing or blank city
pub async fn list_by_city(
    State(state): State<AppState>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> ApiResult<Reply<Vec<Pintxopote>>> {
    let Query(query) = query?;
    let city = query.validate()?;
    let today = Utc::now().date_naive();

    let pintxopotes = Pintxopote::list_by_city_on(&state.db, city, today).await?;
    debug!(city, %today, count = pintxopotes.len(), "Listed pintxopotes");

    Ok(ok(pintxopotes))
}

/// Retrieves a pintxopote by ID
///
/// # Errors
///
/// - `404 Not Found`: No such pintxopote
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Reply<Pintxopote>> {
    let id = parse_id(&raw_id, || pintxopote_not_found(&raw_id))?;

    let pintxopote = Pintxopote::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| pintxopote_not_found(&raw_id))?;

    Ok(ok(pintxopote))
}
