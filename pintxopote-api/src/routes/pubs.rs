/// Pub endpoints
///
/// # Endpoints
///
/// - `GET /pubs/:id` - A pub with its pintxopotes loaded

use axum::extract::{Path, State};
use pintxopote_shared::models::venue::{Pub, PubDetail};

use super::{ok, parse_id, Reply};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Retrieves a pub by ID
///
/// The `pintxopotes` field holds full records, in the order the pub
/// published them.
///
/// # Errors
///
/// - `404 Not Found`: No such pub
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Reply<PubDetail>> {
    let not_found = || ApiError::NotFound(format!("pub with id {raw_id} does not exist"));

    let id = parse_id(&raw_id, not_found)?;
    let detail = Pub::find_detail(&state.db, id).await?.ok_or_else(not_found)?;

    Ok(ok(detail))
}
