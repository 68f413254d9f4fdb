/// Order endpoints
///
/// Both endpoints require a bearer token. Listing is limited to the
/// token's own orders; placing an order accepts any valid token.
///
/// # Endpoints
///
/// - `POST /orders` - Place an order
/// - `GET /orders?userId=<id>` - A user's orders, newest first

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};
use pintxopote_shared::{
    auth::middleware::AuthContext,
    models::{
        order::{CreateOrder, Order},
        pintxopote::Pintxopote,
        user::User,
    },
    requests::{NewOrder, OrdersQuery},
};
use tracing::info;

use super::{created, ensure_owner, ok, parse_id, user_not_found, Reply, ReplyWithStatus};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Places an order
///
/// # Endpoint
///
/// ```text
/// POST /orders
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "user": "uuid", "pintxopote": "uuid", "quantity": 2 }
/// ```
///
/// # Response
///
/// `201 Created` with the stored order; `validated` is always `false`.
///
/// # Errors
///
/// - `400 Bad Request`: Missing field or zero quantity
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Unknown user or pintxopote
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> ApiResult<ReplyWithStatus<Order>> {
    let Json(body) = payload?;
    let line = body.validate()?;

    let pintxopote_not_found = || {
        ApiError::NotFound(format!("pintxopote with id {} does not exist", line.pintxopote))
    };

    let user_id = parse_id(line.user, || user_not_found(line.user))?;
    let pintxopote_id = parse_id(line.pintxopote, pintxopote_not_found)?;
    let quantity = line.quantity;

    if User::find_by_id(&state.db, user_id).await?.is_none() {
        return Err(user_not_found(line.user));
    }
    if Pintxopote::find_by_id(&state.db, pintxopote_id).await?.is_none() {
        return Err(pintxopote_not_found());
    }

    let order = Order::create(
        &state.db,
        CreateOrder {
            user_id,
            pintxopote_id,
            quantity,
        },
    )
    .await?;

    info!(
        order_id = %order.id,
        %user_id,
        %pintxopote_id,
        quantity,
        placed_by = %auth.user_id,
        "Order placed"
    );

    Ok(created(order))
}

/// Lists a user's orders, newest first
///
/// # Errors
///
/// - `400 Bad Request`: Missing or blank `userId`
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: Token issued to another user
pub async fn list_by_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    query: Result<Query<OrdersQuery>, QueryRejection>,
) -> ApiResult<Reply<Vec<Order>>> {
    let Query(query) = query?;
    let raw_id = query.validate()?;

    // An unparseable id can't belong to the caller
    let user_id = parse_id(raw_id, || {
        ApiError::Forbidden("user id does not match token".to_string())
    })?;
    ensure_owner(&auth, user_id)?;

    let orders = Order::list_by_user(&state.db, user_id).await?;

    Ok(ok(orders))
}
