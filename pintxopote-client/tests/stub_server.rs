//! Client behaviour against in-process stub servers
//!
//! Each test starts an axum router on an ephemeral port that answers the
//! way a real (or misbehaving) API would.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use pintxopote_client::{
    requests::{CityQuery, Credentials, IdQuery, NewOrder, OrdersQuery, ProfileUpdate, RegisterUser},
    ClientError, PintxopoteApi,
};
use pintxopote_shared::models::{
    order::Order,
    pintxopote::{Pintxopote, Score},
    user::Role,
};
use serde_json::{json, Value};
use uuid::Uuid;

/// Serves `router` on 127.0.0.1 and returns its base URL
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn ko(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "status": "KO", "error": message })))
}

fn credentials() -> Credentials {
    Credentials {
        email: Some("jd@mail.com".into()),
        password: Some("123".into()),
    }
}

fn pintxopote(name: &str, likes: i32, dislikes: i32) -> Pintxopote {
    Pintxopote {
        id: Uuid::new_v4(),
        name: name.to_string(),
        date: Utc::now(),
        image: None,
        pub_id: Uuid::new_v4(),
        score: Score { likes, dislikes },
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_authenticate_stores_token() {
    let user_id = Uuid::new_v4();
    let router = Router::new().route(
        "/auth",
        post(move |Json(body): Json<Value>| async move {
            if body["password"] != "123" {
                return ko(StatusCode::UNAUTHORIZED, "wrong credentials");
            }
            (
                StatusCode::OK,
                Json(json!({
                    "status": "OK",
                    "data": { "id": user_id, "role": ["user"], "token": "issued-token" }
                })),
            )
        }),
    );
    let api = PintxopoteApi::new(&serve(router).await).unwrap();
    let shared = api.clone();

    let session = api.authenticate_user(&credentials()).await.unwrap();

    assert_eq!(session.id, user_id);
    assert!(session.role.contains(&Role::User));
    assert_eq!(api.token().as_deref(), Some("issued-token"));
    assert_eq!(shared.token().as_deref(), Some("issued-token"));
}

#[tokio::test]
async fn test_wrong_credentials_surface_verbatim() {
    let router = Router::new().route(
        "/auth",
        post(|| async { ko(StatusCode::UNAUTHORIZED, "wrong credentials") }),
    );
    let api = PintxopoteApi::new(&serve(router).await).unwrap();

    let err = api.authenticate_user(&credentials()).await.unwrap_err();

    assert_eq!(err.to_string(), "wrong credentials");
    assert_eq!(api.token(), None);
}

#[tokio::test]
async fn test_register_conflict_message() {
    let router = Router::new().route(
        "/users",
        post(|Json(body): Json<Value>| async move {
            let email = body["email"].as_str().unwrap_or_default().to_string();
            ko(
                StatusCode::CONFLICT,
                &format!("user with email {email} already exists"),
            )
        }),
    );
    let api = PintxopoteApi::new(&serve(router).await).unwrap();

    let err = api
        .register_user(&RegisterUser {
            name: Some("John".into()),
            surname: Some("Doe".into()),
            email: Some("jd@mail.com".into()),
            password: Some("123".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "user with email jd@mail.com already exists");
}

#[tokio::test]
async fn test_register_resolves_true() {
    let router = Router::new().route(
        "/users",
        post(|| async { (StatusCode::CREATED, Json(json!({ "status": "OK" }))) }),
    );
    let api = PintxopoteApi::new(&serve(router).await).unwrap();

    let registered = api
        .register_user(&RegisterUser {
            name: Some("John".into()),
            surname: Some("Doe".into()),
            email: Some("jd@mail.com".into()),
            password: Some("123".into()),
            role: Some("pub".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(registered);
}

#[tokio::test]
async fn test_hacked_response_status() {
    let router = Router::new().route(
        "/users/:id",
        get(|| async { Json(json!({ "status": "KO" })) }),
    );
    let api = PintxopoteApi::new(&serve(router).await).unwrap();

    let err = api
        .retrieve_user(&IdQuery::new(Uuid::new_v4().to_string()))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "unexpected response status 200 (KO)");
}

#[tokio::test]
async fn test_error_body_without_envelope_status() {
    let router = Router::new().route(
        "/users/:id",
        get(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "user id is not a string" })),
            )
        }),
    );
    let api = PintxopoteApi::new(&serve(router).await).unwrap();

    let err = api
        .retrieve_user(&IdQuery::new(Uuid::new_v4().to_string()))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "user id is not a string");
}

#[tokio::test]
async fn test_server_down() {
    let api = PintxopoteApi::new(&dead_url().await).unwrap();

    let err = api
        .retrieve_user(&IdQuery::new(Uuid::new_v4().to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Unreachable));
    assert_eq!(err.to_string(), "could not reach server");
}

#[tokio::test]
async fn test_validation_happens_before_any_request() {
    // Nothing listens here, so any request would fail with "could not reach server"
    let api = PintxopoteApi::new(&dead_url().await).unwrap();

    let err = api.retrieve_user(&IdQuery::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "user id is not a string");

    let err = api.retrieve_user(&IdQuery::new("     ")).await.unwrap_err();
    assert_eq!(err.to_string(), "user id is empty or blank");

    let err = api
        .authenticate_user(&Credentials {
            email: Some("".into()),
            password: Some("123".into()),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "user email is empty or blank");

    let err = api
        .register_user(&RegisterUser {
            name: Some("John".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "user surname is not a string");

    let err = api
        .update_user(&ProfileUpdate {
            name: Some("Juan".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "user id is not a string");

    let err = api
        .fetch_pintxos_by_city(&CityQuery { city: Some(" ".into()) })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "pintxopote city is empty or blank");

    let err = api.get_pintxopote_by_id(&IdQuery::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "pintxopote id is not a string");

    let err = api.get_pub_by_id(&IdQuery::new("")).await.unwrap_err();
    assert_eq!(err.to_string(), "pub id is empty or blank");

    let err = api
        .create_order(&NewOrder {
            user: Some("u".into()),
            pintxopote: Some("p".into()),
            quantity: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "order quantity is not a number");

    let err = api
        .get_orders_by_user_id(&OrdersQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "user id is not a string");
}

#[tokio::test]
async fn test_bearer_token_sent_on_user_calls() {
    let user_id = Uuid::new_v4();
    let router = Router::new().route(
        "/users/:id",
        get(move |Path(id): Path<Uuid>, headers: HeaderMap| async move {
            let authorized = headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                == Some("Bearer issued-token");
            if !authorized {
                return ko(StatusCode::UNAUTHORIZED, "missing authorization token");
            }
            (
                StatusCode::OK,
                Json(json!({
                    "status": "OK",
                    "data": {
                        "id": id,
                        "name": "John",
                        "surname": "Doe",
                        "email": "jd@mail.com",
                        "role": ["user"]
                    }
                })),
            )
        }),
    );
    let api = PintxopoteApi::new(&serve(router).await).unwrap();
    let query = IdQuery::new(user_id.to_string());

    let err = api.retrieve_user(&query).await.unwrap_err();
    assert_eq!(err.to_string(), "missing authorization token");

    api.set_token("issued-token");
    let user = api.retrieve_user(&query).await.unwrap();

    assert_eq!(user.id, user_id);
    assert_eq!(user.email, "jd@mail.com");
    assert_eq!(user.role, vec![Role::User]);
    assert_eq!(user.address, None);
}

#[tokio::test]
async fn test_update_sends_body_without_id() {
    let router = Router::new().route(
        "/users/:id",
        axum::routing::put(|Json(body): Json<Value>| async move {
            if body.get("id").is_some() || body["newEmail"] != "jw@mail.com" {
                return ko(StatusCode::BAD_REQUEST, "unexpected body");
            }
            (StatusCode::OK, Json(json!({ "status": "OK" })))
        }),
    );
    let api = PintxopoteApi::new(&serve(router).await).unwrap();
    api.set_token("issued-token");

    let updated = api
        .update_user(&ProfileUpdate {
            id: Some(Uuid::new_v4().to_string()),
            name: Some("Juan".into()),
            surname: Some("Wayne".into()),
            email: Some("jd@mail.com".into()),
            new_email: Some("jw@mail.com".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(updated);
}

#[tokio::test]
async fn test_fetch_by_city_sends_query() {
    let router = Router::new().route(
        "/pintxopotes",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let data = match params.get("city").map(String::as_str) {
                Some("bilbo") => vec![pintxopote("Pintxo 3", 200, 40), pintxopote("Pintxo 1", 20, 10)],
                _ => vec![],
            };
            Json(json!({ "status": "OK", "data": data }))
        }),
    );
    let api = PintxopoteApi::new(&serve(router).await).unwrap();

    let deals = api
        .fetch_pintxos_by_city(&CityQuery { city: Some("bilbo".into()) })
        .await
        .unwrap();

    let names: Vec<_> = deals.iter().map(|deal| deal.name.as_str()).collect();
    assert_eq!(names, vec!["Pintxo 3", "Pintxo 1"]);
    assert_eq!(deals[0].score, Score { likes: 200, dislikes: 40 });
}

#[tokio::test]
async fn test_orders_round_trip_through_stub() {
    let user_id = Uuid::new_v4();
    let pintxopote_id = Uuid::new_v4();
    let order = Order {
        id: Uuid::new_v4(),
        user_id,
        pintxopote_id,
        quantity: 2,
        validated: false,
        date: Utc::now(),
    };
    let listed = order.clone();

    let router = Router::new().route(
        "/orders",
        post(move |Json(body): Json<Value>| {
            let order = order.clone();
            async move {
                assert_eq!(body["quantity"], 2);
                (StatusCode::CREATED, Json(json!({ "status": "OK", "data": order })))
            }
        })
        .get(move |Query(params): Query<HashMap<String, String>>| {
            let listed = listed.clone();
            async move {
                let data = if params.get("userId") == Some(&listed.user_id.to_string()) {
                    vec![listed]
                } else {
                    vec![]
                };
                Json(json!({ "status": "OK", "data": data }))
            }
        }),
    );
    let api = PintxopoteApi::new(&serve(router).await).unwrap();
    api.set_token("issued-token");

    let created = api
        .create_order(&NewOrder {
            user: Some(user_id.to_string()),
            pintxopote: Some(pintxopote_id.to_string()),
            quantity: Some(2),
        })
        .await
        .unwrap();

    assert_eq!(created.user_id, user_id);
    assert_eq!(created.pintxopote_id, pintxopote_id);
    assert!(!created.validated);

    let orders = api
        .get_orders_by_user_id(&OrdersQuery {
            user_id: Some(user_id.to_string()),
        })
        .await
        .unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].quantity, 2);
}
