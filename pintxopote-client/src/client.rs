/// Pintxopote API client
///
/// One method per endpoint. Each method validates its input first and
/// returns a [`ClientError::Validation`] without touching the network when
/// a required field is missing or blank.
///
/// The bearer token lives in a slot shared by every clone of a client. It
/// is filled by [`PintxopoteApi::authenticate_user`] and sent on the calls
/// that act on a user (`retrieve_user`, `update_user`, `create_order`,
/// `get_orders_by_user_id`).
///
/// # Example
///
/// ```no_run
/// use pintxopote_client::{requests::CityQuery, PintxopoteApi};
///
/// # async fn run() -> Result<(), pintxopote_client::ClientError> {
/// let api = PintxopoteApi::new("http://localhost:8080")?;
///
/// let deals = api
///     .fetch_pintxos_by_city(&CityQuery { city: Some("bilbo".to_string()) })
///     .await?;
///
/// for deal in deals {
///     println!("{} ({} likes)", deal.name, deal.score.likes);
/// }
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use parking_lot::RwLock;
use pintxopote_shared::{
    envelope::Envelope,
    models::{
        order::Order,
        pintxopote::Pintxopote,
        user::{AuthSession, Role, UserProfile},
        venue::PubDetail,
    },
    requests::{CityQuery, Credentials, IdQuery, NewOrder, OrdersQuery, ProfileUpdate, RegisterUser},
};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    config::ClientConfig,
    error::{ClientError, ClientResult},
};

/// Identity returned by a successful authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub role: Vec<Role>,
}

/// Client for the pintxopote HTTP API
#[derive(Debug, Clone)]
pub struct PintxopoteApi {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl PintxopoteApi {
    /// Creates a client for the API at `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is not an http(s) URL
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_http(base_url, reqwest::Client::new())
    }

    /// Creates a client from configuration, applying its request timeout
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Self::with_http(&config.api_url, http)
    }

    fn with_http(base_url: &str, http: reqwest::Client) -> ClientResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Returns the current bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Replaces the bearer token
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Forgets the bearer token
    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    /// Registers a new user
    ///
    /// Resolves `true` once the server has stored the account.
    ///
    /// # Errors
    ///
    /// - Validation of name, surname, email, password and address
    /// - `"user with email <email> already exists"`
    pub async fn register_user(&self, user: &RegisterUser) -> ClientResult<bool> {
        user.validate()?;

        let request = self.http.post(self.endpoint(&["users"])).json(user);
        self.execute::<()>(request).await?;

        Ok(true)
    }

    /// Authenticates a user and keeps the issued token
    ///
    /// # Errors
    ///
    /// - Validation of email and password
    /// - `"wrong credentials"`
    pub async fn authenticate_user(&self, credentials: &Credentials) -> ClientResult<Session> {
        credentials.validate()?;

        let request = self.http.post(self.endpoint(&["auth"])).json(credentials);
        let AuthSession { id, role, token } = self.execute(request).await?;

        self.set_token(token);
        debug!(user_id = %id, "Authenticated");

        Ok(Session { id, role })
    }

    /// Retrieves the profile of the authenticated user
    pub async fn retrieve_user(&self, query: &IdQuery) -> ClientResult<UserProfile> {
        let id = query.validate("user")?;

        let request = self.authorized(self.http.get(self.endpoint(&["users", id])));
        self.execute(request).await
    }

    /// Updates the profile of the authenticated user
    ///
    /// Resolves `true` once the server has applied the changes.
    ///
    /// # Errors
    ///
    /// - Validation of id, name, surname, email and any optional field present
    /// - `"user with email <email> already exists"` when `new_email` is taken
    pub async fn update_user(&self, update: &ProfileUpdate) -> ClientResult<bool> {
        let (id, _) = update.validate()?;

        let request = self.authorized(self.http.put(self.endpoint(&["users", id])).json(update));
        self.execute::<()>(request).await?;

        Ok(true)
    }

    /// Lists today's pintxopotes in a city, best rated first
    pub async fn fetch_pintxos_by_city(&self, query: &CityQuery) -> ClientResult<Vec<Pintxopote>> {
        query.validate()?;

        let request = self.http.get(self.endpoint(&["pintxopotes"])).query(query);
        self.execute(request).await
    }

    pub async fn get_pintxopote_by_id(&self, query: &IdQuery) -> ClientResult<Pintxopote> {
        let id = query.validate("pintxopote")?;

        let request = self.http.get(self.endpoint(&["pintxopotes", id]));
        self.execute(request).await
    }

    /// Retrieves a pub with its pintxopotes loaded
    pub async fn get_pub_by_id(&self, query: &IdQuery) -> ClientResult<PubDetail> {
        let id = query.validate("pub")?;

        let request = self.http.get(self.endpoint(&["pubs", id]));
        self.execute(request).await
    }

    /// Places an order for the authenticated user
    ///
    /// The returned order is not yet validated.
    pub async fn create_order(&self, order: &NewOrder) -> ClientResult<Order> {
        order.validate()?;

        let request = self.authorized(self.http.post(self.endpoint(&["orders"])).json(order));
        self.execute(request).await
    }

    /// Lists the authenticated user's orders, newest first
    pub async fn get_orders_by_user_id(&self, query: &OrdersQuery) -> ClientResult<Vec<Order>> {
        query.validate()?;

        let request = self.authorized(self.http.get(self.endpoint(&["orders"])).query(query));
        self.execute(request).await
    }

    /// Appends percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Base URLs are checked in `with_http`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        debug!(%method, %url, "Sending request");

        let response = self.http.execute(request).await.map_err(|e| {
            warn!(%method, %url, error = %e, "Request failed");
            ClientError::from(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(%method, %url, status = status.as_u16(), "Received response");

        decode_response(status, &body)
    }
}

/// Error body of a failed call; `status` is not required
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Maps an HTTP response onto the call result
///
/// - non-2xx: the body's `error` message, or the bare status code
/// - 2xx with a non-`OK` envelope: `unexpected response status <code> (<status>)`
/// - 2xx `OK`: `data` decoded as `T` (absent `data` decodes as `null`)
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> ClientResult<T> {
    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error);

        return Err(match message {
            Some(message) => ClientError::Server(message),
            None => ClientError::UnexpectedStatus(status.as_u16()),
        });
    }

    let envelope: Envelope<serde_json::Value> =
        serde_json::from_slice(body).map_err(|e| ClientError::InvalidBody(e.to_string()))?;

    if !envelope.is_ok() {
        return Err(ClientError::UnexpectedEnvelope {
            code: status.as_u16(),
            status: envelope.status,
        });
    }

    serde_json::from_value(envelope.data.unwrap_or_default())
        .map_err(|e| ClientError::InvalidBody(e.to_string()))
}
