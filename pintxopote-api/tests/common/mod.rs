//! Shared setup for end-to-end tests
//!
//! Tests using [`TestContext`] need a PostgreSQL database named by `DB_URL`.
//! Every context clears all tables, so run them one at a time:
//!
//! ```bash
//! DB_URL=postgresql://localhost/pintxopote_test \
//!     cargo test -p pintxopote-api --test e2e -- --ignored --test-threads=1
//! ```

use anyhow::Context;
use chrono::{DateTime, Utc};
use pintxopote_api::{
    app::{build_router, AppState},
    config::Config,
};
use pintxopote_client::PintxopoteApi;
use pintxopote_shared::{
    auth::{
        jwt::{create_token, Claims},
        password::hash_password,
    },
    db::{migrations, pool, reset},
    models::{
        address::PubAddress,
        pintxopote::{CreatePintxopote, Pintxopote, Score},
        user::{CreateUser, Role, User},
        venue::{CreatePub, Pub},
    },
};
use sqlx::PgPool;
use uuid::Uuid;

pub const TOKEN_SECRET: &str = "e2e-test-secret-key-at-least-32-bytes";

/// A running server over a freshly cleared database, and a client for it
pub struct TestContext {
    pub db: PgPool,
    pub api: PintxopoteApi,
}

impl TestContext {
    pub async fn new() -> anyhow::Result<Self> {
        let db_url = std::env::var("DB_URL").context("DB_URL must point at a test database")?;

        let config = Config::from_lookup(|key| match key {
            "DB_URL" => Some(db_url.clone()),
            "TOKEN_SECRET" => Some(TOKEN_SECRET.to_string()),
            "API_HOST" => Some("127.0.0.1".to_string()),
            _ => None,
        })?;

        let db = pool::create_pool(config.database.clone()).await?;
        migrations::run_migrations(&db).await?;
        reset::clear_all(&db).await?;

        let app = build_router(AppState::new(db.clone(), config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("test server stopped: {e}");
            }
        });

        let api = PintxopoteApi::new(&format!("http://{addr}"))?;

        Ok(Self { db, api })
    }

    /// Inserts a user whose password is `password`
    pub async fn seed_user(&self, name: &str, email: &str, password: &str) -> anyhow::Result<User> {
        let user = User::create(
            &self.db,
            CreateUser {
                name: name.to_string(),
                surname: "Doe".to_string(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
                role: vec![Role::User],
                address: None,
            },
        )
        .await?;

        Ok(user)
    }

    pub async fn seed_pub(&self, name: &str, street: &str, city: &str) -> anyhow::Result<Pub> {
        let venue = Pub::create(
            &self.db,
            CreatePub {
                name: name.to_string(),
                image: Some(format!(
                    "https://img.pintxopote.eus/pubs/{}.jpg",
                    name.to_lowercase().replace(' ', "-")
                )),
                address: PubAddress {
                    street: street.to_string(),
                    city: city.to_string(),
                    lat: None,
                    long: None,
                },
                desc: None,
            },
        )
        .await?;

        Ok(venue)
    }

    /// Inserts a pintxopote and lists it on its pub
    pub async fn seed_pintxopote(
        &self,
        venue: &Pub,
        name: &str,
        date: DateTime<Utc>,
        likes: i32,
        dislikes: i32,
    ) -> anyhow::Result<Pintxopote> {
        let pintxopote = Pintxopote::create(
            &self.db,
            CreatePintxopote {
                name: name.to_string(),
                date,
                image: None,
                pub_id: venue.id,
                score: Score { likes, dislikes },
            },
        )
        .await?;

        Pub::add_pintxopote(&self.db, venue.id, pintxopote.id).await?;

        Ok(pintxopote)
    }

    /// Gives the client a valid token for `user_id`
    pub fn login_as(&self, user_id: Uuid) -> anyhow::Result<()> {
        let token = create_token(&Claims::new(user_id, vec![Role::User]), TOKEN_SECRET)?;
        self.api.set_token(token);
        Ok(())
    }
}
