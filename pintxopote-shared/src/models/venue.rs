/// Pub (venue) model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE pubs (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     image TEXT,
///     address JSONB NOT NULL,
///     description TEXT,
///     pintxopotes UUID[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `pintxopotes` keeps the references in insertion order, the way the pub
/// owner published them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::address::PubAddress;
use super::pintxopote::Pintxopote;

/// Pub record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pub {
    pub id: Uuid,
    pub name: String,

    #[serde(default)]
    pub image: Option<String>,

    pub address: PubAddress,

    /// Free-text description
    #[serde(default)]
    pub desc: Option<String>,

    /// References to the pub's pintxopotes
    #[serde(default)]
    pub pintxopotes: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PubRow {
    id: Uuid,
    name: String,
    image: Option<String>,
    address: Json<PubAddress>,
    description: Option<String>,
    pintxopotes: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<PubRow> for Pub {
    fn from(row: PubRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image: row.image,
            address: row.address.0,
            desc: row.description,
            pintxopotes: row.pintxopotes,
            created_at: row.created_at,
        }
    }
}

/// Pub with its pintxopotes loaded, as returned by `GET /pubs/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubDetail {
    pub id: Uuid,
    pub name: String,

    #[serde(default)]
    pub image: Option<String>,

    pub address: PubAddress,

    #[serde(default)]
    pub desc: Option<String>,

    /// Pintxopotes in the pub's own order
    #[serde(default)]
    pub pintxopotes: Vec<Pintxopote>,
}

impl PubDetail {
    /// Joins a pub with its loaded pintxopotes
    ///
    /// Pintxopotes are arranged in the order of `venue.pintxopotes`;
    /// references that did not load are dropped.
    pub fn assemble(venue: Pub, mut loaded: Vec<Pintxopote>) -> Self {
        let mut pintxopotes = Vec::with_capacity(loaded.len());
        for id in &venue.pintxopotes {
            if let Some(pos) = loaded.iter().position(|p| p.id == *id) {
                pintxopotes.push(loaded.swap_remove(pos));
            }
        }

        Self {
            id: venue.id,
            name: venue.name,
            image: venue.image,
            address: venue.address,
            desc: venue.desc,
            pintxopotes,
        }
    }
}

/// Input for creating a pub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePub {
    pub name: String,
    pub image: Option<String>,
    pub address: PubAddress,
    pub desc: Option<String>,
}

const PUB_COLUMNS: &str = "id, name, image, address, description, pintxopotes, created_at";

impl Pub {
    /// Creates a pub with no pintxopotes
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn create(pool: &PgPool, data: CreatePub) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, PubRow>(&format!(
            r#"
            INSERT INTO pubs (name, image, address, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {PUB_COLUMNS}
            "#
        ))
        .bind(data.name)
        .bind(data.image)
        .bind(Json(data.address))
        .bind(data.desc)
        .fetch_one(pool)
        .await?;

        Ok(row.into())
    }

    /// Finds a pub by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, PubRow>(&format!(
            "SELECT {PUB_COLUMNS} FROM pubs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Appends a pintxopote reference to the pub's list
    ///
    /// # Returns
    ///
    /// True if the pub was found and updated
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn add_pintxopote(
        pool: &PgPool,
        id: Uuid,
        pintxopote_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE pubs
            SET pintxopotes = array_append(pintxopotes, $2)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(pintxopote_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Loads the pub together with its pintxopotes
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_detail(pool: &PgPool, id: Uuid) -> Result<Option<PubDetail>, sqlx::Error> {
        let Some(venue) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let loaded = Pintxopote::find_by_ids(pool, &venue.pintxopotes).await?;
        Ok(Some(PubDetail::assemble(venue, loaded)))
    }
}
