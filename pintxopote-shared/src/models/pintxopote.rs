/// Pintxopote (deal) model and database operations
///
/// A pintxopote is a pub's promotion for a given day: a pintxo plus drink at
/// a fixed price. Customers vote on it, and the likes/dislikes ratio decides
/// its position in city listings.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE pintxopotes (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     date TIMESTAMPTZ NOT NULL,
///     image TEXT,
///     pub_id UUID NOT NULL REFERENCES pubs(id) ON DELETE CASCADE,
///     likes INTEGER NOT NULL DEFAULT 0,
///     dislikes INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use std::cmp::Ordering;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Customer votes on a pintxopote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Score {
    pub likes: i32,
    pub dislikes: i32,
}

impl Score {
    /// Likes per dislike
    ///
    /// Zero dislikes count as one, so an undisputed pintxopote ranks by its
    /// likes alone.
    pub fn ratio(&self) -> f64 {
        f64::from(self.likes) / f64::from(self.dislikes.max(1))
    }
}

/// Pintxopote record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pintxopote {
    /// Unique pintxopote ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Day (and time) the promotion runs
    pub date: DateTime<Utc>,

    /// Picture URL
    #[serde(default)]
    pub image: Option<String>,

    /// Pub offering the promotion
    #[serde(rename = "pub")]
    pub pub_id: Uuid,

    /// Customer votes
    #[sqlx(flatten)]
    pub score: Score,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a pintxopote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePintxopote {
    pub name: String,
    pub date: DateTime<Utc>,
    pub image: Option<String>,
    pub pub_id: Uuid,
    pub score: Score,
}

const PINTXOPOTE_COLUMNS: &str = "id, name, date, image, pub_id, likes, dislikes, created_at";

impl Pintxopote {
    /// Creates a new pintxopote
    ///
    /// This does not add it to the pub's list; see
    /// [`Pub::add_pintxopote`](super::venue::Pub::add_pintxopote).
    ///
    /// # Errors
    ///
    /// Returns an error if the pub doesn't exist or the database fails
    pub async fn create(pool: &PgPool, data: CreatePintxopote) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Pintxopote>(&format!(
            r#"
            INSERT INTO pintxopotes (name, date, image, pub_id, likes, dislikes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PINTXOPOTE_COLUMNS}
            "#
        ))
        .bind(data.name)
        .bind(data.date)
        .bind(data.image)
        .bind(data.pub_id)
        .bind(data.score.likes)
        .bind(data.score.dislikes)
        .fetch_one(pool)
        .await
    }

    /// Finds a pintxopote by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Pintxopote>(&format!(
            "SELECT {PINTXOPOTE_COLUMNS} FROM pintxopotes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Loads several pintxopotes, in no particular order
    ///
    /// Unknown IDs are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Self>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Pintxopote>(&format!(
            "SELECT {PINTXOPOTE_COLUMNS} FROM pintxopotes WHERE id = ANY($1) ORDER BY date DESC"
        ))
        .bind(ids.to_vec())
        .fetch_all(pool)
        .await
    }

    /// Lists the pintxopotes running on `day` at pubs located in `city`
    ///
    /// City matching is case-insensitive. Results are ranked with
    /// [`rank_by_score`].
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn list_by_city_on(
        pool: &PgPool,
        city: &str,
        day: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let (start, end) = day_bounds(day);

        let mut pintxopotes = sqlx::query_as::<_, Pintxopote>(
            r#"
            SELECT p.id, p.name, p.date, p.image, p.pub_id, p.likes, p.dislikes, p.created_at
            FROM pintxopotes p
            JOIN pubs b ON b.id = p.pub_id
            WHERE LOWER(b.address->>'city') = LOWER($1)
              AND p.date >= $2
              AND p.date < $3
            ORDER BY p.created_at
            "#,
        )
        .bind(city.trim())
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        rank_by_score(&mut pintxopotes);
        Ok(pintxopotes)
    }
}

/// Half-open UTC range `[day 00:00, next day 00:00)`
pub fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

/// Sorts by score ratio, best first
///
/// The sort is stable, so ties keep their incoming order.
pub fn rank_by_score(pintxopotes: &mut [Pintxopote]) {
    pintxopotes.sort_by(|a, b| {
        b.score
            .ratio()
            .partial_cmp(&a.score.ratio())
            .unwrap_or(Ordering::Equal)
    });
}
