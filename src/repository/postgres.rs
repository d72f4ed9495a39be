//! PostgreSQL event repository
//!
//! Explicit SQL over the `events` table.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::Event;

use super::{EventRepository, RepositoryError, RepositoryResult};

const SELECT_COLUMNS: &str = "SELECT id, title, description, location, event_date FROM events";

/// Event repository backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, event: Event) -> RepositoryResult<Event> {
        let stored = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, location, event_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, location, event_date
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.event_date)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(event_id = ?stored.id, "Inserted event row");
        Ok(stored)
    }

    async fn update(&self, id: i64, event: Event) -> RepositoryResult<Event> {
        let stored = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = $2, description = $3, location = $4, event_date = $5
            WHERE id = $1
            RETURNING id, title, description, location, event_date
            "#,
        )
        .bind(id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.event_date)
        .fetch_optional(&self.pool)
        .await?;

        let stored = stored.ok_or(RepositoryError::Missing(id))?;
        tracing::debug!(event_id = id, "Updated event row");
        Ok(stored)
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn find_by_location(&self, location: &str) -> RepositoryResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "{SELECT_COLUMNS} WHERE location = $1 ORDER BY id"
        ))
        .bind(location)
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    async fn find_upcoming(&self, after: NaiveDate) -> RepositoryResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "{SELECT_COLUMNS} WHERE event_date > $1 ORDER BY id"
        ))
        .bind(after)
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    async fn save(&self, event: Event) -> RepositoryResult<Event> {
        match event.id {
            Some(id) => self.update(id, event).await,
            None => self.insert(event).await,
        }
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
