/// Task model and owner-scoped database operations
///
/// Every task belongs to exactly one user. All store operations take
/// the owner id and filter on it, so a task is only ever visible to
/// or mutable by its owner. A lookup with the wrong owner behaves the
/// same as a lookup with a nonexistent id.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(30) NOT NULL,
///     description VARCHAR(50),
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Title and description length limits are enforced at the request
/// boundary; the VARCHAR widths mirror them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id
    pub id: i64,

    /// Task title (at most 30 characters)
    pub title: String,

    /// Optional description (at most 50 characters)
    pub description: Option<String>,

    /// Owning user id
    pub user_id: i64,

    /// Set once at creation, immutable
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

impl Task {
    /// Creates a task owned by `owner_id`
    ///
    /// The id and `created_at` are assigned by the database; the full
    /// record is returned.
    pub async fn create(
        pool: &PgPool,
        owner_id: i64,
        data: CreateTask,
    ) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, user_id, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by `owner_id`, oldest first
    ///
    /// Ordered by id ascending so listings are deterministic
    /// (insertion order for serial ids).
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, user_id, created_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task matching both `task_id` and `owner_id`
    ///
    /// Overwrites title and description; passing `None` for the
    /// description clears it. Returns `None` when no row matches;
    /// a wrong id and someone else's id are indistinguishable here,
    /// so cross-user guesses surface as not-found rather than
    /// confirming the task exists.
    pub async fn update(
        pool: &PgPool,
        owner_id: i64,
        task_id: i64,
        title: String,
        description: Option<String>,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $3, description = $4
            WHERE id = $1 AND user_id = $2
            RETURNING id, title, description, user_id, created_at
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task matching both `task_id` and `owner_id`
    ///
    /// A no-op when no such row exists; absence is not an error.
    pub async fn delete(pool: &PgPool, owner_id: i64, task_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_serializes_optional_description() {
        let task = Task {
            id: 1,
            title: "T1".to_string(),
            description: None,
            user_id: 7,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["title"], "T1");
        assert!(json["description"].is_null());
    }

    // Owner-scoping behavior is covered by the API integration tests
}
