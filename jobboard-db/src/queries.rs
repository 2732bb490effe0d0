// Queries over the `jobs` table. Bodies are JSON text; filters use json_extract.

use crate::DbBackend;
use sqlx::Executor;

pub mod jobs {
    use super::*;
    use crate::filter::DocumentFilter;

    #[derive(Debug, sqlx::FromRow)]
    pub struct JobRow {
        pub id: String,
        pub document: String,
    }

    pub async fn find_matching<'e, E>(
        executor: E,
        filter: &DocumentFilter,
    ) -> Result<Vec<JobRow>, sqlx::Error>
    where
        E: Executor<'e, Database = DbBackend>,
    {
        let mut builder = sqlx::QueryBuilder::<DbBackend>::new("SELECT id, document FROM jobs");
        for (i, (field, value)) in filter.clauses().iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            builder.push("json_extract(document, ");
            builder.push_bind(format!("$.{field}"));
            builder.push(") = ");
            builder.push_bind(value.clone());
        }
        builder.push(" ORDER BY seq ASC");
        builder.build_query_as::<JobRow>().fetch_all(executor).await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<JobRow>, sqlx::Error>
    where
        E: Executor<'e, Database = DbBackend>,
    {
        sqlx::query_as::<_, JobRow>("SELECT id, document FROM jobs WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn insert<'e, E>(executor: E, id: &str, document: &str) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = DbBackend>,
    {
        sqlx::query(
            "INSERT INTO jobs (id, document, seq) VALUES (?, ?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM jobs))",
        )
        .bind(id)
        .bind(document)
        .execute(executor)
        .await
        .map(|_| ())
    }

    pub async fn replace_document<'e, E>(
        executor: E,
        id: &str,
        document: &str,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = DbBackend>,
    {
        sqlx::query("UPDATE jobs SET document = ? WHERE id = ?")
            .bind(document)
            .bind(id)
            .execute(executor)
            .await
            .map(|r| r.rows_affected())
    }

    pub async fn delete<'e, E>(executor: E, id: &str) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = DbBackend>,
    {
        sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await
            .map(|r| r.rows_affected())
    }

    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = DbBackend>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(executor)
            .await
    }
}

pub mod schema {
    use super::*;

    /// User tables, excluding SQLite internals and the migration bookkeeping table.
    pub async fn table_names<'e, E>(executor: E) -> Result<Vec<String>, sqlx::Error>
    where
        E: Executor<'e, Database = DbBackend>,
    {
        sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' \
             AND substr(name, 1, 7) != 'sqlite_' AND substr(name, 1, 6) != '_sqlx_' \
             ORDER BY name",
        )
        .fetch_all(executor)
        .await
    }

    pub async fn ping<'e, E>(executor: E) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = DbBackend>,
    {
        sqlx::query("SELECT 1").execute(executor).await.map(|_| ())
    }
}
