use crate::document::Document;
use crate::document::filter::Filter;
use crate::{DbError, Result};

use ids_core::ErrorLocation;

use std::marker::PhantomData;
use std::panic::Location;

use serde::Serialize;
use sqlx::SqlitePool;

/// Typed handle to one named collection of JSON documents.
pub struct DocumentCollection<T> {
    pool: SqlitePool,
    name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for DocumentCollection<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for DocumentCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCollection")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T: Document> DocumentCollection<T> {
    pub fn new(pool: SqlitePool, name: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same database, different collection and document type.
    pub fn sibling<U: Document>(&self, name: impl Into<String>) -> DocumentCollection<U> {
        DocumentCollection::new(self.pool.clone(), name)
    }

    /// Inserts a new document. An existing document with the same id is a
    /// unique-index violation.
    pub async fn insert_one(&self, document: &T) -> Result<()> {
        let id = Self::require_id(document)?;
        let body = serde_json::to_string(document)?;

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(self.name.as_str())
            .bind(id.as_str())
            .bind(body.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Replaces the document with the same id, inserting it when absent.
    pub async fn replace_one(&self, document: &T) -> Result<()> {
        let id = Self::require_id(document)?;
        let body = serde_json::to_string(document)?;

        sqlx::query(
            r#"
                INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)
                ON CONFLICT(collection, id) DO UPDATE SET body = excluded.body
            "#,
        )
        .bind(self.name.as_str())
        .bind(id.as_str())
        .bind(body.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns the number of documents removed (zero or one).
    pub async fn delete_one(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(self.name.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Sets one top-level field of a stored document, leaving the rest of
    /// the body untouched. Returns the number of documents updated.
    pub async fn set_field<V>(&self, id: &str, field: &str, value: &V) -> Result<u64>
    where
        V: Serialize + ?Sized + Sync,
    {
        let path = format!("$.{field}");
        let value = serde_json::to_string(value)?;

        let result = sqlx::query(
            "UPDATE documents SET body = json_set(body, ?, json(?)) WHERE collection = ? AND id = ?",
        )
        .bind(path.as_str())
        .bind(value.as_str())
        .bind(self.name.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Every matching document in insertion order.
    pub async fn find(&self, filter: &Filter) -> Result<Vec<T>> {
        self.fetch(filter, None).await
    }

    pub async fn find_first(&self, filter: &Filter) -> Result<Option<T>> {
        Ok(self.fetch(filter, Some(1)).await?.into_iter().next())
    }

    /// The only matching document, or `NotUnique` when several match.
    ///
    /// The error carries the location of the caller.
    #[track_caller]
    pub fn find_single<'a>(
        &'a self,
        filter: &'a Filter,
    ) -> impl Future<Output = Result<Option<T>>> + 'a {
        let location = ErrorLocation::from(Location::caller());
        async move {
            let mut documents = self.fetch(filter, Some(2)).await?;
            if documents.len() > 1 {
                return Err(DbError::NotUnique {
                    collection: self.name.clone(),
                    filter: filter.to_string(),
                    location,
                });
            }
            Ok(documents.pop())
        }
    }

    pub async fn count(&self, filter: &Filter) -> Result<i64> {
        let (predicate, params) = filter.to_sql();
        let sql = format!("SELECT COUNT(*) FROM documents WHERE collection = ? AND ({predicate})");

        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(self.name.as_str());
        for param in &params {
            query = query.bind(param.as_str());
        }

        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn fetch(&self, filter: &Filter, limit: Option<u32>) -> Result<Vec<T>> {
        let (predicate, params) = filter.to_sql();
        let mut sql = format!(
            "SELECT body FROM documents WHERE collection = ? AND ({predicate}) ORDER BY seq"
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut query = sqlx::query_scalar::<_, String>(&sql).bind(self.name.as_str());
        for param in &params {
            query = query.bind(param.as_str());
        }

        let bodies = query.fetch_all(&self.pool).await?;

        let mut documents = Vec::with_capacity(bodies.len());
        for body in &bodies {
            documents.push(serde_json::from_str(body)?);
        }
        Ok(documents)
    }

    #[track_caller]
    fn require_id(document: &T) -> Result<String> {
        match document.document_id() {
            Some(id) => Ok(id),
            None => Err(DbError::InvalidArgument {
                argument: "id",
                message: "document has no identifier assigned".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
