use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::catalog::{CatalogRepository, SearchField};
use crate::errors::AppError;
use crate::models::dataset::Dataset;

const SELECT_COLUMNS: &str = "id, file_data_name, title, classification_system, provider_agency, \
     description, keywords, modified_date, file_extension";

/// `CatalogRepository` over the `public_data` table.
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn find_by_file_data_name(&self, name: &str) -> Result<Option<Dataset>, AppError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM public_data WHERE file_data_name = $1 ORDER BY id LIMIT 1"
        );
        Ok(sqlx::query_as::<_, Dataset>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_containing(
        &self,
        field: SearchField,
        needle: &str,
    ) -> Result<Vec<Dataset>, AppError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM public_data \
             WHERE {} ILIKE $1 ESCAPE '\\' ORDER BY id",
            field.column()
        );
        let rows = sqlx::query_as::<_, Dataset>(&sql)
            .bind(like_pattern(needle))
            .fetch_all(&self.pool)
            .await?;

        debug!("{} ILIKE '{}' → {} rows", field.column(), needle, rows.len());
        Ok(rows)
    }
}

/// Wraps a needle in `%…%`, escaping LIKE metacharacters so `_` in dataset
/// names matches literally.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
