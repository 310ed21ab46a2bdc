//! Dataset catalog access.
//!
//! The search core only ever talks to [`CatalogRepository`]; the Postgres
//! adapter lives in `postgres`, and tests use the in-memory double in `memory`.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::dataset::Dataset;

/// Searchable text columns of the catalog table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Keywords,
    Title,
    ProviderAgency,
    FileDataName,
    Description,
}

impl SearchField {
    /// Column name in `public_data`. Only ever interpolated from this fixed set.
    pub fn column(self) -> &'static str {
        match self {
            SearchField::Keywords => "keywords",
            SearchField::Title => "title",
            SearchField::ProviderAgency => "provider_agency",
            SearchField::FileDataName => "file_data_name",
            SearchField::Description => "description",
        }
    }

    /// Reads the matching field off a dataset.
    #[cfg(test)]
    pub fn value(self, dataset: &Dataset) -> Option<&str> {
        match self {
            SearchField::Keywords => dataset.keywords.as_deref(),
            SearchField::Title => dataset.title.as_deref(),
            SearchField::ProviderAgency => dataset.provider_agency.as_deref(),
            SearchField::FileDataName => dataset.file_data_name.as_deref(),
            SearchField::Description => dataset.description.as_deref(),
        }
    }
}

/// Read-only access to the dataset catalog.
///
/// Carried in `AppState` as `Arc<dyn CatalogRepository>`.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Exact match on `file_data_name`.
    async fn find_by_file_data_name(&self, name: &str) -> Result<Option<Dataset>, AppError>;

    /// Case-insensitive substring match on one column, in stable `id` order.
    async fn find_containing(
        &self,
        field: SearchField,
        needle: &str,
    ) -> Result<Vec<Dataset>, AppError>;
}
