//! In-memory [`CatalogRepository`] for tests.
//!
//! Records every `find_containing` call per field so tests can assert which
//! columns the search executor touched, and can be told to fail for chosen
//! needles.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CatalogRepository, SearchField};
use crate::errors::AppError;
use crate::models::dataset::Dataset;

#[derive(Default)]
pub struct InMemoryCatalog {
    datasets: Vec<Dataset>,
    failing_needles: HashSet<String>,
    calls: Mutex<HashMap<SearchField, usize>>,
}

impl InMemoryCatalog {
    pub fn new(datasets: Vec<Dataset>) -> Self {
        Self {
            datasets,
            ..Default::default()
        }
    }

    /// Every lookup for `needle` returns an error.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.failing_needles.insert(needle.to_string());
        self
    }

    pub fn calls_for(&self, field: SearchField) -> usize {
        self.calls
            .lock()
            .expect("call counter poisoned")
            .get(&field)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().expect("call counter poisoned").values().sum()
    }

    fn check_failure(&self, needle: &str) -> Result<(), AppError> {
        if self.failing_needles.contains(needle) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "simulated lookup failure for '{needle}'"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn find_by_file_data_name(&self, name: &str) -> Result<Option<Dataset>, AppError> {
        self.check_failure(name)?;
        Ok(self
            .datasets
            .iter()
            .find(|d| d.file_data_name.as_deref() == Some(name))
            .cloned())
    }

    async fn find_containing(
        &self,
        field: SearchField,
        needle: &str,
    ) -> Result<Vec<Dataset>, AppError> {
        *self
            .calls
            .lock()
            .expect("call counter poisoned")
            .entry(field)
            .or_insert(0) += 1;
        self.check_failure(needle)?;

        let needle = needle.to_lowercase();
        let mut hits: Vec<Dataset> = self
            .datasets
            .iter()
            .filter(|d| {
                field
                    .value(d)
                    .map(|v| v.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        hits.sort_by_key(|d| d.id);
        Ok(hits)
    }
}

/// Builds a dataset with the fields the search core cares about.
pub fn dataset(id: i64, name: &str) -> Dataset {
    Dataset {
        id,
        file_data_name: Some(name.to_string()),
        ..Default::default()
    }
}
