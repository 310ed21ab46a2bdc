//! Multi-field search: per keyword, per column, region-aware, followed by
//! category filtering and first-seen deduplication.
//!
//! Keywords run sequentially. A failing lookup drops that keyword only;
//! whatever earlier keywords found is kept.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::catalog::{CatalogRepository, SearchField};
use crate::errors::AppError;
use crate::models::dataset::Dataset;
use crate::search::planner::QueryPlan;
use crate::search::vocabulary::is_region_keyword;

/// Region keywords stop after the primary columns once this many hits exist.
pub const SUFFICIENT_REGION_HITS: usize = 10;

const REGION_PRIMARY_FIELDS: [SearchField; 2] =
    [SearchField::ProviderAgency, SearchField::FileDataName];

const REGION_SECONDARY_FIELDS: [SearchField; 3] = [
    SearchField::Keywords,
    SearchField::Title,
    SearchField::Description,
];

const ALL_FIELDS: [SearchField; 5] = [
    SearchField::Keywords,
    SearchField::Title,
    SearchField::ProviderAgency,
    SearchField::FileDataName,
    SearchField::Description,
];

/// Why the category filter rejected a record outright.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterReject {
    #[error("record has no classification")]
    MissingClassification,
}

/// Ordered set of one keyword's hits, keyed by dataset name.
#[derive(Default)]
struct KeywordHits {
    seen: HashSet<String>,
    records: Vec<Dataset>,
}

impl KeywordHits {
    fn extend(&mut self, batch: Vec<Dataset>) {
        for record in batch {
            let Some(name) = record.name() else { continue };
            if self.seen.insert(name.to_string()) {
                self.records.push(record);
            }
        }
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

/// Runs every keyword of the plan and returns the deduplicated candidates in
/// first-seen order.
pub async fn collect_candidates(repo: &dyn CatalogRepository, plan: &QueryPlan) -> Vec<Dataset> {
    let mut combined = Vec::new();

    for keyword in &plan.keywords {
        let hits = match search_keyword(repo, keyword).await {
            Ok(hits) => hits,
            Err(e) => {
                error!("Search for keyword '{keyword}' failed, skipping: {e}");
                continue;
            }
        };

        let hits = match plan.category_filter() {
            Some(category) => apply_category_filter(hits, category),
            None => hits,
        };

        info!("Keyword '{keyword}' matched {} datasets", hits.len());
        combined.extend(hits);
    }

    let before = combined.len();
    let unique = dedup_by_name(combined);
    info!("Deduplicated {before} → {} candidates", unique.len());
    unique
}

/// Queries the columns for one keyword. Region keywords hit provider and name
/// first and only widen when fewer than `SUFFICIENT_REGION_HITS` came back.
pub async fn search_keyword(
    repo: &dyn CatalogRepository,
    keyword: &str,
) -> Result<Vec<Dataset>, AppError> {
    let mut hits = KeywordHits::default();

    if is_region_keyword(keyword) {
        info!("Region keyword '{keyword}': searching provider and file name first");
        for field in REGION_PRIMARY_FIELDS {
            hits.extend(repo.find_containing(field, keyword).await?);
        }

        if hits.len() >= SUFFICIENT_REGION_HITS {
            info!("Region keyword '{keyword}' has enough hits ({})", hits.len());
            return Ok(hits.records);
        }

        for field in REGION_SECONDARY_FIELDS {
            hits.extend(repo.find_containing(field, keyword).await?);
        }
    } else {
        for field in ALL_FIELDS {
            hits.extend(repo.find_containing(field, keyword).await?);
        }
    }

    Ok(hits.records)
}

/// Case-insensitive substring test of the record's classification.
pub fn category_matches(record: &Dataset, category: &str) -> Result<bool, FilterReject> {
    let classification = record
        .classification_system
        .as_deref()
        .ok_or(FilterReject::MissingClassification)?;
    Ok(classification
        .to_lowercase()
        .contains(&category.to_lowercase()))
}

/// Keeps matching records; a rejected record is dropped on its own.
pub fn apply_category_filter(records: Vec<Dataset>, category: &str) -> Vec<Dataset> {
    records
        .into_iter()
        .filter(|record| match category_matches(record, category) {
            Ok(keep) => keep,
            Err(reason) => {
                debug!("Dropping dataset {} from category filter: {reason}", record.id);
                false
            }
        })
        .collect()
}

/// One record per distinct name, first occurrence wins, order preserved.
/// Nameless records are dropped.
pub fn dedup_by_name(records: Vec<Dataset>) -> Vec<Dataset> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| match record.name() {
            Some(name) => seen.insert(name.to_string()),
            None => false,
        })
        .collect()
}
