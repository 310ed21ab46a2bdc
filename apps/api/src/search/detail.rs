//! Detail lookup: resolve one dataset by (near-)exact name and render its
//! metadata report.

use tracing::info;

use crate::catalog::{CatalogRepository, SearchField};
use crate::errors::AppError;
use crate::models::dataset::{Dataset, MISSING};
use crate::search::filename::extract_file_name;
use crate::search::similarity::closest_match;

const HEADER_RULE_WIDTH: usize = 50;
const DESCRIPTION_RULE_WIDTH: usize = 30;

pub fn not_found_message(file_name: &str) -> String {
    format!("❌ 해당 파일명을 찾을 수 없습니다: {file_name}")
}

/// Exact name match, else the closest substring match by edit distance.
pub async fn find_dataset(
    repo: &dyn CatalogRepository,
    file_name: &str,
) -> Result<Option<Dataset>, AppError> {
    if let Some(exact) = repo.find_by_file_data_name(file_name).await? {
        return Ok(Some(exact));
    }

    let partial = repo
        .find_containing(SearchField::FileDataName, file_name)
        .await?;
    let best = closest_match(&partial, file_name).cloned();
    if let Some(best) = &best {
        info!(
            "No exact match for '{file_name}', using closest of {} partial matches: {:?}",
            partial.len(),
            best.name()
        );
    }
    Ok(best)
}

/// Formatted report for `file_name`, or the not-found message.
pub async fn lookup_details(
    repo: &dyn CatalogRepository,
    file_name: &str,
) -> Result<String, AppError> {
    info!("Detail lookup for '{file_name}'");
    Ok(match find_dataset(repo, file_name).await? {
        Some(dataset) => format_dataset_details(&dataset),
        None => not_found_message(file_name),
    })
}

/// Like `lookup_details`, for raw user input that may still carry request
/// phrasing (`XYZ_20230101 상세정보`). Falls back to the extracted filename
/// when the input itself matches nothing.
pub async fn lookup_details_for_input(
    repo: &dyn CatalogRepository,
    input: &str,
) -> Result<String, AppError> {
    if let Some(dataset) = find_dataset(repo, input).await? {
        return Ok(format_dataset_details(&dataset));
    }

    let extracted = extract_file_name(input);
    if extracted.is_empty() || extracted == input {
        return Ok(not_found_message(input));
    }

    info!("No match for '{input}', retrying with extracted name '{extracted}'");
    lookup_details(repo, &extracted).await
}

/// Multi-line detail report. Missing fields show `정보 없음`.
pub fn format_dataset_details(data: &Dataset) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| MISSING.to_string());
    let modified = data
        .modified_date
        .map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_else(|| MISSING.to_string());

    let mut out = String::new();
    out.push_str("📋 데이터 상세 정보\n");
    out.push_str(&"═".repeat(HEADER_RULE_WIDTH));
    out.push_str("\n\n");

    let lines = [
        ("📄 파일명", field(&data.file_data_name)),
        ("🏷️ 제목", field(&data.title)),
        ("📂 분류체계", field(&data.classification_system)),
        ("🏢 제공기관", field(&data.provider_agency)),
        ("📅 수정일", modified),
        ("📎 확장자", field(&data.file_extension)),
        ("🔑 키워드", field(&data.keywords)),
    ];
    for (label, value) in lines {
        out.push_str(&format!("{label}: {value}\n\n"));
    }

    match data.description.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(description) => {
            out.push_str("📝 상세 설명:\n");
            out.push_str(&"-".repeat(DESCRIPTION_RULE_WIDTH));
            out.push('\n');
            out.push_str(description);
            out.push('\n');
        }
        None => out.push_str(&format!("📝 상세 설명: {MISSING}\n")),
    }

    out
}
