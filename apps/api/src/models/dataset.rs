use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Placeholder rendered wherever a dataset field is missing.
pub const MISSING: &str = "정보 없음";

/// One row of the `public_data` catalog table.
///
/// Every descriptive column is nullable upstream, so each one is an `Option`
/// and the formatters decide what to show for `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: i64,
    pub file_data_name: Option<String>,
    pub title: Option<String>,
    pub classification_system: Option<String>,
    pub provider_agency: Option<String>,
    pub description: Option<String>,
    /// Comma-separated tag list.
    pub keywords: Option<String>,
    pub modified_date: Option<NaiveDateTime>,
    pub file_extension: Option<String>,
}

impl Dataset {
    /// The display/dedup key, or `None` when the name is null or blank.
    pub fn name(&self) -> Option<&str> {
        self.file_data_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    /// Lower-cased view of an optional field, empty when absent.
    pub(crate) fn lowered(field: &Option<String>) -> String {
        field.as_deref().map(str::to_lowercase).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rejects_blank() {
        let blank = Dataset {
            file_data_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.name(), None);
        assert_eq!(Dataset::default().name(), None);
    }

    #[test]
    fn test_name_is_trimmed() {
        let ds = Dataset {
            file_data_name: Some(" 서울교통_20240101 ".to_string()),
            ..Default::default()
        };
        assert_eq!(ds.name(), Some("서울교통_20240101"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let ds = Dataset {
            id: 7,
            file_data_name: Some("A_20240101".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&ds).unwrap();
        assert_eq!(json["fileDataName"], "A_20240101");
        assert!(json["providerAgency"].is_null());
    }
}
