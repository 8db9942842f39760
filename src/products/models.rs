// Product catalog models and DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Default product status for new records
pub const DEFAULT_STATUS: &str = "Available";

/// Catalog product stored in the database
///
/// Image fields hold file-path references under the uploads directory,
/// never binary content.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Oversized Hoodie")]
    pub name: String,
    pub description: String,
    #[schema(example = 49.99)]
    pub price: Decimal,
    #[schema(example = "Men")]
    pub category: String,
    #[schema(example = "Topwear")]
    pub sub_category: String,
    #[schema(example = json!(["S", "M", "L"]))]
    pub sizes: Vec<String>,
    pub main_image: Option<String>,
    pub thumbnails: Vec<String>,
    #[schema(example = "Available")]
    pub status: String,
    pub bestseller: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sizes arrive either as a JSON array or as a delimited string,
/// depending on the entry path; both normalize to the same ordered
/// sequence of trimmed strings.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SizesInput {
    List(Vec<String>),
    Raw(String),
}

impl SizesInput {
    pub fn normalize(&self) -> Vec<String> {
        match self {
            SizesInput::List(items) => items
                .iter()
                .map(|size| size.trim().to_string())
                .filter(|size| !size.is_empty())
                .collect(),
            SizesInput::Raw(raw) => parse_sizes(raw),
        }
    }
}

/// Parse a sizes string: a JSON-encoded array when it parses as one,
/// otherwise a comma-delimited list with whitespace trimmed.
pub fn parse_sizes(raw: &str) -> Vec<String> {
    if let Ok(parsed) = serde_json::from_str::<Vec<String>>(raw) {
        return parsed
            .iter()
            .map(|size| size.trim().to_string())
            .filter(|size| !size.is_empty())
            .collect();
    }

    raw.split(',')
        .map(|size| size.trim().to_string())
        .filter(|size| !size.is_empty())
        .collect()
}

/// Request body for product creation
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub name: String,
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub description: String,
    #[validate(custom = "crate::validation::validate_positive_price")]
    pub price: Decimal,
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub category: String,
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub sub_category: String,
    pub sizes: SizesInput,
    #[validate(custom = "crate::validation::validate_product_status")]
    pub status: Option<String>,
    pub bestseller: Option<bool>,
}

/// Partial update fields collected from a multipart body;
/// only supplied fields overwrite existing ones
#[derive(Debug, Clone, Default)]
pub struct UpdateProductFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub status: Option<String>,
    pub bestseller: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn delimited_sizes_are_split_and_trimmed() {
        assert_eq!(parse_sizes("S, M, L"), vec!["S", "M", "L"]);
        assert_eq!(parse_sizes("S,M"), vec!["S", "M"]);
        assert_eq!(parse_sizes("  XL  "), vec!["XL"]);
    }

    #[test]
    fn json_sizes_parse_to_the_same_shape() {
        assert_eq!(parse_sizes(r#"["S","M"]"#), vec!["S", "M"]);
        assert_eq!(parse_sizes(r#"["S", " M ", "L"]"#), vec!["S", "M", "L"]);
    }

    #[test]
    fn empty_segments_are_dropped() {
        assert_eq!(parse_sizes("S,,M, "), vec!["S", "M"]);
        assert!(parse_sizes("").is_empty());
    }

    #[test]
    fn both_entry_paths_converge() {
        let from_list = SizesInput::List(vec!["S".to_string(), " M ".to_string()]).normalize();
        let from_raw = SizesInput::Raw("S, M".to_string()).normalize();
        assert_eq!(from_list, from_raw);
    }

    #[test]
    fn create_product_accepts_array_or_string_sizes() {
        let with_array: CreateProduct = serde_json::from_str(
            r#"{"name":"Hoodie","description":"Warm","price":"49.99",
                "category":"Men","subCategory":"Topwear","sizes":["S","M"]}"#,
        )
        .unwrap();
        assert_eq!(with_array.sizes.normalize(), vec!["S", "M"]);

        let with_string: CreateProduct = serde_json::from_str(
            r#"{"name":"Hoodie","description":"Warm","price":"49.99",
                "category":"Men","subCategory":"Topwear","sizes":"S, M, L"}"#,
        )
        .unwrap();
        assert_eq!(with_string.sizes.normalize(), vec!["S", "M", "L"]);
    }

    proptest! {
        #[test]
        fn prop_order_is_preserved(sizes in proptest::collection::vec("[A-Z]{1,3}", 1..6)) {
            let joined = sizes.join(", ");
            prop_assert_eq!(parse_sizes(&joined), sizes);
        }
    }
}
