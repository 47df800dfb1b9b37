//! Page-based pagination over in-memory collections.
//!
//! Pages are 1-indexed. Out-of-range values are clamped rather than
//! rejected, so `?page=0&limit=1000` behaves like `?page=1&limit=100`.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query strings deliver numbers as text (an empty value means "unset"),
/// and `#[serde(flatten)]` hides the target type from the deserializer.
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_more: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number, starting at 1
    #[serde(default, deserialize_with = "lenient_u32")]
    pub page: Option<u32>,
    /// Items per page (1-100, default 20)
    #[serde(default, deserialize_with = "lenient_u32")]
    pub limit: Option<u32>,
}

impl PaginationParams {
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    fn skip(&self) -> usize {
        (self.page() as usize - 1) * self.limit() as usize
    }
}

/// Takes one page out of `items`.
pub fn paginate<T>(items: Vec<T>, params: &PaginationParams) -> (Vec<T>, PaginationMeta) {
    let total = items.len();
    let limit = params.limit();
    let skip = params.skip();

    let data: Vec<T> = items.into_iter().skip(skip).take(limit as usize).collect();
    let meta = PaginationMeta {
        total,
        page: params.page(),
        limit,
        total_pages: total.div_ceil(limit as usize) as u32,
        has_more: skip + data.len() < total,
    };

    (data, meta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let params = PaginationParams::default();
        assert_eq!((params.page(), params.limit()), (1, 20));

        let params = PaginationParams::new(0, 1000);
        assert_eq!((params.page(), params.limit()), (1, 100));
    }

    #[test]
    fn test_middle_and_last_page() {
        let items: Vec<i32> = (1..=25).collect();

        let (data, meta) = paginate(items.clone(), &PaginationParams::new(2, 10));
        assert_eq!(data, (11..=20).collect::<Vec<_>>());
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_more);

        let (data, meta) = paginate(items, &PaginationParams::new(3, 10));
        assert_eq!(data.len(), 5);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let (data, meta) = paginate(vec![1, 2, 3], &PaginationParams::new(4, 2));
        assert!(data.is_empty());
        assert_eq!(meta.total, 3);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_query_string_values() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit":"","page":"2"}"#).unwrap();
        assert_eq!(params.limit, None);
        assert_eq!(params.page, Some(2));

        let params: PaginationParams = serde_json::from_str(r#"{"limit":5}"#).unwrap();
        assert_eq!(params.limit(), 5);

        assert!(serde_json::from_str::<PaginationParams>(r#"{"page":"x"}"#).is_err());
    }
}
