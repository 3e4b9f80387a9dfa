use serde::Deserialize;
use utoipa::IntoParams;

/// Row cap when `limit` is absent, zero or not a number.
pub const DEFAULT_LIMIT: u64 = 100;

/// Query-string parameters of list endpoints.
///
/// Values are kept as strings so a malformed `limit` degrades to the default
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Region tag filter (exact match)
    pub vungmien: Option<String>,
    /// Case-insensitive substring search
    pub search: Option<String>,
    /// Maximum number of rows (default 100)
    pub limit: Option<String>,
    /// Sort column; unknown values fall back to the entity default
    pub sort_by: Option<String>,
    /// `ASC` for ascending, anything else descending
    pub sort_order: Option<String>,
}

impl ListParams {
    pub fn region(&self) -> Option<String> {
        non_blank(&self.vungmien)
    }

    pub fn search(&self) -> Option<String> {
        non_blank(&self.search)
    }

    pub fn limit(&self) -> u64 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_LIMIT)
    }
}

/// Region-only filter used by endpoints without search or sorting.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RegionParams {
    /// Region tag filter (exact match)
    pub vungmien: Option<String>,
}

impl RegionParams {
    pub fn region(&self) -> Option<String> {
        non_blank(&self.vungmien)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_limit(limit: &str) -> ListParams {
        ListParams {
            limit: Some(limit.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!(ListParams::default().limit(), DEFAULT_LIMIT);
        assert_eq!(with_limit("25").limit(), 25);
        assert_eq!(with_limit(" 7 ").limit(), 7);
        assert_eq!(with_limit("0").limit(), DEFAULT_LIMIT);
        assert_eq!(with_limit("-3").limit(), DEFAULT_LIMIT);
        assert_eq!(with_limit("ten").limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        let params = ListParams {
            vungmien: Some("  ".into()),
            search: Some(String::new()),
            ..Default::default()
        };
        assert!(params.region().is_none());
        assert!(params.search().is_none());
    }

    #[test]
    fn test_camel_case_keys() {
        let params: ListParams = serde_json::from_value(serde_json::json!({
            "sortBy": "TenHangHoa",
            "sortOrder": "ASC",
            "vungmien": "MienTrung"
        }))
        .unwrap();
        assert_eq!(params.sort_by.as_deref(), Some("TenHangHoa"));
        assert_eq!(params.sort_order.as_deref(), Some("ASC"));
        assert_eq!(params.region().as_deref(), Some("MienTrung"));
    }
}
