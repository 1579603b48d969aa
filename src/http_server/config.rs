//! Listener, CORS and paging settings

use serde::{Deserialize, Serialize};

use crate::executor::{ExecutorResult, PageRequest, SortDirection, SortSpec};

/// Where the server listens and which browser origins may call it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl HttpServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Page size policy shared by the HTTP routes and the `query` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLimits {
    /// Rows per page when the request names no limit
    pub default_limit: usize,
    /// Upper bound applied to any requested limit
    pub max_limit: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 1000,
        }
    }
}

impl PageLimits {
    pub fn new(default_limit: usize, max_limit: usize) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }

    /// Rejects a zero default and a cap below the default
    pub fn validate(&self) -> Result<(), String> {
        if self.default_limit == 0 {
            return Err("default_limit must be > 0".to_string());
        }
        if self.max_limit < self.default_limit {
            return Err(format!(
                "max_limit ({}) must be >= default_limit ({})",
                self.max_limit, self.default_limit
            ));
        }
        Ok(())
    }

    /// Builds a page request from loosely typed request parameters.
    ///
    /// Page defaults to 1 and the limit is capped at `max_limit`. An empty
    /// `order_by` means unsorted; `order` other than `desc` is ascending.
    pub fn page_request(
        &self,
        page: Option<usize>,
        limit: Option<usize>,
        order_by: Option<&str>,
        order: Option<&str>,
    ) -> ExecutorResult<PageRequest> {
        let limit = limit.unwrap_or(self.default_limit).min(self.max_limit);
        let mut request = PageRequest::new(page.unwrap_or(1), limit)?;

        if let Some(field) = order_by.filter(|f| !f.is_empty()) {
            let direction = SortDirection::parse(order.unwrap_or_default());
            request = request.with_sort(SortSpec::new(field, direction));
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 8080}"#).unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.cors_origins, ["http://localhost:5173"]);
    }

    #[test]
    fn test_limit_defaults_and_cap() {
        let limits = PageLimits::new(10, 50);

        let request = limits.page_request(None, None, None, None).unwrap();
        assert_eq!((request.page, request.limit, request.sort), (1, 10, None));

        let request = limits.page_request(Some(3), Some(500), None, None).unwrap();
        assert_eq!((request.page, request.limit), (3, 50));
    }

    #[test]
    fn test_sort_parsing() {
        let limits = PageLimits::default();

        let request = limits
            .page_request(None, None, Some("salary"), Some("desc"))
            .unwrap();
        assert_eq!(request.sort, Some(SortSpec::desc("salary")));

        let request = limits
            .page_request(None, None, Some("salary"), Some("sideways"))
            .unwrap();
        assert_eq!(request.sort, Some(SortSpec::asc("salary")));

        let request = limits.page_request(None, None, Some(""), Some("desc")).unwrap();
        assert_eq!(request.sort, None);
    }

    #[test]
    fn test_zero_page_rejected() {
        let err = PageLimits::default()
            .page_request(Some(0), None, None, None)
            .unwrap_err();
        assert_eq!(err.code(), "EXEC_INVALID_PAGE");
    }

    #[test]
    fn test_validate() {
        assert!(PageLimits::default().validate().is_ok());
        assert!(PageLimits::new(0, 10).validate().is_err());
        assert!(PageLimits::new(50, 20).validate().is_err());
    }
}
