//! CORS policy types.

use crate::config::CorsConfig;
use std::collections::HashSet;
use std::time::Duration;

/// Runtime CORS policy.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    /// Allowed origins.
    pub allowed_origins: AllowedOrigins,
    /// Allowed methods.
    pub allowed_methods: Vec<String>,
    /// Allowed request headers.
    pub allowed_headers: AllowedHeaders,
    /// Allow credentials (cookies, auth headers).
    pub allow_credentials: bool,
    /// Max age for preflight cache.
    pub max_age: Option<Duration>,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::from_config(&CorsConfig::default())
    }
}

impl CorsPolicy {
    /// Build the policy from the `[cors]` configuration section.
    ///
    /// Origins containing `*` are treated as wildcard patterns
    /// (`http://localhost:*`).
    pub fn from_config(config: &CorsConfig) -> Self {
        Self {
            allowed_origins: AllowedOrigins::from_patterns(&config.allowed_origins),
            allowed_methods: ["GET", "POST", "OPTIONS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_headers: AllowedHeaders::from_names(&config.allowed_headers),
            allow_credentials: config.allow_credentials,
            max_age: Some(Duration::from_secs(config.max_age_secs)),
        }
    }

    /// Check if origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.is_allowed(origin)
    }

    /// Allowed methods as a header value.
    pub fn methods_header_value(&self) -> String {
        self.allowed_methods.join(", ")
    }
}

/// Allowed origins configuration.
#[derive(Debug, Clone)]
pub enum AllowedOrigins {
    /// Allow any origin.
    Any,
    /// Allow specific origins.
    List(HashSet<String>),
    /// Exact origins plus wildcard patterns.
    Mixed {
        /// Origins matched literally.
        exact: HashSet<String>,
        /// Anchored patterns built from `*` entries.
        patterns: Vec<regex::Regex>,
    },
}

impl AllowedOrigins {
    /// Build from configured entries. A lone `*` allows any origin.
    pub fn from_patterns(entries: &[String]) -> Self {
        if entries.iter().any(|e| e == "*") {
            return Self::Any;
        }

        let (wildcards, exact): (Vec<&String>, Vec<&String>) =
            entries.iter().partition(|e| e.contains('*'));
        let exact: HashSet<String> = exact.into_iter().cloned().collect();

        if wildcards.is_empty() {
            return Self::List(exact);
        }

        let patterns = wildcards
            .into_iter()
            .filter_map(|w| {
                let escaped = regex::escape(w).replace(r"\*", "[^/]*");
                regex::Regex::new(&format!("^{escaped}$")).ok()
            })
            .collect();

        Self::Mixed { exact, patterns }
    }

    /// Check if origin is allowed.
    pub fn is_allowed(&self, origin: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(origins) => origins.contains(origin),
            Self::Mixed { exact, patterns } => {
                exact.contains(origin) || patterns.iter().any(|p| p.is_match(origin))
            }
        }
    }
}

/// Allowed headers configuration.
#[derive(Debug, Clone)]
pub enum AllowedHeaders {
    /// Echo whatever the preflight asks for.
    Any,
    /// Allow specific headers.
    List(HashSet<String>),
}

impl AllowedHeaders {
    /// Build from configured header names. No names, or a `*`, means any.
    pub fn from_names(names: &[String]) -> Self {
        if names.is_empty() || names.iter().any(|n| n == "*") {
            Self::Any
        } else {
            Self::List(names.iter().cloned().collect())
        }
    }

    /// Header value answering a preflight that requested `requested`.
    pub fn to_header_value(&self, requested: Option<&str>) -> Option<String> {
        match self {
            Self::Any => requested.map(str::to_string),
            Self::List(headers) => {
                let mut headers: Vec<_> = headers.iter().cloned().collect();
                headers.sort();
                Some(headers.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_allows_local_frontends() {
        let policy = CorsPolicy::default();
        assert!(policy.is_origin_allowed("http://localhost:3000"));
        assert!(policy.is_origin_allowed("http://localhost:5173"));
        assert!(!policy.is_origin_allowed("http://localhost:8080"));
        assert!(!policy.is_origin_allowed("https://evil.example"));
        assert!(policy.allow_credentials);
    }

    #[test]
    fn test_wildcard_patterns() {
        let origins = AllowedOrigins::from_patterns(&[
            "https://app.example.com".to_string(),
            "http://localhost:*".to_string(),
        ]);
        assert!(origins.is_allowed("https://app.example.com"));
        assert!(origins.is_allowed("http://localhost:4000"));
        assert!(!origins.is_allowed("http://localhost.evil.com/x"));
        assert!(!origins.is_allowed("https://other.example.com"));
    }

    #[test]
    fn test_star_allows_any() {
        let origins = AllowedOrigins::from_patterns(&["*".to_string()]);
        assert!(matches!(origins, AllowedOrigins::Any));
        assert!(origins.is_allowed("https://anything.example"));
    }

    #[test]
    fn test_allowed_headers_from_config() {
        assert!(matches!(AllowedHeaders::from_names(&[]), AllowedHeaders::Any));
        assert!(matches!(
            AllowedHeaders::from_names(&["*".to_string()]),
            AllowedHeaders::Any
        ));

        let config = CorsConfig {
            allowed_headers: vec!["Content-Type".to_string()],
            ..Default::default()
        };
        let policy = CorsPolicy::from_config(&config);
        assert_eq!(
            policy.allowed_headers.to_header_value(Some("x-custom")),
            Some("Content-Type".to_string())
        );
    }

    #[test]
    fn test_allowed_headers_value() {
        assert_eq!(
            AllowedHeaders::Any.to_header_value(Some("content-type")),
            Some("content-type".to_string())
        );
        assert_eq!(AllowedHeaders::Any.to_header_value(None), None);

        let list = AllowedHeaders::List(
            ["X-Request-ID", "Content-Type"].iter().map(|s| s.to_string()).collect(),
        );
        assert_eq!(
            list.to_header_value(None),
            Some("Content-Type, X-Request-ID".to_string())
        );
    }
}
