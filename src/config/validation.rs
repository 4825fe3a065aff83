//! Configuration validation.
//!
//! Serde handles syntactic validity; this module covers semantics:
//! route prefixes must be non-empty absolute paths, targets must parse as
//! http/https URLs, and duplicate prefixes are rejected because the first
//! matching prefix wins and a duplicate would be unreachable.
//!
//! All validation errors are returned, not just the first.

use std::collections::HashSet;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a gateway configuration, collecting every problem found.
pub fn validate_gateway_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen_prefixes = HashSet::new();

    if config.routes.is_empty() {
        errors.push(ValidationError {
            field: "routes".to_string(),
            message: "at least one route must be configured".to_string(),
        });
    }

    for (i, route) in config.routes.iter().enumerate() {
        let field = format!("routes[{}]", i);

        if route.prefix.is_empty() || !route.prefix.starts_with('/') {
            errors.push(ValidationError {
                field: format!("{}.prefix", field),
                message: format!("prefix must start with '/', got {:?}", route.prefix),
            });
        }

        if !seen_prefixes.insert(route.prefix.clone()) {
            errors.push(ValidationError {
                field: format!("{}.prefix", field),
                message: format!("duplicate prefix {:?} is unreachable", route.prefix),
            });
        }

        match Url::parse(&route.target) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                errors.push(ValidationError {
                    field: format!("{}.target", field),
                    message: format!("unsupported scheme {:?}", url.scheme()),
                });
            }
            Err(e) => {
                errors.push(ValidationError {
                    field: format!("{}.target", field),
                    message: format!("invalid target URL: {}", e),
                });
            }
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs".to_string(),
            message: "request timeout must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn config_with_routes(routes: Vec<RouteConfig>) -> GatewayConfig {
        GatewayConfig {
            routes,
            ..Default::default()
        }
    }

    fn route(prefix: &str, target: &str) -> RouteConfig {
        RouteConfig {
            prefix: prefix.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn accepts_valid_config() {
        let config = config_with_routes(vec![
            route("/api/auth", "http://127.0.0.1:3001"),
            route("/api/orders", "http://127.0.0.1:3002"),
        ]);
        assert!(validate_gateway_config(&config).is_ok());
    }

    #[test]
    fn rejects_empty_routes() {
        let config = config_with_routes(vec![]);
        let errors = validate_gateway_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "routes");
    }

    #[test]
    fn rejects_relative_prefix_and_bad_target() {
        let config = config_with_routes(vec![route("api/auth", "not a url")]);
        let errors = validate_gateway_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2, "expected both problems reported: {:?}", errors);
    }

    #[test]
    fn rejects_duplicate_prefix() {
        let config = config_with_routes(vec![
            route("/api/auth", "http://127.0.0.1:3001"),
            route("/api/auth", "http://127.0.0.1:3009"),
        ]);
        let errors = validate_gateway_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("duplicate")));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let config = config_with_routes(vec![route("/api/auth", "ftp://127.0.0.1:3001")]);
        let errors = validate_gateway_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("scheme")));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = config_with_routes(vec![route("/api/auth", "http://127.0.0.1:3001")]);
        config.timeouts.request_secs = 0;
        let errors = validate_gateway_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "timeouts.request_secs"));
    }
}
