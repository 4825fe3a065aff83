//! Static prefix-to-service route table.
//!
//! # Responsibilities
//! - Match a request path against configured prefixes (case-sensitive)
//! - Strip the matched prefix to produce the downstream path
//! - Report no-match explicitly
//!
//! # Design Decisions
//! - First configured prefix wins; overlapping prefixes resolve by
//!   declaration order, not by length
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan is fine for the handful of services behind the gateway

use crate::config::schema::RouteConfig;

/// A compiled route entry.
#[derive(Debug, Clone)]
struct Route {
    prefix: String,
    target: String,
}

/// Result of a successful route lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    /// The prefix that matched, for logging.
    pub prefix: &'a str,
    /// Base URL of the downstream service.
    pub target: &'a str,
    /// Request path with the matched prefix stripped; always starts with '/'.
    pub downstream_path: String,
}

/// Immutable mapping from URL prefix to downstream service base address.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compile a route table from configuration, preserving declaration order.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        Self {
            routes: routes
                .iter()
                .map(|r| Route {
                    prefix: r.prefix.clone(),
                    // A trailing slash on the target would produce "//" after
                    // path concatenation.
                    target: r.target.trim_end_matches('/').to_string(),
                })
                .collect(),
        }
    }

    /// Resolve a request path to a downstream target.
    ///
    /// Returns `None` when no configured prefix matches; the caller turns
    /// that into a 404.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute<'_>> {
        for route in &self.routes {
            if let Some(rest) = path.strip_prefix(route.prefix.as_str()) {
                let downstream_path = if rest.is_empty() {
                    "/".to_string()
                } else if rest.starts_with('/') {
                    rest.to_string()
                } else {
                    format!("/{}", rest)
                };
                return Some(ResolvedRoute {
                    prefix: &route.prefix,
                    target: &route.target,
                    downstream_path,
                });
            }
        }
        None
    }

    /// Number of configured routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
