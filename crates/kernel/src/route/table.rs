//! Route table - resolves request paths to composed module routes.
//!
//! A composed path such as `/resources/:id` is compiled once into a
//! [`RoutePattern`] of literal and `:param` segments. The table keeps
//! composition order for listing; resolution tries patterns in rank order,
//! most specific first, and falls back to composition order on ties.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::composer::ComposedRoute;

/// Result of resolving a path against the table.
#[derive(Debug, Clone, Serialize)]
pub struct RouteMatch {
    /// The resolved route.
    pub route: ComposedRoute,
    /// Values bound to the pattern's `:param` segments.
    pub params: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A composed route path split into segments.
///
/// Empty segments are kept, so `/odd//p` only resolves `/odd//p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a composed path.
    pub fn compile(path: &str) -> Self {
        let segments = path
            .split('/')
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Number of `:param` segments.
    pub fn param_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Param(_)))
            .count()
    }

    /// Ordering key: fewer params first, then deeper paths first.
    fn rank(&self) -> (usize, Reverse<usize>) {
        (self.param_count(), Reverse(self.segments.len()))
    }

    /// Bind `path` against this pattern. A param never binds an empty segment.
    pub fn bind(&self, path: &str) -> Option<HashMap<String, String>> {
        let mut params = HashMap::new();
        let mut parts = path.split('/');

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Param(name) if !part.is_empty() => {
                    params.insert(name.clone(), part.to_string());
                }
                _ => return None,
            }
        }

        // Leftover segments mean the path is deeper than the pattern.
        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}

/// Composed routes plus their compiled patterns, ranked for resolution.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<ComposedRoute>,
    patterns: Vec<RoutePattern>,
    /// Indices into `routes`, best rank first.
    ranked: Vec<usize>,
}

impl RouteTable {
    /// Compile every route's path and rank them for resolution.
    pub fn from_routes(routes: Vec<ComposedRoute>) -> Self {
        let patterns: Vec<RoutePattern> = routes
            .iter()
            .map(|r| RoutePattern::compile(&r.path))
            .collect();

        let mut ranked: Vec<usize> = (0..routes.len()).collect();
        ranked.sort_by_key(|&i| patterns[i].rank());

        debug!(routes = routes.len(), "built route table");
        Self {
            routes,
            patterns,
            ranked,
        }
    }

    /// Resolve a request path to the best-ranked route that binds it.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        self.ranked.iter().find_map(|&i| {
            let params = self.patterns[i].bind(path)?;
            Some(RouteMatch {
                route: self.routes[i].clone(),
                params,
            })
        })
    }

    /// Routes in composition order.
    pub fn routes(&self) -> &[ComposedRoute] {
        &self.routes
    }

    /// Number of routes in the table.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
