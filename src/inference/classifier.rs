use std::{fmt, sync::Arc};

use reqwest::StatusCode;

pub static DEFAULT_CAPACITY_MARKERS: [&str; 2] = ["Capacity temporarily exceeded", "3040"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transient,
    Terminal,
}

/// Decides whether a 500 body signals temporary overload on the upstream side.
#[derive(Clone)]
pub struct CapacityMatcher(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl CapacityMatcher {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    pub fn markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let markers: Vec<String> = markers
            .into_iter()
            .map(Into::into)
            .filter(|marker| !marker.is_empty())
            .collect();

        Self::new(move |body| markers.iter().any(|marker| body.contains(marker.as_str())))
    }

    pub fn matches(&self, body: &str) -> bool {
        (self.0)(body)
    }
}

impl Default for CapacityMatcher {
    fn default() -> Self {
        Self::markers(DEFAULT_CAPACITY_MARKERS)
    }
}

impl fmt::Debug for CapacityMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CapacityMatcher")
    }
}

/// Maps a non-success upstream response to a failure kind.
pub fn classify(status: StatusCode, body: &str, capacity: &CapacityMatcher) -> FailureKind {
    match status {
        StatusCode::TOO_MANY_REQUESTS => FailureKind::Transient,
        StatusCode::INTERNAL_SERVER_ERROR if capacity.matches(body) => FailureKind::Transient,
        _ => FailureKind::Terminal,
    }
}
