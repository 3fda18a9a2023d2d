use std::collections::HashMap;

use crate::types::Review;

/// Secondary, higher-volume text source consulted when an app's own
/// listing text is inconclusive. Retry policy belongs to the implementor.
pub trait ReviewSource: Send + Sync {
    fn fetch_reviews(&self, app_id: &str) -> anyhow::Result<Vec<Review>>;
}

/// Reviews already collected in memory, keyed by app id. A missing id is
/// reported as an unavailable source.
impl ReviewSource for HashMap<String, Vec<Review>> {
    fn fetch_reviews(&self, app_id: &str) -> anyhow::Result<Vec<Review>> {
        self.get(app_id)
            .cloned()
            .ok_or_else(|| crate::error::Error::NotFound(format!("reviews for app {app_id}")).into())
    }
}
