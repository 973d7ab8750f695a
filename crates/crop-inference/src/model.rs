//! The scoring seam the engine holds.

use crop_model::YieldQuery;
use crop_preprocess::FittedPipeline;

use crate::error::{InferenceError, Result};

/// Batch scoring over raw queries. Implementations must return exactly one
/// score per query, in input order, and must not mutate shared state.
pub trait YieldModel: Send + Sync {
    fn predict_batch(&self, queries: &[YieldQuery]) -> Result<Vec<f64>>;
}

impl YieldModel for FittedPipeline {
    fn predict_batch(&self, queries: &[YieldQuery]) -> Result<Vec<f64>> {
        self.predict_queries(queries)
            .map_err(|e| InferenceError::Scoring(e.to_string()))
    }
}
