//! Result reconciliation
//!
//! Decides whether a category's final records are live or synthetic.
//! Total and side-effect free: every outcome maps to a usable result.

use crate::model::{CategoryResult, Normalize, SourceOutcome};

/// Reconcile one category's fetch outcome against its synthesizer.
///
/// Origin follows outcome status alone: live iff the fetch succeeded with
/// records. Anything else — valid-empty, timeout, error — substitutes the
/// synthesized set. Normalization (field defaulting, never field renaming)
/// applies to live payloads only; synthesized records are valid by
/// construction.
pub fn reconcile<T, F>(outcome: SourceOutcome<T>, synthesize: F) -> CategoryResult<T>
where
    T: Normalize,
    F: FnOnce() -> Vec<T>,
{
    if outcome.is_usable() {
        CategoryResult::live(
            outcome
                .records
                .into_iter()
                .map(Normalize::normalized)
                .collect(),
        )
    } else {
        CategoryResult::synthetic(synthesize())
    }
}
