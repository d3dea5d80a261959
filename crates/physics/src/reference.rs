//! Choice of the reference pressure level for the PGW iteration.

use ndarray::{ArrayBase, Data, Dimension};
use tracing::debug;

/// Returns the first candidate lying above the surface in both climates.
///
/// A candidate `p` qualifies when `ps_a > p` and `ps_b > p`. With `previous`
/// set, the result is `min(p, previous)` so the iteration never moves the
/// reference level downwards. Candidates are tried in the order given.
pub fn select_reference_level(
    ps_a: f64,
    ps_b: f64,
    candidates: &[f64],
    previous: Option<f64>,
) -> Option<f64> {
    let p = candidates.iter().copied().find(|&p| ps_a > p && ps_b > p)?;
    Some(previous.map_or(p, |last| p.min(last)))
}

fn nan_min<S, D>(field: &ArrayBase<S, D>) -> Option<f64>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    field
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(f64::min)
}

/// Applies [`select_reference_level`] to the lowest surface pressure of each
/// field, ignoring NaN cells.
///
/// Returns `None` when either field has no valid cell or no candidate
/// qualifies.
pub fn select_domain_reference_level<S, D>(
    ps_a: &ArrayBase<S, D>,
    ps_b: &ArrayBase<S, D>,
    candidates: &[f64],
    previous: Option<f64>,
) -> Option<f64>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (min_a, min_b) = (nan_min(ps_a)?, nan_min(ps_b)?);
    let selected = select_reference_level(min_a, min_b, candidates, previous);
    debug!(min_a, min_b, ?selected, "reference level selected");
    selected
}
