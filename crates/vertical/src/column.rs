//! Single-column interpolation and extrapolation.
//!
//! Works in whatever coordinate it is given. Callers wanting log-pressure
//! behaviour transform both coordinate slices before calling.

use crate::config::ExtrapolationMode;
use crate::error::VerticalError;

/// Where a target coordinate sits relative to the source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Equal to the source coordinate at this index.
    Exact(usize),
    /// Smaller than the first source coordinate.
    Below,
    /// Larger than the last source coordinate.
    Above,
    /// Strictly between `i - 1` and `i`.
    Between(usize),
}

fn classify(src_x: &[f64], target: f64) -> Position {
    let i = src_x.partition_point(|&x| x < target);
    if i < src_x.len() && src_x[i] == target {
        Position::Exact(i)
    } else if i == 0 {
        Position::Below
    } else if i == src_x.len() {
        Position::Above
    } else {
        Position::Between(i)
    }
}

/// Index pair used by the interpolation formula. Equal indices select a
/// single source value.
fn bracket(position: Position, mode: ExtrapolationMode, n: usize) -> Option<(usize, usize)> {
    let last = n - 1;
    match (position, mode) {
        (Position::Exact(i), _) => Some((i, i)),
        (Position::Between(i), _) => Some((i - 1, i)),
        (Position::Below | Position::Above, ExtrapolationMode::Off) => None,
        (Position::Below, ExtrapolationMode::Constant) => Some((0, 0)),
        (Position::Above, ExtrapolationMode::Constant) => Some((last, last)),
        (_, ExtrapolationMode::Linear) if n == 1 => Some((0, 0)),
        (Position::Below, ExtrapolationMode::Linear) => Some((0, 1)),
        (Position::Above, ExtrapolationMode::Linear) => Some((last - 1, last)),
    }
}

/// Checks that `src_x` is ascending (ties allowed, NaN rejected).
pub(crate) fn check_ascending(src_x: &[f64]) -> Result<(), VerticalError> {
    match src_x.windows(2).position(|w| !(w[0] <= w[1])) {
        Some(i) => Err(VerticalError::UnsortedColumn { index: i + 1 }),
        None => Ok(()),
    }
}

/// Interpolates one column from `(src_x, src_y)` onto `targ_x`.
///
/// `src_x` must be ascending. Exact matches return the source value, targets
/// strictly inside the column are linearly interpolated, and targets outside
/// are handled according to `mode`. A NaN target yields NaN.
///
/// # Errors
///
/// Returns [`VerticalError::EmptyColumn`] if `src_x` is empty.
/// Returns [`VerticalError::LengthMismatch`] if `src_y` differs in length from `src_x`.
/// Returns [`VerticalError::UnsortedColumn`] if `src_x` is not ascending.
/// Returns [`VerticalError::OutOfRange`] if a target needs extrapolation and
/// `mode` is [`ExtrapolationMode::Off`].
pub fn interpolate_column(
    src_x: &[f64],
    src_y: &[f64],
    targ_x: &[f64],
    mode: ExtrapolationMode,
) -> Result<Vec<f64>, VerticalError> {
    let n = src_x.len();
    if n == 0 {
        return Err(VerticalError::EmptyColumn);
    }
    if src_y.len() != n {
        return Err(VerticalError::LengthMismatch {
            expected: n,
            got: src_y.len(),
            field: "src_y",
        });
    }
    check_ascending(src_x)?;

    targ_x
        .iter()
        .map(|&t| {
            if t.is_nan() {
                return Ok(f64::NAN);
            }
            let position = classify(src_x, t);
            let (i1, i2) =
                bracket(position, mode, n).ok_or_else(|| VerticalError::OutOfRange {
                    target: t,
                    min: src_x[0],
                    max: src_x[n - 1],
                })?;

            if i1 == i2 {
                Ok(src_y[i1])
            } else {
                Ok(src_y[i1] + (t - src_x[i1]) * (src_y[i2] - src_y[i1]) / (src_x[i2] - src_x[i1]))
            }
        })
        .collect()
}
