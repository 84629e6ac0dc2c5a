//! Statistical math utilities for summary statistics.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const TWO: Decimal = Decimal::TWO;
const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 7); // 0.0000001

/// Calculate mean of a slice of decimals.
///
/// `None` for an empty slice or when the sum overflows.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    sum.checked_div(Decimal::from(values.len() as u64))
}

/// Sample standard deviation (n - 1 denominator).
///
/// `None` with fewer than two values or when the squared deviations
/// overflow.
pub fn std_dev(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }

    let avg = mean(values)?;
    let variance_sum = values.iter().try_fold(Decimal::ZERO, |acc, v| {
        let deviation = v.checked_sub(avg)?;
        acc.checked_add(deviation.checked_mul(deviation)?)
    })?;
    let variance = variance_sum.checked_div(Decimal::from((values.len() - 1) as u64))?;

    sqrt_decimal(variance)
}

/// Approximate square root using Newton's method.
pub fn sqrt_decimal(value: Decimal) -> Option<Decimal> {
    if value < Decimal::ZERO {
        return None;
    }
    if value == Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    let mut guess = value / TWO;

    for _ in 0..50 {
        let next = (guess + value / guess) / TWO;
        if (next - guess).abs() < TOLERANCE {
            return Some(next);
        }
        guess = next;
    }

    Some(guess)
}

/// Quantile of already-sorted values with linear interpolation between ranks.
///
/// `q` is in `[0, 1]`; position is `(n - 1) * q`.
pub fn quantile_sorted(sorted: &[Decimal], q: Decimal) -> Option<Decimal> {
    let last = sorted.len().checked_sub(1)?;
    let position = Decimal::from(last as u64) * q.clamp(Decimal::ZERO, Decimal::ONE);
    let lower = position.floor();
    let fraction = position - lower;
    let index = lower.to_usize()?;
    let below = *sorted.get(index)?;
    let above = sorted.get(index + 1).copied().unwrap_or(below);
    Some(below + (above - below) * fraction)
}
