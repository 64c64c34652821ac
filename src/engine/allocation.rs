//! Proration of a money pool across percentage-weighted categories
//!
//! Shares are computed against the sum of the category percentages, so the
//! pool is always fully distributed. Every category except the last in
//! iteration order gets its rounded share; the last receives the exact
//! remainder. That tie-break keeps the sum of shares equal to the pool with
//! no cent lost or gained to rounding, at the cost of the order-last
//! category's share drifting up to a cent from its strict percentage.

use crate::models::{BudgetCategory, Money};

/// One category's rounded share of the pool, half-up at cent precision.
///
/// The multiplication is widened to i128 so the division happens on the exact
/// product; no intermediate decimal scale is involved.
fn rounded_share(pool: Money, percentage: u8, denominator: u32) -> Money {
    if !pool.is_positive() || percentage == 0 || denominator == 0 {
        return Money::zero();
    }
    let numer = pool.cents() as i128 * percentage as i128;
    let denom = denominator as i128;
    let cents = (2 * numer + denom) / (2 * denom);
    Money::from_cents(cents as i64)
}

/// Split `pool` across `categories` by percentage weight.
///
/// Returns one share per category, in category order. The last category's
/// share is the exact remainder, so the shares always sum to `pool`.
pub(crate) fn prorate(pool: Money, categories: &[BudgetCategory]) -> Vec<Money> {
    if categories.is_empty() {
        return Vec::new();
    }

    let denominator: u32 = categories.iter().map(|c| c.percentage as u32).sum();
    if denominator == 0 || pool.is_negative() {
        return vec![Money::zero(); categories.len()];
    }

    let last = categories.len() - 1;
    let mut remainder = pool;
    let mut shares = Vec::with_capacity(categories.len());

    for (index, category) in categories.iter().enumerate() {
        let share = if index == last {
            remainder
        } else {
            let calculated = rounded_share(pool, category.percentage, denominator);
            remainder -= calculated;
            calculated
        };
        shares.push(share);
    }

    shares
}

/// Re-derive every category's allocation from scratch.
///
/// Each category's allocated and remaining funds become its share of `pool`;
/// prior spend progress is discarded (the balance still reflects it).
pub(crate) fn recompute(categories: &[BudgetCategory], pool: Money) -> Vec<BudgetCategory> {
    let shares = prorate(pool, categories);
    categories
        .iter()
        .zip(shares)
        .map(|(category, share)| {
            let mut category = category.clone();
            category.allocated_amount = share;
            category.remaining_amount = share;
            category
        })
        .collect()
}

/// Distribute a fresh `amount` on top of existing allocations.
///
/// Each category's share of `amount` is added to both its allocated and its
/// remaining funds, so spend progress is preserved.
pub(crate) fn distribute(categories: &[BudgetCategory], amount: Money) -> Vec<BudgetCategory> {
    if categories.is_empty() || !amount.is_positive() {
        return categories.to_vec();
    }

    let shares = prorate(amount, categories);
    categories
        .iter()
        .zip(shares)
        .map(|(category, share)| {
            let mut category = category.clone();
            category.allocated_amount += share;
            category.remaining_amount += share;
            category
        })
        .collect()
}
