//! Total ordering over Big-O expressions.
//!
//! Reduces a factor vector to a scalar weight (higher = worse) and orders
//! two expressions by it. The constants encode the conventional chain
//! `O(1) < O(log n) < O(sqrt n) < O(n) < O(n log n) < O(n^2) < O(n^3)
//! < O(2^n) < O(n!)` while staying continuous enough to rank composite
//! expressions like `O(n*k)` vs `O(n*k log k)` without a lookup table.
//!
//! This is a total preorder, not a proof system: it never fails on
//! malformed input and is monotonic along the dominance chain.

use std::cmp::Ordering;

use crate::core::complexity::{FactorVector, canonical_text, parse};

/// Scalar weight of a factor vector; higher means asymptotically worse.
pub fn weight(factors: &FactorVector) -> f64
{
    // Strict dominance tiers first
    if factors.factorial
    {
        return 1000.0;
    }
    if factors.exponential
    {
        return 500.0;
    }
    if factors.cubic
    {
        return 100.0;
    }
    if factors.quadratic
    {
        return 50.0;
    }

    // Pure O(1)
    if factors.constant && factors.linear_count == 0
    {
        return 0.1;
    }

    // Each linear variable multiplies cost: O(n) = 10, O(n*k) = 20.
    // Logs sit between a linear factor and the next power; sqrt sits
    // between constant and linear.
    let mut weight = f64::from(factors.linear_count) * 10.0
        + f64::from(factors.log_count) * 3.0
        + f64::from(factors.sqrt_count) * 5.0;

    // Pure-log expressions collapse below sqrt: O(log n) < O(sqrt n) < O(n)
    if factors.linear_count == 0 && factors.log_count > 0
    {
        weight = f64::from(factors.log_count) * 2.0;
    }

    // Floor at 0.1 so nothing ties a true constant by accident
    if weight > 0.0 { weight } else { 0.1 }
}

/// Order two Big-O strings; `Less` means `a` is asymptotically better.
///
/// Textually identical expressions (after whitespace/case folding and
/// mapping every `k`/`l`/`m` to `n`) are `Equal` without parsing.
pub fn compare_complexity(
    a: &str,
    b: &str,
) -> Ordering
{
    let ca = canonical_text(a);
    let cb = canonical_text(b);

    if ca == cb
    {
        return Ordering::Equal;
    }

    // Variable-naming invariance: the substitution also hits the `l` in
    // `log`, but both sides get the same treatment so equality holds
    if unify_vars(&ca) == unify_vars(&cb)
    {
        return Ordering::Equal;
    }

    let wa = weight(&parse(&ca));
    let wb = weight(&parse(&cb));
    tracing::debug!(a = %ca, b = %cb, wa, wb, "complexity comparison");

    wa.total_cmp(&wb)
}

/// Order two solutions by (time, then space) complexity.
///
/// Time dominates; space only breaks exact time ties. A solution with
/// asymptotically better time always outranks one with only better space.
pub fn compare_overall(
    time_a: &str,
    space_a: &str,
    time_b: &str,
    space_b: &str,
) -> Ordering
{
    compare_complexity(time_a, time_b).then_with(|| compare_complexity(space_a, space_b))
}

/// Map all recognized variable letters onto `n` for textual equality.
fn unify_vars(c: &str) -> String
{
    c.chars()
        .map(|ch| match ch
        {
            'k' | 'l' | 'm' => 'n',
            other => other,
        })
        .collect()
}
