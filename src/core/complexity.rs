//! Big-O expression parsing.
//!
//! Decomposes loose, free-text complexity notation (`"O(n log n)"`, `"N*K"`,
//! `"O(2^n)"`) into a structured factor vector. The input ultimately comes
//! from model output, so parsing is permissive: unknown tokens are ignored
//! and the parse never fails.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Base-raised-to-a-variable patterns (`2^n`, `10^k`, `n^n`)
static EXPONENTIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\^[nkml]|[nkml]\^[nkml]").unwrap());

/// Explicit numeric exponents (`^2`, `^3`, ...)
static POWER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\^(\d+)").unwrap());

/// A log factor, optionally naming its variable (`log`, `logn`, `logk`)
static LOG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"log[nkml]?").unwrap());

/// A sqrt factor with optional parentheses (`sqrt(n)`, `sqrtn`, `sqrt`)
static SQRT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"sqrt\(?[nkml]?\)?").unwrap());

/// Variable letters counted as independent linear factors
static LINEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[nkml]").unwrap());

/// Parsed decomposition of a Big-O expression into growth components.
///
/// Exactly one of {factorial, exponential, cubic, quadratic, the
/// log/sqrt/linear/constant combination} determines the dominant class;
/// factorial dominates exponential dominates cubic dominates quadratic
/// dominates everything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorVector
{
    /// Pure O(1) residual (also set for fully-unknown input)
    pub constant: bool,
    /// Number of multiplicative log factors
    pub log_count: u32,
    /// Number of multiplicative sqrt factors
    pub sqrt_count: u32,
    /// Number of independent linear variables (distinct uses of n/k/m/l)
    pub linear_count: u32,
    /// Explicit `^2` exponent present
    pub quadratic: bool,
    /// Explicit `^3` (or higher) exponent present
    pub cubic: bool,
    /// Base-to-the-variable growth (`2^n`, `n^n`)
    pub exponential: bool,
    /// A `!` anywhere in the expression
    pub factorial: bool,
}

/// Parse a loose Big-O string into its factor vector.
///
/// Case- and whitespace-insensitive; the `O(...)` wrapper is optional.
/// Multiple distinct variable letters are independent multiplicative
/// linear factors (`"n*k"` -> `linear_count = 2`), reflecting that nested
/// loops over different bounds multiply cost.
pub fn parse(expression: &str) -> FactorVector
{
    let c = canonical_text(expression);
    let mut factors = FactorVector::default();

    // Factorial and exponential dominate everything else; stop early
    if c.contains('!')
    {
        factors.factorial = true;
        return factors;
    }
    if EXPONENTIAL_RE.is_match(&c)
    {
        factors.exponential = true;
        return factors;
    }

    // Explicit polynomial powers; counting continues below, but these
    // flags dominate at weighing time
    if let Some(caps) = POWER_RE.captures(&c)
    {
        let power: u32 = caps[1]
            .parse()
            .unwrap_or(u32::MAX);
        if power >= 3
        {
            factors.cubic = true;
        }
        else if power == 2
        {
            factors.quadratic = true;
        }
    }

    // Count log factors, then strip them so their variable letters are
    // not double-counted as linear
    factors.log_count = LOG_RE
        .find_iter(&c)
        .count() as u32;
    let no_log = LOG_RE.replace_all(&c, "");

    // Same for sqrt factors
    factors.sqrt_count = SQRT_RE
        .find_iter(&no_log)
        .count() as u32;
    let no_sqrt = SQRT_RE.replace_all(&no_log, "");

    // Whatever variable letters remain are independent linear factors
    factors.linear_count = LINEAR_RE
        .find_iter(&no_sqrt)
        .count() as u32;

    // Nothing recognized at all means a constant-class residual
    if factors.linear_count == 0
        && factors.log_count == 0
        && factors.sqrt_count == 0
        && !factors.quadratic
        && !factors.cubic
    {
        factors.constant = true;
    }

    factors
}

/// Strip all whitespace, casefold, and drop an enclosing `O( ... )` wrapper.
pub(crate) fn canonical_text(expression: &str) -> String
{
    let mut c: String = expression
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    if c.starts_with("o(") && c.ends_with(')')
    {
        c = c[2..c.len() - 1].to_string();
    }

    c
}
