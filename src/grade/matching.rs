#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Lenient comparisons shared by the assignment checks: names against synonym
//! lists, declared types against alias sets, and printed numbers against
//! expected values.

use std::sync::LazyLock;

use regex::Regex;

/// Largest absolute difference at which a printed number still matches an
/// expected value.
pub const TOLERANCE: f64 = 0.02;

/// Slack for binary floating point when comparing against [`TOLERANCE`].
const FLOAT_SLACK: f64 = 1e-9;

/// Floating point types, boxed or not.
pub const NUMERIC_TYPES: &[&str] = &["double", "float", "Double", "Float"];

/// Integral types, boxed or not.
pub const INTEGER_TYPES: &[&str] = &["int", "Integer", "long", "Long"];

/// String types.
pub const STRING_TYPES: &[&str] = &["String", "string"];

/// Digits with optional thousands separators and a fractional part.
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*\.\d+").expect("number pattern is valid"));

/// A plain decimal literal, used for decimal-place checks.
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+").expect("decimal pattern is valid"));

/// A decimal literal right after a dollar sign.
static DOLLAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*([\d,]*\d\.\d+)").expect("dollar pattern is valid"));

/// Strips `java.lang.` and type arguments so `java.lang.Double` reads `Double`.
fn simple_type(declared: &str) -> &str {
    let base = declared.split('<').next().unwrap_or(declared).trim();
    base.strip_prefix("java.lang.").unwrap_or(base)
}

/// `double`, `float`, or their boxed forms
pub fn is_numeric_type(declared: &str) -> bool {
    NUMERIC_TYPES.contains(&simple_type(declared))
}

/// `int`, `long`, or their boxed forms
pub fn is_integer_type(declared: &str) -> bool {
    INTEGER_TYPES.contains(&simple_type(declared))
}

/// `String`
pub fn is_string_type(declared: &str) -> bool {
    STRING_TYPES.contains(&simple_type(declared))
}

/// A list type such as `ArrayList<LoanAccount>` or `List<LoanAccount>`
pub fn is_list_type(declared: &str) -> bool {
    let lower = declared.to_lowercase();
    lower.contains("list") || lower.ends_with("[]")
}

/// Lowercases and drops underscores, so `first_name` and `FirstName` agree.
fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether `name` equals one of `synonyms`, ignoring case and underscores.
pub fn name_matches(name: &str, synonyms: &[&str]) -> bool {
    let folded = fold_name(name);
    synonyms.iter().any(|s| fold_name(s) == folded)
}

/// Whether any of `names` matches one of `synonyms`.
pub fn any_name_matches<'a>(names: impl IntoIterator<Item = &'a str>, synonyms: &[&str]) -> bool {
    names.into_iter().any(|name| name_matches(name, synonyms))
}

/// Whether `name` contains every one of `fragments`, ignoring case.
pub fn name_contains_all(name: &str, fragments: &[&str]) -> bool {
    let folded = fold_name(name);
    fragments.iter().all(|f| folded.contains(&fold_name(f)))
}

/// Every decimal number printed in `text`. `1,067.54` yields both `1067.54`
/// and `67.54`, since a comma may be a separator or punctuation.
pub fn numbers_in(text: &str) -> Vec<f64> {
    let mut out = Vec::new();
    for m in NUMBER_RE.find_iter(text) {
        let raw = m.as_str().trim_end_matches(',');
        if let Ok(value) = raw.replace(',', "").parse::<f64>() {
            out.push(value);
        }
        if let Some((_, tail)) = raw.rsplit_once(',')
            && let Ok(value) = tail.parse::<f64>()
        {
            out.push(value);
        }
    }
    out
}

/// Whether two values agree within `tolerance`.
pub fn within(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance + FLOAT_SLACK
}

/// Whether `literal` occurs in `text` as a whole number, not as part of a
/// longer one (`85.47` does not occur in `185.47`).
fn contains_standalone(text: &str, literal: &str) -> bool {
    let is_digit = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());
    text.match_indices(literal).any(|(at, _)| {
        let before = text[..at].chars().next_back();
        let after = text[at + literal.len()..].chars().next();
        !is_digit(before) && !is_digit(after)
    })
}

/// Whether `output` prints `expected`, either within `tolerance` or as the
/// literal two-decimal string.
pub fn contains_value(output: &str, expected: f64, tolerance: f64) -> bool {
    contains_standalone(output, &format!("{expected:.2}"))
        || numbers_in(output)
            .into_iter()
            .any(|n| within(n, expected, tolerance))
}

/// How many of `expected` appear in `output` under [`contains_value`].
pub fn count_values(output: &str, expected: &[f64], tolerance: f64) -> usize {
    expected
        .iter()
        .filter(|e| contains_value(output, **e, tolerance))
        .count()
}

/// Decimal literals as printed, for checking the number of decimal places.
pub fn decimal_literals(text: &str) -> Vec<&str> {
    DECIMAL_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Decimal literals that follow a `$`.
pub fn dollar_amounts(text: &str) -> Vec<&str> {
    DOLLAR_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Whether a decimal literal has exactly two digits after the point.
pub fn has_two_decimals(literal: &str) -> bool {
    literal
        .rsplit_once('.')
        .is_some_and(|(_, frac)| frac.len() == 2)
}

/// Strictly more than half of `total` was found.
pub fn is_majority(found: usize, total: usize) -> bool {
    found > total / 2
}

/// A deduction proportional to what is missing: `missing / total` of `max`,
/// rounded down. Never decreases as `missing` grows.
pub fn proportional_deduction(missing: usize, total: usize, max: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let missing = missing.min(total) as u64;
    u32::try_from(missing * u64::from(max) / total as u64).unwrap_or(max)
}

/// A fixed deduction per missing value, capped at `max`.
pub fn per_value_deduction(missing: usize, per_value: u32, max: u32) -> u32 {
    u32::try_from(missing)
        .unwrap_or(u32::MAX)
        .saturating_mul(per_value)
        .min(max)
}
