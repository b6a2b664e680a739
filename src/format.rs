//! Human-readable rendering of median values.

/// Shown instead of a number when a median is undefined (empty segment).
pub const NOT_AVAILABLE: &str = "N/A";

/// Round to a whole number, ties to even (`12.5 → 12`, `13.5 → 14`).
fn whole(value: f64) -> f64 {
    let rounded = value.round_ties_even();
    // Avoid printing "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Insert comma thousands separators into a whole number.
fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", whole(value).abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if whole(value) < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// `Some(12.5)` → `"12 days"`.
pub fn format_days(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.0} days", whole(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `Some(3.0)` → `"3 orders"`.
pub fn format_orders(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.0} orders", whole(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `Some(1234.5)` → `"$1,234"`; negatives keep the sign after the symbol.
pub fn format_currency(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${}", group_thousands(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}
