//! # Money Utilities
//!
//! Currency amounts are carried as integer euro-cents (`i64`) so repeated
//! credits and debits stay exact. Fractional euros only exist at the remote
//! document boundary and in display strings.

/// Convert a fractional euro amount (e.g. from a remote JSON document) to cents.
pub fn cents_from_euros(euros: f64) -> i64 {
    (euros * 100.0).round() as i64
}

/// Convert cents back to fractional euros for display-oriented callers.
pub fn euros_from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Format a cent amount as a euro string, e.g. `7.50€`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}.{:02}€", sign, abs / 100, abs % 100)
}
