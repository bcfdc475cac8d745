//! Money helpers. The engine works in integer centavos; peso decimals only
//! exist at the extraction and report boundaries.

/// Convert a peso decimal (as printed on a bill) to centavos.
pub fn centavos_from_pesos(pesos: f64) -> i64 {
    (pesos * 100.0).round() as i64
}

/// Centavos back to a plain peso decimal for JSON output.
pub fn pesos(centavos: i64) -> f64 {
    centavos as f64 / 100.0
}

/// Human display with digit grouping: `₱1,616.02`.
pub fn format_pesos(centavos: i64) -> String {
    let sign = if centavos < 0 { "-" } else { "" };
    let abs = centavos.unsigned_abs();
    let frac = abs % 100;

    let digits = (abs / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}\u{20B1}{grouped}.{frac:02}")
}
