//! OCR free-text line-item parsing.
//!
//! One charge per line: description text followed by a trailing amount.
//! Lines carrying total or deduction phrasing are excluded so declared
//! totals never double-count into the independent line-item sum.

use regex::Regex;

use billaudit_engine::keywords::{label_matches, GRAND_TOTAL_KEYWORDS};
use billaudit_engine::money::centavos_from_pesos;

/// Phrases that mark a deduction row rather than a charge.
const DEDUCTION_MARKERS: &[&str] = &[
    "less",
    "discount",
    "payment",
    "deposit",
    "philhealth",
    "hmo",
    "senior citizen",
    "pwd",
];

#[derive(Debug, Clone)]
pub struct LineCharge {
    pub description: String,
    pub amount_centavos: i64,
}

#[derive(Debug)]
pub struct LineItemExtraction {
    pub charges: Vec<LineCharge>,
    /// The independent sum the discrepancy check runs against.
    pub total_centavos: i64,
    /// Lines excluded as totals or deductions (not parse failures).
    pub excluded_lines: usize,
}

/// Parse raw OCR text into individual charges.
pub fn parse_line_items(text: &str) -> LineItemExtraction {
    // Description, then whitespace, then a trailing peso amount with
    // optional thousands grouping and an optional currency mark.
    let line_re = Regex::new(
        r"^(.*?[^\d\s.,])\s+(?:PHP\s*|P\s*|\u{20B1}\s*)?((?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?)$",
    )
    .unwrap();

    let mut charges = Vec::new();
    let mut excluded = 0;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(caps) = line_re.captures(line) else {
            continue;
        };

        let description = caps[1].trim_end_matches([':', '.', '\u{2026}']).trim();
        if is_total_or_deduction(description) {
            excluded += 1;
            continue;
        }

        let Ok(amount) = caps[2].replace(',', "").parse::<f64>() else {
            continue;
        };
        if amount <= 0.0 {
            continue;
        }

        charges.push(LineCharge {
            description: description.to_string(),
            amount_centavos: centavos_from_pesos(amount),
        });
    }

    let total_centavos = charges.iter().map(|c| c.amount_centavos).sum();
    LineItemExtraction {
        charges,
        total_centavos,
        excluded_lines: excluded,
    }
}

fn is_total_or_deduction(description: &str) -> bool {
    // Every section-total keyword contains "total", so the bare substring
    // check covers section rows; the grand list catches "Amount Due" and
    // friends that do not.
    let lower = description.to_lowercase();
    lower.contains("total")
        || label_matches(&lower, GRAND_TOTAL_KEYWORDS)
        || DEDUCTION_MARKERS.iter().any(|m| lower.contains(m))
}
