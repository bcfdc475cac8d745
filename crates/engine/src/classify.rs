//! Total classification — labels one extracted candidate with its level
//! in the bill's total hierarchy.

use crate::keywords::{
    label_matches, GRAND_TOTAL_KEYWORDS, INTERMEDIATE_TOTAL_INDICATORS, SECTION_TOTAL_KEYWORDS,
};
use crate::model::{ExtractedTotal, TotalLevel};

pub const CONFIDENCE_GRAND_KEYWORD: u8 = 90;
pub const CONFIDENCE_SECTION_KEYWORD: u8 = 85;
pub const CONFIDENCE_CATEGORY: u8 = 80;
pub const CONFIDENCE_BARE_TOTAL_GRAND: u8 = 75;
pub const CONFIDENCE_BARE_TOTAL_SECTION: u8 = 70;
pub const CONFIDENCE_LINE_ITEM: u8 = 50;
pub const CONFIDENCE_UNCLASSIFIABLE: u8 = 30;

/// Classify one candidate. Pure function of its inputs.
///
/// `prior` is every candidate that appeared before this one in document
/// order; the bare-"total" rule compares against the largest amount among
/// them. Rules are checked in priority order, first match wins, so explicit
/// grand-total phrasing always outranks section phrasing.
pub fn classify(label: &str, amount_centavos: i64, prior: &[ExtractedTotal]) -> (TotalLevel, u8) {
    let trimmed = label.trim();
    if trimmed.chars().count() < 2 {
        // Garbled OCR fragment; nothing to match on.
        return (TotalLevel::LineItem, CONFIDENCE_UNCLASSIFIABLE);
    }
    let lower = trimmed.to_lowercase();

    if label_matches(&lower, GRAND_TOTAL_KEYWORDS) {
        return (TotalLevel::GrandTotal, CONFIDENCE_GRAND_KEYWORD);
    }

    if label_matches(&lower, SECTION_TOTAL_KEYWORDS) {
        return (TotalLevel::SectionTotal, CONFIDENCE_SECTION_KEYWORD);
    }

    if lower.contains("total") && label_matches(&lower, INTERMEDIATE_TOTAL_INDICATORS) {
        return (TotalLevel::CategorySubtotal, CONFIDENCE_CATEGORY);
    }

    if lower == "total" || lower == "total:" {
        // A bare "Total" closing the document is grand only when it repeats
        // the largest amount already seen; otherwise it closes a section.
        let max_prior = prior.iter().map(|t| t.amount_centavos).max();
        return if max_prior == Some(amount_centavos) {
            (TotalLevel::GrandTotal, CONFIDENCE_BARE_TOTAL_GRAND)
        } else {
            (TotalLevel::SectionTotal, CONFIDENCE_BARE_TOTAL_SECTION)
        };
    }

    (TotalLevel::LineItem, CONFIDENCE_LINE_ITEM)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tot(label: &str, amount_centavos: i64, position: usize) -> ExtractedTotal {
        ExtractedTotal {
            label: label.into(),
            amount_centavos,
            position,
        }
    }

    #[test]
    fn grand_keywords_classify_grand() {
        for label in ["GRAND TOTAL", "Total Amount Due", "Please pay this amount", "Kabuuang Halaga"] {
            let (level, _) = classify(label, 2_504_400, &[]);
            assert_eq!(level, TotalLevel::GrandTotal, "label {label:?}");
        }
    }

    #[test]
    fn section_keywords_outrank_bare_total_heuristics() {
        let (level, _) = classify("Total Hospital Charges", 2_004_400, &[]);
        assert_eq!(level, TotalLevel::SectionTotal);
        let (level, _) = classify("Sub-Total", 500_000, &[]);
        assert_eq!(level, TotalLevel::SectionTotal);
    }

    #[test]
    fn category_needs_indicator_and_the_word_total() {
        let (level, _) = classify("Laboratory Total", 120_000, &[]);
        assert_eq!(level, TotalLevel::CategorySubtotal);
        // Indicator word alone is a plain charge line.
        let (level, _) = classify("Laboratory", 120_000, &[]);
        assert_eq!(level, TotalLevel::LineItem);
    }

    #[test]
    fn bare_total_matching_running_max_is_grand() {
        let prior = vec![tot("Room", 100_000, 0), tot("Total Amount Due", 2_504_400, 1)];
        let (level, _) = classify("Total", 2_504_400, &prior);
        assert_eq!(level, TotalLevel::GrandTotal);
    }

    #[test]
    fn bare_total_below_running_max_is_section() {
        let prior = vec![tot("Room", 100_000, 0), tot("Drugs", 2_504_400, 1)];
        let (level, _) = classify("Total:", 600_000, &prior);
        assert_eq!(level, TotalLevel::SectionTotal);
    }

    #[test]
    fn bare_total_with_no_prior_candidates_is_section() {
        let (level, _) = classify("Total", 2_504_400, &[]);
        assert_eq!(level, TotalLevel::SectionTotal);
    }

    #[test]
    fn short_or_garbled_labels_fall_through_to_line_item() {
        let (level, confidence) = classify("x", 90_000, &[]);
        assert_eq!(level, TotalLevel::LineItem);
        assert_eq!(confidence, CONFIDENCE_UNCLASSIFIABLE);
        let (level, _) = classify("  ", 90_000, &[]);
        assert_eq!(level, TotalLevel::LineItem);
    }

    #[test]
    fn ordinary_charge_lines_are_line_items() {
        let (level, confidence) = classify("2D Echo with Doppler", 350_000, &[]);
        assert_eq!(level, TotalLevel::LineItem);
        assert_eq!(confidence, CONFIDENCE_LINE_ITEM);
    }
}
