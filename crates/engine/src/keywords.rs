//! Canonical label keyword lists for total classification.
//!
//! Matching is case-insensitive substring search against the lower-cased
//! label. The lists are load-bearing: classification priority depends on
//! grand-total phrasing being checked before section phrasing, and on no
//! grand-total keyword hiding inside a section keyword.

/// Labels that name the bill-wide total before deductions.
pub const GRAND_TOTAL_KEYWORDS: &[&str] = &[
    "grand total",
    "grand total:",
    "total amount due",
    "total amount",
    "amount due",
    "amount payable",
    "final total",
    "final amount",
    "total balance",
    "balance due",
    "net amount due",
    "please pay this amount",
    "patient responsibility",
    "due from patient",
    "patient balance",
    "total due",
    "payable amount",
    "kabuuang halaga",
    "total na babayaran",
];

/// Labels that close one charge section, not the whole bill.
pub const SECTION_TOTAL_KEYWORDS: &[&str] = &[
    "total hospital charges",
    "hospital charges total",
    "total professional fees",
    "professional fees total",
    "total ward charges",
    "total room charges",
    "subtotal",
    "sub-total",
    "sub total",
    "charges subtotal",
];

/// Category indicator words. Only mark a category subtotal when the label
/// also contains the literal word "total".
pub const INTERMEDIATE_TOTAL_INDICATORS: &[&str] = &[
    "hospital charges",
    "professional fee",
    "room and board",
    "drugs and medicine",
    "laboratory",
    "misc",
    "supplies",
    "ward",
];

/// Case-insensitive substring match against a keyword list.
pub fn label_matches(label: &str, keywords: &[&str]) -> bool {
    let lower = label.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grand_keywords_never_substring_of_section_keywords() {
        // If a grand keyword could hide inside a section keyword, the
        // classifier's rule ordering would stop being a tie-break.
        for g in GRAND_TOTAL_KEYWORDS {
            for s in SECTION_TOTAL_KEYWORDS {
                assert!(!s.contains(g), "\"{g}\" is a substring of \"{s}\"");
            }
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(label_matches("GRAND TOTAL", GRAND_TOTAL_KEYWORDS));
        assert!(label_matches("Sub-Total", SECTION_TOTAL_KEYWORDS));
        assert!(label_matches("Kabuuang Halaga", GRAND_TOTAL_KEYWORDS));
        assert!(!label_matches("Room and Board", SECTION_TOTAL_KEYWORDS));
    }

    #[test]
    fn section_phrases_do_not_match_grand_list() {
        assert!(!label_matches("Total Hospital Charges", GRAND_TOTAL_KEYWORDS));
        assert!(!label_matches("Professional Fees Total", GRAND_TOTAL_KEYWORDS));
    }
}
