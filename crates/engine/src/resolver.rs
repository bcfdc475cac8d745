//! Grand-total selection — scoring across competing candidates, plus the
//! fallback inference used when no label named the grand total outright.
//!
//! The weights are a tunable policy, not a correctness proof; they are
//! named so the policy can be adjusted and property-tested independently
//! of the selection shape.

use crate::config::ToleranceConfig;
use crate::keywords::{label_matches, GRAND_TOTAL_KEYWORDS, SECTION_TOTAL_KEYWORDS};
use crate::model::{ClassifiedTotal, TotalLevel};
use crate::money::format_pesos;

pub const SCORE_GRAND_KEYWORD: i32 = 100;
pub const SCORE_SECTION_KEYWORD: i32 = -50;
pub const SCORE_MAX_AMOUNT: i32 = 30;
pub const SCORE_LAST_POSITION: i32 = 20;
pub const SCORE_SECTION_SUM_TIGHT: i32 = 50;
pub const SCORE_SECTION_SUM_LOOSE: i32 = 25;
pub const SCORE_BELOW_HALF_MAX: i32 = -40;

/// Confidence when the largest amount is promoted with section-sum backing.
pub const CONFIDENCE_SECTION_INFERENCE: u8 = 75;
/// Confidence when the largest amount is promoted as a last resort.
pub const CONFIDENCE_LARGEST_FALLBACK: u8 = 60;

/// How the resolved grand total was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrandTotalSource {
    /// Exactly one explicitly classified candidate.
    Single,
    /// Chosen by scoring among several explicit candidates.
    Scored { candidates: usize },
    /// No explicit candidate; the largest total matched the section sum.
    SectionInference,
    /// No explicit candidate; the largest total promoted with low confidence.
    LargestFallback,
    /// Nothing to promote.
    Unresolved,
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub selected: Option<ClassifiedTotal>,
    pub source: GrandTotalSource,
    pub notes: Vec<String>,
}

/// Score one explicit grand-total candidate against the full candidate set.
pub fn score_candidate(
    candidate: &ClassifiedTotal,
    all: &[ClassifiedTotal],
    section_totals: &[ClassifiedTotal],
    tolerance: &ToleranceConfig,
) -> i32 {
    let mut score = 0;

    if label_matches(&candidate.total.label, GRAND_TOTAL_KEYWORDS) {
        score += SCORE_GRAND_KEYWORD;
    }
    // Defensive: a pre-classified section label that slipped in.
    if label_matches(&candidate.total.label, SECTION_TOTAL_KEYWORDS) {
        score += SCORE_SECTION_KEYWORD;
    }

    let max_amount = all.iter().map(|t| t.total.amount_centavos).max().unwrap_or(0);
    if candidate.total.amount_centavos == max_amount {
        score += SCORE_MAX_AMOUNT;
    }

    let max_position = all.iter().map(|t| t.total.position).max().unwrap_or(0);
    if candidate.total.position == max_position {
        score += SCORE_LAST_POSITION;
    }

    if !section_totals.is_empty() {
        let section_sum: i64 = section_totals.iter().map(|t| t.total.amount_centavos).sum();
        let delta = (candidate.total.amount_centavos - section_sum).abs();
        // Mutually exclusive: the tight bonus wins, never stacked.
        if delta <= tolerance.section_sum_tight_centavos {
            score += SCORE_SECTION_SUM_TIGHT;
        } else if delta <= tolerance.section_sum_loose_centavos {
            score += SCORE_SECTION_SUM_LOOSE;
        }
    }

    if candidate.total.amount_centavos * 2 < max_amount {
        score += SCORE_BELOW_HALF_MAX;
    }

    score
}

/// Select the single best grand total, or infer one when nothing was
/// explicitly classified. Never fails: an unresolvable bill is represented
/// as `selected: None`, which the hierarchy maps to a failed status.
pub fn resolve_grand_total(
    candidates: &[ClassifiedTotal],
    all: &[ClassifiedTotal],
    section_totals: &[ClassifiedTotal],
    tolerance: &ToleranceConfig,
) -> Resolution {
    match candidates.len() {
        0 => infer_grand_total(all, section_totals, tolerance),
        1 => Resolution {
            selected: Some(candidates[0].clone()),
            source: GrandTotalSource::Single,
            notes: Vec::new(),
        },
        n => {
            // First candidate with the maximum score wins; candidate order
            // is document order, so the tie-break is stable.
            let mut best = &candidates[0];
            let mut best_score = score_candidate(best, all, section_totals, tolerance);
            for candidate in &candidates[1..] {
                let score = score_candidate(candidate, all, section_totals, tolerance);
                if score > best_score {
                    best = candidate;
                    best_score = score;
                }
            }
            Resolution {
                selected: Some(best.clone()),
                source: GrandTotalSource::Scored { candidates: n },
                notes: vec![format!(
                    "{n} competing grand-total labels; selected \"{}\" ({}) with score {best_score}",
                    best.total.label,
                    format_pesos(best.total.amount_centavos),
                )],
            }
        }
    }
}

/// Fallback when the classifier produced zero grand-total candidates.
///
/// Requires at least two section totals: with fewer there is no independent
/// arithmetic to infer from, and the hierarchy is marked failed instead.
fn infer_grand_total(
    all: &[ClassifiedTotal],
    section_totals: &[ClassifiedTotal],
    tolerance: &ToleranceConfig,
) -> Resolution {
    if section_totals.len() < 2 {
        return Resolution {
            selected: None,
            source: GrandTotalSource::Unresolved,
            notes: Vec::new(),
        };
    }

    // First occurrence of the largest amount, for a stable tie-break.
    let mut largest = &all[0];
    for candidate in &all[1..] {
        if candidate.total.amount_centavos > largest.total.amount_centavos {
            largest = candidate;
        }
    }

    let section_sum: i64 = section_totals.iter().map(|t| t.total.amount_centavos).sum();
    let delta = (largest.total.amount_centavos - section_sum).abs();

    if delta <= tolerance.section_sum_loose_centavos {
        let promoted = ClassifiedTotal {
            total: largest.total.clone(),
            level: TotalLevel::GrandTotal,
            confidence: CONFIDENCE_SECTION_INFERENCE,
        };
        Resolution {
            selected: Some(promoted),
            source: GrandTotalSource::SectionInference,
            notes: vec![format!(
                "no explicit grand-total label; promoted \"{}\" ({}) because it matches the section-total sum {}",
                largest.total.label,
                format_pesos(largest.total.amount_centavos),
                format_pesos(section_sum),
            )],
        }
    } else {
        let promoted = ClassifiedTotal {
            total: largest.total.clone(),
            level: TotalLevel::GrandTotal,
            confidence: CONFIDENCE_LARGEST_FALLBACK,
        };
        Resolution {
            selected: Some(promoted),
            source: GrandTotalSource::LargestFallback,
            notes: vec![format!(
                "warning: no explicit grand-total label and section totals ({}) do not confirm one; promoted largest amount \"{}\" ({}) at low confidence",
                format_pesos(section_sum),
                largest.total.label,
                format_pesos(largest.total.amount_centavos),
            )],
        }
    }
}
