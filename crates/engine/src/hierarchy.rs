//! Hierarchy assembly — classify every candidate, partition into buckets,
//! resolve the grand total, then cross-check it against the section sum.

use crate::classify::classify;
use crate::config::ToleranceConfig;
use crate::model::{
    ClassifiedTotal, ExtractedTotal, TotalHierarchy, TotalLevel, VerificationStatus,
};
use crate::money::format_pesos;
use crate::resolver::{resolve_grand_total, GrandTotalSource};

/// Build the resolved total structure for one bill.
///
/// Every candidate lands in exactly one bucket. A candidate promoted by the
/// fallback inference moves out of its classified bucket; an explicit
/// grand-total candidate that loses the scoring is demoted to the
/// section-total bucket so nothing is dropped.
pub fn build_total_hierarchy(
    totals: &[ExtractedTotal],
    tolerance: &ToleranceConfig,
) -> TotalHierarchy {
    let mut classified: Vec<ClassifiedTotal> = Vec::with_capacity(totals.len());
    for (i, total) in totals.iter().enumerate() {
        let (level, confidence) = classify(&total.label, total.amount_centavos, &totals[..i]);
        classified.push(ClassifiedTotal {
            total: total.clone(),
            level,
            confidence,
        });
    }

    let explicit_grand: Vec<ClassifiedTotal> = classified
        .iter()
        .filter(|c| c.level == TotalLevel::GrandTotal)
        .cloned()
        .collect();
    let sections_as_classified: Vec<ClassifiedTotal> = classified
        .iter()
        .filter(|c| c.level == TotalLevel::SectionTotal)
        .cloned()
        .collect();
    // Captured before any promotion: the cross-check below must not let a
    // promoted candidate confirm itself.
    let section_sum: i64 = sections_as_classified
        .iter()
        .map(|c| c.total.amount_centavos)
        .sum();

    let resolution = resolve_grand_total(
        &explicit_grand,
        &classified,
        &sections_as_classified,
        tolerance,
    );
    let mut notes = resolution.notes;

    let grand_position = resolution
        .selected
        .as_ref()
        .map(|c| c.total.position);

    let mut line_items = Vec::new();
    let mut category_subtotals = Vec::new();
    let mut section_totals = Vec::new();
    for candidate in classified {
        if Some(candidate.total.position) == grand_position {
            continue;
        }
        match candidate.level {
            TotalLevel::LineItem => line_items.push(candidate),
            TotalLevel::CategorySubtotal => category_subtotals.push(candidate),
            TotalLevel::SectionTotal => section_totals.push(candidate),
            TotalLevel::GrandTotal => {
                // Lost the scoring; keep it visible as a major total.
                section_totals.push(ClassifiedTotal {
                    level: TotalLevel::SectionTotal,
                    ..candidate
                });
            }
        }
    }

    let mut status = match resolution.source {
        GrandTotalSource::Unresolved => VerificationStatus::Failed,
        GrandTotalSource::Single => VerificationStatus::Verified,
        GrandTotalSource::Scored { .. } => VerificationStatus::Uncertain,
        GrandTotalSource::SectionInference | GrandTotalSource::LargestFallback => {
            VerificationStatus::LikelyCorrect
        }
    };

    // Independent cross-check: the section sum can confirm the grand total
    // and upgrade the status, never downgrade it. A large mismatch is
    // surfaced for the caller, not auto-corrected here.
    if let Some(grand) = &resolution.selected {
        if sections_as_classified.len() >= 2 {
            let delta = (section_sum - grand.total.amount_centavos).abs();
            if delta <= tolerance.section_sum_tight_centavos {
                status = VerificationStatus::Verified;
                notes.push(format!(
                    "section totals sum to {} and confirm the grand total {}",
                    format_pesos(section_sum),
                    format_pesos(grand.total.amount_centavos),
                ));
            } else if delta > tolerance.section_sum_loose_centavos {
                notes.push(format!(
                    "warning: section totals sum to {} but the grand total is {} (difference {}); keeping the stated grand total",
                    format_pesos(section_sum),
                    format_pesos(grand.total.amount_centavos),
                    format_pesos(delta),
                ));
            }
        }
    }

    TotalHierarchy {
        line_items,
        category_subtotals,
        section_totals,
        grand_total: resolution.selected,
        status,
        notes,
    }
}
