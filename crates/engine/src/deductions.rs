//! Deduction validation — every amount that reduces the balance due must
//! be backed by visible documentation. An undocumented deduction is never
//! assumed valid; the conservative default is full patient payment.

use crate::model::{
    CoverageStatus, DeductionItem, DeductionType, DeductionValidation, FinancialFigures,
};
use crate::money::format_pesos;

/// Validate the bill's deductions. Never fails: a bill with no deduction
/// data at all passes trivially with zero totals.
pub fn validate_deductions(figures: &FinancialFigures) -> DeductionValidation {
    let mut items = if figures.deductions.is_empty() {
        synthesize_items(figures)
    } else {
        figures.deductions.clone()
    };

    // Invariant: a positive undocumented amount always carries an issue
    // explaining the deficiency, even when the input left it blank.
    for item in &mut items {
        if item.amount_centavos > 0 && !item.has_documentation && item.verification_issue.is_none()
        {
            item.verification_issue = Some(default_issue(item.deduction_type));
        }
    }

    let mut verified = 0i64;
    let mut unverified = 0i64;
    let mut issues = Vec::new();
    for item in &items {
        if item.is_verified() {
            verified += item.amount_centavos;
        } else {
            unverified += item.amount_centavos;
            if item.amount_centavos > 0 {
                let issue = item
                    .verification_issue
                    .as_deref()
                    .unwrap_or("no supporting reference");
                issues.push(format!(
                    "{} of {} is unverified: {}",
                    item.deduction_type,
                    format_pesos(item.amount_centavos),
                    issue,
                ));
            }
        }
    }

    let coverage_status = coverage_status(figures, &items);
    match coverage_status {
        CoverageStatus::Unconfirmed => issues.push(
            "coverage is not confirmed by any policy number, LOA or claim reference; \
             the default assumption is that the patient pays the full amount until proof is shown"
                .into(),
        ),
        CoverageStatus::Unknown => issues.push(
            "coverage amounts are stated but no matching deduction entry was found on the bill"
                .into(),
        ),
        CoverageStatus::Confirmed | CoverageStatus::NoCoverage => {}
    }

    // Intentionally strict: one unverified item of any amount fails the
    // whole validation.
    let validation_passed = issues.is_empty() && unverified == 0;

    DeductionValidation {
        total_deductions_centavos: verified + unverified,
        verified_deductions_centavos: verified,
        unverified_deductions_centavos: unverified,
        coverage_status,
        validation_passed,
        issues,
        items,
    }
}

/// No itemized breakdown on the bill: synthesize one undocumented item per
/// non-zero aggregate so nothing that reduces the balance goes unexamined.
fn synthesize_items(figures: &FinancialFigures) -> Vec<DeductionItem> {
    let mut items = Vec::new();
    if figures.discounts_centavos > 0 {
        items.push(DeductionItem::undocumented(
            DeductionType::Discount,
            figures.discounts_centavos,
            "Discount stated on bill",
        ));
    }
    if figures.payments_centavos > 0 {
        items.push(DeductionItem::undocumented(
            DeductionType::Payment,
            figures.payments_centavos,
            "Payment or deposit stated on bill",
        ));
    }
    if figures.hmo_coverage_centavos > 0 {
        items.push(DeductionItem::undocumented(
            DeductionType::Hmo,
            figures.hmo_coverage_centavos,
            "HMO coverage stated on bill",
        ));
    }
    if figures.philhealth_coverage_centavos > 0 {
        items.push(DeductionItem::undocumented(
            DeductionType::Philhealth,
            figures.philhealth_coverage_centavos,
            "PhilHealth coverage stated on bill",
        ));
    }
    items
}

fn default_issue(deduction_type: DeductionType) -> String {
    match deduction_type {
        DeductionType::Hmo => "No policy number or LOA visible — coverage not confirmed",
        DeductionType::Philhealth => {
            "No PhilHealth member ID or claim reference visible — coverage not confirmed"
        }
        DeductionType::Insurance => {
            "No policy or approval reference visible — coverage not confirmed"
        }
        DeductionType::Discount => {
            "No discount authorization or ID reference visible — discount not confirmed"
        }
        DeductionType::Payment | DeductionType::Deposit => {
            "No official receipt number visible — payment not confirmed"
        }
        DeductionType::Unknown => "No supporting document visible — deduction not confirmed",
    }
    .into()
}

fn coverage_status(figures: &FinancialFigures, items: &[DeductionItem]) -> CoverageStatus {
    if figures.hmo_coverage_centavos == 0 && figures.philhealth_coverage_centavos == 0 {
        return CoverageStatus::NoCoverage;
    }
    let coverage_items: Vec<&DeductionItem> = items
        .iter()
        .filter(|i| {
            matches!(
                i.deduction_type,
                DeductionType::Hmo | DeductionType::Philhealth | DeductionType::Insurance,
            )
        })
        .collect();
    if coverage_items.is_empty() {
        // Coverage amount stated but nothing itemized matches it. Should
        // not occur after synthesis; defensive for caller-supplied items.
        return CoverageStatus::Unknown;
    }
    if coverage_items.iter().all(|i| i.is_verified()) {
        CoverageStatus::Confirmed
    } else {
        CoverageStatus::Unconfirmed
    }
}
