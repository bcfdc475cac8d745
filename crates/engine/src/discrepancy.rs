//! Discrepancy calculation — compares the independently computed line-item
//! sum against the bill's stated grand total.
//!
//! All three checks run and are recorded whether they pass or not; the
//! audit trail matters more than an early exit.

use crate::config::ToleranceConfig;
use crate::model::{
    AffectedParty, DiscrepancyResult, DiscrepancyStatus, TotalHierarchy, VerificationCheck,
    VerificationStatus,
};
use crate::money::format_pesos;

/// Pure, deterministic, no I/O.
pub fn calculate_discrepancy(
    calculated_centavos: i64,
    bill_grand_total_centavos: i64,
    hierarchy: &TotalHierarchy,
    tolerance: &ToleranceConfig,
) -> DiscrepancyResult {
    let discrepancy = (calculated_centavos - bill_grand_total_centavos).abs();
    let mut checks = Vec::with_capacity(3);

    let grand_ok = matches!(
        hierarchy.status,
        VerificationStatus::Verified | VerificationStatus::LikelyCorrect,
    );
    checks.push(VerificationCheck {
        name: "Grand Total Verification".into(),
        passed: grand_ok,
        details: format!("hierarchy status: {}", hierarchy.status),
    });

    let items_ok = calculated_centavos > 0;
    checks.push(VerificationCheck {
        name: "Line Items Completeness".into(),
        passed: items_ok,
        details: format!("computed line-item sum: {}", format_pesos(calculated_centavos)),
    });

    // The strict `<` here means a difference of exactly one peso fails the
    // rounding check even when the status below still reads no_discrepancy.
    let rounding_ok = discrepancy < tolerance.rounding_centavos;
    checks.push(VerificationCheck {
        name: "Rounding Check".into(),
        passed: rounding_ok,
        details: format!(
            "|{} - {}| = {}",
            format_pesos(calculated_centavos),
            format_pesos(bill_grand_total_centavos),
            format_pesos(discrepancy),
        ),
    });

    let (status, affected_party) = if !grand_ok {
        (DiscrepancyStatus::UnableToVerify, AffectedParty::None)
    } else if discrepancy <= tolerance.rounding_centavos {
        (DiscrepancyStatus::NoDiscrepancy, AffectedParty::None)
    } else if calculated_centavos > bill_grand_total_centavos {
        // Line items imply more was owed than the bill states.
        (DiscrepancyStatus::Undercharge, AffectedParty::Hospital)
    } else {
        // Bill states more than the line items justify.
        (DiscrepancyStatus::Overcharge, AffectedParty::Patient)
    };

    let discrepancy_percent = if bill_grand_total_centavos == 0 {
        0.0
    } else {
        discrepancy as f64 / bill_grand_total_centavos as f64 * 100.0
    };

    let mut explanation = match status {
        DiscrepancyStatus::UnableToVerify => format!(
            "grand total could not be verified (hierarchy status: {}); the line-item comparison is inconclusive",
            hierarchy.status,
        ),
        DiscrepancyStatus::NoDiscrepancy => format!(
            "line items sum to {} and match the billed total {} within rounding tolerance",
            format_pesos(calculated_centavos),
            format_pesos(bill_grand_total_centavos),
        ),
        DiscrepancyStatus::Undercharge => format!(
            "line items sum to {} but the bill only states {}; the hospital under-bills by {}",
            format_pesos(calculated_centavos),
            format_pesos(bill_grand_total_centavos),
            format_pesos(discrepancy),
        ),
        DiscrepancyStatus::Overcharge => format!(
            "the bill states {} but line items only justify {}; the patient is charged {} that is not itemized",
            format_pesos(bill_grand_total_centavos),
            format_pesos(calculated_centavos),
            format_pesos(discrepancy),
        ),
    };

    let mut should_flag = status == DiscrepancyStatus::UnableToVerify;
    let large = discrepancy_percent > tolerance.large_discrepancy_percent
        && matches!(
            status,
            DiscrepancyStatus::Undercharge | DiscrepancyStatus::Overcharge,
        );
    if large {
        // Raises visibility only; status and affected party stay as decided.
        should_flag = true;
        explanation.push_str(&format!(
            " CRITICAL: the discrepancy is {discrepancy_percent:.1}% of the billed total; manual review recommended",
        ));
        checks.push(VerificationCheck {
            name: "Large Discrepancy Alert".into(),
            passed: false,
            details: format!(
                "{discrepancy_percent:.1}% exceeds the {}% review threshold",
                tolerance.large_discrepancy_percent,
            ),
        });
    }

    DiscrepancyResult {
        calculated_total_centavos: calculated_centavos,
        bill_grand_total_centavos,
        discrepancy_centavos: discrepancy,
        discrepancy_percent,
        status,
        affected_party,
        should_flag,
        explanation,
        checks,
    }
}
