//! Balance reconciliation — the two-step check combining subtotal and
//! balance-due verification into one charge verdict.

use crate::config::ToleranceConfig;
use crate::model::{
    BalanceCheck, BalanceReconciliation, ChargeIssue, ChargeStatus, FinancialFigures, Impact,
    SubtotalCheck,
};
use crate::money::format_pesos;

/// Step one: do the line items reproduce the stated subtotal?
/// Step two: does subtotal minus deductions reproduce the balance due?
pub fn reconcile_balance(
    calculated_line_items_total: i64,
    subtotal: i64,
    figures: &FinancialFigures,
    tolerance: &ToleranceConfig,
) -> BalanceReconciliation {
    // Positive delta: the hospital undercounted its own subtotal.
    let subtotal_delta = calculated_line_items_total - subtotal;
    let subtotal_check = if subtotal_delta.abs() <= tolerance.amount_match_centavos {
        SubtotalCheck::Matches
    } else if subtotal_delta > 0 {
        SubtotalCheck::UnderchargedSubtotal
    } else {
        SubtotalCheck::OverchargedSubtotal
    };

    let deductions = figures.total_deductions_centavos();
    let expected_balance = subtotal - deductions;
    let balance_delta = expected_balance - figures.balance_due_centavos;
    let balance_check = if balance_delta.abs() <= tolerance.amount_match_centavos {
        BalanceCheck::Matches
    } else if balance_delta > 0 {
        // Patient asked to pay less than the derived balance.
        BalanceCheck::PatientUndercharged
    } else {
        BalanceCheck::PatientOvercharged
    };

    // Undercharge conditions take priority when both kinds of error
    // coexist: the hospital-loses variant is checked first.
    let charge_status = if subtotal_check == SubtotalCheck::Matches
        && balance_check == BalanceCheck::Matches
    {
        ChargeStatus::CorrectlyCharged
    } else if subtotal_check == SubtotalCheck::UnderchargedSubtotal
        || balance_check == BalanceCheck::PatientUndercharged
    {
        ChargeStatus::Undercharged
    } else {
        ChargeStatus::Overcharged
    };

    let mut issues = Vec::new();
    if subtotal_check != SubtotalCheck::Matches {
        issues.push(ChargeIssue {
            check: "subtotal".into(),
            delta_centavos: subtotal_delta,
            breakdown: format!(
                "line items sum to {} but the bill subtotal is {} (difference {})",
                format_pesos(calculated_line_items_total),
                format_pesos(subtotal),
                format_pesos(subtotal_delta.abs()),
            ),
            impact: if subtotal_check == SubtotalCheck::UnderchargedSubtotal {
                Impact::Hospital
            } else {
                Impact::Patient
            },
        });
    }
    if balance_check != BalanceCheck::Matches {
        issues.push(ChargeIssue {
            check: "balance".into(),
            delta_centavos: balance_delta,
            breakdown: format!(
                "{} subtotal minus {} deductions gives {} expected, but the bill asks for {}",
                format_pesos(subtotal),
                format_pesos(deductions),
                format_pesos(expected_balance),
                format_pesos(figures.balance_due_centavos),
            ),
            impact: if balance_check == BalanceCheck::PatientUndercharged {
                Impact::Hospital
            } else {
                Impact::Patient
            },
        });
    }

    BalanceReconciliation {
        subtotal_check,
        balance_check,
        charge_status,
        expected_balance_centavos: expected_balance,
        subtotal_delta_centavos: subtotal_delta,
        balance_delta_centavos: balance_delta,
        total_discrepancy_centavos: subtotal_delta.abs() + balance_delta.abs(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figures(deductions: i64, balance_due: i64) -> FinancialFigures {
        FinancialFigures {
            discounts_centavos: deductions,
            balance_due_centavos: balance_due,
            ..Default::default()
        }
    }

    fn reconcile(calculated: i64, subtotal: i64, f: &FinancialFigures) -> BalanceReconciliation {
        reconcile_balance(calculated, subtotal, f, &ToleranceConfig::default())
    }

    #[test]
    fn clean_bill_is_correctly_charged() {
        let result = reconcile(2_504_400, 2_504_400, &figures(100_000, 2_404_400));
        assert_eq!(result.subtotal_check, SubtotalCheck::Matches);
        assert_eq!(result.balance_check, BalanceCheck::Matches);
        assert_eq!(result.charge_status, ChargeStatus::CorrectlyCharged);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn within_ten_pesos_still_matches() {
        let result = reconcile(2_504_400, 2_505_400, &figures(0, 2_505_000));
        assert_eq!(result.subtotal_check, SubtotalCheck::Matches);
        assert_eq!(result.balance_check, BalanceCheck::Matches);
    }

    #[test]
    fn overcharged_bill_both_checks_fail_patientward() {
        // Line items 43,883.98 against a 45,000.00 subtotal, 1,000.00 in
        // discounts, balance asked 44,500.00.
        let result = reconcile(4_388_398, 4_500_000, &figures(100_000, 4_450_000));
        assert_eq!(result.subtotal_check, SubtotalCheck::OverchargedSubtotal);
        assert_eq!(result.balance_check, BalanceCheck::PatientOvercharged);
        assert_eq!(result.charge_status, ChargeStatus::Overcharged);
        assert_eq!(result.total_discrepancy_centavos, 161_602);
        assert_eq!(result.issues.len(), 2);
        assert!(result.issues.iter().all(|i| i.impact == Impact::Patient));
    }

    #[test]
    fn hospital_losing_money_is_undercharged() {
        let result = reconcile(2_600_000, 2_504_400, &figures(0, 2_504_400));
        assert_eq!(result.subtotal_check, SubtotalCheck::UnderchargedSubtotal);
        assert_eq!(result.charge_status, ChargeStatus::Undercharged);
        assert_eq!(result.issues[0].impact, Impact::Hospital);
    }

    #[test]
    fn undercharge_takes_priority_over_overcharge() {
        // Subtotal undercounted (hospital loses) while the balance line
        // overcharges the patient: the hospital-loses verdict wins.
        let result = reconcile(2_600_000, 2_504_400, &figures(0, 2_600_000));
        assert_eq!(result.subtotal_check, SubtotalCheck::UnderchargedSubtotal);
        assert_eq!(result.balance_check, BalanceCheck::PatientOvercharged);
        assert_eq!(result.charge_status, ChargeStatus::Undercharged);
        assert_eq!(result.issues.len(), 2);
    }

    #[test]
    fn patient_paying_less_than_derived_is_undercharged() {
        let result = reconcile(2_504_400, 2_504_400, &figures(100_000, 2_300_000));
        assert_eq!(result.subtotal_check, SubtotalCheck::Matches);
        assert_eq!(result.balance_check, BalanceCheck::PatientUndercharged);
        assert_eq!(result.charge_status, ChargeStatus::Undercharged);
        assert_eq!(result.issues[0].impact, Impact::Hospital);
        assert_eq!(result.expected_balance_centavos, 2_404_400);
    }

    #[test]
    fn breakdown_strings_carry_the_arithmetic() {
        let result = reconcile(4_388_398, 4_500_000, &figures(100_000, 4_450_000));
        let balance_issue = result.issues.iter().find(|i| i.check == "balance").unwrap();
        assert!(balance_issue.breakdown.contains("\u{20B1}45,000.00"));
        assert!(balance_issue.breakdown.contains("\u{20B1}44,000.00"));
        assert!(balance_issue.breakdown.contains("\u{20B1}44,500.00"));
    }
}
