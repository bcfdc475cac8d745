use billaudit_engine::config::AuditConfig;
use billaudit_engine::model::{
    AffectedParty, AuditInput, BalanceCheck, ChargeStatus, CoverageStatus, DiscrepancyStatus,
    ExtractedTotal, FinancialFigures, SubtotalCheck, VerificationStatus,
};
use billaudit_engine::run;

fn tot(label: &str, amount_centavos: i64, position: usize) -> ExtractedTotal {
    ExtractedTotal {
        label: label.into(),
        amount_centavos,
        position,
    }
}

fn audit(input: &AuditInput) -> billaudit_engine::AuditResult {
    run(&AuditConfig::default(), input)
}

// -------------------------------------------------------------------------
// Hierarchy scenarios
// -------------------------------------------------------------------------

#[test]
fn hierarchical_total_correction() {
    // Section totals 20,044 + 5,000 with an explicit 25,044 grand total.
    let input = AuditInput {
        totals: vec![
            tot("Total Hospital Charges", 2_004_400, 0),
            tot("Total Professional Fees", 500_000, 1),
            tot("GRAND TOTAL", 2_504_400, 2),
        ],
        calculated_line_items_total: None,
        financials: None,
    };
    let result = audit(&input);
    assert_eq!(
        result.hierarchy.grand_total.as_ref().unwrap().total.amount_centavos,
        2_504_400,
    );
    assert_eq!(result.hierarchy.section_totals.len(), 2);
    assert_eq!(result.hierarchy.status, VerificationStatus::Verified);
}

#[test]
fn implicit_grand_total_inference() {
    // No explicit grand-total label anywhere; the bill just closes with a
    // bare "Total" equal to 25,000. It must still resolve, not fail.
    let input = AuditInput {
        totals: vec![
            tot("Total Hospital Charges", 2_000_000, 0),
            tot("Total Professional Fees", 500_000, 1),
            tot("Total", 2_500_000, 2),
        ],
        calculated_line_items_total: None,
        financials: None,
    };
    let result = audit(&input);
    let grand = result.hierarchy.grand_total.as_ref().unwrap();
    assert_eq!(grand.total.amount_centavos, 2_500_000);
    assert_eq!(result.hierarchy.status, VerificationStatus::LikelyCorrect);
}

#[test]
fn unresolvable_bill_reports_unable_to_verify() {
    let input = AuditInput {
        totals: vec![tot("Paracetamol 500mg", 4_500, 0), tot("CBC", 45_000, 1)],
        calculated_line_items_total: None,
        financials: Some(FinancialFigures {
            balance_due_centavos: 49_500,
            ..Default::default()
        }),
    };
    let result = audit(&input);
    assert_eq!(result.hierarchy.status, VerificationStatus::Failed);
    assert_eq!(result.discrepancy.status, DiscrepancyStatus::UnableToVerify);
    assert_eq!(result.summary.charge_status, ChargeStatus::CouldNotVerify);
    assert!(!result.summary.could_verify_math);
}

// -------------------------------------------------------------------------
// Charge scenarios
// -------------------------------------------------------------------------

#[test]
fn patient_overcharge_scenario() {
    // Line items only justify 43,883.98 against a 45,000 bill with a
    // 1,000 discount and a 44,500 balance due.
    let input = AuditInput {
        totals: vec![tot("TOTAL AMOUNT DUE", 4_500_000, 0)],
        calculated_line_items_total: Some(4_388_398),
        financials: Some(FinancialFigures {
            discounts_centavos: 100_000,
            balance_due_centavos: 4_450_000,
            ..Default::default()
        }),
    };
    let result = audit(&input);
    let recon = result.reconciliation.as_ref().unwrap();
    assert_eq!(recon.subtotal_check, SubtotalCheck::OverchargedSubtotal);
    assert_eq!(recon.balance_check, BalanceCheck::PatientOvercharged);
    assert_eq!(recon.charge_status, ChargeStatus::Overcharged);
    assert_eq!(recon.total_discrepancy_centavos, 161_602);
    assert_eq!(result.summary.total_discrepancy, 1616.02);
    assert_eq!(result.summary.affected_party, AffectedParty::Patient);
    assert_eq!(result.summary.charge_status, ChargeStatus::Overcharged);
}

#[test]
fn correctly_charged_bill_is_clean() {
    let input = AuditInput {
        totals: vec![
            tot("Total Hospital Charges", 2_004_400, 0),
            tot("Total Professional Fees", 500_000, 1),
            tot("GRAND TOTAL", 2_504_400, 2),
        ],
        calculated_line_items_total: Some(2_504_400),
        financials: Some(FinancialFigures {
            balance_due_centavos: 2_504_400,
            ..Default::default()
        }),
    };
    let result = audit(&input);
    let recon = result.reconciliation.as_ref().unwrap();
    assert_eq!(recon.charge_status, ChargeStatus::CorrectlyCharged);
    assert_eq!(result.summary.affected_party, AffectedParty::None);
    assert!(result.summary.could_verify_math);
    assert!(result.discrepancy.status == DiscrepancyStatus::NoDiscrepancy);
}

#[test]
fn rounding_tolerance_boundary() {
    // 25,044.50 vs 25,044.00: under the one-peso boundary, no discrepancy.
    let input = AuditInput {
        totals: vec![tot("GRAND TOTAL", 2_504_400, 0)],
        calculated_line_items_total: Some(2_504_450),
        financials: None,
    };
    let result = audit(&input);
    assert_eq!(result.discrepancy.status, DiscrepancyStatus::NoDiscrepancy);
}

// -------------------------------------------------------------------------
// Deduction scenarios
// -------------------------------------------------------------------------

#[test]
fn unconfirmed_hmo_coverage_scenario() {
    // 12,000 of HMO coverage with no breakdown: conservative synthesis
    // must fail validation and warn about full patient payment.
    let input = AuditInput {
        totals: vec![tot("GRAND TOTAL", 2_504_400, 0)],
        calculated_line_items_total: Some(2_504_400),
        financials: Some(FinancialFigures {
            hmo_coverage_centavos: 1_200_000,
            balance_due_centavos: 1_304_400,
            ..Default::default()
        }),
    };
    let result = audit(&input);
    let validation = result.deduction_validation.as_ref().unwrap();
    assert_eq!(validation.items.len(), 1);
    assert!(!validation.items[0].has_documentation);
    assert!(validation.items[0].verification_issue.is_some());
    assert_eq!(validation.coverage_status, CoverageStatus::Unconfirmed);
    assert!(!validation.validation_passed);
    assert!(validation
        .issues
        .iter()
        .any(|i| i.contains("patient pays the full amount")));
    // The arithmetic itself still reconciles.
    assert_eq!(
        result.reconciliation.as_ref().unwrap().charge_status,
        ChargeStatus::CorrectlyCharged,
    );
}

#[test]
fn documented_deductions_keep_the_bill_clean() {
    use billaudit_engine::model::{DeductionItem, DeductionType};

    let input = AuditInput {
        totals: vec![tot("GRAND TOTAL", 2_504_400, 0)],
        calculated_line_items_total: Some(2_504_400),
        financials: Some(FinancialFigures {
            philhealth_coverage_centavos: 800_000,
            balance_due_centavos: 1_704_400,
            deductions: vec![DeductionItem {
                deduction_type: DeductionType::Philhealth,
                amount_centavos: 800_000,
                description: "PhilHealth case rate".into(),
                has_documentation: true,
                documentation_type: Some("claim_form".into()),
                documentation_value: Some("CF1-2024-081544".into()),
                authorized_by: Some("Billing Section".into()),
                verification_issue: None,
            }],
            ..Default::default()
        }),
    };
    let result = audit(&input);
    let validation = result.deduction_validation.as_ref().unwrap();
    assert!(validation.validation_passed);
    assert_eq!(validation.coverage_status, CoverageStatus::Confirmed);
    assert_eq!(
        result.reconciliation.as_ref().unwrap().charge_status,
        ChargeStatus::CorrectlyCharged,
    );
}

// -------------------------------------------------------------------------
// Full pipeline
// -------------------------------------------------------------------------

#[test]
fn full_bill_walkthrough() {
    // A realistic ward bill: charges, category and section totals, grand
    // total, partial PhilHealth coverage, cash deposit, balance due.
    let input = AuditInput {
        totals: vec![
            tot("Room and Board (3 days)", 450_000, 0),
            tot("Drugs and Medicines Total", 325_000, 1),
            tot("Laboratory Total", 180_000, 2),
            tot("Total Hospital Charges", 955_000, 3),
            tot("Total Professional Fees", 350_000, 4),
            tot("GRAND TOTAL", 1_305_000, 5),
        ],
        calculated_line_items_total: Some(1_305_000),
        financials: Some(FinancialFigures {
            philhealth_coverage_centavos: 380_000,
            payments_centavos: 200_000,
            balance_due_centavos: 725_000,
            ..Default::default()
        }),
    };
    let result = audit(&input);

    assert_eq!(result.hierarchy.status, VerificationStatus::Verified);
    assert_eq!(result.hierarchy.category_subtotals.len(), 2);
    assert_eq!(result.hierarchy.section_totals.len(), 2);
    assert_eq!(result.hierarchy.line_items.len(), 1);

    let recon = result.reconciliation.as_ref().unwrap();
    assert_eq!(recon.expected_balance_centavos, 725_000);
    assert_eq!(recon.charge_status, ChargeStatus::CorrectlyCharged);

    // Undocumented PhilHealth and deposit: arithmetic clean, validation not.
    let validation = result.deduction_validation.as_ref().unwrap();
    assert!(!validation.validation_passed);
    assert_eq!(validation.unverified_deductions_centavos, 580_000);

    assert!(result.summary.could_verify_math);
    assert_eq!(result.summary.balance_due, 7250.0);
}
