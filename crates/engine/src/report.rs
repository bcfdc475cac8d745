//! Consumer-facing flat summary — the structure handed to the reporting
//! layer. Field names follow the external JSON contract (camelCase);
//! monetary fields are plain peso decimals, never formatted strings.

use serde::Serialize;

use crate::model::{
    AffectedParty, AuditInput, BalanceCheck, BalanceReconciliation, ChargeStatus,
    CoverageStatus, DeductionValidation, DiscrepancyResult, SubtotalCheck, TotalHierarchy,
};
use crate::money::pesos;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub charge_status: ChargeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal_check: Option<SubtotalCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_check: Option<BalanceCheck>,
    pub total_discrepancy: f64,
    pub affected_party: AffectedParty,
    /// Classification confidence of the resolved grand total (0-100).
    pub confidence: u8,
    pub could_verify_math: bool,
    pub calculated_line_items_total: f64,
    pub subtotal: f64,
    pub discounts: f64,
    pub payments: f64,
    pub hmo_coverage: f64,
    pub philhealth_coverage: f64,
    pub expected_balance: f64,
    pub balance_due: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduction_validation: Option<DeductionValidationSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionValidationSummary {
    pub total_deductions: f64,
    pub verified_deductions: f64,
    pub unverified_deductions: f64,
    pub coverage_status: CoverageStatus,
    pub validation_passed: bool,
    pub issues: Vec<String>,
}

pub fn build_summary(
    input: &AuditInput,
    hierarchy: &TotalHierarchy,
    discrepancy: &DiscrepancyResult,
    deduction_validation: Option<&DeductionValidation>,
    reconciliation: Option<&BalanceReconciliation>,
    calculated_centavos: i64,
) -> FinancialSummary {
    let charge_status = reconciliation
        .map(|r| r.charge_status)
        .unwrap_or(ChargeStatus::CouldNotVerify);

    let affected_party = match charge_status {
        ChargeStatus::Undercharged => AffectedParty::Hospital,
        ChargeStatus::Overcharged => AffectedParty::Patient,
        ChargeStatus::CorrectlyCharged | ChargeStatus::CouldNotVerify => AffectedParty::None,
    };

    let figures = input.financials.as_ref();
    let subtotal = hierarchy
        .grand_total
        .as_ref()
        .map(|g| g.total.amount_centavos)
        .unwrap_or(0);

    FinancialSummary {
        charge_status,
        subtotal_check: reconciliation.map(|r| r.subtotal_check),
        balance_check: reconciliation.map(|r| r.balance_check),
        total_discrepancy: pesos(
            reconciliation
                .map(|r| r.total_discrepancy_centavos)
                .unwrap_or(discrepancy.discrepancy_centavos),
        ),
        affected_party,
        confidence: hierarchy.grand_total.as_ref().map(|g| g.confidence).unwrap_or(0),
        could_verify_math: reconciliation.is_some(),
        calculated_line_items_total: pesos(calculated_centavos),
        subtotal: pesos(subtotal),
        discounts: pesos(figures.map(|f| f.discounts_centavos).unwrap_or(0)),
        payments: pesos(figures.map(|f| f.payments_centavos).unwrap_or(0)),
        hmo_coverage: pesos(figures.map(|f| f.hmo_coverage_centavos).unwrap_or(0)),
        philhealth_coverage: pesos(figures.map(|f| f.philhealth_coverage_centavos).unwrap_or(0)),
        expected_balance: pesos(
            reconciliation.map(|r| r.expected_balance_centavos).unwrap_or(0),
        ),
        balance_due: pesos(figures.map(|f| f.balance_due_centavos).unwrap_or(0)),
        deduction_validation: deduction_validation.map(|v| DeductionValidationSummary {
            total_deductions: pesos(v.total_deductions_centavos),
            verified_deductions: pesos(v.verified_deductions_centavos),
            unverified_deductions: pesos(v.unverified_deductions_centavos),
            coverage_status: v.coverage_status,
            validation_passed: v.validation_passed,
            issues: v.issues.clone(),
        }),
    }
}
