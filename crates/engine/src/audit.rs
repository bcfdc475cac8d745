//! Audit entry point — orchestrates hierarchy resolution, discrepancy
//! calculation, deduction validation and balance reconciliation for one
//! bill. Single synchronous pass over freshly constructed values; no
//! state survives between invocations.

use crate::config::AuditConfig;
use crate::deductions::validate_deductions;
use crate::discrepancy::calculate_discrepancy;
use crate::hierarchy::build_total_hierarchy;
use crate::model::{AuditInput, AuditMeta, AuditResult};
use crate::reconcile::reconcile_balance;
use crate::report::build_summary;

/// Run the full audit. Infallible by design: extraction failures upstream
/// arrive as absent data and come back as a degraded report, never an
/// error.
pub fn run(config: &AuditConfig, input: &AuditInput) -> AuditResult {
    let hierarchy = build_total_hierarchy(&input.totals, &config.tolerance);

    // An explicitly computed OCR sum wins; otherwise fall back to whatever
    // the classifier left in the line-item bucket.
    let calculated = input
        .calculated_line_items_total
        .unwrap_or_else(|| hierarchy.line_items_sum());

    let bill_grand_total = hierarchy
        .grand_total
        .as_ref()
        .map(|g| g.total.amount_centavos)
        .unwrap_or(0);

    let discrepancy =
        calculate_discrepancy(calculated, bill_grand_total, &hierarchy, &config.tolerance);

    let deduction_validation = input.financials.as_ref().map(validate_deductions);

    // Reconciliation needs both a resolved subtotal and the stated figures.
    let reconciliation = match (&input.financials, &hierarchy.grand_total) {
        (Some(figures), Some(_)) => Some(reconcile_balance(
            calculated,
            bill_grand_total,
            figures,
            &config.tolerance,
        )),
        _ => None,
    };

    let summary = build_summary(
        input,
        &hierarchy,
        &discrepancy,
        deduction_validation.as_ref(),
        reconciliation.as_ref(),
        calculated,
    );

    AuditResult {
        meta: AuditMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        hierarchy,
        discrepancy,
        deduction_validation,
        reconciliation,
        summary,
    }
}
