//! `billaudit audit` — run the engine over one extraction document.

use std::path::{Path, PathBuf};

use billaudit_engine::model::{AuditResult, ChargeStatus, ExtractedTotal};
use billaudit_engine::money::format_pesos;
use billaudit_engine::AuditConfig;
use billaudit_extract::{load_candidates_csv, parse_document, parse_line_items};

use crate::exit_codes::{
    EXIT_AUDIT_DISCREPANCY, EXIT_AUDIT_PARSE, EXIT_AUDIT_UNVERIFIABLE,
    EXIT_AUDIT_UNVERIFIED_DEDUCTIONS, EXIT_ERROR,
};
use crate::CliError;

fn audit_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError {
        code,
        message: msg.into(),
        hint: None,
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|e| audit_err(EXIT_ERROR, format!("cannot read {}: {e}", path.display())))
}

pub fn cmd_audit(
    input_path: PathBuf,
    ocr_text: Option<PathBuf>,
    candidates_csv: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = match config_path {
        Some(path) => AuditConfig::from_toml(&read_file(&path)?)
            .map_err(|e| audit_err(EXIT_AUDIT_PARSE, e.to_string()))?,
        None => AuditConfig::default(),
    };

    let parsed = parse_document(&read_file(&input_path)?)
        .map_err(|e| audit_err(EXIT_AUDIT_PARSE, e.to_string()))?;
    let mut audit_input = parsed.input;
    if parsed.skipped > 0 {
        eprintln!("note: dropped {} entry(ies) with invalid amounts", parsed.skipped);
    }

    if let Some(path) = candidates_csv {
        let (extra, skipped) = load_candidates_csv(&read_file(&path)?)
            .map_err(|e| audit_err(EXIT_AUDIT_PARSE, e.to_string()))?;
        if skipped > 0 {
            eprintln!("note: dropped {skipped} CSV row(s) with non-positive amounts");
        }
        merge_candidates(&mut audit_input.totals, extra);
    }

    if let Some(path) = ocr_text {
        let extraction = parse_line_items(&read_file(&path)?);
        eprintln!(
            "ocr: {} line items totalling {} ({} total/deduction line(s) excluded)",
            extraction.charges.len(),
            format_pesos(extraction.total_centavos),
            extraction.excluded_lines,
        );
        audit_input.calculated_line_items_total = Some(extraction.total_centavos);
    }

    let result = billaudit_engine::run(&config, &audit_input);

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| audit_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| audit_err(EXIT_ERROR, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }
    if json_output {
        println!("{json_str}");
    }

    for line in human_summary(&result) {
        eprintln!("{line}");
    }

    verdict(&result)
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = AuditConfig::from_toml(&read_file(&config_path)?)
        .map_err(|e| audit_err(EXIT_AUDIT_PARSE, e.to_string()))?;
    eprintln!("config OK: \"{}\" ({})", config.name, config_path.display());
    Ok(())
}

/// CSV candidates append after the JSON ones; their positions shift past
/// the existing maximum so document order stays monotonic.
fn merge_candidates(totals: &mut Vec<ExtractedTotal>, extra: Vec<ExtractedTotal>) {
    let base = totals.iter().map(|t| t.position + 1).max().unwrap_or(0);
    totals.extend(extra.into_iter().map(|mut t| {
        t.position += base;
        t
    }));
}

/// Stderr summary lines, mirroring what the JSON carries.
fn human_summary(result: &AuditResult) -> Vec<String> {
    let mut lines = Vec::new();

    let grand = match &result.hierarchy.grand_total {
        Some(g) => format!("{} (\"{}\")", format_pesos(g.total.amount_centavos), g.total.label),
        None => "unresolved".into(),
    };
    lines.push(format!(
        "hierarchy: {} candidate(s), {} section total(s), grand total {} — {}",
        result.hierarchy.candidate_count(),
        result.hierarchy.section_totals.len(),
        grand,
        result.hierarchy.status,
    ));

    for note in &result.hierarchy.notes {
        lines.push(format!("  note: {note}"));
    }

    lines.push(format!("discrepancy: {}", result.discrepancy.explanation));

    if let Some(recon) = &result.reconciliation {
        lines.push(format!(
            "charge status: {} (total discrepancy {})",
            recon.charge_status,
            format_pesos(recon.total_discrepancy_centavos),
        ));
        for issue in &recon.issues {
            lines.push(format!("  {} check: {}", issue.check, issue.breakdown));
        }
    }

    if let Some(validation) = &result.deduction_validation {
        lines.push(format!(
            "deductions: {} verified, {} unverified (coverage {})",
            format_pesos(validation.verified_deductions_centavos),
            format_pesos(validation.unverified_deductions_centavos),
            validation.coverage_status,
        ));
        for issue in &validation.issues {
            lines.push(format!("  issue: {issue}"));
        }
    }

    lines
}

/// Map the audit outcome to the shell contract. Verifiability problems
/// outrank charge discrepancies, which outrank documentation gaps.
fn verdict(result: &AuditResult) -> Result<(), CliError> {
    if !result.summary.could_verify_math {
        return Err(audit_err(
            EXIT_AUDIT_UNVERIFIABLE,
            "could not verify calculations",
        ));
    }
    if result.summary.charge_status != ChargeStatus::CorrectlyCharged {
        return Err(audit_err(EXIT_AUDIT_DISCREPANCY, "charge discrepancy found"));
    }
    if result
        .deduction_validation
        .as_ref()
        .is_some_and(|v| !v.validation_passed)
    {
        return Err(audit_err(
            EXIT_AUDIT_UNVERIFIED_DEDUCTIONS,
            "unverified deductions found",
        ));
    }
    Ok(())
}
