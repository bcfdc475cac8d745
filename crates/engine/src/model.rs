use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One "total"-like candidate as extracted from the bill.
///
/// Immutable once constructed. Classification never mutates a candidate;
/// the classifier wraps it in a [`ClassifiedTotal`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedTotal {
    /// Label text as it appeared on the bill (case preserved for display).
    pub label: String,
    pub amount_centavos: i64,
    /// Order of appearance in the document. Monotonically increasing;
    /// drives the "last major total wins" tie-break.
    pub position: usize,
}

/// Aggregate deduction figures extracted alongside the totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FinancialFigures {
    pub discounts_centavos: i64,
    pub payments_centavos: i64,
    pub hmo_coverage_centavos: i64,
    pub philhealth_coverage_centavos: i64,
    pub balance_due_centavos: i64,
    /// Itemized deduction breakdown, when the bill shows one.
    pub deductions: Vec<DeductionItem>,
}

impl FinancialFigures {
    /// Sum of every aggregate deduction field.
    pub fn total_deductions_centavos(&self) -> i64 {
        self.discounts_centavos
            + self.payments_centavos
            + self.hmo_coverage_centavos
            + self.philhealth_coverage_centavos
    }
}

/// Everything the audit entry point consumes for one bill.
#[derive(Debug, Clone, Default)]
pub struct AuditInput {
    pub totals: Vec<ExtractedTotal>,
    /// Independently computed sum of the OCR line items, when available.
    /// Falls back to the line-item bucket of the resolved hierarchy.
    pub calculated_line_items_total: Option<i64>,
    pub financials: Option<FinancialFigures>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalLevel {
    LineItem,
    CategorySubtotal,
    SectionTotal,
    GrandTotal,
}

impl std::fmt::Display for TotalLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LineItem => write!(f, "line_item"),
            Self::CategorySubtotal => write!(f, "category_subtotal"),
            Self::SectionTotal => write!(f, "section_total"),
            Self::GrandTotal => write!(f, "grand_total"),
        }
    }
}

/// A candidate annotated with its classification.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedTotal {
    #[serde(flatten)]
    pub total: ExtractedTotal,
    pub level: TotalLevel,
    /// 0-100 heuristic certainty. Informational only; never gates behavior.
    pub confidence: u8,
}

// ---------------------------------------------------------------------------
// Hierarchy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    LikelyCorrect,
    Uncertain,
    Failed,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verified => write!(f, "verified"),
            Self::LikelyCorrect => write!(f, "likely_correct"),
            Self::Uncertain => write!(f, "uncertain"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// The resolved total structure for one bill.
///
/// Partition invariant: every input candidate lands in exactly one bucket
/// (the grand total counts as a bucket of zero or one).
#[derive(Debug, Clone, Serialize)]
pub struct TotalHierarchy {
    pub line_items: Vec<ClassifiedTotal>,
    pub category_subtotals: Vec<ClassifiedTotal>,
    pub section_totals: Vec<ClassifiedTotal>,
    pub grand_total: Option<ClassifiedTotal>,
    pub status: VerificationStatus,
    /// Append-only audit notes in insertion order.
    pub notes: Vec<String>,
}

impl TotalHierarchy {
    pub fn candidate_count(&self) -> usize {
        self.line_items.len()
            + self.category_subtotals.len()
            + self.section_totals.len()
            + usize::from(self.grand_total.is_some())
    }

    pub fn line_items_sum(&self) -> i64 {
        self.line_items.iter().map(|c| c.total.amount_centavos).sum()
    }

    pub fn section_totals_sum(&self) -> i64 {
        self.section_totals.iter().map(|c| c.total.amount_centavos).sum()
    }
}

// ---------------------------------------------------------------------------
// Deductions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionType {
    Hmo,
    Philhealth,
    Insurance,
    Discount,
    Deposit,
    Payment,
    Unknown,
}

impl DeductionType {
    /// Lenient keyword parse for collaborator output. Never fails;
    /// unrecognized kinds become [`DeductionType::Unknown`].
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_lowercase().as_str() {
            "hmo" => Self::Hmo,
            "philhealth" => Self::Philhealth,
            "insurance" => Self::Insurance,
            "discount" => Self::Discount,
            "deposit" => Self::Deposit,
            "payment" => Self::Payment,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for DeductionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hmo => write!(f, "HMO coverage"),
            Self::Philhealth => write!(f, "PhilHealth coverage"),
            Self::Insurance => write!(f, "insurance coverage"),
            Self::Discount => write!(f, "discount"),
            Self::Deposit => write!(f, "deposit"),
            Self::Payment => write!(f, "payment"),
            Self::Unknown => write!(f, "deduction"),
        }
    }
}

/// One deduction (discount, payment, or third-party coverage) applied
/// against the grand total.
#[derive(Debug, Clone, Serialize)]
pub struct DeductionItem {
    pub deduction_type: DeductionType,
    pub amount_centavos: i64,
    pub description: String,
    /// True only if a policy/receipt/approval/ID reference was observed.
    pub has_documentation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized_by: Option<String>,
    /// Present whenever the item is not verified, explaining the deficiency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_issue: Option<String>,
}

impl DeductionItem {
    pub fn is_verified(&self) -> bool {
        self.has_documentation
    }

    /// An item with no supporting document reference. The issue text is
    /// filled by the validator when left `None`.
    pub fn undocumented(
        deduction_type: DeductionType,
        amount_centavos: i64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            deduction_type,
            amount_centavos,
            description: description.into(),
            has_documentation: false,
            documentation_type: None,
            documentation_value: None,
            authorized_by: None,
            verification_issue: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    Confirmed,
    Unconfirmed,
    NoCoverage,
    Unknown,
}

impl std::fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmed"),
            Self::Unconfirmed => write!(f, "unconfirmed"),
            Self::NoCoverage => write!(f, "no_coverage"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Aggregate deduction-validation outcome.
///
/// Conservation invariant: `total_deductions_centavos` equals
/// `verified_deductions_centavos + unverified_deductions_centavos` exactly.
#[derive(Debug, Clone, Serialize)]
pub struct DeductionValidation {
    pub total_deductions_centavos: i64,
    pub verified_deductions_centavos: i64,
    pub unverified_deductions_centavos: i64,
    pub coverage_status: CoverageStatus,
    /// True iff `issues` is empty and nothing is unverified.
    pub validation_passed: bool,
    pub issues: Vec<String>,
    pub items: Vec<DeductionItem>,
}

// ---------------------------------------------------------------------------
// Discrepancy
// ---------------------------------------------------------------------------

/// One named check recorded for the audit trail, pass or fail.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationCheck {
    pub name: String,
    pub passed: bool,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyStatus {
    NoDiscrepancy,
    Undercharge,
    Overcharge,
    UnableToVerify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AffectedParty {
    None,
    Hospital,
    Patient,
}

/// Outcome of comparing the computed line-item sum against the bill's
/// stated grand total. Never mutated after construction.
#[derive(Debug, Clone, Serialize)]
pub struct DiscrepancyResult {
    pub calculated_total_centavos: i64,
    pub bill_grand_total_centavos: i64,
    /// Absolute difference between the two totals.
    pub discrepancy_centavos: i64,
    pub discrepancy_percent: f64,
    pub status: DiscrepancyStatus,
    pub affected_party: AffectedParty,
    pub should_flag: bool,
    pub explanation: String,
    pub checks: Vec<VerificationCheck>,
}

// ---------------------------------------------------------------------------
// Balance reconciliation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubtotalCheck {
    Matches,
    UnderchargedSubtotal,
    OverchargedSubtotal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BalanceCheck {
    Matches,
    PatientUndercharged,
    PatientOvercharged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeStatus {
    CorrectlyCharged,
    Undercharged,
    Overcharged,
    /// Degraded path: hierarchy unresolved or financial figures missing.
    CouldNotVerify,
}

impl std::fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorrectlyCharged => write!(f, "CORRECTLY_CHARGED"),
            Self::Undercharged => write!(f, "UNDERCHARGED"),
            Self::Overcharged => write!(f, "OVERCHARGED"),
            Self::CouldNotVerify => write!(f, "COULD_NOT_VERIFY"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Hospital,
    Patient,
}

/// Structured record for one failing reconciliation check. Additive to the
/// item-level analysis from the extraction collaborator, never a
/// replacement for it.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeIssue {
    pub check: String,
    /// Signed delta (derived minus stated).
    pub delta_centavos: i64,
    pub breakdown: String,
    pub impact: Impact,
}

/// Combined two-step verdict: line items vs subtotal, then
/// subtotal minus deductions vs stated balance due.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceReconciliation {
    pub subtotal_check: SubtotalCheck,
    pub balance_check: BalanceCheck,
    pub charge_status: ChargeStatus,
    pub expected_balance_centavos: i64,
    pub subtotal_delta_centavos: i64,
    pub balance_delta_centavos: i64,
    /// Sum of the absolute deltas of both checks.
    pub total_discrepancy_centavos: i64,
    pub issues: Vec<ChargeIssue>,
}

// ---------------------------------------------------------------------------
// Result + Meta
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AuditMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

/// Full output for one bill-analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct AuditResult {
    pub meta: AuditMeta,
    pub hierarchy: TotalHierarchy,
    pub discrepancy: DiscrepancyResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduction_validation: Option<DeductionValidation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconciliation: Option<BalanceReconciliation>,
    pub summary: crate::report::FinancialSummary,
}
