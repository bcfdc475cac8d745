//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — billing-ops scripts gate on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Audit clean (correctly charged, deductions verified)|
//! | 1    | General error (file IO, serialization)              |
//! | 2    | CLI usage error (emitted by clap)                   |
//! | 3    | Charge discrepancy found                            |
//! | 4    | Unverified deductions                               |
//! | 5    | Could not verify (failed hierarchy, missing figures)|
//! | 6    | Input or config parse error                         |

/// Success - audit ran and nothing needs attention.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - file IO, serialization.
pub const EXIT_ERROR: u8 = 1;

/// Subtotal or balance check failed (patient or hospital impact).
pub const EXIT_AUDIT_DISCREPANCY: u8 = 3;

/// Arithmetic reconciles but at least one deduction lacks documentation.
pub const EXIT_AUDIT_UNVERIFIED_DEDUCTIONS: u8 = 4;

/// Hierarchy unresolved or financial figures missing from the extraction.
pub const EXIT_AUDIT_UNVERIFIABLE: u8 = 5;

/// Extraction document, candidate CSV, or config could not be parsed.
pub const EXIT_AUDIT_PARSE: u8 = 6;
