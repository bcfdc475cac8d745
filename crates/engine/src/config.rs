use serde::Deserialize;

use crate::error::AuditError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub tolerance: ToleranceConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            tolerance: ToleranceConfig::default(),
        }
    }
}

fn default_name() -> String {
    "default".into()
}

// ---------------------------------------------------------------------------
// Tolerances
// ---------------------------------------------------------------------------

/// Centavo tolerances for every arithmetic comparison the audit makes.
/// The defaults are the engine's contract; override only per deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct ToleranceConfig {
    /// Subtotal and balance match tolerance (₱10).
    #[serde(default = "default_amount_match")]
    pub amount_match_centavos: i64,
    /// Rounding tolerance for the line-item discrepancy check (₱1).
    #[serde(default = "default_rounding")]
    pub rounding_centavos: i64,
    /// Section sum confirms the grand total within this (₱10).
    #[serde(default = "default_section_tight")]
    pub section_sum_tight_centavos: i64,
    /// Section sum is still plausible for inference within this (₱100).
    #[serde(default = "default_section_loose")]
    pub section_sum_loose_centavos: i64,
    /// Percent of the billed total above which a discrepancy is flagged
    /// for manual review.
    #[serde(default = "default_large_percent")]
    pub large_discrepancy_percent: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            amount_match_centavos: default_amount_match(),
            rounding_centavos: default_rounding(),
            section_sum_tight_centavos: default_section_tight(),
            section_sum_loose_centavos: default_section_loose(),
            large_discrepancy_percent: default_large_percent(),
        }
    }
}

fn default_amount_match() -> i64 {
    1_000
}

fn default_rounding() -> i64 {
    100
}

fn default_section_tight() -> i64 {
    1_000
}

fn default_section_loose() -> i64 {
    10_000
}

fn default_large_percent() -> f64 {
    20.0
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl AuditConfig {
    pub fn from_toml(input: &str) -> Result<Self, AuditError> {
        let config: AuditConfig =
            toml::from_str(input).map_err(|e| AuditError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        let t = &self.tolerance;
        for (field, value) in [
            ("amount_match_centavos", t.amount_match_centavos),
            ("rounding_centavos", t.rounding_centavos),
            ("section_sum_tight_centavos", t.section_sum_tight_centavos),
            ("section_sum_loose_centavos", t.section_sum_loose_centavos),
        ] {
            if value < 0 {
                return Err(AuditError::ConfigValidation(format!(
                    "{field} must be non-negative, got {value}",
                )));
            }
        }

        if t.section_sum_tight_centavos > t.section_sum_loose_centavos {
            return Err(AuditError::ConfigValidation(format!(
                "section_sum_tight_centavos ({}) must not exceed section_sum_loose_centavos ({})",
                t.section_sum_tight_centavos, t.section_sum_loose_centavos,
            )));
        }

        if !t.large_discrepancy_percent.is_finite()
            || t.large_discrepancy_percent <= 0.0
            || t.large_discrepancy_percent > 100.0
        {
            return Err(AuditError::ConfigValidation(format!(
                "large_discrepancy_percent must be in (0, 100], got {}",
                t.large_discrepancy_percent,
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
