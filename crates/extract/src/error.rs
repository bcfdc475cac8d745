use std::fmt;

#[derive(Debug)]
pub enum ExtractError {
    /// JSON parse / deserialization error.
    Json(String),
    /// CSV structural error.
    Csv(String),
    /// Missing required column in a candidate CSV.
    MissingColumn { column: String },
    /// Amount cell could not be parsed as a number.
    AmountParse { row: usize, value: String },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "extraction JSON error: {msg}"),
            Self::Csv(msg) => write!(f, "candidate CSV error: {msg}"),
            Self::MissingColumn { column } => {
                write!(f, "candidate CSV: missing column '{column}'")
            }
            Self::AmountParse { row, value } => {
                write!(f, "candidate CSV row {row}: cannot parse amount '{value}'")
            }
        }
    }
}

impl std::error::Error for ExtractError {}
