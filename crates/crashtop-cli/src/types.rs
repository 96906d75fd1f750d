use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Json,
    Ndjson,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Ndjson => write!(f, "ndjson"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum SortOrder {
    Count,
    LastSeen,
    Rate,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Count => write!(f, "count"),
            SortOrder::LastSeen => write!(f, "last-seen"),
            SortOrder::Rate => write!(f, "rate"),
        }
    }
}

impl From<SortOrder> for crashtop_engine::SortOrder {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Count => crashtop_engine::SortOrder::Count,
            SortOrder::LastSeen => crashtop_engine::SortOrder::LastSeen,
            SortOrder::Rate => crashtop_engine::SortOrder::Rate,
        }
    }
}
