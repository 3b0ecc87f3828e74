use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a detected data-quality problem.
///
/// The analysis server identifies issue types by their display label
/// (`"Missing Values"`, `"Invalid Format"`, ...). Labels this client does not
/// know about are kept verbatim in `Other` so they still render and can be sent
/// back to the server unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueType {
    MissingValues,
    InvalidFormat,
    StatisticalOutlier,
    LogicalInconsistency,
    InvalidDate,
    BusinessRuleViolation,
    DuplicateRecords,
    Other(String),
}

impl IssueType {
    /// Label used on the wire and on issue cards.
    pub fn label(&self) -> &str {
        match self {
            IssueType::MissingValues => "Missing Values",
            IssueType::InvalidFormat => "Invalid Format",
            IssueType::StatisticalOutlier => "Statistical Outlier",
            IssueType::LogicalInconsistency => "Logical Inconsistency",
            IssueType::InvalidDate => "Invalid Date",
            IssueType::BusinessRuleViolation => "Business Rule Violation",
            IssueType::DuplicateRecords => "Duplicate Records",
            IssueType::Other(label) => label,
        }
    }
}

impl From<String> for IssueType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Missing Values" => IssueType::MissingValues,
            "Invalid Format" => IssueType::InvalidFormat,
            "Statistical Outlier" => IssueType::StatisticalOutlier,
            "Logical Inconsistency" => IssueType::LogicalInconsistency,
            "Invalid Date" => IssueType::InvalidDate,
            "Business Rule Violation" => IssueType::BusinessRuleViolation,
            "Duplicate Records" => IssueType::DuplicateRecords,
            _ => IssueType::Other(label),
        }
    }
}

impl From<IssueType> for String {
    fn from(issue_type: IssueType) -> Self {
        match issue_type {
            IssueType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How serious the server considers an issue. Also the CSS modifier of the card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Low,
    Medium,
    High,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Other(value) => value,
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            "info" => Severity::Info,
            "low" => Severity::Low,
            "medium" => Severity::Medium,
            "high" => Severity::High,
            _ => Severity::Other(value),
        }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected data-quality problem, as listed in `AnalysisResult::issues`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Affected column; `None` for dataset-wide issues such as duplicates.
    #[serde(default)]
    pub column: Option<String>,
    pub severity: Severity,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub description: String,
    /// Share of rows affected, when the server precomputed it.
    #[serde(
        default,
        deserialize_with = "crate::model::lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub percentage: Option<f64>,
}

impl Issue {
    /// Heading of the issue card: the column name, or "Dataset".
    pub fn title(&self) -> &str {
        self.column.as_deref().unwrap_or("Dataset")
    }

    /// Percentage of affected rows: the server value when present, otherwise
    /// `count / total_rows * 100`. An empty dataset yields 0.
    pub fn percentage_of(&self, total_rows: u64) -> f64 {
        match self.percentage {
            Some(percentage) => percentage,
            None if total_rows == 0 => 0.0,
            None => self.count as f64 / total_rows as f64 * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_and_unknown_issue_types() {
        let known: IssueType = serde_json::from_str("\"Invalid Date\"").unwrap();
        assert_eq!(known, IssueType::InvalidDate);

        let unknown: IssueType = serde_json::from_str("\"Encoding Problem\"").unwrap();
        assert_eq!(unknown, IssueType::Other("Encoding Problem".to_string()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"Encoding Problem\"");
    }

    #[test]
    fn decodes_issue_with_string_percentage() {
        let issue: Issue = serde_json::from_str(
            r#"{"type":"Missing Values","severity":"warning","count":2,
                "percentage":"20.0","column":"age",
                "description":"20.0% of values are missing in column \"age\""}"#,
        )
        .unwrap();

        assert_eq!(issue.issue_type, IssueType::MissingValues);
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.percentage, Some(20.0));
        assert_eq!(issue.title(), "age");
    }

    #[test]
    fn derives_percentage_when_absent() {
        let issue = Issue {
            issue_type: IssueType::DuplicateRecords,
            column: None,
            severity: Severity::Warning,
            count: 3,
            description: String::new(),
            percentage: None,
        };

        assert_eq!(issue.title(), "Dataset");
        assert!((issue.percentage_of(12) - 25.0).abs() < f64::EPSILON);
        assert_eq!(issue.percentage_of(0), 0.0);
    }
}
