//! Score bands, the gauge geometry and the per-column status classification.

use common::model::analysis::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityBand {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl QualityBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => QualityBand::Excellent,
            60..=79 => QualityBand::Good,
            40..=59 => QualityBand::Moderate,
            _ => QualityBand::Poor,
        }
    }

    /// Stroke colour of the gauge. Moderate scores share the red of poor ones.
    pub fn color(self) -> &'static str {
        match self {
            QualityBand::Excellent => "#00FF94",
            QualityBand::Good => "#FFB800",
            QualityBand::Moderate | QualityBand::Poor => "#FF006E",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            QualityBand::Excellent => {
                "Excellent data quality. Minor issues detected. Dataset is ready for analysis."
            }
            QualityBand::Good => {
                "Good data quality with some concerns. Review flagged issues before proceeding."
            }
            QualityBand::Moderate => {
                "Moderate data quality issues detected. Data cleaning recommended before analysis."
            }
            QualityBand::Poor => {
                "Significant data quality issues found. Extensive data preparation required."
            }
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            QualityBand::Excellent => "excellent",
            QualityBand::Good => "good",
            QualityBand::Moderate => "moderate",
            QualityBand::Poor => "poor",
        }
    }
}

/// Stroke parameters of the circular score gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gauge {
    pub circumference: f64,
    /// `stroke-dashoffset`: the circumference minus the filled share.
    pub offset: f64,
    pub color: &'static str,
}

impl Gauge {
    pub fn new(score: u32, radius: f64) -> Self {
        let circumference = 2.0 * std::f64::consts::PI * radius;
        let filled = f64::from(score.min(100)) / 100.0 * circumference;
        Self {
            circumference,
            offset: circumference - filled,
            color: QualityBand::from_score(score).color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnStatus {
    Good,
    Fair,
    Poor,
}

impl ColumnStatus {
    pub fn from_missing(missing_percentage: f64) -> Self {
        if missing_percentage > 10.0 {
            ColumnStatus::Poor
        } else if missing_percentage > 5.0 {
            ColumnStatus::Fair
        } else {
            ColumnStatus::Good
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnStatus::Good => "Good",
            ColumnStatus::Fair => "Fair",
            ColumnStatus::Poor => "Poor",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ColumnStatus::Good => "ok",
            ColumnStatus::Fair => "warning",
            ColumnStatus::Poor => "error",
        }
    }
}

/// The three pass/fail badges under the gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityIndicators {
    /// Mean per-column completeness above 90%.
    pub complete: bool,
    /// No "Invalid Format" issue.
    pub valid: bool,
    /// No "Logical Inconsistency" issue.
    pub consistent: bool,
}

impl QualityIndicators {
    pub fn from_result(result: &AnalysisResult) -> Self {
        use common::model::issue::IssueType;

        let complete = if result.columns.is_empty() {
            false
        } else {
            let total: f64 = result
                .columns
                .iter()
                .map(|c| 100.0 - c.missing_percentage)
                .sum();
            total / result.columns.len() as f64 > 90.0
        };
        let has = |kind: IssueType| result.issues.iter().any(|i| i.issue_type == kind);

        Self {
            complete,
            valid: !has(IssueType::InvalidFormat),
            consistent: !has(IssueType::LogicalInconsistency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_follow_score_thresholds() {
        assert_eq!(QualityBand::from_score(100), QualityBand::Excellent);
        assert_eq!(QualityBand::from_score(80), QualityBand::Excellent);
        assert_eq!(QualityBand::from_score(79), QualityBand::Good);
        assert_eq!(QualityBand::from_score(60), QualityBand::Good);
        assert_eq!(QualityBand::from_score(59), QualityBand::Moderate);
        assert_eq!(QualityBand::from_score(40), QualityBand::Moderate);
        assert_eq!(QualityBand::from_score(39), QualityBand::Poor);
        assert_eq!(QualityBand::from_score(0), QualityBand::Poor);
    }

    #[test]
    fn gauge_offset_is_unfilled_share() {
        let gauge = Gauge::new(75, 85.0);
        let expected = gauge.circumference * 0.25;
        assert!((gauge.offset - expected).abs() < 1e-9);
        assert_eq!(gauge.color, "#FFB800");

        let full = Gauge::new(100, 85.0);
        assert!(full.offset.abs() < 1e-9);

        let empty = Gauge::new(0, 85.0);
        assert!((empty.offset - empty.circumference).abs() < 1e-9);
        assert_eq!(empty.color, "#FF006E");
    }

    #[test]
    fn gauge_clamps_out_of_range_scores() {
        let gauge = Gauge::new(140, 85.0);
        assert!(gauge.offset.abs() < 1e-9);
    }

    #[test]
    fn column_status_thresholds_are_exclusive() {
        assert_eq!(ColumnStatus::from_missing(0.0), ColumnStatus::Good);
        assert_eq!(ColumnStatus::from_missing(5.0), ColumnStatus::Good);
        assert_eq!(ColumnStatus::from_missing(5.1), ColumnStatus::Fair);
        assert_eq!(ColumnStatus::from_missing(10.0), ColumnStatus::Fair);
        assert_eq!(ColumnStatus::from_missing(10.1), ColumnStatus::Poor);
        assert_eq!(ColumnStatus::Poor.css_class(), "error");
    }
}
