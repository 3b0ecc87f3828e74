//! View model of a rendered `AnalysisResult`: gauge, stat cards, issue list
//! and column table. Built once per result; components only read it.

use crate::config::DashboardConfig;
use crate::quality::{ColumnStatus, Gauge, QualityBand, QualityIndicators};
use common::model::analysis::AnalysisResult;
use common::model::issue::Issue;
use num_format::{Locale, ToFormattedString};

/// Thousands-separated count, e.g. `12,480`.
pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// One decimal place with a percent sign, e.g. `20.0%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `"1 issue"` / `"N issues"`.
pub fn issue_count_label(count: usize) -> String {
    if count == 1 {
        "1 issue".to_string()
    } else {
        format!("{} issues", count)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCards {
    pub total_rows: String,
    pub total_columns: String,
    pub file_size: String,
    pub quality_score: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueCard {
    /// Position in `AnalysisResult::issues`; the key for selection.
    pub index: usize,
    pub type_label: String,
    pub severity_class: String,
    pub title: String,
    pub count: String,
    pub description: String,
}

impl IssueCard {
    fn new(index: usize, issue: &Issue) -> Self {
        Self {
            index,
            type_label: issue.issue_type.label().to_string(),
            severity_class: issue.severity.as_str().to_string(),
            title: issue.title().to_string(),
            count: format_count(issue.count),
            description: issue.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRow {
    pub name: String,
    pub data_type: String,
    pub missing: String,
    pub unique: String,
    pub status: ColumnStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub filename: String,
    pub score: u32,
    pub band: QualityBand,
    pub gauge: Gauge,
    pub summary: &'static str,
    pub indicators: QualityIndicators,
    pub stats: StatCards,
    pub issues_label: String,
    pub issue_cards: Vec<IssueCard>,
    pub column_rows: Vec<ColumnRow>,
}

impl AnalysisView {
    pub fn render(result: &AnalysisResult, config: &DashboardConfig) -> Self {
        let band = QualityBand::from_score(result.quality_score);

        let issue_cards = result
            .issues
            .iter()
            .enumerate()
            .map(|(index, issue)| IssueCard::new(index, issue))
            .collect();

        let column_rows = result
            .columns
            .iter()
            .map(|column| ColumnRow {
                name: column.name.clone(),
                data_type: column.data_type.clone(),
                missing: format_percentage(column.missing_percentage),
                unique: format_percentage(column.unique_percentage),
                status: ColumnStatus::from_missing(column.missing_percentage),
            })
            .collect();

        Self {
            filename: result.filename.clone(),
            score: result.quality_score,
            band,
            gauge: Gauge::new(result.quality_score, config.gauge_radius),
            summary: band.summary(),
            indicators: QualityIndicators::from_result(result),
            stats: StatCards {
                total_rows: format_count(result.total_rows),
                total_columns: format_count(result.total_columns),
                file_size: result.file_size.clone(),
                quality_score: result.quality_score.to_string(),
            },
            issues_label: issue_count_label(result.issues.len()),
            issue_cards,
            column_rows,
        }
    }

    pub fn has_issues(&self) -> bool {
        !self.issue_cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::analysis::ColumnSummary;
    use common::model::issue::{IssueType, Severity};

    fn column(name: &str, missing: f64) -> ColumnSummary {
        ColumnSummary {
            name: name.to_string(),
            data_type: "numeric".to_string(),
            missing_percentage: missing,
            unique_percentage: 50.0,
        }
    }

    fn result(score: u32, issues: Vec<Issue>) -> AnalysisResult {
        AnalysisResult {
            analysis_id: Some(1),
            filename: "visits.csv".to_string(),
            file_size: "3.4 MB".to_string(),
            total_rows: 12480,
            total_columns: 2,
            quality_score: score,
            timestamp: None,
            columns: vec![column("id", 0.0), column("weight", 12.5)],
            issues,
        }
    }

    fn issue(issue_type: IssueType) -> Issue {
        Issue {
            issue_type,
            column: Some("weight".to_string()),
            severity: Severity::Error,
            count: 1560,
            description: "bad".to_string(),
            percentage: None,
        }
    }

    #[test]
    fn renders_summary_for_score_band() {
        let view = AnalysisView::render(&result(85, vec![]), &DashboardConfig::default());
        assert_eq!(view.band, QualityBand::Excellent);
        assert_eq!(
            view.summary,
            "Excellent data quality. Minor issues detected. Dataset is ready for analysis."
        );
        assert_eq!(view.issues_label, "0 issues");
        assert!(!view.has_issues());
    }

    #[test]
    fn formats_stat_cards_with_separators() {
        let view = AnalysisView::render(&result(50, vec![]), &DashboardConfig::default());
        assert_eq!(view.stats.total_rows, "12,480");
        assert_eq!(view.stats.file_size, "3.4 MB");
        assert_eq!(view.stats.quality_score, "50");
    }

    #[test]
    fn issue_cards_keep_result_order() {
        let view = AnalysisView::render(
            &result(
                70,
                vec![issue(IssueType::MissingValues), issue(IssueType::InvalidFormat)],
            ),
            &DashboardConfig::default(),
        );

        assert_eq!(view.issues_label, "2 issues");
        assert_eq!(view.issue_cards[1].index, 1);
        assert_eq!(view.issue_cards[1].type_label, "Invalid Format");
        assert_eq!(view.issue_cards[0].count, "1,560");
        assert_eq!(view.issue_cards[0].severity_class, "error");
        assert!(!view.indicators.valid);
        assert!(view.indicators.consistent);
    }

    #[test]
    fn column_rows_carry_status() {
        let view = AnalysisView::render(&result(70, vec![]), &DashboardConfig::default());
        assert_eq!(view.column_rows[0].status, ColumnStatus::Good);
        assert_eq!(view.column_rows[1].status, ColumnStatus::Poor);
        assert_eq!(view.column_rows[1].missing, "12.5%");
        // mean completeness (100 + 87.5) / 2 = 93.75
        assert!(view.indicators.complete);
    }

    #[test]
    fn single_issue_label_is_singular() {
        assert_eq!(issue_count_label(1), "1 issue");
    }
}
