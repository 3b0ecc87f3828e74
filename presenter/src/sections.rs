//! Splits a generated issue analysis into its `###` sections.

use crate::config::SectionHeaders;
use crate::markdown::MarkdownRenderer;
use regex::Regex;

/// Rendered HTML of each section. An empty string means the section was
/// missing from the generated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisSections {
    pub summary: String,
    pub impact: String,
    pub recommendations: String,
    pub context: String,
}

impl AnalysisSections {
    /// Markdown split by `headers` and rendered with `renderer`.
    pub fn parse(markdown: &str, headers: &SectionHeaders, renderer: &MarkdownRenderer) -> Self {
        let render = |header: &str| {
            extract_section(markdown, header)
                .map(|body| renderer.render(body))
                .unwrap_or_default()
        };
        Self {
            summary: render(&headers.summary),
            impact: render(&headers.impact),
            recommendations: render(&headers.recommendations),
            context: render(&headers.context),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.impact.is_empty()
            && self.recommendations.is_empty()
            && self.context.is_empty()
    }
}

/// Text between `### {header}` (case-insensitive) and the next `###` or the
/// end of input, trimmed. `None` when the header does not occur or its body
/// is blank.
pub fn extract_section<'a>(markdown: &'a str, header: &str) -> Option<&'a str> {
    let pattern = format!(r"(?is)###\s*{}\s*(.*?)(?:###|\z)", regex::escape(header));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(err) => {
            log::error!("cannot build section pattern for {:?}: {}", header, err);
            return None;
        }
    };
    re.captures(markdown)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|body| !body.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANALYSIS: &str = "### Executive Summary\nTwo ages are missing.\n\n\
        ### Impact Analysis\nAverages skew low.\n\n\
        ### Recommended Actions\n- Impute median\n- Flag rows\n\n\
        ### Healthcare Context\nAge drives dosage.";

    #[test]
    fn extracts_each_section() {
        assert_eq!(
            extract_section(ANALYSIS, "Executive Summary"),
            Some("Two ages are missing.")
        );
        assert_eq!(
            extract_section(ANALYSIS, "Recommended Actions"),
            Some("- Impute median\n- Flag rows")
        );
        assert_eq!(
            extract_section(ANALYSIS, "Healthcare Context"),
            Some("Age drives dosage.")
        );
    }

    #[test]
    fn header_match_ignores_case() {
        let markdown = "### EXECUTIVE SUMMARY\nshouting";
        assert_eq!(extract_section(markdown, "Executive Summary"), Some("shouting"));
    }

    #[test]
    fn missing_section_is_none() {
        assert_eq!(extract_section("### Impact Analysis\nx", "Healthcare Context"), None);
        assert_eq!(extract_section("### Impact Analysis\n   \n### Other", "Impact Analysis"), None);
    }

    #[test]
    fn parse_renders_found_sections_only() {
        let sections = AnalysisSections::parse(
            "### Executive Summary\n**Risk:** high",
            &SectionHeaders::default(),
            &MarkdownRenderer::fallback(),
        );

        assert_eq!(
            sections.summary,
            "<p class=\"subsection-content\"><span class=\"subsection-label\">Risk:</span> high</p>"
        );
        assert!(sections.impact.is_empty());
        assert!(sections.recommendations.is_empty());
        assert!(!sections.is_empty());
    }

    #[test]
    fn configured_headers_are_literal() {
        let headers = SectionHeaders {
            context: "Context (domain)".to_string(),
            ..SectionHeaders::default()
        };
        let sections = AnalysisSections::parse(
            "### Context (domain)\nretail",
            &headers,
            &MarkdownRenderer::fallback(),
        );
        assert_eq!(sections.context, "<p>retail</p>");
    }
}
