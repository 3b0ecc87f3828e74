//! Markdown to sanitized HTML for generated issue analyses.
//!
//! The primary renderer walks `pulldown_cmark` events and only ever writes an
//! allow-listed set of tags (`p`, `ul`, `ol`, `li`, `em`, `strong`, `br`,
//! `hr`), without attributes. Everything else keeps its text content. Raw HTML
//! in the input is reduced to escaped text and `<script>`/`<style>` bodies are
//! dropped entirely. The result is post-processed into the dashboard's
//! recommendation-list and subsection-label markup.
//!
//! When the primary renderer is compiled out (feature `markdown`) or fails,
//! a small line-oriented formatter produces the same markup for the subset of
//! markdown the analysis generator emits.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("closing tag without matching opening tag")]
    UnbalancedMarkup,
    #[error("{0} element(s) left open")]
    UnclosedMarkup(usize),
    #[error("markdown renderer not available in this build")]
    Unavailable,
}

/// Escapes text for insertion into HTML.
///
/// # Arguments
/// * `input` - The raw string to escape.
///
/// # Returns
/// A new string with `&`, `<`, `>`, `"`, and `'` replaced by their respective
/// HTML entities.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownRenderer {
    mode: RenderMode,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// The primary renderer when compiled in, otherwise the fallback.
    pub fn new() -> Self {
        let mode = if cfg!(feature = "markdown") {
            RenderMode::Primary
        } else {
            RenderMode::Fallback
        };
        Self { mode }
    }

    pub fn fallback() -> Self {
        Self {
            mode: RenderMode::Fallback,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Renders `markdown` to sanitized HTML. Never fails: a primary renderer
    /// error degrades to the fallback formatter.
    pub fn render(&self, markdown: &str) -> String {
        if self.mode == RenderMode::Fallback {
            return render_fallback(markdown);
        }
        match render_primary(markdown) {
            Ok(html) => post_process(&html),
            Err(err) => {
                log::warn!("markdown renderer failed ({}), using fallback formatter", err);
                render_fallback(markdown)
            }
        }
    }
}

fn subsection_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<p><strong>([^<]+):</strong>\s*(.*?)</p>").expect("valid regex")
    })
}

/// Adds the dashboard classes to lists and `**Label:** text` paragraphs.
fn post_process(html: &str) -> String {
    let html = html.replace("<ul>", "<ul class=\"recommendation-list\">");
    subsection_re()
        .replace_all(
            &html,
            r#"<p class="subsection-content"><span class="subsection-label">$1:</span> $2</p>"#,
        )
        .trim()
        .to_string()
}

#[cfg(not(feature = "markdown"))]
fn render_primary(_markdown: &str) -> Result<String, RenderError> {
    Err(RenderError::Unavailable)
}

#[cfg(feature = "markdown")]
fn render_primary(markdown: &str) -> Result<String, RenderError> {
    use pulldown_cmark::{Event, Options, Parser, Tag};

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    // comments go first so tags inside them never reach the writer
    let markdown = html_comment_re().replace_all(markdown, "");
    let mut writer = SafeWriter::default();
    for event in Parser::new_ext(&markdown, options) {
        if let Event::Html(raw) | Event::InlineHtml(raw) = &event {
            writer.raw.push_str(raw);
            continue;
        }
        writer.flush_raw();

        match event {
            Event::Start(tag) => {
                let element = match tag {
                    Tag::Paragraph | Tag::Heading { .. } | Tag::CodeBlock(_) => Some("p"),
                    Tag::List(None) => Some("ul"),
                    Tag::List(Some(_)) => Some("ol"),
                    Tag::Item => Some("li"),
                    Tag::Emphasis => Some("em"),
                    Tag::Strong => Some("strong"),
                    _ => None,
                };
                writer.open(element);
            }
            Event::End(_) => writer.close()?,
            Event::Text(text) | Event::Code(text) => writer.text(&text),
            Event::SoftBreak | Event::HardBreak => writer.out.push_str("<br>"),
            Event::Rule => writer.out.push_str("<hr>\n"),
            Event::TaskListMarker(checked) => {
                writer.out.push_str(if checked { "[x] " } else { "[ ] " })
            }
            _ => {}
        }
    }
    writer.flush_raw();
    writer.finish()
}

fn html_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"))
}

fn script_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<(script|style)\b[^>]*>").expect("valid regex"))
}

fn script_close_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</(script|style)\s*>").expect("valid regex"))
}

fn any_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

#[derive(Default)]
struct SafeWriter {
    out: String,
    /// Allow-listed element per open markdown tag; `None` keeps content only.
    stack: Vec<Option<&'static str>>,
    /// Raw HTML collected until the next non-HTML event.
    raw: String,
    /// Inside a `<script>` or `<style>` element.
    suppress: bool,
}

impl SafeWriter {
    fn open(&mut self, element: Option<&'static str>) {
        if let Some(name) = element {
            self.out.push('<');
            self.out.push_str(name);
            self.out.push('>');
        }
        self.stack.push(element);
    }

    fn close(&mut self) -> Result<(), RenderError> {
        match self.stack.pop() {
            Some(Some(name)) => {
                self.out.push_str("</");
                self.out.push_str(name);
                self.out.push('>');
                if matches!(name, "p" | "ul" | "ol") {
                    self.out.push('\n');
                }
                Ok(())
            }
            Some(None) => Ok(()),
            None => Err(RenderError::UnbalancedMarkup),
        }
    }

    fn text(&mut self, text: &str) {
        if !self.suppress {
            self.out.push_str(&escape_html(text));
        }
    }

    fn flush_raw(&mut self) {
        if self.raw.is_empty() {
            return;
        }
        let raw = std::mem::take(&mut self.raw);
        let raw = html_comment_re().replace_all(&raw, "");
        let mut rest: &str = &raw;
        loop {
            if self.suppress {
                match script_close_re().find(rest) {
                    Some(m) => {
                        self.suppress = false;
                        rest = &rest[m.end()..];
                    }
                    None => return,
                }
            } else {
                match script_open_re().find(rest) {
                    Some(m) => {
                        self.strip_tags(&rest[..m.start()]);
                        self.suppress = true;
                        rest = &rest[m.end()..];
                    }
                    None => {
                        self.strip_tags(rest);
                        return;
                    }
                }
            }
        }
    }

    fn strip_tags(&mut self, raw: &str) {
        let text = any_tag_re().replace_all(raw, "");
        self.out.push_str(&escape_html(&text));
    }

    fn finish(self) -> Result<String, RenderError> {
        if self.stack.is_empty() {
            Ok(self.out)
        } else {
            Err(RenderError::UnclosedMarkup(self.stack.len()))
        }
    }
}

fn rule_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\*{3,}|-{3,}|_{3,})$").expect("valid regex"))
}

fn label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\*\*([^*]+):\*\*\s*").expect("valid regex"))
}

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"))
}

fn bullet_text(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some('-' | '*'), Some(c)) if c.is_whitespace() => Some(line[1 + c.len_utf8()..].trim()),
        _ => None,
    }
}

fn bold(escaped: &str) -> String {
    bold_re()
        .replace_all(escaped, "<strong>$1</strong>")
        .into_owned()
}

/// Line-oriented formatter used when the primary renderer is unavailable.
///
/// Blocks are separated by blank lines. A block with any `- `/`* ` line
/// becomes a recommendation list of its bullet lines; `***`, `---` or `___`
/// becomes a rule; a block starting with `**Label:**` becomes a subsection
/// paragraph; anything else a plain paragraph. `**bold**` is honoured inline.
/// Input is escaped before any markup is added.
pub fn render_fallback(markdown: &str) -> String {
    let normalized = markdown.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .filter_map(|block| fallback_block(block.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn fallback_block(block: &str) -> Option<String> {
    if block.is_empty() {
        return None;
    }

    if block.lines().any(|line| bullet_text(line).is_some()) {
        let items = block
            .lines()
            .filter_map(|line| bullet_text(line.trim()))
            .map(|item| format!("<li>{}</li>", bold(&escape_html(item))))
            .collect::<Vec<_>>()
            .join("");
        return Some(format!("<ul class=\"recommendation-list\">{}</ul>", items));
    }

    if rule_re().is_match(block) {
        return Some("<hr>".to_string());
    }

    let escaped = escape_html(block);
    if let Some(caps) = label_re().captures(&escaped) {
        let rest = &escaped[caps[0].len()..];
        return Some(format!(
            "<p class=\"subsection-content\"><span class=\"subsection-label\">{}:</span> {}</p>",
            &caps[1],
            bold(rest)
        ));
    }

    Some(format!("<p>{}</p>", bold(&escaped)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_covers_quotes() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn fallback_builds_recommendation_list() {
        let html = render_fallback("- Impute **median** values\n- Flag rows");
        assert_eq!(
            html,
            "<ul class=\"recommendation-list\"><li>Impute <strong>median</strong> values</li><li>Flag rows</li></ul>"
        );
    }

    #[test]
    fn fallback_labels_and_rules() {
        let html = render_fallback("**Risk:** high\n\n---\n\nplain text");
        assert_eq!(
            html,
            "<p class=\"subsection-content\"><span class=\"subsection-label\">Risk:</span> high</p>\n<hr>\n<p>plain text</p>"
        );
    }

    #[test]
    fn fallback_bold_label() {
        assert_eq!(
            render_fallback("**Bold:** text"),
            "<p class=\"subsection-content\"><span class=\"subsection-label\">Bold:</span> text</p>"
        );
    }

    #[test]
    fn fallback_escapes_markup() {
        let html = render_fallback("<img src=x onerror=alert(1)> **ok**");
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img"));
        assert!(html.contains("<strong>ok</strong>"));
    }

    #[test]
    fn fallback_mode_never_uses_primary() {
        let renderer = MarkdownRenderer::fallback();
        assert_eq!(renderer.mode(), RenderMode::Fallback);
        assert_eq!(renderer.render("a\n\nb"), "<p>a</p>\n<p>b</p>");
    }

    #[cfg(feature = "markdown")]
    mod primary {
        use super::super::*;

        fn render(markdown: &str) -> String {
            MarkdownRenderer::new().render(markdown)
        }

        #[test]
        fn labelled_paragraph_matches_fallback() {
            let markdown = "**Risk:** high";
            assert_eq!(render(markdown), render_fallback(markdown));
        }

        #[test]
        fn lists_get_recommendation_class() {
            let html = render("- one\n- two");
            assert!(html.starts_with("<ul class=\"recommendation-list\">"));
            assert!(html.contains("<li>one</li>"));
        }

        #[test]
        fn drops_script_elements() {
            let html = render("Hello <script>alert(1)</script> world");
            assert!(!html.contains("<script"));
            assert!(!html.contains("alert"));
            assert!(html.contains("Hello"));
            assert!(html.contains("world"));
        }

        #[test]
        fn drops_script_blocks() {
            let html = render("<script>\nsteal()\n</script>\n\nafter");
            assert!(!html.contains("steal"));
            assert!(html.contains("<p>after</p>"));
        }

        #[test]
        fn strips_attributes_and_unknown_elements() {
            let html = render("<div onclick=\"x()\">inside</div>\n\n[click](javascript:alert(1))");
            assert!(!html.contains("<div"));
            assert!(!html.contains("onclick"));
            assert!(!html.contains("href"));
            assert!(html.contains("inside"));
            assert!(html.contains("click"));
        }

        #[test]
        fn script_inside_comment_keeps_following_text() {
            let html = render("Intro <!-- <script> --> kept?\n\nSecond paragraph stays.");
            assert!(!html.contains("<script"));
            assert!(!html.contains("&lt;!--"));
            assert!(html.contains("Intro"));
            assert!(html.contains("kept?"));
            assert!(html.contains("<p>Second paragraph stays.</p>"));
        }

        #[test]
        fn comment_block_is_dropped() {
            let html = render("<!--\n<style>p{}</style>\n-->\n\nafter");
            assert!(!html.contains("p{}"));
            assert!(html.contains("<p>after</p>"));
        }

        #[test]
        fn single_newlines_become_breaks() {
            assert_eq!(render("first\nsecond"), "<p>first<br>second</p>");
        }
    }
}
