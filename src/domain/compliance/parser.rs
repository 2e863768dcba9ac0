//! Policy document parser.
//!
//! Turns plain text or markdown into a [`PolicyDocument`]: title, sections
//! and metadata. File access stays with the caller; this type only needs
//! the text and where it came from.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::document::{DocumentMetadata, PolicyDocument, Section};
use super::errors::ComplianceError;
use crate::domain::foundation::{is_all_uppercase, title_case, Timestamp};

/// Extensions the checker recognizes.
pub const SUPPORTED_FORMATS: &[&str] = &[".pdf", ".docx", ".txt", ".md"];

/// Extensions whose text can be read directly.
const TEXT_FORMATS: &[&str] = &[".txt", ".md"];

const MAX_TITLE_WORDS: usize = 6;
const TITLE_SCAN_LINES: usize = 5;
const MAX_DATES: usize = 5;

// "1. Purpose", "12. Enforcement"
static NUMBERED_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.").expect("numbered header pattern must compile"));

// "SCOPE AND APPLICABILITY"
static CAPS_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z\s]+$").expect("caps header pattern must compile"));

// 01/15/2024, 2024-01-15, January 15, 2024
static DATE_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b").expect("slash date pattern must compile"),
        Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").expect("iso date pattern must compile"),
        Regex::new(r"\b\w+ \d{1,2}, \d{4}\b").expect("long date pattern must compile"),
    ]
});

/// Regex-based parser for policy documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyDocumentParser;

impl PolicyDocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Checks a path's extension and returns it lowercased with its dot.
    ///
    /// PDF and DOCX are recognized but their binary formats are not read.
    pub fn text_format(path: &Path) -> Result<String, ComplianceError> {
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        if !SUPPORTED_FORMATS.contains(&extension.as_str()) {
            return Err(ComplianceError::UnsupportedFormat(display_extension(
                &extension,
            )));
        }
        if !TEXT_FORMATS.contains(&extension.as_str()) {
            return Err(ComplianceError::UnsupportedFormat(format!(
                "{} (text extraction is not available for this format)",
                extension
            )));
        }
        Ok(extension)
    }

    /// Parses in-memory text. `source_name` stands in for a file path: it
    /// supplies the extension and the fallback title.
    pub fn parse_text(
        &self,
        content: &str,
        source_name: &str,
        file_size: Option<u64>,
    ) -> PolicyDocument {
        let content = content.trim();
        let path = Path::new(source_name);
        let raw_extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_else(|| ".txt".to_string());

        PolicyDocument {
            title: self.extract_title(content, path),
            content: content.to_string(),
            document_type: raw_extension.to_lowercase(),
            file_path: source_name.to_string(),
            metadata: self.extract_metadata(
                content,
                file_size.unwrap_or(content.len() as u64),
                raw_extension,
            ),
            sections: self.extract_sections(content),
            created_at: Timestamp::now(),
        }
    }

    /// First markdown header or short title-like line in the opening lines,
    /// else the file stem in title case.
    pub fn extract_title(&self, content: &str, path: &Path) -> String {
        for line in content.split('\n').take(TITLE_SCAN_LINES) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                return line.replace('#', "").trim().to_string();
            }
            if looks_like_title(line) {
                return line.to_string();
            }
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        title_case(&stem.replace(['_', '-'], " "))
    }

    /// Splits content at header lines. Text before the first header lands
    /// in "Introduction"; sections with no body are dropped.
    pub fn extract_sections(&self, content: &str) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut current = Section {
            title: "Introduction".to_string(),
            content: String::new(),
        };

        for line in content.split('\n') {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if self.is_header(line) {
                let finished = std::mem::replace(
                    &mut current,
                    Section {
                        title: line.replace('#', "").trim().to_string(),
                        content: String::new(),
                    },
                );
                if !finished.content.trim().is_empty() {
                    sections.push(finished);
                }
            } else {
                current.content.push_str(line);
                current.content.push('\n');
            }
        }

        if !current.content.trim().is_empty() {
            sections.push(current);
        }
        sections
    }

    fn is_header(&self, line: &str) -> bool {
        line.starts_with('#')
            || is_all_uppercase(line)
            || NUMBERED_HEADER.is_match(line)
            || CAPS_HEADER.is_match(line)
    }

    pub fn extract_metadata(
        &self,
        content: &str,
        file_size: u64,
        file_extension: String,
    ) -> DocumentMetadata {
        let dates: Vec<String> = DATE_PATTERNS
            .iter()
            .flat_map(|re| re.find_iter(content).map(|m| m.as_str().to_string()))
            .take(MAX_DATES)
            .collect();

        DocumentMetadata {
            file_size,
            word_count: content.split_whitespace().count(),
            character_count: content.chars().count(),
            line_count: content.split('\n').count(),
            file_extension,
            dates_mentioned: if dates.is_empty() { None } else { Some(dates) },
        }
    }
}

fn looks_like_title(line: &str) -> bool {
    let lower = line.to_lowercase();
    line.split_whitespace().count() <= MAX_TITLE_WORDS
        && !line.ends_with('.')
        && !["some", "this", "the"].iter().any(|p| lower.starts_with(p))
}

fn display_extension(extension: &str) -> String {
    if extension.is_empty() {
        "(none)".to_string()
    } else {
        extension.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: &str = "# Remote Work Policy\n\n\
        Effective 01/15/2024 and reviewed 2024-06-01.\n\n\
        ## Purpose\n\
        This policy explains remote work.\n\n\
        SCOPE\n\
        Applies to all employees.\n\n\
        1. Responsibilities\n\
        Managers approve schedules.\n";

    fn parser() -> PolicyDocumentParser {
        PolicyDocumentParser::new()
    }

    #[test]
    fn markdown_header_becomes_title() {
        let doc = parser().parse_text(POLICY, "remote_work.md", None);
        assert_eq!(doc.title, "Remote Work Policy");
        assert_eq!(doc.document_type, ".md");
    }

    #[test]
    fn sections_split_on_all_header_styles() {
        let doc = parser().parse_text(POLICY, "remote_work.md", None);
        let titles: Vec<_> = doc.section_titles().collect();
        assert_eq!(
            titles,
            vec!["Remote Work Policy", "Purpose", "SCOPE", "1. Responsibilities"]
        );
        assert_eq!(doc.sections[2].content, "Applies to all employees.\n");
    }

    #[test]
    fn leading_text_goes_to_introduction() {
        let doc = parser().parse_text(
            "This is the opening paragraph of the policy.\nPURPOSE\nTo help.",
            "policy.txt",
            None,
        );
        assert_eq!(doc.sections[0].title, "Introduction");
        assert_eq!(doc.sections[1].title, "PURPOSE");
    }

    #[test]
    fn sentence_lines_are_not_titles() {
        let doc = parser().parse_text(
            "The policy applies to everyone in the building today.\nSome more words here.",
            "data-privacy_policy.txt",
            None,
        );
        assert_eq!(doc.title, "Data Privacy Policy");
    }

    #[test]
    fn short_line_is_taken_as_title() {
        let doc = parser().parse_text("Code of Conduct\nBe kind.", "x.txt", None);
        assert_eq!(doc.title, "Code of Conduct");
    }

    #[test]
    fn metadata_counts_and_dates() {
        let doc = parser().parse_text(POLICY, "remote_work.md", Some(999));
        assert_eq!(doc.metadata.file_size, 999);
        assert_eq!(doc.metadata.file_extension, ".md");
        assert_eq!(
            doc.metadata.dates_mentioned,
            Some(vec!["01/15/2024".to_string(), "2024-06-01".to_string()])
        );
        assert!(doc.metadata.word_count > 10);
    }

    #[test]
    fn no_dates_leaves_field_absent() {
        let doc = parser().parse_text("Plain words only", "p.txt", None);
        assert!(doc.metadata.dates_mentioned.is_none());
        assert_eq!(doc.metadata.line_count, 1);
    }

    #[test]
    fn dates_capped_at_five() {
        let text = (1..=8)
            .map(|d| format!("0{}/01/2024", d))
            .collect::<Vec<_>>()
            .join(" ");
        let doc = parser().parse_text(&text, "d.txt", None);
        assert_eq!(doc.metadata.dates_mentioned.unwrap().len(), 5);
    }

    #[test]
    fn text_format_accepts_markdown_and_text() {
        assert_eq!(
            PolicyDocumentParser::text_format(Path::new("a/b/Policy.MD")).unwrap(),
            ".md"
        );
        assert_eq!(
            PolicyDocumentParser::text_format(Path::new("notes.txt")).unwrap(),
            ".txt"
        );
    }

    #[test]
    fn text_format_rejects_binary_and_unknown() {
        assert!(matches!(
            PolicyDocumentParser::text_format(Path::new("policy.pdf")),
            Err(ComplianceError::UnsupportedFormat(_))
        ));
        let err = PolicyDocumentParser::text_format(Path::new("policy.xlsx")).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file format: .xlsx");
    }
}
