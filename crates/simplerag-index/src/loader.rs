//! Document loading for uploaded files
//!
//! Dispatches on file extension and extracts plain text:
//! - PDF via `pdf-extract`
//! - DOCX via `docx-rs` (paragraph runs only; tables and headers are
//!   flattened into the text stream)
//! - everything else read as UTF-8 text

use std::path::Path;

use simplerag_core::{RagError, Result};

/// Supported file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    PlainText,
}

impl FileType {
    /// Detect file type from path extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("pdf") => Self::Pdf,
            Some("docx") => Self::Docx,
            _ => Self::PlainText,
        }
    }
}

/// Load a document and extract its text content
///
/// Returns an error if the file cannot be read or yields no text.
pub fn load_document(path: &Path) -> Result<String> {
    let text = match FileType::from_path(path) {
        FileType::Pdf => extract_pdf(path)?,
        FileType::Docx => extract_docx(path)?,
        FileType::PlainText => std::fs::read_to_string(path)?,
    };

    if text.trim().is_empty() {
        return Err(RagError::Parse(format!(
            "No text content extracted from {}",
            path.display()
        )));
    }

    Ok(text)
}

fn extract_pdf(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| RagError::Parse(format!("PDF parsing error: {e}")))
}

fn extract_docx(path: &Path) -> Result<String> {
    let buf = std::fs::read(path)?;
    let docx =
        docx_rs::read_docx(&buf).map_err(|e| RagError::Parse(format!("DOCX parsing error: {e}")))?;

    let mut content = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(para) = child {
            for para_child in &para.children {
                if let docx_rs::ParagraphChild::Run(run) = para_child {
                    for run_child in &run.children {
                        if let docx_rs::RunChild::Text(text) = run_child {
                            content.push_str(&text.text);
                        }
                    }
                }
            }
            content.push('\n');
        }
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn temp_txt() -> NamedTempFile {
        Builder::new().suffix(".txt").tempfile().unwrap()
    }

    #[test]
    fn test_file_type_from_path() {
        assert_eq!(FileType::from_path(Path::new("report.pdf")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("a/b/Memo.DOCX")), FileType::Docx);
        assert_eq!(
            FileType::from_path(Path::new("notes.txt")),
            FileType::PlainText
        );
        assert_eq!(
            FileType::from_path(Path::new("README.md")),
            FileType::PlainText
        );
        assert_eq!(FileType::from_path(Path::new("noext")), FileType::PlainText);
    }

    #[test]
    fn test_load_plain_text() {
        let mut file = temp_txt();
        writeln!(file, "The quarterly report covers revenue and churn.").unwrap();

        let text = load_document(file.path()).unwrap();
        assert!(text.contains("quarterly report"));
    }

    #[test]
    fn test_load_empty_file_is_error() {
        let file = temp_txt();

        let err = load_document(file.path()).unwrap_err();
        assert!(err.to_string().contains("No text content"));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = load_document(Path::new("/nonexistent/file.txt")).unwrap_err();
        assert!(matches!(err, RagError::Io(_)));
    }
}
