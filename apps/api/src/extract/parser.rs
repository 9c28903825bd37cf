//! Resume text extraction from uploaded files.

use anyhow::Context;

use crate::errors::AppError;

/// Extracts plain text from an uploaded resume. PDF via `pdf-extract`,
/// `.txt` read as UTF-8; anything else is rejected up front.
pub fn extract_text(content: &[u8], filename: &str) -> Result<String, AppError> {
    let lower = filename.to_lowercase();

    let text = if lower.ends_with(".pdf") {
        pdf_extract::extract_text_from_mem(content)
            .context("failed to extract text from PDF")
            .map_err(AppError::Internal)?
    } else if lower.ends_with(".txt") {
        String::from_utf8(content.to_vec())
            .map_err(|_| AppError::Validation("Text file is not valid UTF-8".to_string()))?
    } else {
        return Err(AppError::Validation(
            "Invalid file format. Only PDF and TXT allowed.".to_string(),
        ));
    };

    Ok(clean_text(&text))
}

/// Collapses whitespace and strips characters that never appear in skill
/// names (keeps word chars, spaces, and - + # .).
pub fn clean_text(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut last_was_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !last_was_space && !cleaned.is_empty() {
                cleaned.push(' ');
            }
            last_was_space = true;
        } else if c.is_alphanumeric() || matches!(c, '-' | '+' | '#' | '.' | '_' | ',' | ':' | '/')
        {
            cleaned.push(c);
            last_was_space = false;
        }
    }
    cleaned.trim_end().to_string()
}
