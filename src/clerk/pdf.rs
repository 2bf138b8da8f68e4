use log::debug;

use crate::error::ClerkError;

/// Extracts the plain-text body of a PDF.
///
/// No retry here; the caller decides whether an unreadable filing aborts the
/// batch or is skipped.
pub fn extract_text(bytes: &[u8]) -> Result<String, ClerkError> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        ClerkError::Extraction {
            detail: e.to_string(),
        }
    })?;
    debug!("extracted {} chars of text", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_an_extraction_error() {
        let result = extract_text(b"this is not a pdf");
        assert!(matches!(result, Err(ClerkError::Extraction { .. })));
    }
}
