pub mod document;
#[cfg(test)]
pub mod fixtures;
pub mod outline;

pub use document::PdfDocument;

/// Decode a PDF text string (UTF-16BE or UTF-8 with BOM, else PDFDocEncoding).
pub(crate) fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let u16_chars: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        String::from_utf16_lossy(&u16_chars)
    } else if let Some(utf8) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8_lossy(utf8).into_owned()
    } else {
        // PDFDocEncoding / Latin-1 (simplified)
        bytes.iter().map(|&b| b as char).collect()
    }
}
