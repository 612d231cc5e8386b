use crate::domain::model::SourceEncoding;
use crate::utils::error::{ConvertError, Result};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Decodes an uploaded file: strict UTF-8 first, then the single-byte fallback
/// over the same bytes.
pub fn decode_bytes(bytes: &[u8]) -> Result<(String, SourceEncoding)> {
    if bytes.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    // 只剝除 UTF-8 BOM，其他 BOM 交給後備編碼處理
    let body = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) if encoding == UTF_8 => &bytes[bom_len..],
        _ => bytes,
    };

    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(body) {
        return Ok((text.into_owned(), SourceEncoding::Utf8));
    }

    tracing::warn!("⚠️ Input is not valid UTF-8, falling back to {}", WINDOWS_1252.name());
    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(body);
    if had_errors {
        return Err(ConvertError::DecodeError {
            message: format!(
                "neither UTF-8 nor {} could decode the file",
                WINDOWS_1252.name()
            ),
        });
    }

    Ok((text.into_owned(), SourceEncoding::SingleByte))
}

/// Decodes a sniff sample. Never fails; every byte maps to some character.
pub fn decode_sample(sample: &[u8]) -> String {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(sample);
    text.into_owned()
}
