//! Source encoding detection.
//!
//! Dictionary dumps come as UTF-8 or Shift_JIS. Detection looks at a short prefix;
//! an explicit label skips it.

use encoding_rs::{DecoderResult, Encoding, SHIFT_JIS, UTF_8};

use crate::error::ImportError;

/// Classify a byte prefix as UTF-8 or Shift_JIS.
///
/// A multi-byte sequence cut off at the end of the prefix is not an error.
pub fn detect(prefix: &[u8]) -> Result<&'static Encoding, ImportError> {
    if is_utf8_prefix(prefix) {
        return Ok(UTF_8);
    }
    if is_shift_jis_prefix(prefix) {
        return Ok(SHIFT_JIS);
    }
    Err(ImportError::EncodingUndetectable)
}

/// Explicit label when given, detection otherwise
pub fn resolve(label: Option<&str>, prefix: &[u8]) -> Result<&'static Encoding, ImportError> {
    let encoding = match label {
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| ImportError::UnknownEncoding(label.to_string()))?,
        None => detect(prefix)?,
    };

    // Offsets are measured by re-encoding, so the encoding must round-trip
    // and keep `\n` as a single 0x0A byte (rules out UTF-16 and `replacement`).
    if encoding.output_encoding() != encoding {
        return Err(ImportError::UnsupportedEncoding(encoding.name()));
    }

    Ok(encoding)
}

fn is_utf8_prefix(prefix: &[u8]) -> bool {
    match std::str::from_utf8(prefix) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

fn is_shift_jis_prefix(prefix: &[u8]) -> bool {
    let mut decoder = SHIFT_JIS.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(prefix.len())
        .unwrap_or(prefix.len() * 3);
    let mut out = String::with_capacity(capacity);
    let (result, _) = decoder.decode_to_string_without_replacement(prefix, &mut out, false);
    matches!(result, DecoderResult::InputEmpty)
}
