//! Transport-safe PEM handling
//!
//! Clients submit PEM text whose body newlines have been replaced with
//! spaces so that it fits in a single JSON string line. `normalize` repairs
//! that encoding, `escape` produces it.

use crate::error::{CertError, CertResult, PemField};
use pem::{EncodeConfig, LineEnding, Pem};

const DELIMITER: &str = "-----";

/// A single PEM block splits into exactly this many segments on the delimiter.
const SEGMENTS_PER_BLOCK: usize = 5;

const BODY_SEGMENT: usize = 2;

/// Repair a transport-escaped PEM string into canonical PEM bytes.
///
/// Only the body segment is touched; the marker lines and anything before or
/// after them pass through unchanged. More than one block, or none, fails
/// with `InvalidPemBlock`.
pub fn normalize(input: &str, field: PemField) -> CertResult<Vec<u8>> {
    let mut segments: Vec<String> = input.split(DELIMITER).map(str::to_owned).collect();

    if segments.len() != SEGMENTS_PER_BLOCK {
        return Err(CertError::InvalidPemBlock {
            field,
            segments: segments.len(),
        });
    }

    if let Some(body) = segments.get_mut(BODY_SEGMENT) {
        *body = body.replace(' ', "\n");
    }

    Ok(segments.join(DELIMITER).into_bytes())
}

/// Inverse of [`normalize`]: newlines inside the body become single spaces.
///
/// Input that is not a single PEM block is returned unchanged.
pub fn escape(pem: &str) -> String {
    let mut segments: Vec<String> = pem.split(DELIMITER).map(str::to_owned).collect();

    if segments.len() != SEGMENTS_PER_BLOCK {
        return pem.to_string();
    }

    if let Some(body) = segments.get_mut(BODY_SEGMENT) {
        *body = body.replace('\n', " ");
    }

    segments.join(DELIMITER)
}

/// Encode DER bytes as a canonical PEM block (LF endings, 64-column body).
pub fn encode_block(tag: &str, der: &[u8]) -> String {
    let block = Pem::new(tag, der.to_vec());
    pem::encode_config(&block, EncodeConfig::new().set_line_ending(LineEnding::LF))
}

/// Encode and transport-escape in one step, as written on the wire.
pub fn encode_wire(tag: &str, der: &[u8]) -> String {
    escape(&encode_block(tag, der))
}
