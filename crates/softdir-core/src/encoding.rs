//! Text decoding for metadata files of unknown encoding.
//!
//! Description and link files in a download tree are frequently authored on
//! legacy Chinese Windows systems, so a plain UTF-8 read is not enough. Bytes
//! are decoded through an ordered pipeline where each stage only runs if the
//! previous one failed:
//!
//! 1. Strict UTF-8.
//! 2. Statistical detection via `chardetng`, accepted when the detected charset
//!    decodes without malformed sequences.
//! 3. A fixed list of legacy Chinese charsets ([`FALLBACK_CHARSETS`]), accepted
//!    only if the result also contains at least one CJK ideograph.
//! 4. Lossy recovery: every byte with the high bit set is dropped.
//!
//! The pipeline never fails. Callers that care about fidelity inspect
//! [`Decoded::encoding`] and treat [`DetectedEncoding::LossyAscii`] as a
//! best-effort result.
//!
//! Decoding is pure. Rewriting a file as UTF-8 is a separate step,
//! [`persist_as_utf8`], which takes the decode result so the bytes are only
//! interpreted once.
//!
//! ```rust
//! use softdir_core::encoding::{resolve, DetectedEncoding};
//!
//! let decoded = resolve("软件说明".as_bytes());
//! assert_eq!(decoded.text, "软件说明");
//! assert_eq!(decoded.encoding, DetectedEncoding::Utf8);
//! ```

use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Legacy charsets tried, in order, when detection does not produce a clean decode.
///
/// `encoding_rs` maps the `gb2312` label onto GBK; it stays in the list so the
/// priority order reads the same as the labels people put in their editors.
pub const FALLBACK_CHARSETS: &[&str] = &["gbk", "gb18030", "gb2312", "big5"];

/// How a byte buffer was turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedEncoding {
    /// Bytes were valid UTF-8 and were used as-is.
    Utf8,
    /// Charset named by the statistical detector.
    Detected(&'static Encoding),
    /// Charset taken from [`FALLBACK_CHARSETS`].
    Fallback(&'static Encoding),
    /// No charset produced a clean decode; non-ASCII bytes were dropped.
    LossyAscii,
}

impl DetectedEncoding {
    /// Human-readable charset name, e.g. `UTF-8`, `GBK`, `Big5`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => UTF_8.name(),
            Self::Detected(encoding) | Self::Fallback(encoding) => encoding.name(),
            Self::LossyAscii => "ascii (lossy)",
        }
    }

    /// Whether the source bytes were already UTF-8.
    #[must_use]
    pub const fn is_utf8(self) -> bool {
        matches!(self, Self::Utf8)
    }

    /// Whether decoding discarded information.
    #[must_use]
    pub const fn is_lossy(self) -> bool {
        matches!(self, Self::LossyAscii)
    }
}

/// Decoded text together with the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded text.
    pub text: String,
    /// Which stage of the pipeline accepted the bytes.
    pub encoding: DetectedEncoding,
}

/// Decode `bytes` using the full detection pipeline.
#[must_use]
pub fn resolve(bytes: &[u8]) -> Decoded {
    resolve_with_detector(bytes, detect_charset)
}

/// Read a file and decode it with [`resolve`].
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read. Decoding itself never fails.
pub fn read_text(path: &Path) -> Result<Decoded> {
    let bytes = fs::read(path)?;
    let decoded = resolve(&bytes);
    if decoded.encoding.is_lossy() {
        warn!(
            "{}: no charset matched, non-ASCII bytes were dropped",
            path.display()
        );
    } else if !decoded.encoding.is_utf8() {
        debug!("{}: decoded as {}", path.display(), decoded.encoding.name());
    }
    Ok(decoded)
}

/// Rewrite `path` as UTF-8 using an existing decode result.
///
/// Returns `Ok(true)` when the file was rewritten. Files that were already
/// UTF-8 are left untouched, as are lossy recoveries, whose text no longer
/// carries the original content.
///
/// # Errors
///
/// Returns [`Error::Storage`] if the file cannot be written.
pub fn persist_as_utf8(path: &Path, decoded: &Decoded) -> Result<bool> {
    match decoded.encoding {
        DetectedEncoding::Utf8 => Ok(false),
        DetectedEncoding::LossyAscii => {
            debug!(
                "{}: skipping UTF-8 rewrite of lossy recovery",
                path.display()
            );
            Ok(false)
        },
        DetectedEncoding::Detected(_) | DetectedEncoding::Fallback(_) => {
            fs::write(path, decoded.text.as_bytes()).map_err(|e| {
                Error::Storage(format!("Failed to rewrite {} as UTF-8: {e}", path.display()))
            })?;
            Ok(true)
        },
    }
}

fn detect_charset(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Pipeline with a pluggable detector so each stage can be exercised in isolation.
pub(crate) fn resolve_with_detector<F>(bytes: &[u8], detect: F) -> Decoded
where
    F: FnOnce(&[u8]) -> &'static Encoding,
{
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Decoded {
            text: text.to_owned(),
            encoding: DetectedEncoding::Utf8,
        };
    }

    let detected = detect(bytes);
    if detected != UTF_8 {
        if let Some(text) = decode_strict(detected, bytes) {
            return Decoded {
                text,
                encoding: DetectedEncoding::Detected(detected),
            };
        }
    }

    let mut tried: Vec<&'static Encoding> = Vec::with_capacity(FALLBACK_CHARSETS.len());
    for label in FALLBACK_CHARSETS {
        let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
            continue;
        };
        if tried.contains(&encoding) {
            continue;
        }
        tried.push(encoding);

        if let Some(text) = decode_strict(encoding, bytes) {
            if contains_cjk(&text) {
                return Decoded {
                    text,
                    encoding: DetectedEncoding::Fallback(encoding),
                };
            }
        }
    }

    Decoded {
        text: strip_non_ascii(bytes),
        encoding: DetectedEncoding::LossyAscii,
    }
}

fn decode_strict(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(std::borrow::Cow::into_owned)
        .filter(|text| !text.contains(char::REPLACEMENT_CHARACTER))
}

/// CJK Unified Ideographs and Extension A.
fn contains_cjk(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}'))
}

fn strip_non_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter(|b| b.is_ascii())
        .map(|&b| char::from(b))
        .collect()
}
