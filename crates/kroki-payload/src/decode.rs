//! Kroki payload or diagram URL back to source text.

use std::borrow::Cow;
use std::io::Read;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use flate2::read::ZlibDecoder;
use url::Url;

use crate::error::PayloadError;

/// URL-safe alphabet that accepts payloads with or without trailing `=`.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a payload, or a full Kroki diagram URL, back to source text.
///
/// A URL such as `https://kroki.io/graphviz/svg/<payload>` is reduced to its
/// last non-empty path segment before decoding.
pub fn decode(input: &str) -> Result<String, PayloadError> {
    Ok(String::from_utf8(decode_bytes(input)?)?)
}

/// Like [`decode`], but returns the raw decompressed bytes.
pub fn decode_bytes(input: &str) -> Result<Vec<u8>, PayloadError> {
    let payload = extract_payload(input)?;
    let compressed = URL_SAFE_LENIENT.decode(payload.as_bytes())?;

    let mut data = Vec::with_capacity(compressed.len() * 4);
    ZlibDecoder::new(compressed.as_slice())
        .read_to_end(&mut data)
        .map_err(PayloadError::CorruptStream)?;
    Ok(data)
}

/// Bare payload from `input`, which is either a payload or a diagram URL.
fn extract_payload(input: &str) -> Result<Cow<'_, str>, PayloadError> {
    match Url::parse(input) {
        Ok(url) if url.has_host() => {
            let segment = url
                .path_segments()
                .and_then(|mut segments| segments.rfind(|segment| !segment.is_empty()))
                .ok_or_else(|| invalid_url(input, "no payload in URL path"))?;
            Ok(Cow::Owned(segment.to_owned()))
        }
        Ok(_) if has_http_scheme(input) => Err(invalid_url(input, "missing host")),
        Err(err) if has_http_scheme(input) => Err(invalid_url(input, &err.to_string())),
        _ => Ok(Cow::Borrowed(input)),
    }
}

fn has_http_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

fn invalid_url(input: &str, reason: &str) -> PayloadError {
    PayloadError::InvalidUrl {
        input: input.to_owned(),
        reason: reason.to_owned(),
    }
}
