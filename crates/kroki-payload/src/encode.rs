//! Diagram source to Kroki payload.
//!
//! The payload is a zlib stream at best compression, URL-safe base64 encoded
//! with padding. Kroki's own encoder ends every stream with a non-final data
//! block followed by a final empty stored block, and the encoder here emits
//! the same layout so that identical sources produce identical URLs.
//!
//! zlib has no flush mode for that layout, so it is assembled from two
//! compressor runs over the same input:
//!
//! - a sync flush, which ends with a non-final empty stored block starting
//!   right after the last data block;
//! - a partial flush, which ends with an empty fixed block at the same bit
//!   offset.
//!
//! The first bit where the two runs disagree is the block type bit, so the
//! bit before it is the stored block's `BFINAL` flag. Setting it turns the
//! sync-flushed stream into a finished deflate stream, and the adler-32
//! trailer is taken from finishing the sync compressor.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use flate2::{Compress, Compression, FlushCompress, Status};

use crate::error::PayloadError;

/// Output buffer growth step.
const CHUNK_SIZE: usize = 16 * 1024;

/// Length of the zlib adler-32 trailer.
const CHECKSUM_LEN: usize = 4;

/// Byte-aligned final empty stored block: `BFINAL=1, BTYPE=00, LEN=0, NLEN=!0`.
const FINAL_STORED_BLOCK: [u8; 5] = [0x01, 0x00, 0x00, 0xff, 0xff];

/// Encode diagram source text into a Kroki payload.
///
/// # Example
///
/// ```
/// let payload = kroki_payload::encode("digraph G {Hello->World}").unwrap();
/// assert_eq!(payload, "eNpKyUwvSizIUHBXqPZIzcnJ17ULzy_KSakFBAAA__9sQAjG");
/// ```
pub fn encode(text: &str) -> Result<String, PayloadError> {
    encode_bytes(text.as_bytes())
}

/// Encode arbitrary bytes into a Kroki payload.
pub fn encode_bytes(data: &[u8]) -> Result<String, PayloadError> {
    let stream = compress(data)?;
    Ok(URL_SAFE.encode(stream))
}

fn compress(data: &[u8]) -> Result<Vec<u8>, PayloadError> {
    let mut synced = Compress::new(Compression::best(), true);
    let mut stream = Vec::with_capacity(data.len() / 2 + 64);
    deflate(&mut synced, data, FlushCompress::None, &mut stream)?;
    deflate(&mut synced, &[], FlushCompress::Sync, &mut stream)?;

    let mut finished = Vec::with_capacity(64);
    deflate(&mut synced, &[], FlushCompress::Finish, &mut finished)?;
    let checksum = finished
        .len()
        .checked_sub(CHECKSUM_LEN)
        .map(|start| &finished[start..])
        .ok_or_else(|| PayloadError::Compress("missing adler-32 trailer".to_owned()))?;

    let mut partial = Compress::new(Compression::best(), true);
    let mut marked = Vec::with_capacity(stream.len());
    deflate(&mut partial, data, FlushCompress::None, &mut marked)?;
    deflate(&mut partial, &[], FlushCompress::Partial, &mut marked)?;

    match final_flag_bit(&stream, &marked) {
        Some(bit) => stream[bit / 8] |= 1 << (bit % 8),
        None => stream.extend_from_slice(&FINAL_STORED_BLOCK),
    }
    stream.extend_from_slice(checksum);

    Ok(stream)
}

/// Bit offset of the `BFINAL` flag of the trailing stored block in `synced`.
///
/// Deflate packs bits starting from the least significant bit of each byte.
fn final_flag_bit(synced: &[u8], marked: &[u8]) -> Option<usize> {
    let (index, diff) = synced
        .iter()
        .zip(marked)
        .enumerate()
        .find_map(|(index, (a, b))| (a != b).then_some((index, a ^ b)))?;

    (index * 8 + diff.trailing_zeros() as usize).checked_sub(1)
}

/// Run `compressor` over `input` with `flush`, appending everything it
/// produces to `output`.
fn deflate(
    compressor: &mut Compress,
    input: &[u8],
    flush: FlushCompress,
    output: &mut Vec<u8>,
) -> Result<(), PayloadError> {
    let start = compressor.total_in();

    loop {
        output.reserve(CHUNK_SIZE);
        let consumed = consumed_since(compressor, start)?;
        let status = compressor.compress_vec(&input[consumed..], output, flush)?;

        let done = if matches!(flush, FlushCompress::Finish) {
            status == Status::StreamEnd
        } else {
            // zlib stops early only when the output buffer is full
            consumed_since(compressor, start)? == input.len() && output.len() < output.capacity()
        };
        if done {
            return Ok(());
        }
        if status == Status::BufError {
            return Err(PayloadError::Compress(
                "compressor stalled without producing output".to_owned(),
            ));
        }
    }
}

fn consumed_since(compressor: &Compress, start: u64) -> Result<usize, PayloadError> {
    usize::try_from(compressor.total_in() - start)
        .map_err(|_| PayloadError::Compress("input too large for this platform".to_owned()))
}
