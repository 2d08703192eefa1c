//! Base64 decoding for inline `data:` URIs.

use crate::util::{Error, Result};

/// Marker that separates the media type from the payload in a data URI.
pub const DATA_URI_MARKER: &str = ";base64,";

/// Table value for bytes outside the base64 alphabet.
const INVALID: u8 = 64;

/// ASCII byte to 6-bit value.
static DECODE_TABLE: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < 26 {
        table[b'A' as usize + i] = i as u8;
        table[b'a' as usize + i] = 26 + i as u8;
        i += 1;
    }
    let mut d = 0;
    while d < 10 {
        table[b'0' as usize + d] = 52 + d as u8;
        d += 1;
    }
    table[b'+' as usize] = 62;
    table[b'/' as usize] = 63;
    table
}

/// Locate the payload of a base64 data URI.
///
/// Returns the index just past [`DATA_URI_MARKER`], or `None` if the URI
/// does not carry inline data.
pub fn data_uri_start(uri: &str) -> Option<usize> {
    uri.find(DATA_URI_MARKER).map(|i| i + DATA_URI_MARKER.len())
}

/// Decode a padded base64 string.
///
/// The input length must be a multiple of 4. Each trailing `=` trims one
/// byte from the output. Bytes outside the alphabet decode as the sentinel
/// value and are not rejected.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let bytes = input.as_bytes();
    let in_len = bytes.len();
    if in_len % 4 != 0 {
        return Err(Error::InvalidBase64(format!(
            "length {in_len} is not a multiple of 4"
        )));
    }
    if in_len == 0 {
        return Ok(Vec::new());
    }

    let mut out_len = in_len / 4 * 3;
    if bytes[in_len - 1] == b'=' {
        out_len -= 1;
    }
    if bytes[in_len - 2] == b'=' {
        out_len -= 1;
    }

    let sextet = |b: u8| -> u32 {
        if b == b'=' {
            0
        } else {
            DECODE_TABLE[b as usize] as u32
        }
    };

    let mut out = Vec::with_capacity(out_len);
    for quad in bytes.chunks_exact(4) {
        let triple = (sextet(quad[0]) << 18)
            + (sextet(quad[1]) << 12)
            + (sextet(quad[2]) << 6)
            + sextet(quad[3]);
        for shift in [16u32, 8, 0] {
            if out.len() < out_len {
                out.push(((triple >> shift) & 0xFF) as u8);
            }
        }
    }
    Ok(out)
}

/// Decode the payload of a data URI, if `uri` is one.
pub fn decode_data_uri(uri: &str) -> Option<Result<Vec<u8>>> {
    data_uri_start(uri).map(|start| decode(&uri[start..]))
}
