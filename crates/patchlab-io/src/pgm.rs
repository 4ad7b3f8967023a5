//! Portable gray-map (PGM) decoding and encoding.
//!
//! Supports the ASCII (`P2`) and binary (`P5`) variants with 8-bit samples.
//! Header comments (`#` to end of line) are accepted anywhere between header
//! fields. Maxvals above 255 are rejected rather than rescaled; samples are
//! used as-is.

use std::fs;
use std::path::Path;

use patchlab_core::buffer::PixelBuffer;

use crate::error::{PgmError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Ascii,
    Binary,
}

/// Cursor over the header token stream.
struct Tokens<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn skip_filler(&mut self) {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_filler();
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos == start {
            None
        } else {
            Some(&self.bytes[start..self.pos])
        }
    }

    fn next_u32(&mut self, field: &str) -> Result<u32> {
        let token = self
            .next_token()
            .ok_or_else(|| PgmError::Malformed(format!("missing {field}")))?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                PgmError::Malformed(format!(
                    "bad {field}: {:?}",
                    String::from_utf8_lossy(token)
                ))
            })
    }
}

/// Decode a PGM file from memory.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer> {
    let mut tokens = Tokens::new(bytes);

    let magic = tokens
        .next_token()
        .ok_or_else(|| PgmError::Malformed("empty file".into()))?;
    let variant = match magic {
        b"P2" => Variant::Ascii,
        b"P5" => Variant::Binary,
        other => return Err(PgmError::BadMagic(String::from_utf8_lossy(other).into())),
    };

    let width = tokens.next_u32("width")?;
    let height = tokens.next_u32("height")?;
    let maxval = tokens.next_u32("maxval")?;
    if width == 0 || height == 0 {
        return Err(PgmError::Malformed(format!(
            "zero image dimension {width}x{height}"
        )));
    }
    if maxval == 0 || maxval > 255 {
        return Err(PgmError::UnsupportedMaxval(maxval));
    }

    let count = width as usize * height as usize;
    let data = match variant {
        Variant::Ascii => {
            let mut data = Vec::with_capacity(count);
            while data.len() < count {
                let Some(token) = tokens.next_token() else {
                    return Err(PgmError::TruncatedData {
                        expected: count,
                        actual: data.len(),
                    });
                };
                let sample: u32 = std::str::from_utf8(token)
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| {
                        PgmError::Malformed(format!(
                            "bad sample: {:?}",
                            String::from_utf8_lossy(token)
                        ))
                    })?;
                if sample > maxval {
                    return Err(PgmError::Malformed(format!(
                        "sample {sample} exceeds maxval {maxval}"
                    )));
                }
                data.push(sample as u8);
            }
            data
        }
        Variant::Binary => {
            // Exactly one whitespace byte separates maxval from the samples.
            if tokens.pos >= bytes.len() || !bytes[tokens.pos].is_ascii_whitespace() {
                return Err(PgmError::Malformed(
                    "missing whitespace before pixel data".into(),
                ));
            }
            let start = tokens.pos + 1;
            let available = bytes.len().saturating_sub(start);
            if available < count {
                return Err(PgmError::TruncatedData {
                    expected: count,
                    actual: available,
                });
            }
            let data = bytes[start..start + count].to_vec();
            if maxval < 255 {
                if let Some(&bad) = data.iter().find(|&&v| v as u32 > maxval) {
                    return Err(PgmError::Malformed(format!(
                        "sample {bad} exceeds maxval {maxval}"
                    )));
                }
            }
            data
        }
    };

    Ok(PixelBuffer::from_vec(width, height, data))
}

/// Encode as binary (P5) PGM with maxval 255.
pub fn encode(image: &PixelBuffer) -> Vec<u8> {
    let header = format!("P5\n{} {}\n255\n", image.width(), image.height());
    let mut bytes = header.into_bytes();
    bytes.extend_from_slice(image.data());
    bytes
}

/// Encode as ASCII (P2) PGM with maxval 255, one image row per line.
pub fn encode_ascii(image: &PixelBuffer) -> Vec<u8> {
    let mut out = format!("P2\n{} {}\n255\n", image.width(), image.height());
    for y in 0..image.height() {
        let row: Vec<String> = image.row(y).iter().map(|v| v.to_string()).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out.into_bytes()
}

/// Read and decode a PGM file.
pub fn load(path: &Path) -> Result<PixelBuffer> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Encode (binary) and write a PGM file.
pub fn save(path: &Path, image: &PixelBuffer) -> Result<()> {
    fs::write(path, encode(image))?;
    Ok(())
}
