//! ZIP bundling for chart export.
//!
//! A minimal ZIP writer (deflate entries, no encryption, no zip64) built
//! directly on flate2 + crc32fast, enough for a browser download of a
//! handful of PNGs.

use std::io::Write;

use aetheris_common::{AetherisError, AetherisResult};

const LOCAL_HEADER_SIG: u32 = 0x0403_4b50;
const CENTRAL_DIR_SIG: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIR_SIG: u32 = 0x0605_4b50;

/// Deflate method id.
const METHOD_DEFLATE: u16 = 8;

/// DOS date for 1980-01-01; entry timestamps are not meaningful here.
const DOS_EPOCH_DATE: u16 = 0x0021;

/// Bundle named PNG images into a single ZIP archive.
pub fn bundle_charts(entries: &[(String, Vec<u8>)]) -> AetherisResult<Vec<u8>> {
    let mut out: Vec<u8> = Vec::new();
    let mut central: Vec<u8> = Vec::new();
    let mut count: u16 = 0;

    for (name, data) in entries {
        let offset = out.len() as u32;
        let crc = crc32fast::hash(data);
        let compressed = deflate(data)?;
        let name_bytes = name.as_bytes();

        // Local file header
        put_u32(&mut out, LOCAL_HEADER_SIG);
        put_u16(&mut out, 20); // version needed
        put_u16(&mut out, 0); // flags
        put_u16(&mut out, METHOD_DEFLATE);
        put_u16(&mut out, 0); // mod time
        put_u16(&mut out, DOS_EPOCH_DATE);
        put_u32(&mut out, crc);
        put_u32(&mut out, compressed.len() as u32);
        put_u32(&mut out, data.len() as u32);
        put_u16(&mut out, name_bytes.len() as u16);
        put_u16(&mut out, 0); // extra length
        out.extend_from_slice(name_bytes);
        out.extend_from_slice(&compressed);

        // Central directory entry
        put_u32(&mut central, CENTRAL_DIR_SIG);
        put_u16(&mut central, 20); // version made by
        put_u16(&mut central, 20); // version needed
        put_u16(&mut central, 0); // flags
        put_u16(&mut central, METHOD_DEFLATE);
        put_u16(&mut central, 0); // mod time
        put_u16(&mut central, DOS_EPOCH_DATE);
        put_u32(&mut central, crc);
        put_u32(&mut central, compressed.len() as u32);
        put_u32(&mut central, data.len() as u32);
        put_u16(&mut central, name_bytes.len() as u16);
        put_u16(&mut central, 0); // extra length
        put_u16(&mut central, 0); // comment length
        put_u16(&mut central, 0); // disk number
        put_u16(&mut central, 0); // internal attrs
        put_u32(&mut central, 0); // external attrs
        put_u32(&mut central, offset);
        central.extend_from_slice(name_bytes);

        count += 1;
    }

    let central_offset = out.len() as u32;
    out.extend_from_slice(&central);

    // End of central directory record
    put_u32(&mut out, END_OF_CENTRAL_DIR_SIG);
    put_u16(&mut out, 0); // disk number
    put_u16(&mut out, 0); // central dir disk
    put_u16(&mut out, count);
    put_u16(&mut out, count);
    put_u32(&mut out, central.len() as u32);
    put_u32(&mut out, central_offset);
    put_u16(&mut out, 0); // comment length

    Ok(out)
}

fn deflate(data: &[u8]) -> AetherisResult<Vec<u8>> {
    let mut encoder =
        flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map_err(|e| AetherisError::InternalError(format!("deflate failed: {}", e)))
}

fn put_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}
