//! WOFF 1.0 conversion.
//!
//! Every sfnt table is zlib-compressed and stored compressed when that makes
//! it smaller. No extended metadata or private data blocks are written.
//!
//! # Example
//!
//! ```no_run
//! use iconfont_font_woff::ttf_to_woff;
//!
//! let ttf = std::fs::read("dist/iconfont.ttf").unwrap();
//! let woff = ttf_to_woff(&ttf).unwrap();
//! std::fs::write("dist/iconfont.woff", woff).unwrap();
//! ```

use std::io::Write;

use anyhow::{Context, Result, bail};
use flate2::{Compression, write::ZlibEncoder};
use read_fonts::{FontRef, TableProvider};

/// `wOFF`
pub const WOFF_SIGNATURE: u32 = 0x774F_4646;

pub const WOFF_HEADER_LENGTH: usize = 44;
pub const WOFF_TABLE_ENTRY_LENGTH: usize = 20;

const SFNT_HEADER_LENGTH: usize = 12;
const SFNT_TABLE_ENTRY_LENGTH: usize = 16;

struct WoffTable {
    tag: [u8; 4],
    checksum: u32,
    orig_length: u32,
    data: Vec<u8>,
}

/// Convert TrueType data into a WOFF file.
pub fn ttf_to_woff(ttf: &[u8]) -> Result<Vec<u8>> {
    let font = FontRef::new(ttf).context("Failed to parse font")?;
    let flavor = font.table_directory.sfnt_version();

    let mut records: Vec<_> = font.table_directory.table_records().iter().collect();
    records.sort_by_key(|r| r.tag());
    if records.is_empty() {
        bail!("Font has no tables");
    }

    let tables = records
        .iter()
        .map(|record| {
            let tag = record.tag();
            let data = font
                .table_data(tag)
                .with_context(|| format!("Table '{tag}' lies outside the font data"))?;
            let orig = data.as_bytes();
            let compressed = compress(orig).with_context(|| format!("Failed to compress '{tag}'"))?;
            Ok(WoffTable {
                tag: tag.to_be_bytes(),
                checksum: record.checksum(),
                orig_length: orig.len() as u32,
                data: if compressed.len() < orig.len() { compressed } else { orig.to_vec() },
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let num_tables = tables.len();
    let total_sfnt_size = SFNT_HEADER_LENGTH
        + SFNT_TABLE_ENTRY_LENGTH * num_tables
        + tables.iter().map(|t| pad4(t.orig_length as usize)).sum::<usize>();

    let directory_end = WOFF_HEADER_LENGTH + WOFF_TABLE_ENTRY_LENGTH * num_tables;
    let length = directory_end + tables.iter().map(|t| pad4(t.data.len())).sum::<usize>();

    let (major, minor) = match font.head() {
        Ok(head) => {
            let bits = head.font_revision().to_bits() as u32;
            ((bits >> 16) as u16, (bits & 0xFFFF) as u16)
        }
        Err(_) => (0, 0),
    };

    let mut out = Vec::with_capacity(length);
    put_u32(&mut out, WOFF_SIGNATURE);
    put_u32(&mut out, flavor);
    put_u32(&mut out, length as u32);
    put_u16(&mut out, num_tables as u16);
    put_u16(&mut out, 0); // reserved
    put_u32(&mut out, total_sfnt_size as u32);
    put_u16(&mut out, major);
    put_u16(&mut out, minor);
    for _ in 0..5 {
        put_u32(&mut out, 0); // metadata and private block offsets/lengths
    }

    let mut offset = directory_end;
    for table in &tables {
        out.extend_from_slice(&table.tag);
        put_u32(&mut out, offset as u32);
        put_u32(&mut out, table.data.len() as u32);
        put_u32(&mut out, table.orig_length);
        put_u32(&mut out, table.checksum);
        offset += pad4(table.data.len());
    }

    for table in &tables {
        out.extend_from_slice(&table.data);
        out.resize(pad4(out.len()), 0);
    }

    debug_assert_eq!(out.len(), length);
    Ok(out)
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn pad4(len: usize) -> usize {
    (len + 3) & !3
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}
