//! Embedded OpenType (EOT) conversion.
//!
//! An EOT file is a little-endian header describing the font (PANOSE,
//! weight, Unicode ranges and a handful of name strings) followed by the
//! unmodified TrueType data. No MTX compression or XOR obfuscation is
//! applied.
//!
//! # Example
//!
//! ```no_run
//! use iconfont_font_eot::ttf_to_eot;
//!
//! let ttf = std::fs::read("dist/iconfont.ttf").unwrap();
//! let eot = ttf_to_eot(&ttf).unwrap();
//! std::fs::write("dist/iconfont.eot", eot).unwrap();
//! ```

use anyhow::{Context, Result, bail};
use read_fonts::{
    FontRef, TableProvider,
    tables::{name::Name, os2::SelectionFlags},
};

/// EOT version 2.1: adds the (empty) root string after the names.
pub const EOT_VERSION: u32 = 0x0002_0001;

/// Magic number at byte offset 34 of every EOT header.
pub const EOT_MAGIC: u16 = 0x504C;

/// Fixed-size part of the header, up to and including `Padding1`.
pub const EOT_HEADER_LENGTH: usize = 82;

const DEFAULT_CHARSET: u8 = 1;

/// Name IDs copied into the header, in header order.
const NAME_IDS: [u16; 4] = [
    1, // family
    2, // subfamily
    5, // version
    4, // full name
];

/// Wrap TrueType data into an EOT file.
pub fn ttf_to_eot(ttf: &[u8]) -> Result<Vec<u8>> {
    let font = FontRef::new(ttf).context("Failed to parse font")?;
    let os2 = font.os2().context("Failed to read OS/2 table")?;
    let head = font.head().context("Failed to read head table")?;
    let name = font.name().context("Failed to read name table")?;

    let panose = os2.panose_10();
    if panose.len() != 10 {
        bail!("Invalid PANOSE classification ({} bytes)", panose.len());
    }

    let names: Vec<Vec<u8>> = NAME_IDS.iter().map(|&id| name_utf16le(&name, id)).collect();
    // Each name is a size-prefixed string; all but the first follow a padding word.
    let names_len: usize = names.iter().map(|n| 2 + n.len()).sum::<usize>() + 2 * (names.len() - 1);
    // Padding5 + RootStringSize
    let eot_len = EOT_HEADER_LENGTH + names_len + 4 + ttf.len();

    let mut out = Vec::with_capacity(eot_len);
    put_u32(&mut out, eot_len as u32);
    put_u32(&mut out, ttf.len() as u32);
    put_u32(&mut out, EOT_VERSION);
    put_u32(&mut out, 0); // Flags
    out.extend_from_slice(panose);
    out.push(DEFAULT_CHARSET);
    out.push(u8::from(os2.fs_selection().contains(SelectionFlags::ITALIC)));
    put_u32(&mut out, os2.us_weight_class() as u32);
    put_u16(&mut out, os2.fs_type());
    put_u16(&mut out, EOT_MAGIC);
    put_u32(&mut out, os2.ul_unicode_range_1());
    put_u32(&mut out, os2.ul_unicode_range_2());
    put_u32(&mut out, os2.ul_unicode_range_3());
    put_u32(&mut out, os2.ul_unicode_range_4());
    put_u32(&mut out, os2.ul_code_page_range_1().unwrap_or(0));
    put_u32(&mut out, os2.ul_code_page_range_2().unwrap_or(0));
    put_u32(&mut out, head.checksum_adjustment());
    for _ in 0..4 {
        put_u32(&mut out, 0); // Reserved1..4
    }
    put_u16(&mut out, 0); // Padding1
    debug_assert_eq!(out.len(), EOT_HEADER_LENGTH);

    for (i, string) in names.iter().enumerate() {
        if i > 0 {
            put_u16(&mut out, 0); // Padding2..4
        }
        put_u16(&mut out, string.len() as u16);
        out.extend_from_slice(string);
    }
    put_u16(&mut out, 0); // Padding5
    put_u16(&mut out, 0); // RootStringSize

    out.extend_from_slice(ttf);
    debug_assert_eq!(out.len(), eot_len);
    Ok(out)
}

/// Look up a name string, preferring the Windows English (US) record.
fn name_utf16le(name: &Name, name_id: u16) -> Vec<u8> {
    let records = name.name_record();
    let record = records
        .iter()
        .filter(|r| r.name_id().to_u16() == name_id)
        .max_by_key(|r| (r.platform_id() == 3, r.language_id() == 0x0409));

    record
        .and_then(|r| r.string(name.string_data()).ok())
        .map(|s| {
            s.chars()
                .collect::<String>()
                .encode_utf16()
                .flat_map(u16::to_le_bytes)
                .collect()
        })
        .unwrap_or_default()
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_font_data() {
        assert!(ttf_to_eot(b"definitely not a font").is_err());
    }

    #[test]
    fn test_put_little_endian() {
        let mut out = Vec::new();
        put_u16(&mut out, EOT_MAGIC);
        put_u32(&mut out, EOT_VERSION);
        assert_eq!(out, [0x4C, 0x50, 0x01, 0x00, 0x02, 0x00]);
    }
}
