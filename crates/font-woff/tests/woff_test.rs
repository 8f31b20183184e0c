//! Convert a compiled icon font to WOFF and read the tables back.

use std::io::Read;

use flate2::read::ZlibDecoder;
use font_ttf::{TtfOptions, svg_font_to_ttf};
use iconfont_font_woff::{WOFF_HEADER_LENGTH, WOFF_SIGNATURE, WOFF_TABLE_ENTRY_LENGTH, ttf_to_woff};
use read_fonts::{FontRef, types::Tag};

const SVG_FONT: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><defs>
  <font id="iconfont" horiz-adv-x="1000">
    <font-face font-family="iconfont" units-per-em="1000" ascent="1000" descent="0" />
    <glyph glyph-name="home" unicode="&#xEA61;" d="M100 0L900 0L900 800L500 1000L100 800Z" />
    <glyph glyph-name="star" unicode="&#xEA62;" d="M500 1000L620 620L1000 620L690 380L810 0L500 240L190 0L310 380L0 620L380 620Z" />
  </font>
</defs></svg>"#;

fn u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(data[offset..offset + 4].try_into().unwrap())
}

fn ttf() -> Vec<u8> {
    let options = TtfOptions {
        ts: Some(1_700_000_000),
        ..Default::default()
    };
    svg_font_to_ttf(SVG_FONT, &options).unwrap()
}

#[test]
fn test_header() {
    let ttf = ttf();
    let woff = ttf_to_woff(&ttf).unwrap();
    let font = FontRef::new(&ttf).unwrap();

    assert_eq!(u32_at(&woff, 0), WOFF_SIGNATURE);
    assert_eq!(u32_at(&woff, 4), 0x0001_0000);
    assert_eq!(u32_at(&woff, 8) as usize, woff.len());
    assert_eq!(u16_at(&woff, 12), font.table_directory.num_tables());
    assert_eq!(woff.len() % 4, 0);
}

#[test]
fn test_tables_decompress_to_original() {
    let ttf = ttf();
    let woff = ttf_to_woff(&ttf).unwrap();
    let font = FontRef::new(&ttf).unwrap();

    let num_tables = u16_at(&woff, 12) as usize;
    let mut previous_tag = None;
    for i in 0..num_tables {
        let entry = WOFF_HEADER_LENGTH + i * WOFF_TABLE_ENTRY_LENGTH;
        let tag = Tag::new_checked(&woff[entry..entry + 4]).unwrap();
        let offset = u32_at(&woff, entry + 4) as usize;
        let comp_length = u32_at(&woff, entry + 8) as usize;
        let orig_length = u32_at(&woff, entry + 12) as usize;

        assert!(previous_tag < Some(tag), "table directory must be sorted");
        previous_tag = Some(tag);

        let stored = &woff[offset..offset + comp_length];
        let table = if comp_length < orig_length {
            let mut out = Vec::new();
            ZlibDecoder::new(stored).read_to_end(&mut out).unwrap();
            out
        } else {
            stored.to_vec()
        };

        let original = font.table_data(tag).unwrap();
        assert_eq!(table, original.as_bytes(), "table {tag} differs");
    }
}
