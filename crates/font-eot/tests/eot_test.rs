//! Wrap a freshly compiled icon font and check the EOT header fields.

use font_ttf::{TtfOptions, svg_font_to_ttf};
use iconfont_font_eot::{EOT_HEADER_LENGTH, EOT_MAGIC, EOT_VERSION, ttf_to_eot};

const SVG_FONT: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><defs>
  <font id="iconfont" horiz-adv-x="1000">
    <font-face font-family="iconfont" units-per-em="1000" ascent="1000" descent="0" />
    <glyph glyph-name="home" unicode="&#xEA61;" d="M100 0L900 0L900 800L100 800Z" />
  </font>
</defs></svg>"#;

fn u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}

fn ttf() -> Vec<u8> {
    let options = TtfOptions {
        ts: Some(1_700_000_000),
        ..Default::default()
    };
    svg_font_to_ttf(SVG_FONT, &options).unwrap()
}

#[test]
fn test_header_fields() {
    let ttf = ttf();
    let eot = ttf_to_eot(&ttf).unwrap();

    assert_eq!(u32_at(&eot, 0) as usize, eot.len());
    assert_eq!(u32_at(&eot, 4) as usize, ttf.len());
    assert_eq!(u32_at(&eot, 8), EOT_VERSION);
    assert_eq!(eot[26], 1);
    assert_eq!(eot[27], 0);
    assert_eq!(u32_at(&eot, 28), 400);
    assert_eq!(u16_at(&eot, 34), EOT_MAGIC);
}

#[test]
fn test_family_name_is_utf16le() {
    let eot = ttf_to_eot(&ttf()).unwrap();

    let family_len = u16_at(&eot, EOT_HEADER_LENGTH) as usize;
    let family: Vec<u16> = eot[EOT_HEADER_LENGTH + 2..EOT_HEADER_LENGTH + 2 + family_len]
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    assert_eq!(String::from_utf16(&family).unwrap(), "iconfont");
}

#[test]
fn test_font_data_follows_header() {
    let ttf = ttf();
    let eot = ttf_to_eot(&ttf).unwrap();
    assert!(eot.ends_with(&ttf));
    assert!(eot.len() > ttf.len() + EOT_HEADER_LENGTH);
}
