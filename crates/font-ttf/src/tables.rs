//! Construction of the individual TrueType tables.

use write_fonts::{
    tables::{
        glyf::Bbox,
        head::Head,
        hhea::Hhea,
        hmtx::LongMetric,
        maxp::Maxp,
        name::{Name, NameRecord},
        os2::Os2,
        post::Post,
    },
    types::{FWord, Fixed, LongDateTime, NameId, Tag, Version16Dot16},
};

use crate::{TtfOptions, svg_font::SvgFont};

/// Seconds between 1904-01-01 (the TrueType epoch) and 1970-01-01.
const MAC_EPOCH_OFFSET: i64 = 2_082_844_800;

const PLATFORM_WINDOWS: u16 = 3;
const ENCODING_UNICODE_BMP: u16 = 1;
const LANGUAGE_EN_US: u16 = 0x0409;

/// Accumulated metrics over all compiled glyphs.
#[derive(Debug, Default)]
pub struct FontStats {
    pub bbox: Option<Bbox>,
    pub advance_max: u16,
    pub min_lsb: Option<i16>,
    pub min_rsb: Option<i16>,
    pub x_max_extent: Option<i16>,
    pub max_points: u16,
    pub max_contours: u16,
    pub advance_sum: u64,
    pub advance_count: u64,
}

impl FontStats {
    pub fn add(&mut self, advance: u16, bbox: Option<Bbox>, points: u16, contours: u16) {
        self.advance_max = self.advance_max.max(advance);
        self.max_points = self.max_points.max(points);
        self.max_contours = self.max_contours.max(contours);
        if advance > 0 {
            self.advance_sum += advance as u64;
            self.advance_count += 1;
        }

        let Some(b) = bbox else {
            return;
        };
        let rsb = (advance as i32 - b.x_max as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        self.min_lsb = Some(self.min_lsb.map_or(b.x_min, |v| v.min(b.x_min)));
        self.min_rsb = Some(self.min_rsb.map_or(rsb, |v| v.min(rsb)));
        self.x_max_extent = Some(self.x_max_extent.map_or(b.x_max, |v| v.max(b.x_max)));
        self.bbox = Some(match self.bbox {
            None => b,
            Some(acc) => Bbox {
                x_min: acc.x_min.min(b.x_min),
                y_min: acc.y_min.min(b.y_min),
                x_max: acc.x_max.max(b.x_max),
                y_max: acc.y_max.max(b.y_max),
            },
        });
    }

    fn avg_advance(&self) -> i16 {
        if self.advance_count == 0 {
            return 0;
        }
        (self.advance_sum / self.advance_count).min(i16::MAX as u64) as i16
    }
}

pub fn long_metric(advance: u16, bbox: Option<Bbox>) -> LongMetric {
    LongMetric {
        advance,
        side_bearing: bbox.map_or(0, |b| b.x_min),
    }
}

pub fn build_head(
    font: &SvgFont,
    stats: &FontStats,
    options: &TtfOptions,
    loca_format: i16,
) -> Head {
    let bbox = stats.bbox.unwrap_or(Bbox {
        x_min: 0,
        y_min: 0,
        x_max: 0,
        y_max: 0,
    });
    let timestamp = LongDateTime::new(options.timestamp() + MAC_EPOCH_OFFSET);
    Head {
        font_revision: Fixed::from_f64(options.revision()),
        units_per_em: font.units_per_em,
        created: timestamp,
        modified: timestamp,
        x_min: bbox.x_min,
        y_min: bbox.y_min,
        x_max: bbox.x_max,
        y_max: bbox.y_max,
        lowest_rec_ppem: 8,
        index_to_loc_format: loca_format,
        ..Default::default()
    }
}

pub fn build_hhea(font: &SvgFont, stats: &FontStats, num_h_metrics: u16) -> Hhea {
    Hhea {
        ascender: FWord::new(font.ascent),
        descender: FWord::new(font.descent),
        line_gap: FWord::new(0),
        advance_width_max: stats.advance_max.into(),
        min_left_side_bearing: stats.min_lsb.unwrap_or(0).into(),
        min_right_side_bearing: stats.min_rsb.unwrap_or(0).into(),
        x_max_extent: stats.x_max_extent.unwrap_or(0).into(),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: num_h_metrics,
        ..Default::default()
    }
}

pub fn build_maxp(num_glyphs: u16, stats: &FontStats) -> Maxp {
    Maxp {
        num_glyphs,
        max_points: Some(stats.max_points),
        max_contours: Some(stats.max_contours),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(2),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
        ..Default::default()
    }
}

pub fn build_os2(font: &SvgFont, stats: &FontStats, first_char: u16, last_char: u16) -> Os2 {
    let em = font.units_per_em as i16;
    Os2 {
        x_avg_char_width: stats.avg_advance(),
        us_weight_class: 400,
        us_width_class: 5,
        y_subscript_x_size: em / 2,
        y_subscript_y_size: em / 2,
        y_subscript_y_offset: em / 5,
        y_superscript_x_size: em / 2,
        y_superscript_y_size: em / 2,
        y_superscript_y_offset: em / 5,
        y_strikeout_size: em / 20,
        y_strikeout_position: em / 4,
        ach_vend_id: Tag::new(b"PfEd"),
        us_first_char_index: first_char,
        us_last_char_index: last_char,
        s_typo_ascender: font.ascent,
        s_typo_descender: font.descent,
        s_typo_line_gap: 0,
        us_win_ascent: font.ascent.max(0) as u16,
        us_win_descent: font.descent.unsigned_abs(),
        ul_code_page_range_1: Some(1),
        ul_code_page_range_2: Some(0),
        sx_height: Some(0),
        s_cap_height: Some(0),
        us_default_char: Some(0),
        us_break_char: Some(32),
        us_max_context: Some(1),
        ..Default::default()
    }
}

pub fn build_name(font: &SvgFont, options: &TtfOptions) -> Name {
    let family = font.family.as_str();
    let version = format!("Version {}", options.version.as_deref().unwrap_or("1.0"));
    let postscript: String = family.chars().filter(|c| c.is_ascii_graphic()).collect();
    let unique_id = format!("{family}:{}", options.timestamp());

    let mut entries: Vec<(u16, String)> = Vec::new();
    if let Some(copyright) = &options.copyright {
        entries.push((0, copyright.clone()));
    }
    entries.push((1, family.to_string()));
    entries.push((2, "Regular".to_string()));
    entries.push((3, unique_id));
    entries.push((4, family.to_string()));
    entries.push((5, version));
    entries.push((6, postscript));
    if let Some(description) = &options.description {
        entries.push((10, description.clone()));
    }
    if let Some(url) = &options.url {
        entries.push((11, url.clone()));
    }

    let records: Vec<NameRecord> = entries
        .into_iter()
        .map(|(id, value)| {
            NameRecord::new(
                PLATFORM_WINDOWS,
                ENCODING_UNICODE_BMP,
                LANGUAGE_EN_US,
                NameId::new(id),
                value.into(),
            )
        })
        .collect();

    Name::new(records)
}

pub fn build_post() -> Post {
    let mut post = Post::new(Fixed::ZERO, FWord::new(-75), FWord::new(50), 0, 0, 0, 0, 0);
    post.version = Version16Dot16::VERSION_3_0;
    post
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate_bbox_and_bearings() {
        let mut stats = FontStats::default();
        let wide = Bbox {
            x_min: 10,
            y_min: -50,
            x_max: 900,
            y_max: 800,
        };
        let tall = Bbox {
            x_min: -5,
            y_min: 0,
            x_max: 480,
            y_max: 900,
        };
        stats.add(1000, Some(wide), 8, 2);
        stats.add(500, Some(tall), 4, 1);
        stats.add(0, None, 0, 0);

        let bbox = stats.bbox.unwrap();
        assert_eq!((bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max), (-5, -50, 900, 900));
        assert_eq!(stats.advance_max, 1000);
        assert_eq!(stats.min_lsb, Some(-5));
        assert_eq!(stats.min_rsb, Some(20));
        assert_eq!(stats.x_max_extent, Some(900));
        assert_eq!(stats.max_points, 8);
        assert_eq!(stats.max_contours, 2);
        assert_eq!(stats.avg_advance(), 750);
    }
}
