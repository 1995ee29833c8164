//! Presentation settings carried alongside a game.
//!
//! The engine stores these and hands them out with exported state, but never reads
//! them while playing. A renderer resolves per-tile attributes through
//! [`Presentation::color_for`] and [`Presentation::offset_for`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::types::{Tile, WIN_TILE};

/// Colour used when neither the tile value nor the win tile has an entry.
pub const DEFAULT_TILE_COLOR: &str = "#FF8A8A";

const DEFAULT_PALETTE: [(Tile, &str); 12] = [
    (0, "#191919"),
    (2, "#A151DD"),
    (4, "#A045BF"),
    (8, "#9F39A1"),
    (16, "#9E2D83"),
    (32, "#9D2165"),
    (64, "#9C1547"),
    (128, "#A71D42"),
    (256, "#BD3854"),
    (512, "#D35366"),
    (1024, "#E96E78"),
    (2048, "#FF8A8A"),
];

const DEFAULT_LINE_THICKNESS: u32 = 4;

/// Pixel offset applied to a tile label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Font used for tile labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    #[serde(default = "default_font_weight")]
    pub weight: String,
    #[serde(default)]
    pub path: Option<String>,
}

fn default_font_weight() -> String {
    "regular".to_string()
}

impl FontSpec {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            weight: default_font_weight(),
            path: None,
        }
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = weight.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Per-game styling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Presentation {
    /// Colour per tile value; `0` is the empty-cell colour.
    pub tile_colors: BTreeMap<Tile, String>,
    pub line_thickness: u32,
    /// Draw every tile in the empty-cell colour (outline-only look).
    pub filled: bool,
    pub global_offset: Offset,
    pub offsets: BTreeMap<Tile, Offset>,
    pub font: Option<FontSpec>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            tile_colors: default_tile_colors(),
            line_thickness: DEFAULT_LINE_THICKNESS,
            filled: false,
            global_offset: Offset::ZERO,
            offsets: DEFAULT_PALETTE
                .iter()
                .filter(|(value, _)| *value != 0)
                .map(|&(value, _)| (value, Offset::ZERO))
                .collect(),
            font: None,
        }
    }
}

/// The stock palette, keyed by tile value.
pub fn default_tile_colors() -> BTreeMap<Tile, String> {
    DEFAULT_PALETTE
        .iter()
        .map(|&(value, color)| (value, color.to_string()))
        .collect()
}

impl Presentation {
    /// Colour for a tile value.
    ///
    /// With `filled` set every tile takes the empty-cell colour. Values without an
    /// entry (anything past 2048 with the stock palette) reuse the 2048 colour, and
    /// fall back to [`DEFAULT_TILE_COLOR`] when that is missing too.
    pub fn color_for(&self, value: Tile) -> &str {
        let key = if self.filled { 0 } else { value };
        self.tile_colors
            .get(&key)
            .or_else(|| self.tile_colors.get(&WIN_TILE))
            .map(String::as_str)
            .unwrap_or(DEFAULT_TILE_COLOR)
    }

    /// Label offset for a tile value, `Offset::ZERO` when unmapped.
    pub fn offset_for(&self, value: Tile) -> Offset {
        self.offsets.get(&value).copied().unwrap_or(Offset::ZERO)
    }

    /// Check every field a renderer would choke on.
    pub fn validate(&self) -> EngineResult<()> {
        validate_colors(&self.tile_colors)?;
        if self.line_thickness == 0 {
            return Err(EngineError::InvalidConfig(
                "line thickness must be positive".to_string(),
            ));
        }
        if let Some(font) = &self.font {
            if font.family.trim().is_empty() {
                return Err(EngineError::InvalidConfig(
                    "font family must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Every colour must be `#` followed by 3, 6 or 8 hex digits.
pub fn validate_colors(colors: &BTreeMap<Tile, String>) -> EngineResult<()> {
    for (value, color) in colors {
        if !is_hex_color(color) {
            return Err(EngineError::InvalidConfig(format!(
                "colour for tile {value} is not a hex colour: {color:?}"
            )));
        }
    }
    Ok(())
}

fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_covers_empty_through_win() {
        let p = Presentation::default();
        assert_eq!(p.color_for(0), "#191919");
        assert_eq!(p.color_for(2), "#A151DD");
        assert_eq!(p.color_for(2048), "#FF8A8A");
        assert_eq!(p.offsets.len(), 11);
        assert!(!p.offsets.contains_key(&0));
    }

    #[test]
    fn values_past_win_reuse_win_colour() {
        let p = Presentation::default();
        assert_eq!(p.color_for(4096), p.color_for(2048));
        assert_eq!(p.color_for(131072), p.color_for(2048));
    }

    #[test]
    fn missing_win_colour_falls_back_to_default() {
        let mut p = Presentation::default();
        p.tile_colors.remove(&2048);
        assert_eq!(p.color_for(4096), DEFAULT_TILE_COLOR);
    }

    #[test]
    fn filled_uses_empty_colour() {
        let p = Presentation {
            filled: true,
            ..Presentation::default()
        };
        assert_eq!(p.color_for(64), "#191919");
    }

    #[test]
    fn offsets_default_to_zero() {
        let mut p = Presentation::default();
        p.offsets.insert(8, Offset::new(3, -2));
        assert_eq!(p.offset_for(8), Offset::new(3, -2));
        assert_eq!(p.offset_for(4096), Offset::ZERO);
    }

    #[test]
    fn validate_rejects_bad_colours() {
        let mut p = Presentation::default();
        assert!(p.validate().is_ok());

        p.tile_colors.insert(2, "purple".to_string());
        assert!(matches!(p.validate(), Err(EngineError::InvalidConfig(_))));

        p.tile_colors.insert(2, "#12345".to_string());
        assert!(p.validate().is_err());

        p.tile_colors.insert(2, "#abc".to_string());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_thickness_and_blank_font() {
        let p = Presentation {
            line_thickness: 0,
            ..Presentation::default()
        };
        assert!(p.validate().is_err());

        let p = Presentation {
            font: Some(FontSpec::new("  ")),
            ..Presentation::default()
        };
        assert!(p.validate().is_err());
    }
}
