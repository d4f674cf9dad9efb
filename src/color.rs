use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::rgb::FromHexError;
use palette::Srgb;

// ---------------------------------------------------------------------------
// ElementColor – an 8-bit sRGB colour written as #RRGGBB
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementColor(Srgb<u8>);

impl ElementColor {
    pub const BLACK: ElementColor = ElementColor::from_rgb(0, 0, 0);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        ElementColor(Srgb::new(r, g, b))
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.0.red, self.0.green, self.0.blue]
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.0.red, self.0.green, self.0.blue)
    }
}

impl From<[u8; 3]> for ElementColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        ElementColor::from_rgb(r, g, b)
    }
}

impl FromStr for ElementColor {
    type Err = FromHexError;

    /// Accepts `#RRGGBB`, `RRGGBB` and the short `#RGB` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(ElementColor)
    }
}

impl fmt::Display for ElementColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}",
            self.0.red, self.0.green, self.0.blue
        )
    }
}

// ---------------------------------------------------------------------------
// Defaults and per-session overrides
// ---------------------------------------------------------------------------

/// Built-in colours for the usual element channels of a line scan.
pub const DEFAULT_COLORS: &[(&str, ElementColor)] = &[
    ("PdL", ElementColor::from_rgb(0x00, 0x00, 0xFF)),
    ("AgL", ElementColor::from_rgb(0x80, 0x80, 0x80)),
    ("FeK", ElementColor::from_rgb(0xFF, 0x00, 0x00)),
    ("NiK", ElementColor::from_rgb(0x00, 0x80, 0x00)),
    ("CuK", ElementColor::from_rgb(0xFF, 0xA5, 0x00)),
    ("ZnK", ElementColor::from_rgb(0x80, 0x00, 0x80)),
    ("SED", ElementColor::from_rgb(0x00, 0x00, 0x00)),
];

/// Immutable element → colour table consulted when the user has not
/// picked a colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorDefaults {
    mapping: BTreeMap<String, ElementColor>,
    fallback: ElementColor,
}

impl Default for ColorDefaults {
    fn default() -> Self {
        Self {
            mapping: DEFAULT_COLORS
                .iter()
                .map(|&(el, c)| (el.to_string(), c))
                .collect(),
            fallback: ElementColor::BLACK,
        }
    }
}

impl ColorDefaults {
    /// Built-in defaults extended by `extra` (entries in `extra` win).
    /// Unparseable entries are logged and ignored.
    pub fn with_extra(extra: &BTreeMap<String, String>) -> Self {
        let mut defaults = Self::default();
        for (element, hex) in extra {
            match hex.parse::<ElementColor>() {
                Ok(c) => {
                    defaults.mapping.insert(element.clone(), c);
                }
                Err(e) => log::warn!("ignoring default colour {hex:?} for {element}: {e}"),
            }
        }
        defaults
    }

    pub fn color_for(&self, element: &str) -> ElementColor {
        self.mapping.get(element).copied().unwrap_or(self.fallback)
    }
}

/// Maps each element to its display colour: the user's pick if any,
/// otherwise the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorAssignment {
    defaults: ColorDefaults,
    overrides: BTreeMap<String, ElementColor>,
}

impl ColorAssignment {
    pub fn new(defaults: ColorDefaults) -> Self {
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    pub fn color_for(&self, element: &str) -> ElementColor {
        self.overrides
            .get(element)
            .copied()
            .unwrap_or_else(|| self.defaults.color_for(element))
    }

    /// Record a user pick. Returns `true` if the effective colour changed.
    pub fn set(&mut self, element: &str, color: ElementColor) -> bool {
        let changed = self.color_for(element) != color;
        self.overrides.insert(element.to_string(), color);
        changed
    }

    pub fn is_overridden(&self, element: &str) -> bool {
        self.overrides.contains_key(element)
    }

    /// Forget all user picks, e.g. when a new file is loaded.
    pub fn reset(&mut self) {
        self.overrides.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_element_uses_documented_default() {
        let colors = ColorAssignment::default();
        assert_eq!(colors.color_for("FeK").to_string(), "#FF0000");
        assert_eq!(colors.color_for("CuK").to_string(), "#FFA500");
    }

    #[test]
    fn unknown_element_defaults_to_black() {
        let colors = ColorAssignment::default();
        assert_eq!(colors.color_for("MgK").to_string(), "#000000");
    }

    #[test]
    fn override_wins_until_reset() {
        let mut colors = ColorAssignment::default();
        assert!(colors.set("FeK", "#00ff00".parse().unwrap()));
        assert_eq!(colors.color_for("FeK").to_string(), "#00FF00");
        assert!(colors.is_overridden("FeK"));
        assert!(!colors.set("FeK", ElementColor::from_rgb(0, 255, 0)));

        colors.reset();
        assert_eq!(colors.color_for("FeK").to_string(), "#FF0000");
    }

    #[test]
    fn hex_parsing_accepts_short_form_and_rejects_garbage() {
        assert_eq!(
            "#0F0".parse::<ElementColor>().unwrap(),
            ElementColor::from_rgb(0, 255, 0)
        );
        assert!("not a colour".parse::<ElementColor>().is_err());
    }

    #[test]
    fn extra_defaults_extend_and_replace_builtins() {
        let extra = BTreeMap::from([
            ("MgK".to_string(), "#123456".to_string()),
            ("FeK".to_string(), "#000080".to_string()),
            ("AlK".to_string(), "bogus".to_string()),
        ]);
        let colors = ColorAssignment::new(ColorDefaults::with_extra(&extra));
        assert_eq!(colors.color_for("MgK").to_string(), "#123456");
        assert_eq!(colors.color_for("FeK").to_string(), "#000080");
        assert_eq!(colors.color_for("AlK"), ElementColor::BLACK);
    }
}
