use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::layout::font_metrics::FontFamily;
use crate::models::resume::UnknownName;
use crate::templates::TemplateId;

// ────────────────────────────────────────────────────────────────────────────
// Colour
// ────────────────────────────────────────────────────────────────────────────

/// An sRGB colour, written as `#rrggbb` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    /// Components scaled to 0.0–1.0, as PDF colour operators expect.
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid colour '{0}', expected #rrggbb")]
pub struct InvalidColor(pub String);

impl FromStr for Rgb {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| InvalidColor(s.to_string()))?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| InvalidColor(s.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fonts
// ────────────────────────────────────────────────────────────────────────────

/// On-screen font choices offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontChoice {
    Inter,
    Roboto,
    OpenSans,
    Lato,
    Montserrat,
    SourceSansPro,
    Merriweather,
    PlayfairDisplay,
    Lora,
    Georgia,
    Garamond,
}

impl FontChoice {
    pub const ALL: [FontChoice; 11] = [
        FontChoice::Inter,
        FontChoice::Roboto,
        FontChoice::OpenSans,
        FontChoice::Lato,
        FontChoice::Montserrat,
        FontChoice::SourceSansPro,
        FontChoice::Merriweather,
        FontChoice::PlayfairDisplay,
        FontChoice::Lora,
        FontChoice::Georgia,
        FontChoice::Garamond,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            FontChoice::Inter => "Inter",
            FontChoice::Roboto => "Roboto",
            FontChoice::OpenSans => "Open Sans",
            FontChoice::Lato => "Lato",
            FontChoice::Montserrat => "Montserrat",
            FontChoice::SourceSansPro => "Source Sans Pro",
            FontChoice::Merriweather => "Merriweather",
            FontChoice::PlayfairDisplay => "Playfair Display",
            FontChoice::Lora => "Lora",
            FontChoice::Georgia => "Georgia",
            FontChoice::Garamond => "Garamond",
        }
    }

    /// The embeddable family used for measurement and PDF output.
    ///
    /// Serif-styled choices map to the serif family, everything else to sans.
    pub fn family(&self) -> FontFamily {
        match self {
            FontChoice::Merriweather
            | FontChoice::PlayfairDisplay
            | FontChoice::Lora
            | FontChoice::Georgia
            | FontChoice::Garamond => FontFamily::Serif,
            _ => FontFamily::Sans,
        }
    }

    /// CSS font stack for the SVG preview.
    pub fn css_stack(&self) -> String {
        let generic = match self.family() {
            FontFamily::Serif => "serif",
            FontFamily::Sans => "sans-serif",
        };
        format!("'{}', {}", self.display_name(), generic)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Colour schemes
// ────────────────────────────────────────────────────────────────────────────

/// Five colour tiers used by every layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Name and section headings.
    pub primary: Rgb,
    /// Body text.
    pub secondary: Rgb,
    /// Dates, locations and other meta lines.
    pub tertiary: Rgb,
    /// Placeholder sample content.
    pub muted: Rgb,
    /// Backgrounds and skill-bar tracks.
    pub light: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    Slate,
    Charcoal,
    Navy,
    Forest,
    Burgundy,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 5] = [
        ColorScheme::Slate,
        ColorScheme::Charcoal,
        ColorScheme::Navy,
        ColorScheme::Forest,
        ColorScheme::Burgundy,
    ];

    pub fn palette(&self) -> Palette {
        match self {
            ColorScheme::Slate => Palette {
                primary: Rgb::new(0x0f, 0x17, 0x2a),
                secondary: Rgb::new(0x33, 0x41, 0x55),
                tertiary: Rgb::new(0x64, 0x74, 0x8b),
                muted: Rgb::new(0x94, 0xa3, 0xb8),
                light: Rgb::new(0xf1, 0xf5, 0xf9),
            },
            ColorScheme::Charcoal => Palette {
                primary: Rgb::new(0x11, 0x11, 0x11),
                secondary: Rgb::new(0x37, 0x37, 0x37),
                tertiary: Rgb::new(0x6b, 0x6b, 0x6b),
                muted: Rgb::new(0xa3, 0xa3, 0xa3),
                light: Rgb::new(0xf4, 0xf4, 0xf4),
            },
            ColorScheme::Navy => Palette {
                primary: Rgb::new(0x0b, 0x23, 0x4a),
                secondary: Rgb::new(0x1f, 0x36, 0x5c),
                tertiary: Rgb::new(0x4a, 0x64, 0x8c),
                muted: Rgb::new(0x93, 0xa5, 0xc4),
                light: Rgb::new(0xea, 0xf0, 0xf8),
            },
            ColorScheme::Forest => Palette {
                primary: Rgb::new(0x14, 0x2d, 0x1f),
                secondary: Rgb::new(0x2d, 0x45, 0x36),
                tertiary: Rgb::new(0x5a, 0x73, 0x62),
                muted: Rgb::new(0x9d, 0xb0, 0xa2),
                light: Rgb::new(0xee, 0xf4, 0xef),
            },
            ColorScheme::Burgundy => Palette {
                primary: Rgb::new(0x3b, 0x0d, 0x18),
                secondary: Rgb::new(0x4a, 0x25, 0x2d),
                tertiary: Rgb::new(0x7a, 0x55, 0x5d),
                muted: Rgb::new(0xb8, 0x9c, 0xa2),
                light: Rgb::new(0xf8, 0xee, 0xf0),
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Style selection
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_ACCENT: Rgb = Rgb::new(0x25, 0x63, 0xeb);

/// Everything that parameterises rendering apart from the document itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSelection {
    pub template: TemplateId,
    pub font: FontChoice,
    pub color_scheme: ColorScheme,
    pub accent: Rgb,
}

impl StyleSelection {
    #[cfg(test)]
    pub fn for_template(template: TemplateId) -> Self {
        Self {
            template,
            ..Self::default()
        }
    }

    pub fn palette(&self) -> Palette {
        self.color_scheme.palette()
    }
}

impl Default for StyleSelection {
    fn default() -> Self {
        Self {
            template: TemplateId::Modern,
            font: FontChoice::Inter,
            color_scheme: ColorScheme::Slate,
            accent: DEFAULT_ACCENT,
        }
    }
}

/// Partial update of a [`StyleSelection`]; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleUpdate {
    pub template: Option<String>,
    pub font: Option<FontChoice>,
    pub color_scheme: Option<ColorScheme>,
    pub accent: Option<Rgb>,
}

impl StyleUpdate {
    /// Applies the update, failing without side effects on an unknown template.
    pub fn apply(self, style: &mut StyleSelection) -> Result<(), UnknownName> {
        let template = match self.template {
            Some(name) => Some(name.parse::<TemplateId>()?),
            None => None,
        };
        if let Some(t) = template {
            style.template = t;
        }
        if let Some(f) = self.font {
            style.font = f;
        }
        if let Some(c) = self.color_scheme {
            style.color_scheme = c;
        }
        if let Some(a) = self.accent {
            style.accent = a;
        }
        Ok(())
    }
}
