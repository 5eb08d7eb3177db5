use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// An opaque RGB color as used by the page theme.
///
/// Deserializes from `"#RGB"`, `"#RRGGBB"`, `[r, g, b]` or `{ "r": .., "g": .., "b": .. }`
/// and always serializes back to the `#RRGGBB` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Components scaled to the `0.0..=1.0` range expected by PDF color operators.
    pub fn unit_components(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse a hex color string (#RGB or #RRGGBB format)
    pub fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Color must start with #, got: {}", s))?;

        if !hex.is_ascii() {
            return Err(format!("Color must be ASCII hex digits, got: {}", s));
        }

        let component = |digits: &str, name: &str| {
            u8::from_str_radix(digits, 16).map_err(|e| format!("Invalid {} component: {}", name, e))
        };

        match hex.len() {
            3 => Ok(Color {
                r: component(&hex[0..1].repeat(2), "red")?,
                g: component(&hex[1..2].repeat(2), "green")?,
                b: component(&hex[2..3].repeat(2), "blue")?,
            }),
            6 => Ok(Color {
                r: component(&hex[0..2], "red")?,
                g: component(&hex[2..4], "green")?,
                b: component(&hex[4..6], "blue")?,
            }),
            _ => Err(format!(
                "Invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Triple([u8; 3]),
            Map { r: u8, g: u8, b: u8 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => Self::parse_hex(&s).map_err(de::Error::custom),
            ColorDef::Triple([r, g, b]) => Ok(Color { r, g, b }),
            ColorDef::Map { r, g, b } => Ok(Color { r, g, b }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Color::parse_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse_hex("#19377D").unwrap(), Color::rgb(25, 55, 125));
        assert!(Color::parse_hex("19377D").is_err());
        assert!(Color::parse_hex("#1234").is_err());
    }

    #[test]
    fn non_ascii_hex_is_an_error() {
        for input in ["#é1", "#ééé", "#1é2", "#12345é"] {
            assert!(Color::parse_hex(input).is_err(), "{}", input);
        }
        assert!(serde_json::from_str::<Color>("\"#é1\"").is_err());
    }

    #[test]
    fn deserializes_every_accepted_shape() {
        let from_hex: Color = serde_json::from_str("\"#EBF5FF\"").unwrap();
        let from_triple: Color = serde_json::from_str("[235, 245, 255]").unwrap();
        let from_map: Color = serde_json::from_str(r#"{"r":235,"g":245,"b":255}"#).unwrap();
        assert_eq!(from_hex, from_triple);
        assert_eq!(from_triple, from_map);
        assert_eq!(serde_json::to_string(&from_map).unwrap(), "\"#EBF5FF\"");
    }

    #[test]
    fn unit_components_are_normalized() {
        let [r, g, b] = Color::rgb(255, 0, 51).unit_components();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-6);
    }
}
