use std::fmt;
use std::str::FromStr;

use crate::error::AppearanceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const DARK_MAGENTA: Rgb = Rgb::new(0x80, 0x00, 0x80);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = AppearanceError;

    /// Parses `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppearanceError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub point_size: f32,
    pub bold: bool,
}

impl FromStr for FontSpec {
    type Err = AppearanceError;

    /// Parses `family,point_size[,bold]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppearanceError::InvalidFont(s.to_string());
        let mut parts = s.split(',').map(str::trim);
        let family = parts
            .next()
            .filter(|family| !family.is_empty())
            .ok_or_else(invalid)?;
        let point_size = parts
            .next()
            .and_then(|size| size.parse::<f32>().ok())
            .filter(|size| size.is_finite() && *size > 0.0)
            .ok_or_else(invalid)?;
        let bold = match parts.next() {
            None => false,
            Some(flag) if flag.eq_ignore_ascii_case("bold") => true,
            Some(_) => return Err(invalid()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(FontSpec {
            family: family.to_string(),
            point_size,
            bold,
        })
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.family, self.point_size)?;
        if self.bold {
            f.write_str(",bold")?;
        }
        Ok(())
    }
}

/// Comment editor appearance supplied by the host. `None` leaves the
/// current value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentSettings {
    pub text_color: Option<Rgb>,
    pub font: Option<FontSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_look_001_parse_color() {
        assert_eq!("#80ff0a".parse::<Rgb>(), Ok(Rgb::new(0x80, 0xff, 0x0a)));
        assert_eq!(Rgb::DARK_MAGENTA.to_string(), "#800080");
        assert!("80ff0a".parse::<Rgb>().is_err());
        assert!("#80ff0".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn t_look_002_parse_font() {
        let font: FontSpec = "DejaVu Sans, 11".parse().expect("font");
        assert_eq!(font.family, "DejaVu Sans");
        assert_eq!(font.point_size, 11.0);
        assert!(!font.bold);
        let bold: FontSpec = "Mono,9.5,bold".parse().expect("bold font");
        assert!(bold.bold);
        assert_eq!(bold.to_string(), "Mono,9.5,bold");
        assert!(",10".parse::<FontSpec>().is_err());
        assert!("Sans,-1".parse::<FontSpec>().is_err());
        assert!("Sans,10,italic".parse::<FontSpec>().is_err());
    }
}
