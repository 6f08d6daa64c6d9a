//! sRGB colors and a two-stop color scale interpolated in CIE L*a*b*.
//!
//! Lab uses the D50 white point with Bradford-adapted sRGB matrices, so the
//! midpoint of a ramp keeps its lightness instead of turning muddy like a raw
//! RGB blend does.

use crate::error::DataError;
use std::str::FromStr;

/// 8-bit sRGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_lab(self) -> Lab {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);
        let y = xyz_to_lab((0.222_504_5 * r + 0.716_878_6 * g + 0.060_616_9 * b) / YN);
        let (x, z) = if self.r == self.g && self.g == self.b {
            (y, y)
        } else {
            (
                xyz_to_lab((0.436_074_7 * r + 0.385_064_9 * g + 0.143_080_4 * b) / XN),
                xyz_to_lab((0.013_932_2 * r + 0.097_104_5 * g + 0.714_173_3 * b) / ZN),
            )
        };
        Lab {
            l: 116.0 * y - 16.0,
            a: 500.0 * (x - y),
            b: 200.0 * (y - z),
        }
    }

    /// Format as `#rrggbb`
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || DataError::Color(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !hex.is_ascii() {
            return Err(bad());
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let short = |h: &str| channel(h).map(|v| v * 17);
                Ok(Self::new(
                    short(&hex[0..1])?,
                    short(&hex[1..2])?,
                    short(&hex[2..3])?,
                ))
            }
            _ => Err(bad()),
        }
    }
}

/// CIE L*a*b* color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub fn to_rgb(self) -> Rgb {
        let y = (self.l + 16.0) / 116.0;
        let x = y + self.a / 500.0;
        let z = y - self.b / 200.0;
        let x = XN * lab_to_xyz(x);
        let y = YN * lab_to_xyz(y);
        let z = ZN * lab_to_xyz(z);
        Rgb::new(
            linear_to_srgb(3.133_856_1 * x - 1.616_866_7 * y - 0.490_614_6 * z),
            linear_to_srgb(-0.978_768_4 * x + 1.916_141_5 * y + 0.033_454_0 * z),
            linear_to_srgb(0.071_945_3 * x - 0.228_991_4 * y + 1.405_242_7 * z),
        )
    }

    fn lerp(self, other: Lab, t: f64) -> Lab {
        Lab {
            l: self.l + (other.l - self.l) * t,
            a: self.a + (other.a - self.a) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

const XN: f64 = 0.964_22;
const YN: f64 = 1.0;
const ZN: f64 = 0.825_21;
const T0: f64 = 4.0 / 29.0;
const T1: f64 = 6.0 / 29.0;
const T2: f64 = 3.0 * T1 * T1;
const T3: f64 = T1 * T1 * T1;

fn xyz_to_lab(t: f64) -> f64 {
    if t > T3 {
        t.cbrt()
    } else {
        t / T2 + T0
    }
}

fn lab_to_xyz(t: f64) -> f64 {
    if t > T1 {
        t * t * t
    } else {
        T2 * (t - T0)
    }
}

fn srgb_to_linear(c: u8) -> f64 {
    let x = f64::from(c) / 255.0;
    if x <= 0.040_45 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(x: f64) -> u8 {
    let v = if x <= 0.003_130_8 {
        12.92 * x
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    };
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Any function from a record's depth to a fill color.
/// Closures `Fn(f64) -> Rgb` qualify as well.
pub trait ColorMap {
    fn map(&self, value: f64) -> Rgb;
}

impl<F: Fn(f64) -> Rgb> ColorMap for F {
    fn map(&self, value: f64) -> Rgb {
        self(value)
    }
}

/// Linear color scale between two colors, interpolated in Lab
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScale {
    domain: (f64, f64),
    range: (Rgb, Rgb),
    lab: (Lab, Lab),
}

impl ColorScale {
    pub const DEFAULT_DOMAIN: (f64, f64) = (0.0, 200.0);
    pub const DEFAULT_RANGE: (Rgb, Rgb) = (Rgb::new(0xfd, 0xe0, 0xdd), Rgb::new(0xc5, 0x1b, 0x8a));

    pub fn new(domain: (f64, f64), range: (Rgb, Rgb)) -> Self {
        Self {
            domain,
            range,
            lab: (range.0.to_lab(), range.1.to_lab()),
        }
    }

    pub fn map(&self, value: f64) -> Rgb {
        let span = self.domain.1 - self.domain.0;
        let t = if span == 0.0 {
            0.5
        } else {
            (value - self.domain.0) / span
        };
        self.lab.0.lerp(self.lab.1, t).to_rgb()
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (Rgb, Rgb) {
        self.range
    }
}

impl ColorMap for ColorScale {
    fn map(&self, value: f64) -> Rgb {
        ColorScale::map(self, value)
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DOMAIN, Self::DEFAULT_RANGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#fde0dd".parse::<Rgb>().unwrap(), Rgb::new(253, 224, 221));
        assert_eq!("#fff".parse::<Rgb>().unwrap(), Rgb::new(255, 255, 255));
        assert!("fde0dd".parse::<Rgb>().is_err());
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_lab_roundtrip() {
        for c in [
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(0xfd, 0xe0, 0xdd),
            Rgb::new(0xc5, 0x1b, 0x8a),
            Rgb::new(12, 200, 77),
        ] {
            assert_eq!(c.to_lab().to_rgb(), c);
        }
    }

    #[test]
    fn test_white_lab() {
        let lab = Rgb::new(255, 255, 255).to_lab();
        assert!((lab.l - 100.0).abs() < 1e-3);
        assert!(lab.a.abs() < 1e-9);
        assert!(lab.b.abs() < 1e-9);
    }

    #[test]
    fn test_color_scale_endpoints() {
        let scale = ColorScale::default();
        assert_eq!(scale.map(0.0), Rgb::new(0xfd, 0xe0, 0xdd));
        assert_eq!(scale.map(200.0), Rgb::new(0xc5, 0x1b, 0x8a));
    }

    #[test]
    fn test_color_scale_midpoint_not_rgb_blend() {
        let scale = ColorScale::new((0.0, 1.0), (Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)));
        let mid = scale.map(0.5);
        // A raw RGB blend would give (128, 0, 128)
        assert_ne!(mid, Rgb::new(128, 0, 128));
        let mid_l = mid.to_lab().l;
        let red_l = Rgb::new(255, 0, 0).to_lab().l;
        let blue_l = Rgb::new(0, 0, 255).to_lab().l;
        assert!((mid_l - (red_l + blue_l) / 2.0).abs() < 2.0);
    }

    #[test]
    fn test_color_map_impls() {
        let scale: Box<dyn ColorMap> = Box::new(ColorScale::default());
        assert_eq!(scale.map(0.0), Rgb::new(0xfd, 0xe0, 0xdd));

        let threshold: Box<dyn ColorMap> =
            Box::new(|v: f64| if v > 70.0 { Rgb::new(255, 0, 0) } else { Rgb::new(0, 0, 0) });
        assert_eq!(threshold.map(300.0), Rgb::new(255, 0, 0));
        assert_eq!(threshold.map(10.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_color_scale_clamps_out_of_gamut() {
        let scale = ColorScale::default();
        // Extrapolates past the domain without panicking
        let _ = scale.map(800.0);
        let _ = scale.map(-400.0);
    }
}
