use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{AnaximanderError, AnaximanderResult};
use crate::mask::values::ScaleValue;
use crate::scale::domain::ColorDomain;

/// Hue path used between two color stops of a continuous scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// HSL, hue along the shorter arc.
    #[default]
    Hsl,
    /// HSL, hue along the raw difference (may sweep the long way round).
    HslLong,
}

/// Maps domain values to colors.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    domain: ColorDomain,
    range: Vec<Rgba8>,
    interpolation: Interpolation,
}

impl ColorScale {
    /// Pair a domain with its output colors.
    ///
    /// Continuous scales need at least two colors, spread evenly over
    /// `[min, max]`. Categorical scales cycle through the colors.
    pub fn new(
        domain: ColorDomain,
        range: Vec<Rgba8>,
        interpolation: Interpolation,
    ) -> AnaximanderResult<Self> {
        match &domain {
            ColorDomain::Continuous { min, max } => {
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(AnaximanderError::invalid_input(
                        "continuous domain must be finite with min <= max",
                    ));
                }
                if range.len() < 2 {
                    return Err(AnaximanderError::invalid_input(
                        "continuous color range needs at least 2 colors",
                    ));
                }
            }
            ColorDomain::Categorical { .. } => {
                if range.is_empty() {
                    return Err(AnaximanderError::invalid_input(
                        "categorical color range must be non-empty",
                    ));
                }
            }
        }
        Ok(Self {
            domain,
            range,
            interpolation,
        })
    }

    pub fn domain(&self) -> &ColorDomain {
        &self.domain
    }

    pub fn range(&self) -> &[Rgba8] {
        &self.range
    }

    /// Color for `v`, or `None` when `v` has no place in the domain
    /// (a category on a continuous scale, an unknown category).
    pub fn color(&self, v: &ScaleValue) -> Option<Rgba8> {
        match &self.domain {
            ColorDomain::Continuous { .. } => v.as_number().map(|n| self.color_at(n)),
            ColorDomain::Categorical { values } => values
                .iter()
                .position(|x| x == v)
                .map(|i| self.range[i % self.range.len()]),
        }
    }

    /// Color for a number on a continuous scale. Values outside the domain
    /// clamp to the end colors; a zero-width domain yields its midpoint color.
    /// On a categorical scale the number is looked up as a category.
    pub fn color_at(&self, v: f64) -> Rgba8 {
        let (min, max) = match self.domain {
            ColorDomain::Continuous { min, max } => (min, max),
            ColorDomain::Categorical { .. } => {
                return self
                    .color(&ScaleValue::Number(v))
                    .unwrap_or(Rgba8::TRANSPARENT);
            }
        };

        let t = if max > min { (v - min) / (max - min) } else { 0.5 };
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let segments = self.range.len() - 1;
        let pos = t * segments as f64;
        let i = (pos.floor() as usize).min(segments - 1);
        interpolate_hsl(
            self.range[i],
            self.range[i + 1],
            pos - i as f64,
            self.interpolation,
        )
    }
}

/// Parse `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    match s.len() {
        6 => Ok(Rgba8::opaque(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

impl Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            HslaObj {
                h: f64,
                s: f64,
                l: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<u8>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::HslaObj { h, s, l, a } => Ok(Hsl { h, s, l }.to_rgba8(unit_to_u8(a))),
            Repr::Arr(v) => match v[..] {
                [r, g, b] => Ok(Rgba8::opaque(r, g, b)),
                [r, g, b, a] => Ok(Rgba8::new(r, g, b, a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// HSL color; `h` in degrees, `s` and `l` in `[0, 1]`. `h` is NaN for grays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Hsl {
    pub(crate) h: f64,
    pub(crate) s: f64,
    pub(crate) l: f64,
}

impl Hsl {
    pub(crate) fn from_rgba8(c: Rgba8) -> Self {
        let r = f64::from(c.r) / 255.0;
        let g = f64::from(c.g) / 255.0;
        let b = f64::from(c.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;
        if d == 0.0 {
            return Self { h: f64::NAN, s: 0.0, l };
        }

        let s = if l < 0.5 { d / (max + min) } else { d / (2.0 - max - min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        Self { h: h * 60.0, s, l }
    }

    pub(crate) fn to_rgba8(self, a: u8) -> Rgba8 {
        let h = if self.h.is_nan() { 0.0 } else { self.h };
        let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        if s == 0.0 {
            let v = unit_to_u8(l);
            return Rgba8::new(v, v, v, a);
        }

        fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                return p + (q - p) * 6.0 * t;
            }
            if t < 1.0 / 2.0 {
                return q;
            }
            if t < 2.0 / 3.0 {
                return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
            }
            p
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Rgba8::new(
            unit_to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            unit_to_u8(hue_to_rgb(p, q, h)),
            unit_to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
            a,
        )
    }
}

fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Interpolate two colors in HSL space. A gray endpoint borrows the hue of
/// the other endpoint so the sweep does not pass through unrelated hues.
pub(crate) fn interpolate_hsl(a: Rgba8, b: Rgba8, t: f64, mode: Interpolation) -> Rgba8 {
    let ha = Hsl::from_rgba8(a);
    let hb = Hsl::from_rgba8(b);

    let (h0, h1) = match (ha.h.is_nan(), hb.h.is_nan()) {
        (true, true) => (0.0, 0.0),
        (true, false) => (hb.h, hb.h),
        (false, true) => (ha.h, ha.h),
        (false, false) => (ha.h, hb.h),
    };
    let mut dh = h1 - h0;
    if mode == Interpolation::Hsl && dh.abs() > 180.0 {
        dh -= 360.0 * (dh / 360.0).round();
    }

    let lerp = |x: f64, y: f64| x + (y - x) * t;
    let hsl = Hsl {
        h: h0 + dh * t,
        s: lerp(ha.s, hb.s),
        l: lerp(ha.l, hb.l),
    };
    let alpha = lerp(f64::from(a.a), f64::from(b.a)).round().clamp(0.0, 255.0) as u8;
    hsl.to_rgba8(alpha)
}

#[cfg(test)]
#[path = "../../tests/unit/scale/color.rs"]
mod tests;
