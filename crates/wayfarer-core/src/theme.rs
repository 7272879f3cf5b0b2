//! Day color palettes.
//!
//! Day coloring is a pure function of the day number: day `n` takes
//! `palette[(n - 1) % len]`. The palette order is fixed so coloring is stable
//! across renders and across the two map-bearing views (the itinerary map and
//! the destination picker).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy)]
struct Rgb01 {
    r: f64,
    g: f64,
    b: f64,
}

#[derive(Debug, Clone, Copy)]
struct Hsl {
    h_deg: f64,
    s_pct: f64,
    l_pct: f64,
}

fn parse_hex_rgb01(s: &str) -> Option<Rgb01> {
    let s = s.trim();
    let hex = s.strip_prefix('#')?;
    let (r, g, b) = match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            (r, g, b)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            (r, g, b)
        }
        _ => return None,
    };
    Some(Rgb01 {
        r: (r as f64) / 255.0,
        g: (g as f64) / 255.0,
        b: (b as f64) / 255.0,
    })
}

fn rgb01_to_hex(rgb: Rgb01) -> String {
    let r = (rgb.r.clamp(0.0, 1.0) * 255.0).round() as i64;
    let g = (rgb.g.clamp(0.0, 1.0) * 255.0).round() as i64;
    let b = (rgb.b.clamp(0.0, 1.0) * 255.0).round() as i64;
    format!(
        "#{:02x}{:02x}{:02x}",
        r.clamp(0, 255),
        g.clamp(0, 255),
        b.clamp(0, 255)
    )
}

fn rgb01_to_hsl(rgb: Rgb01) -> Hsl {
    let r = rgb.r;
    let g = rgb.g;
    let b = rgb.b;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h_deg: 0.0,
            s_pct: 0.0,
            l_pct: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let mut h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    h /= 6.0;

    Hsl {
        h_deg: h * 360.0,
        s_pct: s * 100.0,
        l_pct: l * 100.0,
    }
}

fn hsl_to_rgb01(hsl: Hsl) -> Rgb01 {
    let h = ((hsl.h_deg % 360.0) + 360.0) % 360.0 / 360.0;
    let s = (hsl.s_pct / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l_pct / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        return Rgb01 { r: l, g: l, b: l };
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
    Rgb01 {
        r: hue_to_rgb(p, q, h + 1.0 / 3.0),
        g: hue_to_rgb(p, q, h),
        b: hue_to_rgb(p, q, h - 1.0 / 3.0),
    }
}

fn lighten_hex(hex: &str, l_delta_pct: f64) -> Option<String> {
    let mut hsl = rgb01_to_hsl(parse_hex_rgb01(hex)?);
    hsl.l_pct = (hsl.l_pct + l_delta_pct).clamp(0.0, 100.0);
    Some(rgb01_to_hex(hsl_to_rgb01(hsl)))
}

/// Fixed ordered day palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPalette {
    pub colors: Vec<String>,
}

const DEFAULT_COLORS: [&str; 8] = [
    "#e74c3c", "#3498db", "#2ecc71", "#9b59b6", "#f39c12", "#1abc9c", "#e91e63", "#34495e",
];

impl Default for DayPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DayPalette {
    /// Resolves a palette by the itinerary's `visual_theme` key. Unknown or
    /// absent keys fall back to the default palette, deterministically.
    pub fn for_theme(visual_theme: Option<&str>) -> Self {
        match visual_theme {
            Some("pastel") => Self {
                colors: ["#f4a7a3", "#a3c9f4", "#a8e6c3", "#d3b8e6", "#f8d49b", "#a5ded5"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            Some("dusk") => Self {
                colors: ["#c0392b", "#2980b9", "#27ae60", "#8e44ad", "#d35400", "#16a085"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            _ => Self::default(),
        }
    }

    /// `palette[(day - 1) % len]`. Day numbers are 1-based; day 0 is treated
    /// as day 1 rather than panicking on malformed input.
    pub fn color_for_day(&self, day: u32) -> &str {
        let idx = (day.max(1) as usize - 1) % self.colors.len().max(1);
        self.colors.get(idx).map(|s| s.as_str()).unwrap_or("#ccc")
    }

    /// Accent for the focused marker: the day color lightened toward white so
    /// the focused pin reads against its normal siblings.
    pub fn focused_accent(&self, day: u32) -> String {
        let base = self.color_for_day(day);
        lighten_hex(base, 18.0).unwrap_or_else(|| base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_colors_cycle_through_the_palette() {
        let palette = DayPalette::default();
        let len = palette.colors.len() as u32;
        assert_eq!(palette.color_for_day(1), palette.colors[0]);
        assert_eq!(palette.color_for_day(2), palette.colors[1]);
        assert_eq!(palette.color_for_day(len + 1), palette.colors[0]);
        assert_eq!(palette.color_for_day(2 * len), palette.colors[(len - 1) as usize]);
    }

    #[test]
    fn day_zero_is_clamped_to_day_one() {
        let palette = DayPalette::default();
        assert_eq!(palette.color_for_day(0), palette.color_for_day(1));
    }

    #[test]
    fn theme_lookup_falls_back_to_default() {
        assert_eq!(DayPalette::for_theme(None), DayPalette::default());
        assert_eq!(DayPalette::for_theme(Some("no-such-theme")), DayPalette::default());
        assert_ne!(DayPalette::for_theme(Some("pastel")), DayPalette::default());
    }

    #[test]
    fn hex_hsl_round_trip_stays_close() {
        for hex in ["#e74c3c", "#3498db", "#2ecc71", "#abc"] {
            let rgb = parse_hex_rgb01(hex).unwrap();
            let back = hsl_to_rgb01(rgb01_to_hsl(rgb));
            assert!((rgb.r - back.r).abs() < 0.01);
            assert!((rgb.g - back.g).abs() < 0.01);
            assert!((rgb.b - back.b).abs() < 0.01);
        }
    }

    #[test]
    fn focused_accent_is_lighter_than_base() {
        let palette = DayPalette::default();
        let base = rgb01_to_hsl(parse_hex_rgb01(palette.color_for_day(1)).unwrap());
        let accent = rgb01_to_hsl(parse_hex_rgb01(&palette.focused_accent(1)).unwrap());
        assert!(accent.l_pct > base.l_pct);
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(parse_hex_rgb01("e74c3c").is_none());
        assert!(parse_hex_rgb01("#12345").is_none());
        assert!(parse_hex_rgb01("#xyzxyz").is_none());
    }
}
