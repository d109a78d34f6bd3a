//! Colors and marker shapes
//!
//! Models get colors, embeddings get marker shapes. Lines are always solid.

use plotters::style::RGBColor;

/// Ten-color categorical palette (muted, print friendly)
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(76, 114, 176),  // Blue
    RGBColor(221, 132, 82),  // Orange
    RGBColor(85, 168, 104),  // Green
    RGBColor(196, 78, 82),   // Red
    RGBColor(129, 114, 179), // Purple
    RGBColor(147, 120, 96),  // Brown
    RGBColor(218, 139, 195), // Pink
    RGBColor(140, 140, 140), // Gray
    RGBColor(204, 185, 116), // Olive
    RGBColor(100, 181, 205), // Cyan
];

pub fn model_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Cross,
    Diamond,
    Plus,
    Square,
    Triangle,
}

const MARKERS: [Marker; 6] = [
    Marker::Circle,
    Marker::Cross,
    Marker::Diamond,
    Marker::Plus,
    Marker::Square,
    Marker::Triangle,
];

impl Marker {
    pub fn for_index(index: usize) -> Self {
        MARKERS[index % MARKERS.len()]
    }

    /// Outline in pixel offsets around (0, 0); y grows downward.
    pub fn vertices(self, size: i32) -> Vec<(i32, i32)> {
        let s = size as f64;
        let pts: Vec<(f64, f64)> = match self {
            Marker::Circle => (0..16)
                .map(|i| {
                    let a = i as f64 * std::f64::consts::TAU / 16.0;
                    (s * a.cos(), s * a.sin())
                })
                .collect(),
            Marker::Square => {
                let h = s * 0.85;
                vec![(-h, -h), (h, -h), (h, h), (-h, h)]
            }
            Marker::Diamond => vec![(0.0, -s), (s, 0.0), (0.0, s), (-s, 0.0)],
            Marker::Triangle => vec![(0.0, -s), (s, s * 0.8), (-s, s * 0.8)],
            Marker::Plus => plus_outline(s),
            Marker::Cross => {
                let r = std::f64::consts::FRAC_1_SQRT_2;
                plus_outline(s * 1.1)
                    .into_iter()
                    .map(|(x, y)| ((x - y) * r, (x + y) * r))
                    .collect()
            }
        };
        pts.into_iter()
            .map(|(x, y)| (x.round() as i32, y.round() as i32))
            .collect()
    }
}

fn plus_outline(s: f64) -> Vec<(f64, f64)> {
    let w = s / 3.0;
    vec![
        (-w, -s),
        (w, -s),
        (w, -w),
        (s, -w),
        (s, w),
        (w, w),
        (w, s),
        (-w, s),
        (-w, w),
        (-s, w),
        (-s, -w),
        (-w, -w),
    ]
}
