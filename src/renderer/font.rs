//! Tiny stroke font for the floating labels
//!
//! Glyphs are line segments in a 0.6 x 1.0 em cell, y pointing down. Only
//! the characters the labels and HUD overlays use are defined; anything
//! else advances without drawing.

use glam::Vec2;

/// Horizontal advance per character, in ems
pub const ADVANCE: f32 = 0.8;
/// Glyph cell width, in ems
pub const CELL_WIDTH: f32 = 0.6;

type Stroke = [(f32, f32); 2];

const BOX: [Stroke; 4] = [
    [(0.0, 0.0), (0.6, 0.0)],
    [(0.6, 0.0), (0.6, 1.0)],
    [(0.6, 1.0), (0.0, 1.0)],
    [(0.0, 1.0), (0.0, 0.0)],
];

/// Strokes for `c`
pub fn glyph(c: char) -> &'static [Stroke] {
    match c {
        '0' => &BOX,
        '1' => &[[(0.3, 0.0), (0.3, 1.0)], [(0.1, 0.2), (0.3, 0.0)]],
        '2' => &[
            [(0.0, 0.0), (0.6, 0.0)],
            [(0.6, 0.0), (0.6, 0.5)],
            [(0.6, 0.5), (0.0, 0.5)],
            [(0.0, 0.5), (0.0, 1.0)],
            [(0.0, 1.0), (0.6, 1.0)],
        ],
        '3' => &[
            [(0.0, 0.0), (0.6, 0.0)],
            [(0.6, 0.0), (0.6, 1.0)],
            [(0.6, 1.0), (0.0, 1.0)],
            [(0.1, 0.5), (0.6, 0.5)],
        ],
        '4' => &[
            [(0.0, 0.0), (0.0, 0.5)],
            [(0.0, 0.5), (0.6, 0.5)],
            [(0.6, 0.0), (0.6, 1.0)],
        ],
        '5' => &[
            [(0.6, 0.0), (0.0, 0.0)],
            [(0.0, 0.0), (0.0, 0.5)],
            [(0.0, 0.5), (0.6, 0.5)],
            [(0.6, 0.5), (0.6, 1.0)],
            [(0.6, 1.0), (0.0, 1.0)],
        ],
        '6' => &[
            [(0.6, 0.0), (0.0, 0.0)],
            [(0.0, 0.0), (0.0, 1.0)],
            [(0.0, 1.0), (0.6, 1.0)],
            [(0.6, 1.0), (0.6, 0.5)],
            [(0.6, 0.5), (0.0, 0.5)],
        ],
        '7' => &[[(0.0, 0.0), (0.6, 0.0)], [(0.6, 0.0), (0.2, 1.0)]],
        '8' => &[
            [(0.0, 0.0), (0.6, 0.0)],
            [(0.6, 0.0), (0.6, 1.0)],
            [(0.6, 1.0), (0.0, 1.0)],
            [(0.0, 1.0), (0.0, 0.0)],
            [(0.0, 0.5), (0.6, 0.5)],
        ],
        '9' => &[
            [(0.6, 0.5), (0.0, 0.5)],
            [(0.0, 0.5), (0.0, 0.0)],
            [(0.0, 0.0), (0.6, 0.0)],
            [(0.6, 0.0), (0.6, 1.0)],
            [(0.6, 1.0), (0.0, 1.0)],
        ],
        '+' => &[[(0.05, 0.5), (0.55, 0.5)], [(0.3, 0.25), (0.3, 0.75)]],
        '-' => &[[(0.05, 0.5), (0.55, 0.5)]],
        's' => &[
            [(0.5, 0.4), (0.1, 0.4)],
            [(0.1, 0.4), (0.1, 0.7)],
            [(0.1, 0.7), (0.5, 0.7)],
            [(0.5, 0.7), (0.5, 1.0)],
            [(0.5, 1.0), (0.1, 1.0)],
        ],
        'H' => &[
            [(0.0, 0.0), (0.0, 1.0)],
            [(0.6, 0.0), (0.6, 1.0)],
            [(0.0, 0.5), (0.6, 0.5)],
        ],
        'P' => &[
            [(0.0, 1.0), (0.0, 0.0)],
            [(0.0, 0.0), (0.6, 0.0)],
            [(0.6, 0.0), (0.6, 0.5)],
            [(0.6, 0.5), (0.0, 0.5)],
        ],
        _ => &[],
    }
}

/// Width of `text` at `size` pixels per em
pub fn text_width(text: &str, size: f32) -> f32 {
    let n = text.chars().count();
    if n == 0 {
        return 0.0;
    }
    ((n - 1) as f32 * ADVANCE + CELL_WIDTH) * size
}

/// Lay out `text` centred on `center`; returns pixel-space segments
pub fn layout(text: &str, center: Vec2, size: f32) -> Vec<(Vec2, Vec2)> {
    let origin = center - Vec2::new(text_width(text, size), size) * 0.5;
    let mut segments = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let cell = origin + Vec2::new(i as f32 * ADVANCE * size, 0.0);
        for [a, b] in glyph(c) {
            segments.push((
                cell + Vec2::new(a.0, a.1) * size,
                cell + Vec2::new(b.0, b.1) * size,
            ));
        }
    }
    segments
}
