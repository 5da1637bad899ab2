//! Immediate-mode drawing surface
//!
//! Scene code talks to a [`Canvas`]: a small 2D context with a transform
//! stack and a global opacity, close to what an HTML canvas offers. The
//! production implementation is [`DrawList`], which tessellates everything
//! into a triangle list for the WebGPU pipeline.

use glam::{Affine2, Vec2};

use super::font;
use super::shapes;
use super::vertex::Vertex;

/// Linear RGBA colour
pub type Color = [f32; 4];

pub trait Canvas {
    /// Push the current transform and opacity
    fn save(&mut self);
    /// Pop back to the last `save` (no-op when nothing is saved)
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, factor: f32);
    /// Opacity applied to everything drawn until the next `restore`
    fn set_alpha(&mut self, alpha: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, color: Color);
    /// Round-capped line segment
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    /// Round-capped quadratic Bézier
    fn quad_curve(&mut self, from: Vec2, ctrl: Vec2, to: Vec2, width: f32, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color);
    /// Outlined text centred on `center`; `size` is the cap height in pixels
    fn text(&mut self, center: Vec2, size: f32, text: &str, color: Color);
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Affine2,
    alpha: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            alpha: 1.0,
        }
    }
}

/// Triangle-list canvas
#[derive(Debug, Default)]
pub struct DrawList {
    vertices: Vec<Vertex>,
    current: DrawState,
    stack: Vec<DrawState>,
}

const CURVE_STEPS: u32 = 12;

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all geometry and reset the transform for a new frame
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.current = DrawState::default();
        self.stack.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Radius as it will appear on screen, used to pick segment counts
    fn screen_radius(&self, radius: f32) -> f32 {
        let m = self.current.transform.matrix2;
        radius * m.x_axis.length().max(m.y_axis.length())
    }

    fn emit(&mut self, local: Vec<Vertex>) {
        let alpha = self.current.alpha;
        if alpha <= 0.0 {
            return;
        }
        let transform = self.current.transform;
        self.vertices.extend(local.into_iter().map(|v| {
            let p = transform.transform_point2(Vec2::from(v.position));
            let mut color = v.color;
            color[3] *= alpha;
            Vertex::new(p.x, p.y, color)
        }));
    }
}

impl Canvas for DrawList {
    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.current = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.current.transform = self.current.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.current.transform = self.current.transform * Affine2::from_angle(angle);
    }

    fn scale(&mut self, factor: f32) {
        self.current.transform = self.current.transform * Affine2::from_scale(Vec2::splat(factor));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.current.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let segments = shapes::segments_for(self.screen_radius(radius));
        self.emit(shapes::circle(center, radius, color, segments));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let segments = shapes::segments_for(self.screen_radius(radius));
        let half = width * 0.5;
        self.emit(shapes::ring(center, radius - half, radius + half, color, segments));
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        let segments = shapes::segments_for(self.screen_radius(radii.max_element()));
        self.emit(shapes::ellipse(center, radii, color, segments));
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, color: Color) {
        let segments = shapes::segments_for(self.screen_radius(radii.max_element()));
        let half = Vec2::splat(width * 0.5);
        self.emit(shapes::ellipse_ring(
            center,
            radii - half,
            radii + half,
            color,
            segments,
        ));
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.emit(shapes::polyline(&[from, to], width, color));
    }

    fn quad_curve(&mut self, from: Vec2, ctrl: Vec2, to: Vec2, width: f32, color: Color) {
        let points = shapes::quadratic_points(from, ctrl, to, CURVE_STEPS);
        self.emit(shapes::polyline(&points, width, color));
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.emit(shapes::polygon(points, color));
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color) {
        self.emit(shapes::rect(min, max, color));
    }

    fn text(&mut self, center: Vec2, size: f32, text: &str, color: Color) {
        let segments = font::layout(text, center, size);
        let outline = [0.0, 0.0, 0.0, color[3]];
        for &(a, b) in &segments {
            self.emit(shapes::polyline(&[a, b], size * 0.3, outline));
        }
        for &(a, b) in &segments {
            self.emit(shapes::polyline(&[a, b], size * 0.15, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const RED: Color = [1.0, 0.0, 0.0, 1.0];

    fn bounds(list: &DrawList) -> (Vec2, Vec2) {
        list.vertices().iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec2::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    #[test]
    fn test_translate_and_scale_apply_to_geometry() {
        let mut list = DrawList::new();
        list.translate(Vec2::new(100.0, 50.0));
        list.scale(2.0);
        list.fill_rect(Vec2::ZERO, Vec2::new(10.0, 5.0), RED);
        let (lo, hi) = bounds(&list);
        assert_eq!(lo, Vec2::new(100.0, 50.0));
        assert_eq!(hi, Vec2::new(120.0, 60.0));
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let mut list = DrawList::new();
        list.rotate(FRAC_PI_2);
        list.fill_rect(Vec2::ZERO, Vec2::new(10.0, 1.0), RED);
        let (lo, hi) = bounds(&list);
        // x axis maps onto +y
        assert!((hi.y - 10.0).abs() < 1e-4);
        assert!((lo.x + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_restore_pops_transform_and_alpha() {
        let mut list = DrawList::new();
        list.save();
        list.translate(Vec2::new(500.0, 0.0));
        list.set_alpha(0.5);
        list.fill_rect(Vec2::ZERO, Vec2::ONE, RED);
        list.restore();
        list.fill_rect(Vec2::ZERO, Vec2::ONE, RED);

        let verts = list.vertices();
        assert_eq!(verts.len(), 12);
        assert_eq!(verts[0].position[0], 500.0);
        assert_eq!(verts[0].color[3], 0.5);
        assert_eq!(verts[6].position[0], 0.0);
        assert_eq!(verts[6].color[3], 1.0);
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut list = DrawList::new();
        list.translate(Vec2::new(3.0, 4.0));
        list.restore();
        list.fill_rect(Vec2::ZERO, Vec2::ONE, RED);
        assert_eq!(list.vertices()[0].position, [3.0, 4.0]);
    }

    #[test]
    fn test_transparent_draws_nothing() {
        let mut list = DrawList::new();
        list.set_alpha(0.0);
        list.fill_circle(Vec2::ZERO, 10.0, RED);
        assert!(list.is_empty());
    }

    #[test]
    fn test_alpha_multiplies_colour_alpha() {
        let mut list = DrawList::new();
        list.set_alpha(0.5);
        list.fill_circle(Vec2::ZERO, 10.0, [0.0, 0.0, 0.0, 0.2]);
        assert!(list.vertices().iter().all(|v| (v.color[3] - 0.1).abs() < 1e-6));
    }

    #[test]
    fn test_text_draws_outline_first() {
        let mut list = DrawList::new();
        list.text(Vec2::new(50.0, 50.0), 20.0, "+1", RED);
        assert!(!list.is_empty());
        assert_eq!(list.vertices()[0].color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(list.vertices().last().map(|v| v.color), Some(RED));
    }

    #[test]
    fn test_clear_resets() {
        let mut list = DrawList::new();
        list.save();
        list.translate(Vec2::splat(9.0));
        list.fill_rect(Vec2::ZERO, Vec2::ONE, RED);
        list.clear();
        assert!(list.is_empty());
        list.fill_rect(Vec2::ZERO, Vec2::ONE, RED);
        assert_eq!(list.vertices()[0].position, [0.0, 0.0]);
    }
}
