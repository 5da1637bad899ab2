//! Per-entity draw routines and the back-to-front scene pass

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_6, PI};

use super::canvas::{Canvas, Color};
use super::shapes;
use super::vertex::colors;
use crate::settings::Settings;
use crate::sim::effects::{DebrisTint, FloatingText, LabelTint, Particle, Shockwave};
use crate::sim::roach::{Roach, RoachKind};
use crate::sim::slipper::Slipper;
use crate::sim::state::GameState;

const OUTLINE_WIDTH: f32 = 2.0;
const LEG_LENGTH: f32 = 15.0;
const LABEL_SIZE: f32 = 20.0;
const PULSE_WIDTH: f32 = 5.0;

/// Convert an HSL colour (hue in degrees, saturation/lightness in [0, 1])
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, 1.0]
}

pub fn body_color(roach: &Roach) -> Color {
    match roach.kind {
        RoachKind::Prismatic => hsl_to_rgb(roach.hue, 1.0, 0.5),
        kind => kind.config().color,
    }
}

pub fn debris_color(tint: DebrisTint) -> Color {
    match tint {
        DebrisTint::Fluid => colors::FLUID,
        DebrisTint::Shell(kind) => kind.config().color,
        DebrisTint::Spark => colors::SPARK,
    }
}

pub fn label_color(tint: LabelTint) -> Color {
    match tint {
        LabelTint::Heal => colors::LABEL_HEAL,
        LabelTint::Bonus => colors::LABEL_BONUS,
    }
}

/// Draw one roach. Local space: head towards -y, unit scale.
pub fn draw_roach<C: Canvas + ?Sized>(canvas: &mut C, roach: &Roach) {
    let alive = roach.is_alive();
    let body = body_color(roach);

    canvas.save();
    canvas.translate(roach.pos);
    canvas.rotate(roach.heading + FRAC_PI_2);
    canvas.scale(roach.scale);
    canvas.set_alpha(roach.opacity);

    // Legs, alternating sides
    for i in 0..3 {
        let y = -5.0 + i as f32 * 10.0;
        let phase = roach.leg_phase + i as f32;
        let left = phase.sin() * 0.5;
        let right = (phase + PI).sin() * 0.5;
        canvas.line(
            Vec2::new(-8.0, y),
            Vec2::new(-8.0 - LEG_LENGTH, y + left * 10.0),
            OUTLINE_WIDTH,
            colors::LEG,
        );
        canvas.line(
            Vec2::new(8.0, y),
            Vec2::new(8.0 + LEG_LENGTH, y + right * 10.0),
            OUTLINE_WIDTH,
            colors::LEG,
        );
    }

    let wiggle = if alive {
        (roach.leg_phase * 0.5).sin() * 5.0
    } else {
        0.0
    };
    canvas.quad_curve(
        Vec2::new(-5.0, -15.0),
        Vec2::new(-15.0, -30.0),
        Vec2::new(-20.0 + wiggle, -45.0),
        OUTLINE_WIDTH,
        colors::LEG,
    );
    canvas.quad_curve(
        Vec2::new(5.0, -15.0),
        Vec2::new(15.0, -30.0),
        Vec2::new(20.0 - wiggle, -45.0),
        OUTLINE_WIDTH,
        colors::LEG,
    );

    let body_center = Vec2::new(0.0, 5.0);
    let body_radii = Vec2::new(12.0, 25.0);
    canvas.fill_ellipse(body_center, body_radii, body);
    canvas.stroke_ellipse(body_center, body_radii, OUTLINE_WIDTH, colors::LEG);

    let head = Vec2::new(0.0, -18.0);
    canvas.fill_circle(head, 8.0, body);
    canvas.stroke_circle(head, 8.0, OUTLINE_WIDTH, colors::LEG);

    canvas.fill_polygon(&back_mark(), colors::BACK_MARK);

    if alive && roach.kind == RoachKind::Hazard {
        canvas.fill_circle(body_center, 12.0, colors::BOMB);
        canvas.fill_circle(Vec2::new(-4.0, 1.0), 3.0, colors::BOMB_SHINE);
        canvas.quad_curve(
            body_center,
            Vec2::new(8.0, -8.0),
            Vec2::new(12.0, 0.0),
            OUTLINE_WIDTH,
            colors::BOMB_FUSE,
        );
        // Fuse sparks flicker with the gait
        if (roach.leg_phase * 0.05).sin() > 0.0 {
            canvas.fill_circle(Vec2::new(12.0, 0.0), 3.0, colors::BOMB_SPARK);
        }
    }

    if alive && roach.is_chilled() {
        canvas.fill_ellipse(Vec2::ZERO, Vec2::new(18.0, 40.0), colors::CHILL_GLAZE);
    }

    if !alive {
        for eye in [-3.0, 3.0] {
            let c = Vec2::new(eye, -18.0);
            canvas.line(c + Vec2::new(-2.0, -2.0), c + Vec2::new(2.0, 2.0), OUTLINE_WIDTH, colors::DEAD_EYES);
            canvas.line(c + Vec2::new(2.0, -2.0), c + Vec2::new(-2.0, 2.0), OUTLINE_WIDTH, colors::DEAD_EYES);
        }
    }

    canvas.restore();
}

/// Darker saddle on the back, bounded by two quadratic curves
fn back_mark() -> Vec<Vec2> {
    let mut points = shapes::quadratic_points(
        Vec2::new(-10.0, -10.0),
        Vec2::new(0.0, -5.0),
        Vec2::new(10.0, -10.0),
        6,
    );
    let lower = shapes::quadratic_points(
        Vec2::new(10.0, -10.0),
        Vec2::new(0.0, 30.0),
        Vec2::new(-10.0, -10.0),
        8,
    );
    // Skip the shared endpoints
    points.extend(&lower[1..lower.len() - 1]);
    points
}

pub fn draw_slipper<C: Canvas + ?Sized>(canvas: &mut C, slipper: &Slipper) {
    canvas.save();
    canvas.translate(slipper.pos);
    if slipper.striking {
        canvas.scale(0.9);
    } else {
        // Pointer sits near the toe while hovering
        canvas.translate(Vec2::new(10.0, 20.0));
    }
    canvas.rotate(-FRAC_PI_6);

    let radii = Vec2::new(25.0, 50.0);
    canvas.fill_ellipse(Vec2::new(5.0, 5.0), radii, colors::SLIPPER_SHADOW);
    canvas.fill_ellipse(Vec2::ZERO, radii, colors::SLIPPER_SOLE);
    canvas.stroke_ellipse(Vec2::ZERO, radii, OUTLINE_WIDTH, colors::SLIPPER_EDGE);
    canvas.fill_circle(Vec2::new(0.0, 20.0), 15.0, colors::SLIPPER_HEEL);

    let toe = Vec2::new(0.0, -35.0);
    canvas.quad_curve(Vec2::new(-20.0, -10.0), toe, toe, 6.0, colors::SLIPPER_STRAP);
    canvas.quad_curve(toe, toe, Vec2::new(20.0, -10.0), 6.0, colors::SLIPPER_STRAP);
    canvas.line(toe, Vec2::new(0.0, -15.0), 6.0, colors::SLIPPER_STRAP);

    canvas.restore();
}

pub fn draw_particle<C: Canvas + ?Sized>(canvas: &mut C, particle: &Particle) {
    if particle.is_dead() {
        return;
    }
    canvas.save();
    canvas.set_alpha(particle.opacity());
    canvas.fill_circle(particle.pos, particle.size, debris_color(particle.tint));
    canvas.restore();
}

pub fn draw_shockwave<C: Canvas + ?Sized>(canvas: &mut C, wave: &Shockwave) {
    if wave.is_done() {
        return;
    }
    canvas.save();
    canvas.set_alpha(wave.life.max(0.0));
    canvas.stroke_circle(wave.origin, wave.radius, PULSE_WIDTH, colors::PULSE_RING);
    canvas.fill_circle(wave.origin, wave.radius, colors::PULSE_FILL);
    canvas.restore();
}

pub fn draw_label<C: Canvas + ?Sized>(canvas: &mut C, label: &FloatingText) {
    if label.is_done() {
        return;
    }
    canvas.save();
    canvas.set_alpha(label.opacity());
    canvas.text(label.pos, LABEL_SIZE, &label.text, label_color(label.tint));
    canvas.restore();
}

/// Submit the whole frame back to front
pub fn draw_scene<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, settings: &Settings) {
    canvas.save();
    if settings.screen_shake {
        canvas.translate(state.explosion.offset);
    }

    if settings.particles {
        for particle in &state.particles {
            draw_particle(canvas, particle);
        }
    }
    for wave in &state.shockwaves {
        draw_shockwave(canvas, wave);
    }
    // Already in painter's order
    for roach in &state.roaches {
        draw_roach(canvas, roach);
    }
    for label in &state.labels {
        draw_label(canvas, label);
    }
    draw_slipper(canvas, &state.slipper);
    canvas.restore();

    let flash = state.explosion.flash_opacity();
    if settings.explosion_flash && flash > 0.0 {
        canvas.save();
        canvas.set_alpha(flash);
        canvas.fill_rect(Vec2::ZERO, state.bounds, colors::FLASH);
        canvas.restore();
    }
}
