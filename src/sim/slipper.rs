//! The player's slipper: pointer tracking and the debounced strike window

use glam::Vec2;

/// Default strike window (seconds)
pub const STRIKE_DURATION: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct Slipper {
    pub pos: Vec2,
    pub striking: bool,
    pub strike_elapsed: f32,
    pub strike_duration: f32,
}

impl Default for Slipper {
    fn default() -> Self {
        Self::new(STRIKE_DURATION)
    }
}

impl Slipper {
    pub fn new(strike_duration: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            striking: false,
            strike_elapsed: 0.0,
            strike_duration,
        }
    }

    /// Follow the pointer. Off-screen positions are fine.
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Begin a strike. Returns false while the previous strike is still open.
    pub fn strike(&mut self) -> bool {
        if self.striking {
            return false;
        }
        self.striking = true;
        self.strike_elapsed = 0.0;
        true
    }

    pub fn update(&mut self, dt: f32) {
        if self.striking {
            self.strike_elapsed += dt;
            if self.strike_elapsed >= self.strike_duration {
                self.striking = false;
                self.strike_elapsed = 0.0;
            }
        }
    }
}
