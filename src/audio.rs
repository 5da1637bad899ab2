//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Seconds the ambience takes to fade out when a session ends
const AMBIENCE_FADE_SECS: f64 = 1.0;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Slipper comes down
    Impact,
    /// Hazard roach goes off
    Explosion,
}

/// Running ambience loop
struct Ambience {
    oscillators: Vec<OscillatorNode>,
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    music_volume: f32,
    ambience: Option<Ambience>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_volume: settings.sfx_gain(),
            music_volume: settings.music_gain(),
            ambience: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Route a simulation event to the matching sound
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SessionStarted => self.start_ambience(),
            GameEvent::Impact => self.play(SoundEffect::Impact),
            GameEvent::Explosion => self.play(SoundEffect::Explosion),
            GameEvent::SessionEnded { .. } => self.stop_ambience(),
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.sfx_volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };
        self.resume();

        match effect {
            SoundEffect::Impact => self.play_impact(ctx, vol),
            SoundEffect::Explosion => self.play_explosion(ctx, vol),
        }
    }

    /// Start the background drone (restarts it if already playing)
    pub fn start_ambience(&mut self) {
        self.stop_ambience_at(0.0);
        if self.music_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume();

        let Ok(gain) = ctx.create_gain() else { return };
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(self.music_volume * 0.25, t + 0.5)
            .ok();

        // Detuned voices beat against each other
        let mut oscillators = Vec::new();
        for (freq, osc_type) in [
            (55.0, OscillatorType::Sine),
            (55.7, OscillatorType::Triangle),
            (110.3, OscillatorType::Sine),
        ] {
            let Ok(osc) = ctx.create_oscillator() else {
                continue;
            };
            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            if osc.connect_with_audio_node(&gain).is_ok() && osc.start().is_ok() {
                oscillators.push(osc);
            }
        }

        log::debug!("Ambience started ({} voices)", oscillators.len());
        self.ambience = Some(Ambience { oscillators, gain });
    }

    /// Fade the drone out over one second
    pub fn stop_ambience(&mut self) {
        self.stop_ambience_at(AMBIENCE_FADE_SECS);
    }

    fn stop_ambience_at(&mut self, fade: f64) {
        let Some(ambience) = self.ambience.take() else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };
        let t = ctx.current_time();

        let gain = ambience.gain.gain();
        gain.cancel_scheduled_values(t).ok();
        gain.set_value_at_time(gain.value(), t).ok();
        gain.linear_ramp_to_value_at_time(0.0, t + fade).ok();
        for osc in &ambience.oscillators {
            osc.stop_with_when(t + fade).ok();
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Slipper slap - dull thump with a papery click on top
    fn play_impact(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 140.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.7, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(140.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.12)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 2200.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.08, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.03)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.04).ok();
        }
    }

    /// Hazard detonation - falling rumble plus a noisy crack
    fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.6)
            .ok();
        osc.frequency().set_value_at_time(100.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(25.0, t + 0.6)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.7).ok();

        // Jittered square stands in for noise
        if let Some((osc2, gain2)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
            gain2.gain().set_value_at_time(vol * 0.25, t).ok();
            gain2
                .gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            for (i, freq) in [1500.0, 400.0, 2100.0, 250.0, 900.0, 120.0]
                .into_iter()
                .enumerate()
            {
                osc2.frequency()
                    .set_value_at_time(freq, t + i as f64 * 0.025)
                    .ok();
            }
            osc2.start().ok();
            osc2.stop_with_when(t + 0.2).ok();
        }
    }
}
