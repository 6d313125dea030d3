//! Audio level source for audio-reactive mode.
//!
//! The simulation asks an [`AudioSignal`] for a level once per tick. Nothing
//! here touches an audio device: the default [`SyntheticBeat`] is a
//! deterministic pulse, and hosts with real audio analysis can plug in their
//! own implementation with [`Simulation::with_audio`](crate::Simulation::with_audio).

/// Something that reports a loudness level in `[0, 1]`.
pub trait AudioSignal {
    /// Level at global simulation time `time`.
    fn level(&mut self, time: f32) -> f32;
}

/// A kick-drum style envelope: a sharp attack on every beat, decaying
/// exponentially until the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticBeat {
    pub bpm: f32,
    /// Exponential decay rate over one beat.
    pub decay: f32,
}

impl Default for SyntheticBeat {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            decay: 6.0,
        }
    }
}

impl AudioSignal for SyntheticBeat {
    fn level(&mut self, time: f32) -> f32 {
        if self.bpm <= 0.0 {
            return 0.0;
        }
        // Simulation time runs in milliseconds at 100% speed.
        let beat_length = 60_000.0 / self.bpm;
        let phase = (time / beat_length).rem_euclid(1.0);
        (-phase * self.decay).exp().clamp(0.0, 1.0)
    }
}

/// A signal that is always silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silence;

impl AudioSignal for Silence {
    fn level(&mut self, _time: f32) -> f32 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beat_peaks_on_the_beat() {
        let mut beat = SyntheticBeat::default();
        assert!((beat.level(0.0) - 1.0).abs() < 1e-6);
        assert!((beat.level(500.0) - 1.0).abs() < 1e-4);
        assert!(beat.level(250.0) < 0.1);
    }

    #[test]
    fn test_beat_stays_in_range() {
        let mut beat = SyntheticBeat { bpm: 93.0, decay: 3.0 };
        for k in 0..1000 {
            let level = beat.level(k as f32 * 7.3);
            assert!((0.0..=1.0).contains(&level));
        }
        let mut stopped = SyntheticBeat { bpm: 0.0, decay: 3.0 };
        assert_eq!(stopped.level(100.0), 0.0);
    }

    #[test]
    fn test_silence() {
        assert_eq!(Silence.level(1234.0), 0.0);
    }
}
