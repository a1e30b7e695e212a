//! Built-in sound tables
//!
//! Generated at compile time from tone segments: each segment is a sine
//! burst (or silence) with a short linear fade at both ends to avoid clicks.
//! Samples are unsigned, centred on 128.

use super::table::SoundTable;

/// Beeps: 8 kHz playback.
pub const BEEPS_INTERVAL_US: u32 = 125;

/// Alert: 10 kHz playback.
pub const ALERT_INTERVAL_US: u32 = 100;

/// Silent level of an unsigned 8-bit table.
pub const MIDPOINT: u8 = 128;

/// Peak deviation from the midpoint.
const AMPLITUDE: f64 = 112.0;

/// Fade length at each segment edge (samples).
const FADE_SAMPLES: usize = 16;

/// One tone (or silence when `freq_hz == 0`) of `samples` length.
#[derive(Clone, Copy)]
struct Segment {
    freq_hz: u32,
    samples: usize,
}

const fn tone(freq_hz: u32, samples: usize) -> Segment {
    Segment { freq_hz, samples }
}

const fn rest(samples: usize) -> Segment {
    Segment { freq_hz: 0, samples }
}

const fn total_len(segments: &[Segment]) -> usize {
    let mut len = 0;
    let mut i = 0;
    while i < segments.len() {
        len += segments[i].samples;
        i += 1;
    }
    len
}

/// Const-compatible sine approximation using Taylor series
const fn const_sin(x: f64) -> f64 {
    // Normalize to [-π, π]
    let mut x = x;
    while x > core::f64::consts::PI {
        x -= 2.0 * core::f64::consts::PI;
    }
    while x < -core::f64::consts::PI {
        x += 2.0 * core::f64::consts::PI;
    }

    let x2 = x * x;
    let x3 = x2 * x;
    let x5 = x3 * x2;
    let x7 = x5 * x2;
    let x9 = x7 * x2;

    x - x3 / 6.0 + x5 / 120.0 - x7 / 5040.0 + x9 / 362880.0
}

/// Render segments into an unsigned 8-bit table.
const fn render<const LEN: usize>(segments: &[Segment], rate_hz: u32) -> [u8; LEN] {
    assert!(total_len(segments) == LEN, "segment lengths must sum to table length");

    let mut table = [MIDPOINT; LEN];
    let mut pos = 0;
    let mut s = 0;
    while s < segments.len() {
        let seg = segments[s];
        let mut n = 0;
        while n < seg.samples {
            if seg.freq_hz != 0 {
                // Integer phase keeps the angle in one cycle
                let phase = (seg.freq_hz as u64 * n as u64) % rate_hz as u64;
                let angle = 2.0 * core::f64::consts::PI * phase as f64 / rate_hz as f64;

                let edge = if n < seg.samples - 1 - n { n } else { seg.samples - 1 - n };
                let gain = if edge < FADE_SAMPLES {
                    edge as f64 / FADE_SAMPLES as f64
                } else {
                    1.0
                };

                let value = MIDPOINT as f64 + AMPLITUDE * gain * const_sin(angle);
                table[pos] = (value + 0.5) as u8;
            }
            pos += 1;
            n += 1;
        }
        s += 1;
    }
    table
}

const BEEPS_SEGMENTS: [Segment; 5] = [
    tone(2000, 320), // 40 ms
    rest(240),       // 30 ms
    tone(2000, 320),
    rest(240),
    tone(2000, 320),
];

const ALERT_SEGMENTS: [Segment; 4] = [
    tone(880, 500), // 50 ms
    tone(1320, 500),
    tone(880, 500),
    tone(1320, 500),
];

/// Number of samples in the beeps table.
pub const BEEPS_LEN: usize = total_len(&BEEPS_SEGMENTS);

/// Number of samples in the alert table.
pub const ALERT_LEN: usize = total_len(&ALERT_SEGMENTS);

const BEEPS_SAMPLES: [u8; BEEPS_LEN] =
    render::<BEEPS_LEN>(&BEEPS_SEGMENTS, 1_000_000 / BEEPS_INTERVAL_US);

const ALERT_SAMPLES: [u8; ALERT_LEN] =
    render::<ALERT_LEN>(&ALERT_SEGMENTS, 1_000_000 / ALERT_INTERVAL_US);

/// Three 2 kHz beeps.
pub const BEEPS: SoundTable = SoundTable::new(BEEPS_INTERVAL_US, &BEEPS_SAMPLES);

/// 880 Hz / 1320 Hz warble, two cycles.
pub const ALERT: SoundTable = SoundTable::new(ALERT_INTERVAL_US, &ALERT_SAMPLES);
