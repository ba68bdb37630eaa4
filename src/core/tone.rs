//! Chime generation: a sine tone as 16-bit mono PCM WAV.

use std::f64::consts::PI;

pub const CHIME_FREQ: f64 = 880.0;
pub const CHIME_SECONDS: f64 = 0.9;
pub const CHIME_SAMPLE_RATE: u32 = 44_100;
pub const CHIME_VOLUME: f64 = 0.4;

/// Default doorbell chime.
pub fn chime() -> Vec<u8> {
    generate_tone(CHIME_FREQ, CHIME_SECONDS, CHIME_SAMPLE_RATE, CHIME_VOLUME)
}

/// RIFF/WAVE byte stream of a sine tone. `volume` is clamped to 0..=1.
pub fn generate_tone(freq: f64, duration: f64, sample_rate: u32, volume: f64) -> Vec<u8> {
    let volume = volume.clamp(0.0, 1.0);
    let samples = (sample_rate as f64 * duration.max(0.0)) as u32;
    let data_len = samples * 2;

    let mut out = Vec::with_capacity(44 + data_len as usize);

    // header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk: PCM, mono, 16 bit
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());

    for i in 0..samples {
        let t = i as f64 / sample_rate as f64;
        let v = (freq * 2.0 * PI * t).sin() * volume;
        let s = (v * i16::MAX as f64) as i16;
        out.extend_from_slice(&s.to_le_bytes());
    }

    out
}
