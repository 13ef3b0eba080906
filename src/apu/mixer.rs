//! Non-linear channel mixer.
//!
//! `pulse_out = 95.52 / (8128 / (p1 + p2) + 100)`
//! `tnd_out = 159.79 / (1 / (t / 8227 + n / 12241 + d / 22638) + 100)`
//!
//! Each group is 0 when its inputs are silent. The sum stays within [0, 1).

pub fn pulse_out(pulse1: u8, pulse2: u8) -> f32 {
    let sum = f32::from(pulse1) + f32::from(pulse2);
    if sum == 0.0 {
        return 0.0;
    }
    95.52 / (8128.0 / sum + 100.0)
}

pub fn tnd_out(triangle: u8, noise: u8, dmc: u8) -> f32 {
    let denom = f32::from(triangle) / 8227.0 + f32::from(noise) / 12241.0 + f32::from(dmc) / 22638.0;
    if denom <= 0.0 {
        return 0.0;
    }
    159.79 / (1.0 / denom + 100.0)
}

pub fn mix(pulse1: u8, pulse2: u8, triangle: u8, noise: u8, dmc: u8) -> f32 {
    pulse_out(pulse1, pulse2) + tnd_out(triangle, noise, dmc)
}
