//! Seedable smooth 2D gradient noise
//!
//! Classic permutation-table noise: a 256-entry permutation shuffled by the
//! injected rng, quintic fade, and bilinear interpolation of corner
//! gradients. Output is in [-1, 1]. The same rng seed always produces the
//! same field, which is what makes worldgen reproducible.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

pub struct NoiseField {
    perm: [u8; 512],
}

impl NoiseField {
    pub fn new(rng: &mut ChaCha8Rng) -> Self {
        let mut table: [u8; 256] = [0; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        table.shuffle(rng);

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&table);
        perm[256..].copy_from_slice(&table);
        Self { perm }
    }

    /// Sample the field at (x, y); smooth and continuous in both axes
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let xi = (x.floor() as i32 & 255) as usize;
        let yi = (y.floor() as i32 & 255) as usize;
        let xf = x - x.floor();
        let yf = y - y.floor();

        let u = fade(xf);
        let v = fade(yf);

        let p = &self.perm;
        let aa = p[p[xi] as usize + yi] as usize;
        let ab = p[p[xi] as usize + yi + 1] as usize;
        let ba = p[p[xi + 1] as usize + yi] as usize;
        let bb = p[p[xi + 1] as usize + yi + 1] as usize;

        let x1 = lerp(u, grad(p[aa], xf, yf), grad(p[ba], xf - 1.0, yf));
        let x2 = lerp(
            u,
            grad(p[ab], xf, yf - 1.0),
            grad(p[bb], xf - 1.0, yf - 1.0),
        );
        lerp(v, x1, x2)
    }

    /// Sample normalized to [0, 1]
    pub fn sample01(&self, x: f32, y: f32) -> f32 {
        (self.sample(x, y) + 1.0) / 2.0
    }
}

fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

fn grad(hash: u8, x: f32, y: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}
