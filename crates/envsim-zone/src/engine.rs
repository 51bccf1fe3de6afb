//! Evaluates a zone's wind and GPS effects at a point.
//!
//! Stochastic effects (`Effect::Turbulence`) draw from a per-zone seeded
//! RNG so a seeded scene compiles byte-identically across runs; the seed
//! is snapshotted in the zone definition itself for audit, exactly as
//! the design notes require.

use envsim_common::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::model::{Decay, Effect, GpsModifiers, TurbulenceKind, Zone};

/// Per-zone RNG, seeded when the zone carries a `Turbulence.seed`, sourced
/// from entropy otherwise.
pub struct ZoneRng(StdRng);

impl ZoneRng {
    pub fn for_zone(zone: &Zone) -> Self {
        match &zone.effect {
            Effect::Turbulence {
                seed: Some(seed), ..
            } => ZoneRng(StdRng::seed_from_u64(*seed)),
            _ => ZoneRng(StdRng::from_entropy()),
        }
    }
}

/// Apply a zone's wind effect to the incoming wind vector `w` at point
/// `p` (XY only — zones are 2D). Returns the modified wind vector.
pub fn apply_wind_effect(effect: &Effect, w: Vec3, p: (f64, f64), rng: &mut ZoneRng) -> Vec3 {
    match effect {
        Effect::Absolute { wind_ms } => Vec3::from_array(*wind_ms),
        Effect::Scale { factor } => w.scale(*factor),
        Effect::Add { delta_ms } => w.add(&Vec3::from_array(*delta_ms)),
        Effect::Vortex {
            center,
            gain,
            decay,
            sigma,
            r_min,
            clockwise,
            max_ms,
        } => apply_vortex(w, p, *center, *gain, *decay, *sigma, *r_min, *clockwise, *max_ms),
        Effect::Turbulence { kind, std_ms, .. } => apply_turbulence(w, *kind, *std_ms, rng),
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_vortex(
    w: Vec3,
    p: (f64, f64),
    center: [f64; 2],
    gain: f64,
    decay: Option<Decay>,
    sigma: Option<f64>,
    r_min: f64,
    clockwise: bool,
    max_ms: Option<f64>,
) -> Vec3 {
    let dx = p.0 - center[0];
    let dy = p.1 - center[1];
    let r = (dx * dx + dy * dy).sqrt();
    if r < r_min {
        return w;
    }

    let mut g = gain / r;
    if decay == Some(Decay::Gaussian) {
        let sigma = sigma.unwrap_or(10.0);
        g *= (-(r * r) / (2.0 * sigma * sigma)).exp();
    }

    let (tx, ty) = if clockwise {
        (-dy / r, dx / r)
    } else {
        (dy / r, -dx / r)
    };

    let mut vx = g * tx;
    let mut vy = g * ty;
    if let Some(max_ms) = max_ms {
        let norm = (vx * vx + vy * vy).sqrt();
        if norm > max_ms && norm > 0.0 {
            let scale = max_ms / norm;
            vx *= scale;
            vy *= scale;
        }
    }

    w.add(&Vec3::new(vx, vy, 0.0))
}

fn apply_turbulence(w: Vec3, kind: TurbulenceKind, std: f64, rng: &mut ZoneRng) -> Vec3 {
    let normal = Normal::new(0.0, std.max(0.0)).unwrap_or_else(|_| Normal::new(0.0, 0.0).unwrap());
    let draw = |rng: &mut StdRng| Vec3::new(
        normal.sample(rng),
        normal.sample(rng),
        normal.sample(rng),
    );

    match kind {
        TurbulenceKind::Gauss => w.add(&draw(&mut rng.0)),
        // Deliberate simplification, not true Perlin noise (see model.rs doc).
        TurbulenceKind::Perlin => w.add(&draw(&mut rng.0).scale(0.5)),
        TurbulenceKind::Ou => {
            const THETA: f64 = 0.15;
            let mean_reversion = w.scale(-THETA);
            w.add(&mean_reversion.add(&draw(&mut rng.0)))
        }
    }
}

/// Compose GPS modifiers in `abs -> add -> scale` order, clamped to `[0,1]`.
pub fn apply_gps_effect(gps: &GpsModifiers, base: f32) -> f32 {
    let mut g = base;
    if let Some(abs) = gps.gps_abs {
        g = abs;
    }
    if let Some(add) = gps.gps_add {
        g += add;
    }
    if let Some(scale) = gps.gps_scale {
        g *= scale;
    }
    g.clamp(0.0, 1.0)
}

/// Draw a single normal sample directly, used by callers that want a
/// one-off stochastic value without constructing a [`ZoneRng`] (e.g.
/// test fixtures exercising a specific turbulence kind in isolation).
pub fn sample_normal(mean: f64, std: f64, rng: &mut impl Rng) -> f64 {
    let normal = Normal::new(mean, std.max(0.0)).unwrap_or_else(|_| Normal::new(mean, 0.0).unwrap());
    normal.sample(rng)
}
