//! Rejection-sampled random placement.

use nightfall_core::{
    spatial::{self, PLACEMENT_MARGIN},
    Vec2,
};
use rand::Rng;

/// Samples positions inside the world, inset by half the body size, until one
/// keeps clear of every occupied body.
///
/// Returns `None` once `attempts` candidates were rejected.
pub(crate) fn place_random<R: Rng>(
    rng: &mut R,
    extent: Vec2,
    size: f32,
    occupied: &[(Vec2, f32)],
    attempts: u32,
) -> Option<Vec2> {
    for _ in 0..attempts {
        let candidate = Vec2::new(
            rng.gen::<f32>() * (extent.x - size) + size / 2.0,
            rng.gen::<f32>() * (extent.y - size) + size / 2.0,
        );
        if !spatial::overlaps(
            candidate,
            size,
            occupied.iter().copied(),
            PLACEMENT_MARGIN,
        ) {
            return Some(candidate);
        }
    }
    None
}
