//! Distance queries, overlap tests, grid snapping and nearest-candidate selection.
//!
//! Every "nearest" decision in the engine goes through [`select_nearest`], which
//! keeps the first candidate on ties so that identical inputs always produce the
//! same choice.

use crate::Vec2;

/// Clearance kept between randomly placed bodies.
pub const PLACEMENT_MARGIN: f32 = 20.0;

/// Euclidean distance between two positions.
#[must_use]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Reports whether two bodies touch: their centres are closer than the sum of
/// their radii.
#[must_use]
pub fn in_contact(a: Vec2, a_size: f32, b: Vec2, b_size: f32) -> bool {
    distance(a, b) < (a_size + b_size) / 2.0
}

/// Reports whether a body at `position` would crowd any existing body.
///
/// A body crowds another when their centres are closer than the sum of their
/// radii plus `margin`.
#[must_use]
pub fn overlaps<I>(position: Vec2, size: f32, existing: I, margin: f32) -> bool
where
    I: IntoIterator<Item = (Vec2, f32)>,
{
    existing
        .into_iter()
        .any(|(other, other_size)| distance(position, other) < (size + other_size) / 2.0 + margin)
}

/// Rounds a coordinate to the nearest multiple of `cell`.
#[must_use]
pub fn snap_to_grid(value: f32, cell: f32) -> f32 {
    if cell <= 0.0 {
        return value;
    }
    (value / cell).round() * cell
}

/// Rounds both coordinates of a position to the grid.
#[must_use]
pub fn snap_point(position: Vec2, cell: f32) -> Vec2 {
    Vec2::new(
        snap_to_grid(position.x, cell),
        snap_to_grid(position.y, cell),
    )
}

/// Angle in radians of the ray from `from` towards `to`.
#[must_use]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Moves `distance` units along the provided angle.
#[must_use]
pub fn advance_along(position: Vec2, angle: f32, distance: f32) -> Vec2 {
    position + Vec2::new(angle.cos(), angle.sin()) * distance
}

/// Position reached by moving `speed` units from `from` straight towards `to`.
#[must_use]
pub fn step_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    advance_along(from, heading(from, to), speed)
}

/// Picks the candidate closest to `origin`, returning it with its distance.
///
/// Only a strictly smaller distance replaces the current best, so the first
/// candidate wins ties.
pub fn select_nearest<T, I>(origin: Vec2, candidates: I) -> Option<(T, f32)>
where
    I: IntoIterator<Item = (T, Vec2)>,
{
    let mut best: Option<(T, f32)> = None;
    for (candidate, position) in candidates {
        let candidate_distance = distance(origin, position);
        let closer = match &best {
            Some((_, best_distance)) => candidate_distance < *best_distance,
            None => true,
        };
        if closer {
            best = Some((candidate, candidate_distance));
        }
    }
    best
}
