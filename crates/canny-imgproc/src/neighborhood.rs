//! Coordinate helpers shared by the 3x3 stages.
//!
//! Offsets are applied to each axis separately and bounds-checked before a
//! flat index is formed, so a neighbor never wraps onto an adjacent row.

/// Offsets of the 8-connected neighborhood as `(dx, dy)`.
pub(crate) const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Shift `pos` by `delta`, or `None` if the result leaves `[0, len)`.
#[inline]
pub(crate) fn offset_index(pos: usize, delta: isize, len: usize) -> Option<usize> {
    pos.checked_add_signed(delta).filter(|&p| p < len)
}

/// Shift `pos` by `delta`, clamping to `[0, len)` (replicate border).
#[inline]
pub(crate) fn clamp_index(pos: usize, delta: isize, len: usize) -> usize {
    pos.saturating_add_signed(delta).min(len - 1)
}
