//! Built-in color palette and pseudo-random placement helpers.

use crate::shapes::SerializableColor;
use kurbo::{Point, Size};

/// Default canvas dimensions used for random placement.
pub const CANVAS_DIMS: Size = Size::new(1024.0, 576.0);

/// `[fill, stroke]` hex pairs.
const COLORS: [(&str, &str); 7] = [
    ("#876FC3", "#694AB5"),
    ("#D55D8D", "#CA3570"),
    ("#DE8854", "#D66A29"),
    ("#C7CC66", "#B9C03F"),
    ("#73BF8B", "#50AF6E"),
    ("#4980B6", "#6D99C5"),
    ("#72C074", "#4EB151"),
];

/// Draw the next value from a counter + hash sequence.
/// Works on all platforms including WASM, no `rand` dependency.
fn next_random() -> u32 {
    use std::sync::atomic::{AtomicU32, Ordering};

    static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    // Mix the counter with constants for better distribution (splitmix32-like)
    let mut x = counter.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    x
}

/// Pick a `(fill, stroke)` pair from the palette.
pub fn random_colors() -> (SerializableColor, SerializableColor) {
    let (fill, stroke) = COLORS[next_random() as usize % COLORS.len()];
    (
        SerializableColor::from_hex(fill),
        SerializableColor::from_hex(stroke),
    )
}

/// Pick a position inside the given canvas dimensions.
pub fn random_position(dims: Size) -> Point {
    Point::new(
        (next_random() as f64) % dims.width.max(1.0),
        (next_random() as f64) % dims.height.max(1.0),
    )
}
