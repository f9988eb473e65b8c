//! Starting patterns for freshly seeded grids

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Vertical blinker
const BLINKER: &[(i32, i32)] = &[(1, 1), (1, 2), (1, 3)];

/// Toad oscillator
const TOAD: &[(i32, i32)] = &[(2, 1), (3, 1), (4, 1), (1, 2), (2, 2), (3, 2)];

/// Beacon oscillator
const BEACON: &[(i32, i32)] = &[
    (1, 1),
    (2, 1),
    (1, 2),
    (2, 2),
    (3, 3),
    (4, 3),
    (3, 4),
    (4, 4),
];

/// Gosper glider gun
const GOSPER_GLIDER_GUN: &[(i32, i32)] = &[
    (1, 5),
    (2, 5),
    (1, 6),
    (2, 6),
    (11, 5),
    (11, 6),
    (11, 7),
    (12, 4),
    (12, 8),
    (13, 3),
    (13, 9),
    (14, 3),
    (14, 9),
    (15, 6),
    (16, 4),
    (16, 8),
    (17, 5),
    (17, 6),
    (17, 7),
    (18, 6),
    (21, 3),
    (21, 4),
    (21, 5),
    (22, 3),
    (22, 4),
    (22, 5),
    (23, 2),
    (23, 6),
    (25, 1),
    (25, 2),
    (25, 6),
    (25, 7),
    (35, 3),
    (35, 4),
    (36, 3),
    (36, 4),
];

/// Simkin glider gun
const SIMKIN_GLIDER_GUN: &[(i32, i32)] = &[
    (4, 18),
    (4, 19),
    (5, 18),
    (5, 19),
    (8, 21),
    (8, 22),
    (9, 21),
    (9, 22),
    (11, 18),
    (11, 19),
    (12, 18),
    (12, 19),
    (24, 29),
    (25, 28),
    (25, 29),
    (25, 30),
    (26, 27),
    (26, 30),
    (26, 31),
    (30, 27),
    (30, 28),
    (31, 28),
    (31, 29),
    (31, 30),
    (32, 29),
    (35, 29),
    (35, 30),
    (36, 29),
    (36, 30),
];

/// Oscillators small enough for a close-up grid
const SMALL_STARTS: &[&[(i32, i32)]] = &[BLINKER, TOAD, BEACON];

/// Guns that need room to fire
const BIG_STARTS: &[&[(i32, i32)]] = &[GOSPER_GLIDER_GUN, SIMKIN_GLIDER_GUN];

/// Grids narrower than this on both axes use the small starts
const SMALL_GRID_LIMIT: i32 = 40;

/// Pick a starting pattern sized for the grid
pub fn pick_start(width: i32, height: i32, rng: &mut ChaCha8Rng) -> &'static [(i32, i32)] {
    let candidates = if width < SMALL_GRID_LIMIT && height < SMALL_GRID_LIMIT {
        SMALL_STARTS
    } else {
        BIG_STARTS
    };
    candidates[rng.gen_range(0..candidates.len())]
}
