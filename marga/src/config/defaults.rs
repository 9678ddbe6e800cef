//! Default value functions for serde deserialization.

use std::collections::BTreeMap;

pub fn max_expansions() -> usize {
    100_000
}

pub fn diagonal_cost() -> f32 {
    std::f32::consts::SQRT_2
}

pub fn look_radius() -> u32 {
    1
}

pub fn world_size() -> usize {
    64
}

pub fn seed() -> u64 {
    42
}

pub fn biomes() -> BTreeMap<String, f32> {
    BTreeMap::from([
        ("grass".to_string(), 6.0),
        ("sand".to_string(), 2.0),
        ("rock".to_string(), 1.0),
        ("water".to_string(), 2.0),
    ])
}
