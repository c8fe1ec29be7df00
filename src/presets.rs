/// Named skin tone swatches offered as starting points.
use rand::RngExt;

use crate::color::Rgb;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub color: Rgb,
}

const BUILT_IN: &[(&str, Rgb)] = &[
    ("Porcelain", Rgb::new(0xff, 0xdb, 0xac)),
    ("Ivory", Rgb::new(0xf1, 0xc2, 0x7d)),
    ("Sand", Rgb::new(0xe0, 0xac, 0x69)),
    ("Honey", Rgb::new(0xc6, 0x86, 0x42)),
    ("Chestnut", Rgb::new(0x8d, 0x55, 0x24)),
    ("Espresso", Rgb::new(0x5c, 0x38, 0x36)),
    ("Ebony", Rgb::new(0x3b, 0x22, 0x19)),
];

pub fn built_in() -> Vec<Preset> {
    BUILT_IN
        .iter()
        .map(|(name, color)| Preset {
            name: (*name).to_string(),
            color: *color,
        })
        .collect()
}

/// Built-in presets followed by the user's own.
pub fn with_extra(extra: &[Preset]) -> Vec<Preset> {
    let mut presets = built_in();
    presets.extend_from_slice(extra);
    presets
}

/// Index of a random preset. `None` only for an empty list.
pub fn random_index(presets: &[Preset]) -> Option<usize> {
    if presets.is_empty() {
        return None;
    }
    let mut rng = rand::rng();
    Some(rng.random_range(0..presets.len()))
}
