use std::{
    fmt::{self, Display},
    str::FromStr,
};

use gridlace_core::{ClueLayer, ClueSlot};
use tinyvec::ArrayVec;

/// A group of clue slots weakened together.
pub type Orbit = ArrayVec<[ClueSlot; 4]>;

/// Symmetry imposed on the clues left in a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Symmetry {
    /// Every slot is independent.
    #[default]
    None,
    /// 180-degree rotational symmetry.
    Rotate2,
    /// 90-degree rotational symmetry. Falls back to [`Rotate2`](Self::Rotate2)
    /// on non-square layers.
    Rotate4,
    /// Mirror symmetry across the vertical axis.
    Horizontal,
    /// Mirror symmetry across the horizontal axis.
    Vertical,
}

impl Symmetry {
    /// All symmetries.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Rotate2,
        Self::Rotate4,
        Self::Horizontal,
        Self::Vertical,
    ];

    /// Returns the name used by [`Display`] and [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Rotate2 => "rotate2",
            Self::Rotate4 => "rotate4",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    /// Returns the orbit of `slot` within `layer`.
    ///
    /// The orbit always starts with `slot` and holds no duplicates.
    #[must_use]
    pub fn orbit(self, layer: &ClueLayer, slot: ClueSlot) -> Orbit {
        let (w, h) = (layer.width, layer.height);
        let (x, y) = (slot.x, slot.y);
        let at = |x, y| ClueSlot {
            layer: slot.layer,
            x,
            y,
        };
        let symmetry = if self == Self::Rotate4 && w != h {
            Self::Rotate2
        } else {
            self
        };
        let mut orbit = Orbit::new();
        orbit.push(slot);
        let images = match symmetry {
            Self::None => ArrayVec::new(),
            Self::Rotate2 => ArrayVec::from_array_len([at(w - 1 - x, h - 1 - y); 3], 1),
            Self::Rotate4 => ArrayVec::from([
                at(w - 1 - y, x),
                at(w - 1 - x, h - 1 - y),
                at(y, h - 1 - x),
            ]),
            Self::Horizontal => ArrayVec::from_array_len([at(w - 1 - x, y); 3], 1),
            Self::Vertical => ArrayVec::from_array_len([at(x, h - 1 - y); 3], 1),
        };
        for image in images {
            if !orbit.contains(&image) {
                orbit.push(image);
            }
        }
        orbit
    }

    /// Partitions every slot of `layer` into orbits.
    ///
    /// Orbits are listed in row-major order of their first slot.
    #[must_use]
    pub fn orbits(self, layer_index: usize, layer: &ClueLayer) -> Vec<Orbit> {
        let mut seen = vec![false; layer.len()];
        let mut orbits = vec![];
        for y in 0..layer.height {
            for x in 0..layer.width {
                if seen[y * layer.width + x] {
                    continue;
                }
                let slot = ClueSlot {
                    layer: layer_index,
                    x,
                    y,
                };
                let orbit = self.orbit(layer, slot);
                for s in &orbit {
                    seen[s.y * layer.width + s.x] = true;
                }
                orbits.push(orbit);
            }
        }
        orbits
    }
}

impl Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing a [`Symmetry`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown symmetry {name:?}")]
pub struct ParseSymmetryError {
    /// The unrecognized input.
    pub name: String,
}

impl FromStr for Symmetry {
    type Err = ParseSymmetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sym| sym.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSymmetryError { name: s.to_owned() })
    }
}
