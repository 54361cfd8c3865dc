use std::fmt::{self, Debug};

/// One of the eight directions a spoke can point in.
///
/// The discriminants are part of the move grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards `(x + 1, y)`.
    Right = 0,
    /// Towards `(x + 1, y + 1)`.
    BottomRight = 1,
    /// Towards `(x, y + 1)`.
    Bottom = 2,
    /// Towards `(x - 1, y + 1)`.
    BottomLeft = 3,
    /// Towards `(x - 1, y)`.
    Left = 4,
    /// Towards `(x - 1, y - 1)`.
    TopLeft = 5,
    /// Towards `(x, y - 1)`.
    Top = 6,
    /// Towards `(x + 1, y - 1)`.
    TopRight = 7,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Self; 8] = [
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
    ];

    /// The four directions that name every line exactly once, from the hub
    /// that comes first in reading order.
    pub const FORWARD: [Self; 4] = [
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
    ];

    /// Returns the direction with index `index`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the index used by the move grammar.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the direction pointing back.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::ALL[self.index() ^ 4]
    }

    /// Returns the `(dx, dy)` step.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Right => (1, 0),
            Self::BottomRight => (1, 1),
            Self::Bottom => (0, 1),
            Self::BottomLeft => (-1, 1),
            Self::Left => (-1, 0),
            Self::TopLeft => (-1, -1),
            Self::Top => (0, -1),
            Self::TopRight => (1, -1),
        }
    }

    /// Returns `true` for the four diagonal directions.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        self.index() % 2 == 1
    }
}

/// The state of a single spoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Spoke {
    /// No line can ever be drawn here.
    #[default]
    Hidden = 0,
    /// Undecided.
    Empty = 1,
    /// A line connects the two hubs.
    Line = 2,
    /// A line is ruled out.
    Marked = 3,
}

impl Spoke {
    /// Returns the spoke state with index `index`.
    #[must_use]
    pub const fn from_index(index: u16) -> Self {
        match index & 3 {
            0 => Self::Hidden,
            1 => Self::Empty,
            2 => Self::Line,
            _ => Self::Marked,
        }
    }
}

/// The eight spokes of a hub, two bits each.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hub {
    bits: u16,
}

impl Hub {
    /// A hub with every spoke hidden.
    pub const HIDDEN: Self = Self { bits: 0 };
    /// A hub with every spoke empty.
    pub const EMPTY: Self = Self { bits: 0x5555 };

    /// Returns the spoke in `dir`.
    #[must_use]
    pub const fn spoke(self, dir: Direction) -> Spoke {
        Spoke::from_index(self.bits >> (dir.index() * 2))
    }

    /// Replaces the spoke in `dir`.
    pub fn set(&mut self, dir: Direction, spoke: Spoke) {
        let shift = dir.index() * 2;
        self.bits = (self.bits & !(3 << shift)) | ((spoke as u16) << shift);
    }

    /// Counts the spokes in `spoke` state.
    #[must_use]
    pub fn count(self, spoke: Spoke) -> u8 {
        let mut n = 0;
        for dir in Direction::ALL {
            if self.spoke(dir) == spoke {
                n += 1;
            }
        }
        n
    }

    /// Counts the spokes a line could ever use.
    #[must_use]
    pub fn available(self) -> u8 {
        8 - self.count(Spoke::Hidden)
    }
}

impl Debug for Hub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                Direction::ALL
                    .iter()
                    .map(|&dir| (dir, self.spoke(dir)))
                    .filter(|(_, spoke)| !spoke.is_hidden()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(dir.opposite().delta(), (-dx, -dy));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_set_and_count() {
        let mut hub = Hub::EMPTY;
        assert_eq!(hub.count(Spoke::Empty), 8);
        hub.set(Direction::Top, Spoke::Hidden);
        hub.set(Direction::Right, Spoke::Line);
        hub.set(Direction::BottomLeft, Spoke::Marked);
        assert_eq!(hub.spoke(Direction::Right), Spoke::Line);
        assert_eq!(hub.spoke(Direction::BottomRight), Spoke::Empty);
        assert_eq!(hub.count(Spoke::Line), 1);
        assert_eq!(hub.count(Spoke::Marked), 1);
        assert_eq!(hub.available(), 7);
        hub.set(Direction::Right, Spoke::Empty);
        assert_eq!(hub.count(Spoke::Line), 0);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Direction::from_index(3), Some(Direction::BottomLeft));
        assert_eq!(Direction::from_index(8), None);
        assert!(Direction::BottomLeft.is_diagonal());
        assert!(!Direction::Bottom.is_diagonal());
    }
}
