//! Resize handles

/// Edge or corner a resize handle sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    /// North (top) edge
    N,
    /// South (bottom) edge
    S,
    /// East (right) edge
    E,
    /// West (left) edge
    W,
    /// Northeast corner
    NE,
    /// Northwest corner
    NW,
    /// Southeast corner
    SE,
    /// Southwest corner
    SW,
}

impl ResizeEdge {
    /// All eight handles
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::N,
        ResizeEdge::S,
        ResizeEdge::E,
        ResizeEdge::W,
        ResizeEdge::NE,
        ResizeEdge::NW,
        ResizeEdge::SE,
        ResizeEdge::SW,
    ];

    /// Parse a handle direction (`"n"`, `"se"`, ...)
    pub fn parse(direction: &str) -> Option<Self> {
        match direction {
            "n" => Some(ResizeEdge::N),
            "s" => Some(ResizeEdge::S),
            "e" => Some(ResizeEdge::E),
            "w" => Some(ResizeEdge::W),
            "ne" => Some(ResizeEdge::NE),
            "nw" => Some(ResizeEdge::NW),
            "se" => Some(ResizeEdge::SE),
            "sw" => Some(ResizeEdge::SW),
            _ => None,
        }
    }

    /// Direction string, inverse of [`ResizeEdge::parse`]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeEdge::N => "n",
            ResizeEdge::S => "s",
            ResizeEdge::E => "e",
            ResizeEdge::W => "w",
            ResizeEdge::NE => "ne",
            ResizeEdge::NW => "nw",
            ResizeEdge::SE => "se",
            ResizeEdge::SW => "sw",
        }
    }

    /// Moves the top edge (changes `y` and `h`)
    #[inline]
    pub fn north(&self) -> bool {
        matches!(self, ResizeEdge::N | ResizeEdge::NE | ResizeEdge::NW)
    }

    /// Moves the bottom edge
    #[inline]
    pub fn south(&self) -> bool {
        matches!(self, ResizeEdge::S | ResizeEdge::SE | ResizeEdge::SW)
    }

    /// Moves the right edge
    #[inline]
    pub fn east(&self) -> bool {
        matches!(self, ResizeEdge::E | ResizeEdge::NE | ResizeEdge::SE)
    }

    /// Moves the left edge (changes `x` and `w`)
    #[inline]
    pub fn west(&self) -> bool {
        matches!(self, ResizeEdge::W | ResizeEdge::NW | ResizeEdge::SW)
    }

    /// Check if this is a corner handle
    #[inline]
    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            ResizeEdge::NE | ResizeEdge::NW | ResizeEdge::SE | ResizeEdge::SW
        )
    }
}
