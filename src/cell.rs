/// The logical state of a single grid cell. Rendering derives colours and glyphs from this,
/// never the other way around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    /// Queued in the open set.
    Frontier,
    /// Expanded and closed.
    Visited,
    /// Part of the reconstructed route.
    Path,
}

impl CellState {
    pub fn is_wall(self) -> bool {
        self == CellState::Wall
    }

    /// Start and End are the only states an edit must not silently overwrite.
    pub fn is_endpoint(self) -> bool {
        matches!(self, CellState::Start | CellState::End)
    }

    /// States painted by a search run, as opposed to ones placed by the user.
    pub fn is_search_decoration(self) -> bool {
        matches!(
            self,
            CellState::Frontier | CellState::Visited | CellState::Path
        )
    }

    /// Character used in text layouts and the plain text renderer.
    pub fn glyph(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Wall => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Frontier => 'o',
            CellState::Visited => 'x',
            CellState::Path => '*',
        }
    }

    /// Inverse of [glyph](Self::glyph).
    pub fn from_glyph(c: char) -> Option<CellState> {
        match c {
            '.' => Some(CellState::Empty),
            '#' => Some(CellState::Wall),
            'S' => Some(CellState::Start),
            'E' => Some(CellState::End),
            'o' => Some(CellState::Frontier),
            'x' => Some(CellState::Visited),
            '*' => Some(CellState::Path),
            _ => None,
        }
    }
}
