//! Search results: the connection sequence and optional diagnostics.

use gridnav_core::Position;

use crate::connection::Connection;
use crate::priority::PriorityList;

/// Receives line segments from [`Path::draw`].
pub trait PathDrawer {
    /// Draw one segment.
    fn line(&mut self, from: Position, to: Position);
}

/// Final open and closed lists of a search, kept when debugging.
#[derive(Clone, Debug, Default)]
pub struct SearchDiagnostics {
    /// Records still open when the search stopped.
    pub open: PriorityList,
    /// Records fully expanded.
    pub closed: PriorityList,
}

impl SearchDiagnostics {
    /// Total number of records across both lists.
    pub fn record_count(&self) -> usize {
        self.open.len() + self.closed.len()
    }
}

/// Ordered connections from the begin cell to the end cell.
///
/// Consecutive connections chain: each one begins where the previous one
/// ended. An empty path means begin and end were the same cell.
#[derive(Clone, Debug, Default)]
pub struct Path {
    connections: Vec<Connection>,
    diagnostics: Option<SearchDiagnostics>,
}

impl Path {
    /// Wrap a chained connection sequence.
    pub fn new(connections: Vec<Connection>, diagnostics: Option<SearchDiagnostics>) -> Self {
        debug_assert!(connections.windows(2).all(|w| w[0].end == w[1].begin));
        Self {
            connections,
            diagnostics,
        }
    }

    /// The connections, begin to end.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Whether the path has no steps.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Sum of connection costs.
    pub fn cost(&self) -> f32 {
        self.connections.iter().map(|c| c.cost).sum()
    }

    /// Every visited position, begin included. Empty for an empty path.
    pub fn positions(&self) -> Vec<Position> {
        let mut out = Vec::with_capacity(self.connections.len() + 1);
        if let Some(first) = self.connections.first() {
            out.push(first.begin.position);
        }
        out.extend(self.connections.iter().map(|c| c.end.position));
        out
    }

    /// Open and closed lists, if the search was debugging.
    pub fn diagnostics(&self) -> Option<&SearchDiagnostics> {
        self.diagnostics.as_ref()
    }

    /// Feed every segment from connection `from_index` onwards to `drawer`.
    pub fn draw(&self, from_index: usize, drawer: &mut impl PathDrawer) {
        for connection in self.connections.iter().skip(from_index) {
            drawer.line(connection.begin.position, connection.end.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridnav_core::{Cell, CellId, Direction, RegionId};

    fn cell(x: i32) -> Cell {
        Cell::new(CellId(x as u32), Position::new(x, 0), RegionId(0))
    }

    fn straight(len: i32) -> Path {
        let connections = (0..len)
            .map(|x| Connection::new(cell(x), cell(x + 1), Direction::East, 1.0).unwrap())
            .collect();
        Path::new(connections, None)
    }

    #[derive(Default)]
    struct Recorder(Vec<(Position, Position)>);

    impl PathDrawer for Recorder {
        fn line(&mut self, from: Position, to: Position) {
            self.0.push((from, to));
        }
    }

    #[test]
    fn cost_and_positions() {
        let path = straight(3);
        assert_eq!(path.len(), 3);
        assert_eq!(path.cost(), 3.0);
        let xs: Vec<i32> = path.positions().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_path() {
        let path = Path::default();
        assert!(path.is_empty());
        assert_eq!(path.cost(), 0.0);
        assert!(path.positions().is_empty());
        assert!(path.diagnostics().is_none());
    }

    #[test]
    fn draw_skips_leading_segments() {
        let path = straight(4);
        let mut recorder = Recorder::default();
        path.draw(2, &mut recorder);
        assert_eq!(
            recorder.0,
            vec![
                (Position::new(2, 0), Position::new(3, 0)),
                (Position::new(3, 0), Position::new(4, 0)),
            ]
        );
        let mut none = Recorder::default();
        path.draw(10, &mut none);
        assert!(none.0.is_empty());
    }
}
