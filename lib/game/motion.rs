use crate::chess::{Board, Cell, PieceId};
use crate::game::{Command, Tempo};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
enum Mode {
    Idle,
    Moving,
    /// The cell already changed, the arrival emission is still owed.
    JumpPending,
}

/// A piece's continuous-time position interpolator.
///
/// Converts a discrete move or jump command into a time-bounded trajectory
/// and reports completion as an [`Command::Arrived`]. The `cell` field holds
/// the pre-move cell until the trajectory completes, so occupancy scans never
/// observe a piece halfway between two cells.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Motion {
    id: PieceId,
    board: Board,
    cell: Cell,
    start_cell: Cell,
    target_cell: Cell,
    pixel: (i32, i32),
    start_ms: u64,
    end_ms: u64,
    mode: Mode,
}

impl Motion {
    /// Constructs [`Motion`] at rest on the given cell.
    pub fn new(id: PieceId, cell: Cell, board: Board) -> Self {
        Motion {
            id,
            board,
            cell,
            start_cell: cell,
            target_cell: cell,
            pixel: board.cell_to_pixel(cell),
            start_ms: 0,
            end_ms: 0,
            mode: Mode::Idle,
        }
    }

    /// The cell this piece occupies.
    ///
    /// Stays at the pre-move cell while a trajectory is in flight.
    #[inline(always)]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// The interpolated pixel position for rendering.
    #[inline(always)]
    pub fn pixel(&self) -> (i32, i32) {
        self.pixel
    }

    /// Whether a trajectory is in flight.
    #[inline(always)]
    pub fn is_moving(&self) -> bool {
        self.mode == Mode::Moving
    }

    /// Reinitializes the trajectory from a command.
    pub fn reset(&mut self, cmd: &Command, tempo: &Tempo) {
        match *cmd {
            Command::Move { at, target, .. } => {
                self.start_cell = self.cell;
                self.target_cell = target;
                self.start_ms = at;
                self.end_ms = at + tempo.move_duration_ms(self.cell.distance(target));
                self.mode = Mode::Moving;
            }

            Command::Jump { at, target, .. } => {
                // Instantaneous relocation; the arrival is owed on the next
                // update tick so the lifecycle layer still hears about it.
                self.target_cell = target;
                self.cell = target;
                self.pixel = self.board.cell_to_pixel(self.cell);
                self.start_ms = at;
                self.end_ms = at + 1;
                self.mode = Mode::JumpPending;
            }

            Command::Reset { cell, .. } => {
                self.cell = cell;
                self.start_cell = cell;
                self.target_cell = cell;
                self.pixel = self.board.cell_to_pixel(cell);
                self.mode = Mode::Idle;
            }

            Command::Idle { .. } | Command::Arrived { .. } => {
                self.target_cell = self.cell;
                self.pixel = self.board.cell_to_pixel(self.cell);
                self.mode = Mode::Idle;
            }
        }
    }

    /// Advances the trajectory to `now`.
    ///
    /// Returns the [`Command::Arrived`] exactly once per completed move or
    /// jump.
    pub fn update(&mut self, now: u64) -> Option<Command> {
        match self.mode {
            Mode::Moving if now >= self.end_ms => {
                self.cell = self.target_cell;
                self.pixel = self.board.cell_to_pixel(self.cell);
                self.mode = Mode::Idle;

                Some(Command::Arrived {
                    at: now,
                    piece: self.id,
                    cell: self.cell,
                })
            }

            Mode::Moving => {
                let duration = (self.end_ms - self.start_ms) as f64;
                let progress = (now.saturating_sub(self.start_ms)) as f64 / duration;

                let (x0, y0) = self.board.cell_to_pixel(self.start_cell);
                let (x1, y1) = self.board.cell_to_pixel(self.target_cell);

                self.pixel = (
                    (x0 as f64 + (x1 - x0) as f64 * progress) as i32,
                    (y0 as f64 + (y1 - y0) as f64 * progress) as i32,
                );

                None
            }

            Mode::JumpPending if now >= self.end_ms => {
                self.mode = Mode::Idle;

                Some(Command::Arrived {
                    at: now,
                    piece: self.id,
                    cell: self.cell,
                })
            }

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    fn motion(id: PieceId, cell: Cell) -> Motion {
        Motion::new(id, cell, Board::default())
    }

    #[proptest]
    fn move_duration_scales_with_euclidean_distance(
        id: PieceId,
        from: Cell,
        #[filter(#from != #to)] to: Cell,
        #[strategy(0u64..1 << 40)] at: u64,
    ) {
        let tempo = Tempo::default();
        let mut m = motion(id, from);

        m.reset(
            &Command::Move {
                at,
                piece: id,
                source: from,
                target: to,
                captured: None,
            },
            &tempo,
        );

        let expected = tempo.move_duration_ms(from.distance(to));
        assert_eq!(m.update(at + expected - 1), None);
        assert_eq!(
            m.update(at + expected),
            Some(Command::Arrived {
                at: at + expected,
                piece: id,
                cell: to
            })
        );
        assert_eq!(m.cell(), to);
    }

    #[proptest]
    fn zero_distance_move_still_takes_the_floor_duration(
        id: PieceId,
        cell: Cell,
        #[strategy(0u64..1 << 40)] at: u64,
    ) {
        let mut m = motion(id, cell);

        m.reset(
            &Command::Move {
                at,
                piece: id,
                source: cell,
                target: cell,
                captured: None,
            },
            &Tempo::default(),
        );

        assert_eq!(m.update(at + 99), None);
        assert!(matches!(m.update(at + 100), Some(Command::Arrived { .. })));
    }

    #[proptest]
    fn cell_does_not_change_until_the_move_completes(
        id: PieceId,
        from: Cell,
        #[filter(#from != #to)] to: Cell,
        #[strategy(0u64..1 << 40)] at: u64,
    ) {
        let tempo = Tempo::default();
        let mut m = motion(id, from);

        m.reset(
            &Command::Move {
                at,
                piece: id,
                source: from,
                target: to,
                captured: None,
            },
            &tempo,
        );

        let duration = tempo.move_duration_ms(from.distance(to));
        assert_eq!(m.update(at + duration / 2), None);
        assert_eq!(m.cell(), from);
        assert!(m.is_moving());
    }

    #[proptest]
    fn pixels_interpolate_between_endpoints(
        id: PieceId,
        from: Cell,
        #[filter(#from != #to)] to: Cell,
    ) {
        let board = Board::default();
        let tempo = Tempo::default();
        let mut m = motion(id, from);

        m.reset(
            &Command::Move {
                at: 0,
                piece: id,
                source: from,
                target: to,
                captured: None,
            },
            &tempo,
        );

        let duration = tempo.move_duration_ms(from.distance(to));
        m.update(duration / 2);

        let (x0, y0) = board.cell_to_pixel(from);
        let (x1, y1) = board.cell_to_pixel(to);
        let (x, y) = m.pixel();

        assert!((x - x0).abs() <= (x1 - x0).abs());
        assert!((y - y0).abs() <= (y1 - y0).abs());
        assert!((x1 - x).abs() <= (x1 - x0).abs());
        assert!((y1 - y).abs() <= (y1 - y0).abs());
    }

    #[proptest]
    fn jump_snaps_the_cell_and_owes_the_arrival_one_tick_later(
        id: PieceId,
        from: Cell,
        to: Cell,
        #[strategy(0u64..1 << 40)] at: u64,
    ) {
        let mut m = motion(id, from);

        m.reset(
            &Command::Jump {
                at,
                piece: id,
                target: to,
            },
            &Tempo::default(),
        );

        assert_eq!(m.cell(), to);
        assert!(!m.is_moving());
        assert_eq!(m.update(at), None);
        assert_eq!(
            m.update(at + 1),
            Some(Command::Arrived {
                at: at + 1,
                piece: id,
                cell: to
            })
        );
        assert_eq!(m.update(at + 2), None);
    }

    #[proptest]
    fn reset_to_a_cell_clears_any_trajectory(id: PieceId, from: Cell, to: Cell, cell: Cell) {
        let tempo = Tempo::default();
        let mut m = motion(id, from);

        m.reset(
            &Command::Move {
                at: 0,
                piece: id,
                source: from,
                target: to,
                captured: None,
            },
            &tempo,
        );

        m.reset(
            &Command::Reset {
                at: 1,
                piece: id,
                cell,
            },
            &tempo,
        );

        assert_eq!(m.cell(), cell);
        assert!(!m.is_moving());
        assert_eq!(m.update(u64::MAX), None);
    }
}
