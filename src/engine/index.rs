use std::sync::OnceLock;

/// One slot per (current state, live neighbor count) pair, counts 0..=8
const NEIGHBOR_STATES: usize = 9;
const PERMUTATIONS: usize = 2 * NEIGHBOR_STATES;
type GameOfLifeIndex = [bool; PERMUTATIONS];

/// Returns a Singleton lookup table for the B3/S23 ruleset
///
/// Equivalent to calling [`generate_gol_index`] once and storing the result
pub(super) fn get_gol_index() -> &'static GameOfLifeIndex {
    static CELL: OnceLock<GameOfLifeIndex> = OnceLock::new();
    CELL.get_or_init(generate_gol_index)
}

/// Whether a cell is alive next generation
///
/// `neighbors` must be at most 8; a count above that means the caller's
/// neighbor accounting is broken.
#[inline]
pub(super) fn next_state(alive: bool, neighbors: u8) -> bool {
    debug_assert!(neighbors <= 8, "a cell has at most 8 neighbors");
    get_gol_index()[slot(alive, neighbors)]
}

#[inline]
fn slot(alive: bool, neighbors: u8) -> usize {
    usize::from(alive) * NEIGHBOR_STATES + usize::from(neighbors)
}

/// Creates a lookup table for the Game of Life ruleset
///
/// Dead cells occupy the first 9 slots and live cells the last 9, each
/// indexed by the live neighbor count.
pub(super) fn generate_gol_index() -> GameOfLifeIndex {
    let mut indices = [false; PERMUTATIONS];
    for alive in [false, true] {
        for neighbors in 0..NEIGHBOR_STATES as u8 {
            indices[slot(alive, neighbors)] = matches!((alive, neighbors), (true, 2) | (_, 3));
        }
    }
    indices
}
