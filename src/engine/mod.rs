mod index;
mod window;

pub use self::window::GameEngineWindow;
use crate::Pos2;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

/// The set of live cells, the entire state of a simulation
pub type LiveCells = FxHashSet<Pos2>;

/// Live neighbor count for every cell adjacent to at least one live cell
type NeighborCounts = FxHashMap<Pos2, u8>;

/// Below this many live cells per chunk the parallel step stops splitting
const MIN_PARALLEL_CHUNK: usize = 1024;

/// Sparse B3/S23 engine over an unbounded grid
///
/// Only live cells are stored, so the cost of a generation depends on the
/// population and never on how far the cells are from the origin.
/// All mutation goes through [`LifeEngine::toggle`] and [`LifeEngine::step`].
#[derive(Debug, Default, Clone)]
pub struct LifeEngine {
    alive: LiveCells,
}

impl LifeEngine {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine seeded with `alive`, duplicates collapse
    pub fn from_alive<I: IntoIterator<Item = Pos2>>(alive: I) -> Self {
        Self {
            alive: alive.into_iter().collect(),
        }
    }

    /// Flips a single cell, returning whether it is alive afterwards
    pub fn toggle(&mut self, pos: Pos2) -> bool {
        if self.alive.remove(&pos) {
            false
        } else {
            self.alive.insert(pos);
            true
        }
    }

    /// Advances one generation and returns the new live cells
    pub fn step(&mut self) -> &LiveCells {
        let counts = count_neighbors(self.alive.iter().copied());
        let next: LiveCells = counts
            .iter()
            .filter(|&(pos, &n)| index::next_state(self.alive.contains(pos), n))
            .map(|(&pos, _)| pos)
            .collect();

        log::trace!(
            "step: {} -> {} alive ({} candidates)",
            self.alive.len(),
            next.len(),
            counts.len()
        );
        self.alive = next;
        &self.alive
    }

    /// Same as [`LifeEngine::step`], spreading the work over rayon's pool
    pub fn step_parallel(&mut self) -> &LiveCells {
        if self.alive.is_empty() {
            return &self.alive;
        }

        // each chunk counts into its own map, the maps are then merged
        let cells: Vec<Pos2> = self.alive.iter().copied().collect();
        let chunk_len =
            (cells.len() / rayon::current_num_threads()).max(MIN_PARALLEL_CHUNK);
        let counts = cells
            .par_chunks(chunk_len)
            .map(|chunk| count_neighbors(chunk.iter().copied()))
            .reduce(NeighborCounts::default, merge_counts);

        let candidates = counts.len();
        let alive = &self.alive;
        let next: LiveCells = counts
            .into_par_iter()
            .filter(|&(pos, n)| index::next_state(alive.contains(&pos), n))
            .map(|(pos, _)| pos)
            .collect();

        log::trace!(
            "parallel step: {} -> {} alive ({} candidates)",
            self.alive.len(),
            next.len(),
            candidates
        );
        self.alive = next;
        &self.alive
    }

    /// The current live cells
    ///
    /// The borrow keeps callers from mutating the set behind the engine's back.
    #[inline]
    pub fn cells(&self) -> &LiveCells {
        &self.alive
    }

    #[inline]
    pub fn is_alive(&self, pos: Pos2) -> bool {
        self.alive.contains(&pos)
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }

    /// Inclusive top-left and bottom-right corners of the live cells
    pub fn bounds(&self) -> Option<(Pos2, Pos2)> {
        let mut iter = self.alive.iter();
        let &first = iter.next()?;
        Some(iter.fold((first, first), |(tl, br), &pos| {
            (
                Pos2::new(tl.x.min(pos.x), tl.y.min(pos.y)),
                Pos2::new(br.x.max(pos.x), br.y.max(pos.y)),
            )
        }))
    }

    pub fn window(&self, top_left: Pos2, bottom_right: Pos2) -> GameEngineWindow<'_> {
        GameEngineWindow::new(self, top_left, bottom_right)
    }

    #[inline]
    pub fn take(self) -> LiveCells {
        self.alive
    }
}

/// Adds one to every neighbor of every live cell
///
/// The keys are exactly the candidates for the next generation. A live cell
/// without live neighbors never becomes a key, which is how isolated cells die.
fn count_neighbors<I: Iterator<Item = Pos2>>(alive: I) -> NeighborCounts {
    let mut counts =
        NeighborCounts::with_capacity_and_hasher(alive.size_hint().0 * 4, Default::default());
    for pos in alive {
        for neighbor in pos.neighbors() {
            *counts.entry(neighbor).or_insert(0) += 1;
        }
    }
    counts
}

fn merge_counts(mut a: NeighborCounts, mut b: NeighborCounts) -> NeighborCounts {
    if a.len() < b.len() {
        std::mem::swap(&mut a, &mut b);
    }
    for (pos, n) in b {
        *a.entry(pos).or_insert(0) += n;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(i64, i64)]) -> LiveCells {
        coords.iter().copied().map(Pos2::from).collect()
    }

    fn engine(coords: &[(i64, i64)]) -> LifeEngine {
        LifeEngine::from_alive(cells(coords))
    }

    fn live_neighbors(set: &LiveCells, pos: Pos2) -> usize {
        pos.neighbors().filter(|n| set.contains(n)).count()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut game = LifeEngine::new();
        let pos = Pos2::new(3, -7);

        assert!(game.toggle(pos));
        assert!(game.cells().contains(&pos));
        assert!(!game.toggle(pos));
        assert!(!game.cells().contains(&pos));
        assert!(game.cells().is_empty());
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut game = engine(&[(0, 0), (1, 0), (5, 5)]);
        let before = game.cells().clone();

        for pos in [Pos2::new(0, 0), Pos2::new(9, 9)] {
            game.toggle(pos);
            game.toggle(pos);
            assert_eq!(game.cells(), &before);
        }
    }

    #[test]
    fn from_alive_collapses_duplicates() {
        let game =
            LifeEngine::from_alive([Pos2::new(1, 1), Pos2::new(1, 1), Pos2::new(2, 1)]);

        assert_eq!(game.alive_count(), 2);
    }

    #[test]
    fn empty_stays_empty() {
        let mut game = LifeEngine::new();

        assert!(game.step().is_empty());
        assert!(game.step_parallel().is_empty());
    }

    #[test]
    fn block_is_still_life() {
        let block = cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let mut game = LifeEngine::from_alive(block.clone());

        assert_eq!(game.step(), &block);
        assert_eq!(game.step(), &block);
    }

    #[test]
    fn blinker_oscillates() {
        let horizontal = cells(&[(0, 0), (1, 0), (2, 0)]);
        let vertical = cells(&[(1, -1), (1, 0), (1, 1)]);
        let mut game = LifeEngine::from_alive(horizontal.clone());

        assert_eq!(game.step(), &vertical);
        assert_eq!(game.step(), &horizontal);
    }

    #[test]
    fn isolated_cell_dies() {
        let mut game = engine(&[(0, 0)]);

        assert!(game.step().is_empty());
    }

    #[test]
    fn isolated_cell_dies_next_to_live_pattern() {
        // the lone cell is far enough from the block to never be a candidate of it
        let mut game = engine(&[(0, 0), (0, 1), (1, 0), (1, 1), (10, 10)]);

        assert_eq!(game.step(), &cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]));
    }

    #[test]
    fn l_triomino_births_corner() {
        let before = cells(&[(0, 0), (0, 1), (1, 0)]);
        let mut game = LifeEngine::from_alive(before.clone());
        let after = game.step().clone();

        assert!(!before.contains(&Pos2::new(1, 1)));
        assert!(after.contains(&Pos2::new(1, 1)));
        assert_eq!(after, cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]));

        for pos in after.intersection(&before) {
            let n = live_neighbors(&before, *pos);
            assert!((2..=3).contains(&n), "{pos:?} survived with {n} neighbors");
        }
        for pos in after.difference(&before) {
            assert_eq!(
                live_neighbors(&before, *pos),
                3,
                "{pos:?} born without 3 neighbors"
            );
        }
    }

    #[test]
    fn overcrowded_center_dies() {
        // plus sign: the center has 4 neighbors
        let mut game = engine(&[(0, 0), (0, -1), (0, 1), (-1, 0), (1, 0)]);

        assert!(!game.step().contains(&Pos2::new(0, 0)));
    }

    #[test]
    fn glider_translates_after_four_generations() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut game = engine(&glider);
        for _ in 0..4 {
            game.step();
        }

        let moved: LiveCells = glider
            .iter()
            .map(|&(x, y)| Pos2::new(x + 1, y + 1))
            .collect();
        assert_eq!(game.cells(), &moved);
    }

    #[test]
    fn far_from_origin_matches_translated_pattern() {
        let offset = Pos2::new(1_000_000, 1_000_000);
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut near = engine(&glider);
        let mut far =
            LifeEngine::from_alive(glider.iter().map(|&p| Pos2::from(p) + offset));

        for _ in 0..8 {
            let expected: LiveCells = near.step().iter().map(|&p| p + offset).collect();
            assert_eq!(far.step(), &expected);
        }
    }

    #[test]
    fn candidates_scale_with_population() {
        let far = Pos2::new(1_000_000, -1_000_000);
        let alive: Vec<Pos2> = [(0, 0), (1, 0), (2, 0)]
            .into_iter()
            .map(|p| Pos2::from(p) + far)
            .collect();

        let counts = count_neighbors(alive.iter().copied());
        // a horizontal row of 3 touches exactly the 5x3 box around it
        assert_eq!(counts.len(), 15);
        assert!(
            counts
                .keys()
                .all(|p| (-1..=3).contains(&(p.x - far.x)) && (p.y - far.y).abs() <= 1)
        );
    }

    #[test]
    fn parallel_matches_serial() {
        let mut alive = Vec::new();
        for y in 0..80 {
            for x in 0..80 {
                if (x * 7 + y * 13) % 5 < 2 {
                    alive.push(Pos2::new(x, y));
                }
            }
        }
        let mut serial = LifeEngine::from_alive(alive.iter().copied());
        let mut parallel = LifeEngine::from_alive(alive);

        for _ in 0..5 {
            let expected = serial.step().clone();
            assert_eq!(parallel.step_parallel(), &expected);
        }
    }

    #[test]
    fn bounds_cover_live_cells() {
        let game = engine(&[(-2, 5), (3, -1), (0, 0)]);

        assert_eq!(game.bounds(), Some((Pos2::new(-2, -1), Pos2::new(3, 5))));
        assert_eq!(LifeEngine::new().bounds(), None);
    }

    #[test]
    fn take_and_is_alive_agree() {
        let mut game = engine(&[(4, 4)]);
        game.toggle(Pos2::new(4, 5));

        assert!(game.is_alive(Pos2::new(4, 5)));
        assert!(!game.is_alive(Pos2::new(5, 5)));
        assert_eq!(game.take(), cells(&[(4, 4), (4, 5)]));
    }
}
