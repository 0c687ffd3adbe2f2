//! Well known seeds for the engine.

use crate::Pos2;

/// A named arrangement of live cells, relative to its own top-left corner
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    cells: &'static [(i64, i64)],
}

impl Pattern {
    const fn new(
        name: &'static str,
        description: &'static str,
        cells: &'static [(i64, i64)],
    ) -> Self {
        Self {
            name,
            description,
            cells,
        }
    }

    /// Looks up a pattern by name, ignoring ASCII case
    pub fn by_name(name: &str) -> Option<&'static Pattern> {
        ALL.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// The pattern's cells translated so its top-left corner sits at `origin`
    pub fn cells_at(&self, origin: Pos2) -> impl Iterator<Item = Pos2> + '_ {
        self.cells.iter().map(move |&cell| origin + Pos2::from(cell))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

pub const BLOCK: Pattern = Pattern::new("block", "still life", &[(0, 0), (1, 0), (0, 1), (1, 1)]);
pub const BLINKER: Pattern = Pattern::new(
    "blinker",
    "period 2 oscillator",
    &[(0, 0), (1, 0), (2, 0)],
);
pub const TOAD: Pattern = Pattern::new(
    "toad",
    "period 2 oscillator",
    &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
);
pub const GLIDER: Pattern = Pattern::new(
    "glider",
    "period 4 diagonal spaceship",
    &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
);
pub const R_PENTOMINO: Pattern = Pattern::new(
    "r-pentomino",
    "methuselah lasting 1103 generations",
    &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
);
pub const ACORN: Pattern = Pattern::new(
    "acorn",
    "methuselah lasting 5206 generations",
    &[(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)],
);
pub const LWSS: Pattern = Pattern::new(
    "lwss",
    "period 4 horizontal spaceship",
    &[
        (1, 0),
        (4, 0),
        (0, 1),
        (0, 2),
        (4, 2),
        (0, 3),
        (1, 3),
        (2, 3),
        (3, 3),
    ],
);

pub const ALL: &[Pattern] = &[BLOCK, BLINKER, TOAD, GLIDER, R_PENTOMINO, ACORN, LWSS];

/// Every pattern as `name (description)`, for help text
pub fn names() -> String {
    ALL.iter()
        .map(|p| format!("{} ({})", p.name, p.description))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LifeEngine, LiveCells};

    fn run(pattern: &Pattern, origin: Pos2, gens: usize) -> LifeEngine {
        let mut game = LifeEngine::from_alive(pattern.cells_at(origin));
        for _ in 0..gens {
            game.step();
        }
        game
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(
            Pattern::by_name("R-Pentomino").map(|p| p.name),
            Some("r-pentomino")
        );
        assert!(Pattern::by_name("gun").is_none());
    }

    #[test]
    fn cells_are_unique() {
        for pattern in ALL {
            let set: LiveCells = pattern.cells_at(Pos2::zero()).collect();
            assert_eq!(set.len(), pattern.len(), "{}", pattern.name);
        }
    }

    #[test]
    fn oscillators_return_after_period() {
        for pattern in [&BLOCK, &BLINKER, &TOAD] {
            let origin = Pos2::new(-40, 17);
            let start: LiveCells = pattern.cells_at(origin).collect();

            assert_eq!(run(pattern, origin, 2).cells(), &start, "{}", pattern.name);
        }
    }

    #[test]
    fn lwss_moves_two_cells_in_four_generations() {
        let origin = Pos2::new(1_000_000, 1_000_000);
        let game = run(&LWSS, origin, 4);
        let start: LiveCells = LWSS.cells_at(origin).collect();
        let shifted: LiveCells = start.iter().map(|&p| p - Pos2::new(2, 0)).collect();

        assert_eq!(game.cells(), &shifted);
    }

    #[test]
    fn names_lists_every_pattern() {
        let names = names();

        for pattern in ALL {
            let entry = format!("{} ({})", pattern.name, pattern.description);
            assert!(names.contains(&entry), "{names} is missing {entry}");
        }
        assert!(names.starts_with("block (still life), blinker (period 2 oscillator)"));
    }
}
