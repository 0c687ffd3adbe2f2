use super::LifeEngine;
use crate::Pos2;

/// A rectangular view onto the engine's live cells
///
/// The rectangle is half-open: `top_left` is inside, `bottom_right` is not.
pub struct GameEngineWindow<'a> {
    tl: Pos2,
    br: Pos2,
    engine: &'a LifeEngine,
}
impl<'a> GameEngineWindow<'a> {
    pub fn new(engine: &'a LifeEngine, top_left: Pos2, bottom_right: Pos2) -> Self {
        Self {
            tl: top_left,
            br: bottom_right,
            engine,
        }
    }

    #[inline]
    pub fn contains(&self, pos: Pos2) -> bool {
        (self.tl.x..self.br.x).contains(&pos.x) && (self.tl.y..self.br.y).contains(&pos.y)
    }

    /// Live cells inside the window, in no particular order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'a Pos2> + '_ {
        self.engine
            .cells()
            .iter()
            .filter(move |&&pos| self.contains(pos))
    }

    /// Live cells inside the window in row-major order
    pub fn sorted(&self) -> Vec<Pos2> {
        let mut cells: Vec<Pos2> = self.iter().copied().collect();
        cells.sort_unstable();
        cells
    }
}

impl<'a> std::fmt::Display for GameEngineWindow<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut last = self.tl - Pos2 { x: 1, y: 0 };
        for alive in self.sorted() {
            // determine the number of lines to print
            let lines = alive.y - last.y;
            // determine the number of padding spaces to print
            let padding = match lines {
                0 => alive.x - last.x - 1,
                _ => alive.x - self.tl.x,
            };
            write!(
                f,
                "{0:\n<1$}{0: <2$}█",
                "", lines as usize, padding as usize
            )?;
            last = alive;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_skips_cells_outside() {
        let game = LifeEngine::from_alive([Pos2::new(0, 0), Pos2::new(5, 5), Pos2::new(-1, 2)]);
        let window = game.window(Pos2::new(0, 0), Pos2::new(5, 5));

        assert_eq!(window.sorted(), vec![Pos2::new(0, 0)]);
    }

    #[test]
    fn display_draws_rows() {
        let game = LifeEngine::from_alive([Pos2::new(1, -1), Pos2::new(1, 0), Pos2::new(1, 1)]);
        let window = game.window(Pos2::new(0, -1), Pos2::new(3, 2));

        assert_eq!(window.to_string(), " █\n █\n █");
    }

    #[test]
    fn display_pads_gaps_within_a_row() {
        let game = LifeEngine::from_alive([Pos2::new(10, 7), Pos2::new(13, 7)]);
        let window = game.window(Pos2::new(10, 7), Pos2::new(20, 8));

        assert_eq!(window.to_string(), "█  █");
    }
}
