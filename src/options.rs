use std::{str::FromStr, time::Duration};

use sparselife::{LiveCells, Pattern, Pos2, patterns};

use crate::error::{Error, Result};

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    /// Parses `args`, returning [`None`] when only help was requested
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run in interactive console mode");
        opts.optflag("t", "threads", "step generations on all cores");
        opts.optflag("", "print", "print the final generation (headless mode)");
        opts.optopt("w", "width", "set fill width", "WIDTH");
        opts.optopt("h", "height", "set fill height", "HEIGHT");
        opts.optopt("f", "fill", "random, alternating, all or empty", "TYPE");
        opts.optopt(
            "p",
            "pattern",
            &format!("seed with a named pattern: {}", patterns::names()),
            "NAME",
        );
        opts.optopt("", "origin", "top-left corner of the seed", "X,Y");
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt("", "stats", "write stats csv to file", "FILE");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: sparselife [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn parsed<T: FromStr>(&self, opt: &'static str) -> Result<Option<T>> {
        match self.matches.opt_str(opt) {
            None => Ok(None),
            Some(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| Error::InvalidValue { opt, value }),
        }
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }
    pub fn print(&self) -> bool {
        self.matches.opt_present("print")
    }

    pub fn generations(&self) -> Result<Option<u64>> {
        self.parsed("gens")
    }
    pub fn sleep(&self) -> Result<Option<Duration>> {
        Ok(match self.parsed("sleep")? {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if self.console() => Some(Duration::from_millis(100)),
            None => None,
        })
    }

    pub fn origin(&self) -> Result<Pos2> {
        let Some(value) = self.matches.opt_str("origin") else {
            return Ok(Pos2::zero());
        };
        let parse = |s: &str| s.trim().parse::<i64>().ok();
        let origin = value.split_once(',').and_then(|(x, y)| {
            Some(Pos2 {
                x: parse(x)?,
                y: parse(y)?,
            })
        });
        origin.ok_or(Error::InvalidValue {
            opt: "origin",
            value,
        })
    }

    pub fn grid_size(&self) -> Result<(i64, i64)> {
        let default = if self.console() {
            let (cols, rows) = crossterm::terminal::size()?;
            // the bottom row holds the footer
            (i64::from(cols), i64::from(rows.saturating_sub(1)))
        } else {
            (500, 500)
        };

        Ok((
            self.parsed("width")?.unwrap_or(default.0),
            self.parsed("height")?.unwrap_or(default.1),
        ))
    }
    pub fn fill_mode(&self) -> Result<FillMode> {
        let mode_str = self.matches.opt_str("fill");
        let mode_str = mode_str.as_deref().unwrap_or("random");
        FillMode::new(mode_str).ok_or_else(|| Error::UnknownFill(mode_str.to_owned()))
    }
    pub fn pattern(&self) -> Result<Option<&'static Pattern>> {
        let Some(name) = self.matches.opt_str("pattern") else {
            return Ok(None);
        };
        match Pattern::by_name(&name) {
            Some(pattern) => Ok(Some(pattern)),
            None => Err(Error::UnknownPattern {
                name,
                known: patterns::names(),
            }),
        }
    }

    /// The initial live cells, from `--pattern` if given, otherwise `--fill`
    pub fn seed(&self) -> Result<LiveCells> {
        let origin = self.origin()?;
        if let Some(pattern) = self.pattern()? {
            return Ok(pattern.cells_at(origin).collect());
        }

        let (w, h) = self.grid_size()?;
        let fill = self.fill_mode()?;
        if !matches!(fill, FillMode::Empty) && w.checked_mul(h).is_none() {
            return Err(Error::FillTooLarge { w, h });
        }
        Ok(fill.create_alive(origin, w, h))
    }

    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}

/// Upper bound on the up-front allocation for a fill
const MAX_RESERVE: usize = 1 << 20;

#[derive(Debug)]
pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
}
impl FillMode {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    fn reserve_size(&self, w: i64, h: i64) -> usize {
        let total = || (w.max(0) as usize).saturating_mul(h.max(0) as usize);
        match self {
            Self::Random | Self::Alternating => total().div_ceil(2),
            Self::All => total(),
            Self::Empty => 0,
        }
    }
    fn fill_cell<R: rand::Rng>(&self, cell: Pos2, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.x + cell.y) % 2 == 0,
            Self::All => true,
            Self::Empty => false,
        }
    }

    /// Fills the `w` by `h` rectangle whose top-left corner is `origin`
    pub fn create_alive(self, origin: Pos2, w: i64, h: i64) -> LiveCells {
        let mut alive = LiveCells::default();
        let reserve_size = self.reserve_size(w, h);
        if reserve_size == 0 {
            // reserve_size indicates this will produce no alive cells
            return alive;
        }

        let mut rng = rand::rng();
        alive.reserve(reserve_size.min(MAX_RESERVE));
        for y in 0..h {
            for x in 0..w {
                let cell = Pos2 { x, y };
                if self.fill_cell(cell, &mut rng) {
                    alive.insert(origin + cell);
                }
            }
        }
        alive
    }
}
