use std::time::{Duration, Instant};

/// How often a [`SimpleRecord`] has a fresh report
const REPORT_EVERY: Duration = Duration::from_millis(500);

pub trait Recorder {
    type Str: AsRef<str>;

    /// Records one finished generation with its population
    fn record(&mut self, alive: usize);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> Self::Str;
}

/// Population change between two generations
#[inline]
fn population_delta(before: usize, after: usize) -> i64 {
    after as i64 - before as i64
}

pub struct SimpleRecord {
    gens: u64,
    alive: usize,
    delta: i64,
    gens_in_report: u64,
    last_report: Instant,
}
impl SimpleRecord {
    pub fn new(alive: usize) -> Self {
        Self {
            gens: 0,
            alive,
            delta: 0,
            gens_in_report: 0,
            last_report: Instant::now(),
        }
    }

    #[inline]
    pub fn generations(&self) -> u64 {
        self.gens
    }

    /// Resyncs the population after an edit outside of a step
    pub fn set_alive(&mut self, alive: usize) {
        self.alive = alive;
    }
}
impl Recorder for SimpleRecord {
    type Str = String;

    fn record(&mut self, alive: usize) {
        self.gens += 1;
        self.gens_in_report += 1;
        self.delta = population_delta(self.alive, alive);
        self.alive = alive;
    }

    fn has_report(&self) -> bool {
        self.last_report.elapsed() >= REPORT_EVERY
    }
    fn report(&mut self) -> Self::Str {
        let gens_per_sec = self.gens_in_report as f64 / self.last_report.elapsed().as_secs_f64();
        // reset stats for next report
        self.last_report = Instant::now();
        self.gens_in_report = 0;

        format!(
            "{:.02}gen/s gens:{}, alive:{} ({:+})",
            gens_per_sec, self.gens, self.alive, self.delta
        )
    }
}

/// Keeps one row per generation on top of the console report
pub struct CsvRecord {
    inner: SimpleRecord,
    data: Vec<(u128, usize, i64)>,
    last: Instant,
}
impl CsvRecord {
    pub fn new(alive: usize) -> Self {
        Self {
            inner: SimpleRecord::new(alive),
            data: Vec::new(),
            last: Instant::now(),
        }
    }

    fn write_to<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        out.write_all(b"gen,delta_us,alive,delta_alive\n")?;
        for (i, (delta_t, alive, delta_alive)) in self.data.iter().enumerate() {
            writeln!(out, "{},{},{},{}", i + 1, delta_t, alive, delta_alive)?;
        }
        out.flush()
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }
}
impl Recorder for CsvRecord {
    type Str = <SimpleRecord as Recorder>::Str;

    fn record(&mut self, alive: usize) {
        let delta_t = self.last.elapsed().as_micros();
        self.last = Instant::now();

        self.data
            .push((delta_t, alive, population_delta(self.inner.alive, alive)));
        self.inner.record(alive);
    }

    fn has_report(&self) -> bool {
        self.inner.has_report()
    }
    fn report(&mut self) -> Self::Str {
        self.inner.report()
    }
}

pub enum SwitchRecorder {
    Csv(CsvRecord),
    Simple(SimpleRecord),
}
impl SwitchRecorder {
    pub fn new(alive: usize, csv: bool) -> Self {
        if csv {
            Self::Csv(CsvRecord::new(alive))
        } else {
            Self::Simple(SimpleRecord::new(alive))
        }
    }

    fn simple(&self) -> &SimpleRecord {
        match self {
            Self::Csv(r) => &r.inner,
            Self::Simple(r) => r,
        }
    }

    pub fn generations(&self) -> u64 {
        self.simple().generations()
    }

    pub fn set_alive(&mut self, alive: usize) {
        match self {
            Self::Csv(r) => r.inner.set_alive(alive),
            Self::Simple(r) => r.set_alive(alive),
        }
    }

    /// Writes the CSV rows, a no-op unless recording them
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        match self {
            Self::Csv(r) => r.save(path),
            Self::Simple(_) => Ok(()),
        }
    }
}
impl Recorder for SwitchRecorder {
    type Str = String;

    fn record(&mut self, alive: usize) {
        match self {
            Self::Csv(r) => r.record(alive),
            Self::Simple(r) => r.record(alive),
        }
    }
    fn has_report(&self) -> bool {
        self.simple().has_report()
    }
    fn report(&mut self) -> Self::Str {
        match self {
            Self::Csv(r) => r.report(),
            Self::Simple(r) => r.report(),
        }
    }
}
