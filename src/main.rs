use std::{
    thread,
    time::{Duration, Instant},
};

mod console;
mod error;
mod options;
mod stats;

use console::{ConsoleCommand, ConsoleRender};
use error::Result;
use sparselife::{LifeEngine, Pos2, Scheduler};
use stats::{Recorder, SwitchRecorder};

/// Longest the console waits for input before refreshing the footer
const IDLE_POLL: Duration = Duration::from_millis(250);

fn advance(game: &mut LifeEngine, threads: bool) -> usize {
    if threads {
        game.step_parallel().len()
    } else {
        game.step().len()
    }
}

fn run_headless(
    args: &options::Args,
    game: &mut LifeEngine,
    stats: &mut SwitchRecorder,
) -> Result<()> {
    let sleep = args.sleep()?;
    let threads = args.multithreading();
    let gens = args.generations()?.unwrap_or(u64::MAX);

    for _ in 0..gens {
        // report metrics every 500ms
        if stats.has_report() {
            println!("{}", stats.report());
        }

        stats.record(advance(game, threads));
        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }
    println!("{}", stats.report());

    if args.print() {
        if let Some((tl, br)) = game.bounds() {
            println!("{}", game.window(tl, br + Pos2::one()));
        }
    }
    Ok(())
}

fn run_console(
    args: &options::Args,
    game: &mut LifeEngine,
    stats: &mut SwitchRecorder,
) -> Result<()> {
    let threads = args.multithreading();
    let gens = args.generations()?.unwrap_or(u64::MAX);
    let mut scheduler = Scheduler::new(args.sleep()?.unwrap_or(IDLE_POLL));
    let mut console = ConsoleRender::new()?;
    scheduler.start(Instant::now());

    while stats.generations() < gens {
        if scheduler.poll(Instant::now()) {
            stats.record(advance(game, threads));
        }

        if stats.has_report() {
            console.set_report(stats.report());
        }
        console.set_status(format!(
            "[{} {}ms] space:run n:step +/-:speed q:quit |",
            if scheduler.is_running() {
                "running"
            } else {
                "paused"
            },
            scheduler.interval().as_millis()
        ));
        console.render(game)?;

        let wait = scheduler
            .time_until_due(Instant::now())
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));
        let Some(cmd) = console.poll_events(wait)? else {
            continue;
        };
        match cmd {
            ConsoleCommand::Exit => break,
            ConsoleCommand::Step => stats.record(advance(game, threads)),
            ConsoleCommand::ToggleRun => {
                scheduler.toggle(Instant::now());
            }
            ConsoleCommand::Faster => scheduler.faster(Instant::now()),
            ConsoleCommand::Slower => scheduler.slower(Instant::now()),
            ConsoleCommand::Toggle(cell) => {
                let alive = game.toggle(cell);
                log::debug!("toggled {cell:?}, alive: {alive}");
                stats.set_alive(game.alive_count());
            }
            ConsoleCommand::Handled => {}
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };

    let mut game = LifeEngine::from_alive(args.seed()?);
    log::info!(
        "seeded {} alive cells, bounds {:?}",
        game.alive_count(),
        game.bounds()
    );

    let stats_file = args.stats_file();
    let mut stats = SwitchRecorder::new(game.alive_count(), stats_file.is_some());
    if args.console() {
        run_console(&args, &mut game, &mut stats)?;
    } else {
        run_headless(&args, &mut game, &mut stats)?;
    }

    if let Some(file_name) = stats_file {
        stats.save(&file_name)?;
        log::info!(
            "wrote stats for {} generations to {file_name}",
            stats.generations()
        );
    }

    Ok(())
}
