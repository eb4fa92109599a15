use std::path::PathBuf;
use std::sync::mpsc;

use clap::Parser;
use match_host::{
    spawn_stdin_reader, AutoHuman, HostConfig, InlineActuator, JsonLinesPresenter, Pacing,
    Recorder, ScanWorker, Session, SimulatedTable, ThreadedActuator,
};
use memory_match::{CardCatalog, Difficulty, ManualClock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// The robot's level among "easy", "medium", "hard"
    #[arg(short, long)]
    difficulty: Option<String>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Record each finished game as a JSON file into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// Let a random player stand in for the human instead of reading picks from stdin
    #[arg(short, long, default_value_t = false)]
    autoplay: bool,

    /// How many games to play with --autoplay
    #[arg(short, long, default_value_t = 10)]
    num_games: usize,

    /// Probability that the simulated camera fails to read a card
    #[arg(long, default_value_t = 0.0)]
    scan_failure_rate: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let mut config = match &args.config {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };
    if let Some(level) = &args.difficulty {
        config.game.difficulty_default = Difficulty::parse_or_default(level);
    }
    if !(0.0..=1.0).contains(&args.scan_failure_rate) {
        anyhow::bail!("--scan-failure-rate must be between 0 and 1");
    }

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let layout = config.game.layout();
    let table = SimulatedTable::new(
        layout,
        args.scan_failure_rate,
        StdRng::seed_from_u64(rng.gen()),
    );
    // Without a configured catalog, name cards after the table's pictures
    let catalog = if config.game.catalog.is_empty() {
        CardCatalog::new(table.catalog(), config.game.identification_distance_threshold)
    } else {
        config.game.card_catalog()
    };
    let worker = ScanWorker::new(table, config.scan_attempts);
    let engine_rng = StdRng::seed_from_u64(rng.gen());
    let (sender, receiver) = mpsc::channel();

    let session = if args.autoplay {
        let actuator = InlineActuator::new(worker, sender.clone());
        let human = AutoHuman::new(layout, StdRng::seed_from_u64(rng.gen()), sender);
        Session::new(
            config,
            engine_rng,
            Box::new(actuator),
            Pacing::Virtual(ManualClock::new(0)),
        )?
        .with_presenter(Box::new(human))
        .play_games(args.num_games)
    } else {
        let actuator = ThreadedActuator::spawn(worker, sender.clone())?;
        spawn_stdin_reader(sender)?;
        Session::new(config, engine_rng, Box::new(actuator), Pacing::RealTime)?
            .with_presenter(Box::new(JsonLinesPresenter::new(std::io::stdout())))
    };
    let session = session.with_catalog(catalog);
    let mut session = match args.record_games_to_directory {
        Some(dir_path) => session.with_recorder(Recorder::new(dir_path)?),
        None => session,
    };

    session.start()?;
    let tally = session.run(&receiver)?;

    if args.autoplay {
        eprintln!(
            "End result:\n- {} wins by the human\n- {} wins by the robot\n- {} ties",
            tally.human_wins, tally.robot_wins, tally.ties
        );
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
