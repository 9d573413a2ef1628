//! Decision Wheel entry point
//!
//! Spins the wheel from the command line, either flat out or paced at the
//! display rate, and prints the winner(s).

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;

use decision_wheel::consts::FRAME_RATE;
use decision_wheel::sim::{DEFAULT_LABELS, RngState, TickResult, Wheel, run_to_completion, tick};
use decision_wheel::{ResultTally, SpinSettings, SuspenseLevel, TurnRange};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Spin a fair decision wheel.")]
struct Args {
    /// Choices on the wheel (2-8; blanks dropped, extras ignored)
    #[arg(short, long, num_args = 1.., value_delimiter = ',')]
    labels: Vec<String>,

    /// Suspense preset: low (3-5 turns), medium (6-8), high (8-12)
    #[arg(short, long, value_parser = parse_level)]
    suspense: Option<SuspenseLevel>,

    /// Minimum target turns (overrides the preset; the range must span at least one turn)
    #[arg(long)]
    min_turns: Option<f64>,

    /// Maximum target turns (overrides the preset)
    #[arg(long)]
    max_turns: Option<f64>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<std::path::PathBuf>,

    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of spins
    #[arg(short = 'n', long, default_value_t = 1)]
    spins: u64,

    /// Pace ticks at the display rate and show progress
    #[arg(long)]
    animate: bool,

    /// Print outcomes and the tally as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_level(s: &str) -> Result<SuspenseLevel, String> {
    SuspenseLevel::from_str(s).ok_or_else(|| format!("unknown suspense level '{s}' (low, medium, high)"))
}

fn build_settings(args: &Args) -> Result<SpinSettings> {
    let mut settings = match &args.settings {
        Some(path) => SpinSettings::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SpinSettings::default(),
    };

    if let Some(level) = args.suspense {
        settings.apply_preset(level);
    }
    if args.min_turns.is_some() || args.max_turns.is_some() {
        let min = args.min_turns.unwrap_or(settings.turn_range.min);
        let max = args.max_turns.unwrap_or(settings.turn_range.max);
        settings.turn_range = TurnRange::new(min, max)?;
    }

    settings.validate()?;
    Ok(settings)
}

/// Run one spin at the display rate, redrawing a status line each frame
fn animate_spin(wheel: &mut Wheel, rng: &mut rand_pcg::Pcg32) -> Result<Option<decision_wheel::sim::Outcome>> {
    let frame = Duration::from_secs_f64(1.0 / FRAME_RATE);
    let mut stdout = std::io::stdout();

    loop {
        let started = Instant::now();
        match tick(wheel, rng) {
            TickResult::Idle => return Ok(None),
            TickResult::Stopped(outcome) => {
                writeln!(stdout)?;
                return Ok(Some(outcome));
            }
            TickResult::Spinning { turns, .. } => {
                let bar = "*".repeat((wheel.spin_intensity() * 20.0).round() as usize);
                write!(stdout, "\rTour {turns:.1}... {bar:<20}")?;
                stdout.flush()?;
            }
        }
        if let Some(rest) = frame.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if args.spins == 0 {
        bail!("--spins must be at least 1");
    }

    let settings = build_settings(&args)?;
    let labels: Vec<String> = if args.labels.is_empty() {
        DEFAULT_LABELS.iter().map(|s| s.to_string()).collect()
    } else {
        args.labels.clone()
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Decision wheel starting with seed {}", seed);

    let mut wheel = Wheel::with_labels(&labels, settings);
    let mut rng = RngState::new(seed).to_rng();
    let mut tally = ResultTally::new();

    if !args.json {
        println!(
            "Wheel: {}",
            wheel.segments().labels().collect::<Vec<_>>().join(" | ")
        );
    }

    for _ in 0..args.spins {
        wheel.spin(&mut rng);
        let outcome = if args.animate {
            animate_spin(&mut wheel, &mut rng)?
        } else {
            run_to_completion(&mut wheel, &mut rng)
        };
        let Some(outcome) = outcome else {
            bail!("spin finished without an outcome");
        };

        tally.record(&outcome);
        if args.json {
            println!("{}", serde_json::to_string(&outcome)?);
        } else if args.spins == 1 || args.animate {
            println!(
                "Le choix gagnant est : {} ({:.1} turns, {} ticks)",
                outcome.label, outcome.turns, outcome.ticks
            );
        }
    }

    if args.spins > 1 {
        if args.json {
            println!("{}", serde_json::to_string(&tally)?);
        } else {
            println!("{} spins (seed {})", tally.total(), seed);
            for share in tally.distribution() {
                println!("  {:<24} {:>8} {:>6.2}%", share.label, share.count, share.percent);
            }
            println!("  chi-square: {:.3}", tally.chi_square(wheel.segments()));
        }
    }

    Ok(())
}
