use std::error::Error;
use std::fs;
use std::thread;
use std::time::Duration;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use school_sim::config::load_school;
use school_sim::scheduler::{DailyScheduler, GraduationPolicy};
use school_sim::simulation::{ChurnConfig, Simulation};

const USAGE: &str = "usage: school-sim <config> <days> [--seed N] [--delay-ms N] [--churn FILE] [--graduate-first]";

struct Args {
    config: String,
    days: u32,
    seed: Option<u64>,
    delay_ms: u64,
    churn: Option<String>,
    graduate_first: bool,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut positional = Vec::new();
    let mut seed = None;
    let mut delay_ms = 0;
    let mut churn = None;
    let mut graduate_first = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = Some(args.next().ok_or(USAGE)?.parse()?),
            "--delay-ms" => delay_ms = args.next().ok_or(USAGE)?.parse()?,
            "--churn" => churn = Some(args.next().ok_or(USAGE)?),
            "--graduate-first" => graduate_first = true,
            "-h" | "--help" => return Err(USAGE.into()),
            _ => positional.push(arg),
        }
    }

    let [config, days] = <[String; 2]>::try_from(positional).map_err(|_| USAGE)?;
    Ok(Args {
        config,
        days: days.parse()?,
        seed,
        delay_ms,
        churn,
        graduate_first,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;

    let loaded = load_school(&args.config)?;
    if !loaded.skipped.is_empty() {
        warn!(
            "{} config lines skipped in {}",
            loaded.skipped.len(),
            args.config
        );
    }
    info!("Loaded {}", loaded.school);

    let churn = match &args.churn {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => ChurnConfig::default(),
    };

    let policy = if args.graduate_first {
        GraduationPolicy::FirstEligible
    } else {
        GraduationPolicy::AllEligible
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Random seed {seed}");

    let mut sim = Simulation::new(loaded.school, SmallRng::seed_from_u64(seed))
        .with_scheduler(DailyScheduler::new().with_graduation_policy(policy))
        .with_churn(churn);

    let delay = Duration::from_millis(args.delay_ms);
    sim.run(args.days, |sim, _| {
        println!("{}", sim.status());
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    });

    println!("Simulation Over");
    Ok(())
}
