use std::{fs, path::PathBuf, process};

use log::{info, warn, LevelFilter};
use pagesim::{
    sweep::{self, render_table},
    trace::{self, generate_trace},
    Config, Error, Result,
};

const DEFAULT_DETAIL_FRAMES: usize = 3;
const DEFAULT_DETAIL_LEN: usize = 20;

const HELP: &str = "\
pagesim: compare FIFO and LRU page replacement

USAGE:
  pagesim [OPTIONS]

OPTIONS:
  -p <path>            Read the run configuration from a JSON file
  --config <json>      Run configuration as inline JSON
  -n <len>             Trace length
  -u <pages>           Page universe size
  -s <pages>           Working set size
  -d <accesses>        Working set dwell time
  -w <prob>            Write probability
  --min-frames <n>     Smallest frame count to simulate
  -f <n>               Largest frame count to simulate
  --seed <u64>         Seed for the trace generator
  -t <path>            Load the trace from a file (.json or .json.xz)
  --save-trace <path>  Store the trace that was used
  --json <path>        Export the sweep results as JSON
  --detail <frames>    Frames for the step-by-step replay [default: 3]
  --detail-len <n>     Accesses to replay [default: 20]
  -v                   More logging, repeatable (warn, info, debug, trace)
  -h, --help           Print this help
";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }

    let mut verbosity = 0u32;
    while args.contains("-v") {
        verbosity += 1;
    }

    let mut config = if let Some(config_str) = args.opt_value_from_str::<_, String>("--config")? {
        Config::from_json(&config_str)?
    } else if let Some(config_path) = args.opt_value_from_str::<_, PathBuf>("-p")? {
        Config::from_json(&fs::read_to_string(config_path)?)?
    } else {
        Config::default()
    };

    let generator = &mut config.generator;
    if let Some(length) = args.opt_value_from_str("-n")? {
        generator.length = length;
    }
    if let Some(universe) = args.opt_value_from_str("-u")? {
        generator.page_universe_size = universe;
    }
    if let Some(working_set) = args.opt_value_from_str("-s")? {
        generator.working_set_size = working_set;
    }
    if let Some(dwell) = args.opt_value_from_str("-d")? {
        generator.working_set_dwell = dwell;
    }
    if let Some(prob) = args.opt_value_from_str("-w")? {
        generator.write_probability = prob;
    }
    if let Some(min_frames) = args.opt_value_from_str("--min-frames")? {
        config.min_frames = min_frames;
    }
    if let Some(max_frames) = args.opt_value_from_str("-f")? {
        config.max_frames = max_frames;
    }
    if let Some(seed) = args.opt_value_from_str("--seed")? {
        config.seed = Some(seed);
    }

    let trace_path: Option<PathBuf> = args.opt_value_from_str("-t")?;
    let save_path: Option<PathBuf> = args.opt_value_from_str("--save-trace")?;
    let stats_path: Option<PathBuf> = args.opt_value_from_str("--json")?;
    let detail_arg: Option<usize> = args.opt_value_from_str("--detail")?;
    let detail_len: usize = args
        .opt_value_from_str("--detail-len")?
        .unwrap_or(DEFAULT_DETAIL_LEN);

    simplelog::TermLogger::init(
        log_level(verbosity, detail_arg.is_some()),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    )?;

    for unused in args.finish() {
        warn!("ignoring unrecognized argument {:?}", unused);
    }

    config.validate()?;
    let detail_frames = detail_arg.unwrap_or(DEFAULT_DETAIL_FRAMES);
    if detail_frames == 0 {
        return Err(Error::InvalidCapacity(0));
    }

    let accesses = match trace_path {
        Some(path) => {
            info!("loading trace from {}", path.display());
            trace::read_trace(&path)?
        }
        None => {
            let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
            info!("generating trace with seed {}: {:?}", seed, config.generator);
            generate_trace(&config.generator, &mut fastrand::Rng::with_seed(seed))?
        }
    };
    info!("trace has {} accesses", accesses.len());

    if let Some(path) = save_path {
        trace::write_trace(&path, &accesses)?;
        info!("saved trace to {}", path.display());
    }

    let rows = sweep::sweep(&accesses, config.frames(), &config.policies)?;
    println!("--- Results (page faults / disk writes) ---");
    print!("{}", render_table(&rows));

    if let Some(path) = stats_path {
        sweep::write_json(&rows, &path)?;
        info!("wrote sweep results to {}", path.display());
    }

    let head = &accesses[..detail_len.min(accesses.len())];
    println!("--- Step-by-step replay of {} accesses ---", head.len());
    for &policy in &config.policies {
        info!("--- step log: {} with {} frames ---", policy, detail_frames);
        let stats = policy.simulate_logged(head, detail_frames)?;
        println!("{} with {} frames: {}", policy, detail_frames, stats);
    }

    Ok(())
}

/// Warn by default, one level per `-v`. Asking for `--detail` explicitly
/// shows the step log even without `-v`.
fn log_level(verbosity: u32, detail_requested: bool) -> LevelFilter {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if detail_requested {
        level.max(LevelFilter::Debug)
    } else {
        level
    }
}
