//! spangled - flag layouts and SVG generation
//!
//! Usage:
//!   spangled svg <nstars> [options]        Draw the best flag for a star count
//!   spangled layouts <nstars> [options]    Rank every star arrangement
//!   spangled measure <a,b,c,d> [options]   Exact flag dimensions
//!   spangled kinds                         List arrangement kinds
//!   spangled inspect <file.svg>            Summarize a generated flag

use std::env;
use std::process;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

use cli::{cmd_inspect, cmd_kinds, cmd_layouts, cmd_measure, cmd_svg};

fn main() {
    let args: Vec<String> = env::args().collect();
    let verbose = args.iter().any(|arg| arg == "-v" || arg == "--verbose");
    let args: Vec<String> = args
        .into_iter()
        .filter(|arg| arg != "-v" && arg != "--verbose")
        .collect();
    init_tracing(verbose);

    let prog = args.first().map(String::as_str).unwrap_or("spangled");
    let Some(command) = args.get(1) else {
        print_usage(prog);
        process::exit(1);
    };

    let rest = &args[2..];
    let result = match command.as_str() {
        "svg" => cmd_svg(rest),
        "layouts" => cmd_layouts(rest),
        "measure" => cmd_measure(rest),
        "kinds" => cmd_kinds(),
        "inspect" => cmd_inspect(rest),
        "help" | "--help" | "-h" => {
            print_usage(prog);
            return;
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage(prog);
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` picks the level unless `-v` asks for debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn print_usage(prog: &str) {
    eprintln!("spangled - star layouts and exact proportions for flags");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} svg <nstars> [options]");
    eprintln!("  {prog} layouts <nstars> [options]");
    eprintln!("  {prog} measure <a,b,c,d | nstars> [options]");
    eprintln!("  {prog} kinds");
    eprintln!("  {prog} inspect <file.svg> [--json]");
    eprintln!();
    eprintln!("Layout options:");
    eprintln!("  -f, --factor <p/q>     Canton width over height (default: 247/175)");
    eprintln!("  -k, --kinds <k1,k2>    Only these arrangement kinds (see `kinds`)");
    eprintln!("  --cubes                Also consider cube arrangements");
    eprintln!("  --quincunx             Classify equal-length rows as quincunx");
    eprintln!("  -n, --limit <n>        Show at most n layouts");
    eprintln!();
    eprintln!("Flag options:");
    eprintln!("  -s, --stripes <n>      Number of stripes (default: 13)");
    eprintln!("  --proportional         Size stars by the distance between them");
    eprintln!("  -p, --palette <name>   default, saturated, black_and_grey");
    eprintln!("  --colors <a,b,c,d>     Outer stripes, inner stripes, canton, stars");
    eprintln!("  --width <len>          Document width (e.g. 950, 19cm)");
    eprintln!("  --height <len>         Document height, used when no width is given");
    eprintln!("  --max-value <n>        Largest integer in the document (default: 16777216)");
    eprintln!("  --exact                Never round the star diameter");
    eprintln!("  --round                Round the star diameter instead of approximating it");
    eprintln!();
    eprintln!("General options:");
    eprintln!("  -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("  --json                 JSON output for layouts, measure and inspect");
    eprintln!("  --config <file.yaml>   Read defaults from a YAML file; flags override it");
    eprintln!("  -v, --verbose          Debug logging (otherwise RUST_LOG, default: warn)");
}
