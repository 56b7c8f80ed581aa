#![forbid(unsafe_code)]

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use segtree2d::{BigInt, SegTree2d, Value};

mod report;
mod script;
mod util;
use report::Report;
use script::{Command, ScriptError};
use util::HDuration;

/// Run rectangle additions and rectangle sums on a grid
///
/// Query results are printed to stdout, one per line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Initial grid: one row per line, whitespace-separated values
    #[arg(long, short = 'g', conflicts_with_all = ["height", "width"])]
    grid: Option<PathBuf>,

    /// Number of rows of an all-zero initial grid
    #[arg(long, requires = "width", required_unless_present = "grid")]
    height: Option<usize>,

    /// Number of columns of an all-zero initial grid
    #[arg(long, requires = "height")]
    width: Option<usize>,

    /// Value type of the grid cells
    #[arg(value_enum, short = 't', long, default_value_t = ValueType::I64)]
    value_type: ValueType,

    /// Print the final grid to stdout
    #[arg(long)]
    print_grid: bool,

    /// Write the query results to the given CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Always output durations as seconds (floating point)
    #[arg(long)]
    durations_as_secs: bool,

    /// Log debug messages (can be overridden by `RUST_LOG`)
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Report progress on stderr
    #[arg(long, short = 'p')]
    progress: bool,

    /// Number of operations between two progress reports
    #[arg(long, default_value_t = 100_000)]
    progress_interval: usize,

    /// Operation script(s), executed in the given order
    script: Vec<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum ValueType {
    /// 64 bit signed integers
    I64,
    /// 128 bit signed integers
    I128,
    /// Arbitrary precision integers
    Bigint,
}

/// Cell values the command line interface can read and print
trait CliValue: Value + FromStr + Display {}
impl<V: Value + FromStr + Display> CliValue for V {}

fn read(path: &Path) -> Result<String, ScriptError> {
    fs::read_to_string(path).map_err(|err| ScriptError::Io(path.to_path_buf(), err))
}

fn load_tree<V: CliValue>(cli: &Cli) -> Result<SegTree2d<V>, ScriptError> {
    let Some(path) = &cli.grid else {
        // clap ensures that both are present
        let (height, width) = (cli.height.unwrap_or(0), cli.width.unwrap_or(0));
        return SegTree2d::new(height, width).map_err(ScriptError::Dimension);
    };
    let text = read(path)?;
    let rows: Vec<Vec<V>> =
        script::parse_grid(&text).map_err(|err| ScriptError::Parse(path.clone(), err))?;
    SegTree2d::build(&rows).map_err(|err| ScriptError::Grid(path.clone(), err))
}

fn exit_with_error(err: impl Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1)
}

fn run<V: CliValue>(cli: &Cli) {
    let start = Instant::now();
    let mut tree: SegTree2d<V> = load_tree(cli).unwrap_or_else(|err| exit_with_error(err));
    log::info!(
        "{}×{} grid ready in {}",
        tree.height(),
        tree.width(),
        HDuration(start.elapsed())
    );

    let mut report = Report::new(cli.csv.as_ref()).unwrap_or_else(|err| exit_with_error(err));

    for path in &cli.script {
        let parse_start = Instant::now();
        let commands = read(path)
            .and_then(|text| {
                script::parse_script::<V>(&text)
                    .map_err(|err| ScriptError::Parse(path.clone(), err))
            })
            .unwrap_or_else(|err| exit_with_error(err));
        log::debug!(
            "parsed '{}' ({} operations) in {}",
            path.display(),
            commands.len(),
            HDuration(parse_start.elapsed())
        );

        for (line, command) in commands {
            let op = command.name();
            let value = match command {
                Command::Add { rows, cols, delta } => {
                    tree.range_add(rows, cols, delta);
                    None
                }
                Command::PointAdd { x, y, delta } => {
                    tree.point_add(x, y, delta);
                    None
                }
                Command::Sum { rows, cols } => Some(tree.range_sum(rows, cols)),
                Command::Get { x, y } => Some(tree.point_get(x, y)),
                Command::Total => Some(tree.total().clone()),
            };

            match value {
                Some(value) => {
                    println!("{value}");
                    if let Err(err) = report.query(path, line, op, &value) {
                        exit_with_error(format_args!("failed to write CSV record ({err})"));
                    }
                }
                None => report.update(),
            }

            if cli.progress && report.operations() % cli.progress_interval.max(1) == 0 {
                eprintln!(
                    "[{}] {} operations ({} queries)",
                    HDuration(report.elapsed_time()),
                    report.operations(),
                    report.queries(),
                );
            }
        }
    }

    log::info!(
        "executed {} operations ({} queries) in {}",
        report.operations(),
        report.queries(),
        HDuration(report.elapsed_time())
    );
    if let Err(err) = report.finish() {
        exit_with_error(format_args!("failed to write CSV file ({err})"));
    }

    if cli.print_grid {
        for row in tree.to_rows() {
            let row: Vec<String> = row.iter().map(ToString::to_string).collect();
            println!("{}", row.join(" "));
        }
    }

    segtree2d::print_stats();
}

fn main() {
    let cli = Cli::parse();
    util::DURATIONS_AS_SECS.store(cli.durations_as_secs, std::sync::atomic::Ordering::Relaxed);

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.value_type {
        ValueType::I64 => run::<i64>(&cli),
        ValueType::I128 => run::<i128>(&cli),
        ValueType::Bigint => run::<BigInt>(&cli),
    }
}
