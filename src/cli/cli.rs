use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use polyominoes::{export, kind::DependencyGraph, Enumeration, Kind};

mod count;
use count::count;

mod dump;
use dump::dump;

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn finish_bar(bar: &ProgressBar, duration: Duration, message: &str) {
    let time = duration.as_micros();
    let secs = time / 1_000_000;
    let micros = time % 1_000_000;

    if let Some(len) = bar.length() {
        let pos_width = format!("{}", len).len();

        let template = format!(
            "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos:>{pos_width}}}/{{len}} {{msg}}"
        );

        bar.set_style(style(&template).progress_chars("#>-"));
    }

    bar.finish_with_message(format!("Done! {message} in {secs}.{micros:06} s"));
}

fn unknown_bar() -> ProgressBar {
    let style = style("[{elapsed_precise}] [{spinner:10.cyan/blue}] {msg}").tick_strings(&[
        ">---------",
        "=>--------",
        "<=>-------",
        "-<=>------",
        "--<=>-----",
        "---<=>----",
        "----<=>---",
        "-----<=>--",
        "------<=>-",
        "-------<=>",
        "--------<=",
        "---------<",
        "--------<=",
        "-------<=>",
        "------<=>-",
        "-----<=>--",
        "---<=>----",
        "--<=>-----",
        "-<=>------",
        "<=>-------",
        "=>--------",
    ]);

    let bar = ProgressBar::new(100).with_style(style);

    bar.enable_steady_tick(Duration::from_millis(66));

    bar
}

pub fn make_bar(len: u64) -> indicatif::ProgressBar {
    let bar = ProgressBar::new(len);

    let template = "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>8}/{len:8} {msg} remaining: [{eta_precise}]";

    bar.set_style(style(template).progress_chars("#>-"));
    bar
}

/// Print `error` and exit with a failure status.
fn fail(error: impl std::fmt::Display) -> ! {
    eprintln!("Error: {error}");
    std::process::exit(1);
}

#[derive(Clone, Parser)]
pub enum Opts {
    /// Count polyominoes of several kinds, one table row per order
    Count(CountOpts),
    /// Write every polyomino of one kind and order
    Dump(DumpOpts),
    /// Print which kind is computed from which, as JSON
    Dependencies,
}

#[derive(Clone, Args)]
pub struct EnumerationOpts {
    /// How fixed polyominoes are generated.
    #[clap(long, short = 'm', value_enum, default_value = "incremental")]
    pub mode: EnumerationMode,

    /// Expand every order in parallel.
    #[clap(long, short = 'p')]
    pub parallel: bool,

    /// Reduce orbits without remembering the shapes already seen.
    #[clap(long)]
    pub no_history: bool,
}

#[derive(Clone, Args)]
pub struct CountOpts {
    /// The first order to print.
    #[clap(long, default_value_t = 0)]
    pub min_order: usize,

    /// The last order to print. Runs until interrupted if absent.
    #[clap(long)]
    pub max_order: Option<usize>,

    /// The columns of the table, e.g. `free-without-holes`.
    #[clap(
        long,
        short = 'c',
        num_args = 1..,
        value_parser = parse_kind,
        default_values_t = [Kind::Order, Kind::Fixed, Kind::OneSided, Kind::Free],
    )]
    pub columns: Vec<Kind>,

    /// Table layout.
    #[clap(long, short = 'f', value_enum, default_value = "csv")]
    pub format: TableFormat,

    #[clap(flatten)]
    pub enumeration: EnumerationOpts,

    /// Compare every count with the known sequences and stop at the first mismatch.
    #[clap(long)]
    pub verify: bool,

    /// Show expansion progress.
    #[clap(long)]
    pub progress: bool,
}

#[derive(Clone, Args)]
pub struct DumpOpts {
    /// The order of the polyominoes to write.
    pub n: usize,

    /// The kind of polyominoes to write.
    #[clap(long, short = 'k', value_parser = parse_kind, default_value = "free")]
    pub kind: Kind,

    /// How each polyomino is written.
    #[clap(long, short = 'f', value_enum, default_value = "coordinates")]
    pub format: ShapeFormat,

    /// Compress the output.
    #[clap(long, short = 'z', value_enum, default_value = "none")]
    pub compression: Compression,

    /// The file to write to. Defaults to stdout.
    #[clap(long, short = 'o')]
    pub output_path: Option<PathBuf>,

    #[clap(flatten)]
    pub enumeration: EnumerationOpts,
}

fn parse_kind(name: &str) -> Result<Kind, polyominoes::Error> {
    name.parse()
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EnumerationMode {
    Incremental,
    Redelmeier,
}

impl From<EnumerationMode> for Enumeration {
    fn from(value: EnumerationMode) -> Self {
        match value {
            EnumerationMode::Incremental => Enumeration::Incremental,
            EnumerationMode::Redelmeier => Enumeration::Redelmeier,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Md,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ShapeFormat {
    Coordinates,
    Bitstring,
    Json,
    Drawing,
}

impl From<ShapeFormat> for export::Format {
    fn from(value: ShapeFormat) -> Self {
        match value {
            ShapeFormat::Coordinates => export::Format::Coordinates,
            ShapeFormat::Bitstring => export::Format::Bitstring,
            ShapeFormat::Json => export::Format::Json,
            ShapeFormat::Drawing => export::Format::Drawing,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Compression {
    None,
    Gzip,
}

impl From<Compression> for export::Compression {
    fn from(value: Compression) -> Self {
        match value {
            Compression::None => export::Compression::None,
            Compression::Gzip => export::Compression::Gzip,
        }
    }
}

fn dependencies() {
    match DependencyGraph::new().to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => fail(e),
    }
}

fn main() {
    let opts = Opts::parse();

    match opts {
        Opts::Count(c) => count(&c),
        Opts::Dump(d) => dump(&d),
        Opts::Dependencies => dependencies(),
    }
}
