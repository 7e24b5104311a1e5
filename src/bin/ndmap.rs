//! Prints the mapping between the coordinates and the linear indices of a
//! shape.

use std::io::{Write};

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use ndindex::{Mapping, Shape};

#[derive(Parser, Debug)]
#[command(version, about = "Map N-dimensional coordinates to linear indices and back.")]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every coordinate with its storage offset, in row-major order.
    Forward(ShapeArgs),

    /// Print every logical index with its coordinate.
    Inverse(ShapeArgs),

    /// Print the storage offset of one coordinate.
    Linear {
        #[command(flatten)]
        shape: ShapeArgs,

        /// The coordinate, first dimension first.
        #[arg(long, required = true, value_delimiter = ',')]
        coord: Vec<usize>,
    },

    /// Print the coordinate of one logical index.
    Coord {
        #[command(flatten)]
        shape: ShapeArgs,

        #[arg(long)]
        index: usize,
    },
}

#[derive(Args, Debug)]
struct ShapeArgs {
    /// Extent of each dimension, first dimension first.
    #[arg(required = true, num_args = 1.., value_delimiter = ',')]
    extents: Vec<usize>,

    /// Explicit stride of each dimension, e.g. to describe padded rows.
    #[arg(long, value_delimiter = ',', conflicts_with = "column_major")]
    strides: Option<Vec<usize>>,

    /// Derive column-major strides instead of row-major ones.
    #[arg(long)]
    column_major: bool,
}

impl ShapeArgs {
    fn build(&self) -> ndindex::Result<Shape> {
        let extents = self.extents.as_slice();
        match &self.strides {
            Some(strides) => Shape::with_strides(extents, strides.as_slice()),
            None if self.column_major => Shape::column_major(extents),
            None => Shape::new(extents),
        }
    }
}

/// Formats a coordinate as `[x0 x1 ...]`.
fn show(coordinate: &[usize]) -> String {
    let parts: Vec<String> = coordinate.iter().map(usize::to_string).collect();
    format!("[{}]", parts.join(" "))
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(command: Command, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Forward(args) => {
            let shape = args.build()?;
            log::info!("dimensions: {}", shape);
            log::info!("total elements: {}", shape.total_elements());
            for (coordinate, offset) in shape.enumerate() {
                writeln!(out, "{} -> {}", show(&coordinate), offset)?;
            }
        },
        Command::Inverse(args) => {
            let shape = args.build()?;
            log::info!("dimensions: {}", shape);
            log::info!("total elements: {}", shape.total_elements());
            for index in 0..shape.total_elements() {
                writeln!(out, "{} -> {}", index, show(&shape.to_coordinate(index)?))?;
            }
        },
        Command::Linear {shape, coord} => {
            let shape = shape.build()?;
            writeln!(out, "{}", shape.to_linear(&coord)?)?;
        },
        Command::Coord {shape, index} => {
            let shape = shape.build()?;
            writeln!(out, "{}", show(&shape.to_coordinate(index)?))?;
        },
    }
    Ok(())
}

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &mut out)
}

// ----------------------------------------------------------------------------
