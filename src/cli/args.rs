use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use inkprep::{EnumerationOrder, ResizeFilter, Rgb};

#[derive(Parser)]
#[command(name = "inkprep", version, about = "Fetch archive images and fit them to an e-ink canvas")]
pub struct CliArgs {
    /// Verbose (debug) logging; RUST_LOG overrides
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download every identifier of a source list into a working directory
    Fetch(FetchArgs),
    /// Fit every image of a directory onto a fixed canvas, numbered 1.jpg, 2.jpg, ...
    Normalize(NormalizeArgs),
}

#[derive(Args)]
pub struct FetchArgs {
    /// Comma-separated list file; the first field of each row is the identifier
    #[arg(short, long, default_value = "urls.csv")]
    pub sources: PathBuf,

    /// Directory the downloads are written to
    #[arg(short, long, default_value = "raw_images")]
    pub working_dir: PathBuf,

    /// Path appended to each identifier to form the download URL
    #[arg(long, default_value = "/datastream/OBJ/view")]
    pub url_suffix: String,

    /// Local file name is the identifier segment after this character
    #[arg(long, default_value_t = '%')]
    pub delimiter: char,

    /// Stop at the first download failure
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    /// Write the batch report as JSON
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Directory with the source images
    #[arg(short, long)]
    pub input_dir: PathBuf,

    /// Directory for the numbered outputs (created if missing)
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// JSON canvas profile; the flags below override its fields
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Canvas width in pixels [default: 825]
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels [default: 1200]
    #[arg(long)]
    pub height: Option<u32>,

    /// Background as R,G,B or #RRGGBB [default: 4,4,4]
    #[arg(long)]
    pub background: Option<Rgb>,

    /// JPEG quality 1-100 [default: 75]
    #[arg(long)]
    pub quality: Option<u8>,

    /// Resampling filter used when shrinking
    #[arg(long, value_enum)]
    pub filter: Option<ResizeFilter>,

    /// Order that decides output numbering
    #[arg(long, value_enum, default_value_t = EnumerationOrder::Name)]
    pub order: EnumerationOrder,

    /// Stop at the first image that cannot be written
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    /// Write the batch report as JSON
    #[arg(long)]
    pub report: Option<PathBuf>,
}
