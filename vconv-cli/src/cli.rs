// vconv-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vconv_core::config::DEFAULT_ENCODER;
use vconv_core::{Codec, ProresProfile};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vconv: batch video codec converter",
    long_about = "Converts every video in a folder to the chosen codec with ffmpeg, \
                  writing results to a 'converted' subfolder and failures to a diagnostic log."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug output
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts every video file in a folder
    Convert(ConvertArgs),

    /// Lists the supported codecs and ProRes profiles
    Codecs,
}

#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    /// Folder containing the videos (mp4, avi, mkv, mov)
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Video codec: libx264, libx265, libvpx-vp9 or prores_ks
    #[arg(short, long, value_name = "CODEC")]
    pub codec: Option<Codec>,

    /// ProRes profile (0-3 or proxy, lt, normal, hq). Only used with prores_ks
    #[arg(short, long, value_name = "PROFILE")]
    pub profile: Option<ProresProfile>,

    /// Encoder binary to run
    #[arg(long, value_name = "PATH", env = "VCONV_ENCODER", default_value = DEFAULT_ENCODER)]
    pub encoder: PathBuf,

    /// Directory for diagnostic logs (defaults to the output folder)
    #[arg(short, long, value_name = "LOG_DIR", env = "VCONV_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Keep existing output files; a file whose output exists fails
    #[arg(long)]
    pub no_overwrite: bool,

    /// Emit run events as JSON lines on stdout
    #[arg(long)]
    pub json: bool,
}
