//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gray4_generator::CharSet;

use crate::commands::{FontJob, generate_batch, generate_font, show_info};

#[derive(Parser)]
#[command(name = "gray4-fonts", version)]
#[command(about = "Generate Gray4 anti-aliased bitmap fonts with minimal line height")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct OutputArgs {
    /// Directory receiving the generated modules
    #[arg(long, default_value = "generated")]
    pub out_dir: PathBuf,
    /// Module path the generated code imports GlyphInfo and Gray4Font from
    #[arg(long, default_value = "gray4_font")]
    pub import_path: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a TrueType/OpenType font into a Gray4 Rust module
    Generate {
        /// Path to the TrueType/OpenType font file
        font_path: PathBuf,
        /// Font size in pixels
        size: u32,
        /// Output module name (e.g., noto_sans_24_regular)
        output_name: String,
        /// Font weight for variable fonts (300=Light, 400=Regular, 700=Bold)
        #[arg(long, default_value_t = 400, allow_negative_numbers = true)]
        weight: i32,
        /// Characters to include (default: printable ASCII)
        #[arg(long)]
        chars: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show variation axes and line metrics of a font
    Info {
        font_path: PathBuf,
        #[arg(long, default_value_t = 24)]
        size: u32,
        #[arg(long, default_value_t = 400, allow_negative_numbers = true)]
        weight: i32,
    },
    /// Convert several fonts in parallel and write a mod.rs index
    Batch {
        /// Jobs as PATH:SIZE:NAME[:WEIGHT]
        #[arg(required = true)]
        jobs: Vec<FontJob>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Generate { font_path, size, output_name, weight, chars, output } => {
                let mut job = FontJob::new(font_path, size, output_name).weight(weight);
                if let Some(chars) = chars {
                    job = job.charset(CharSet::from(chars.as_str()));
                }
                generate_font(&job, &output)?;
            }
            Commands::Info { font_path, size, weight } => {
                show_info(&font_path, size, weight)?;
            }
            Commands::Batch { jobs, output } => {
                generate_batch(&jobs, &output)?;
            }
        }
        Ok(())
    }
}
