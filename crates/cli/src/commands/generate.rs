use std::{path::PathBuf, str::FromStr};

use anyhow::{Context, Result, bail};
use gray4_generator::{
    CharSet, DEFAULT_WEIGHT, EmitOptions, GeneratedFont, GenerateOptions, emit_rust, generate,
    load_font,
};
use log::info;

use crate::{cli::OutputArgs, io::SourceFile};

/// One font to convert.
#[derive(Debug, Clone, PartialEq)]
pub struct FontJob {
    pub font_path: PathBuf,
    pub size: u32,
    pub output_name: String,
    pub weight: f32,
    pub charset: CharSet,
}

impl FontJob {
    pub fn new(font_path: impl Into<PathBuf>, size: u32, output_name: impl Into<String>) -> Self {
        Self {
            font_path: font_path.into(),
            size,
            output_name: output_name.into(),
            weight: DEFAULT_WEIGHT,
            charset: CharSet::default(),
        }
    }

    /// Requested weight; clamped to the font's axis range during conversion.
    pub fn weight(mut self, weight: i32) -> Self {
        self.weight = weight as f32;
        self
    }

    pub fn charset(mut self, charset: CharSet) -> Self {
        self.charset = charset;
        self
    }

    fn options(&self) -> GenerateOptions {
        GenerateOptions::new(self.size)
            .weight(self.weight)
            .charset(self.charset.clone())
    }

    fn emit_options(&self, output: &OutputArgs) -> EmitOptions {
        EmitOptions {
            import_path: output.import_path.clone(),
            source_name: self
                .font_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            pixel_size: Some(self.size),
            weight: Some(self.weight),
        }
    }
}

/// `PATH:SIZE:NAME[:WEIGHT]`
impl FromStr for FontJob {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let (path, size, name, weight) = match parts.as_slice() {
            [path, size, name] => (path, size, name, None),
            [path, size, name, weight] => (path, size, name, Some(weight)),
            _ => bail!("expected PATH:SIZE:NAME[:WEIGHT]: {s}"),
        };

        if path.is_empty() || name.is_empty() {
            bail!("expected PATH:SIZE:NAME[:WEIGHT]: {s}");
        }
        let size: u32 = size.parse().with_context(|| format!("invalid size: {size}"))?;

        let mut job = FontJob::new(*path, size, *name);
        if let Some(weight) = weight {
            let weight: i32 = weight.parse().with_context(|| format!("invalid weight: {weight}"))?;
            job = job.weight(weight);
        }
        Ok(job)
    }
}

/// Convert one font and write `OUT_DIR/<name>.rs`.
pub fn generate_font(job: &FontJob, output: &OutputArgs) -> Result<PathBuf> {
    let font = convert(job)?;
    let source = emit_rust(&font.asset, &job.output_name, &job.emit_options(output))
        .with_context(|| format!("Failed to emit {}", job.output_name))?;

    let file = SourceFile::module(&output.out_dir, &job.output_name);
    file.write(source)?;

    info!("Generated {}", file.path().display());
    info!("Total data size: {} bytes", font.asset.data_size());
    Ok(file.path().to_path_buf())
}

fn convert(job: &FontJob) -> Result<GeneratedFont> {
    let data = load_font(&job.font_path)?;
    info!(
        "Converting {} at {}px, weight {}",
        job.font_path.display(),
        job.size,
        job.weight
    );
    generate(&data, &job.options())
        .with_context(|| format!("Failed to convert {}", job.font_path.display()))
}
