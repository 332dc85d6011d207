use std::path::PathBuf;

use anyhow::Result;
use gray4_generator::emit_mod_index;
use log::info;

use crate::{
    cli::OutputArgs,
    commands::generate::{FontJob, generate_font},
    io::SourceFile,
    parallel::{BatchResult, collect_parallel},
};

/// Convert every job in parallel, then write a `mod.rs` for the modules that succeeded.
pub fn generate_batch(jobs: &[FontJob], output: &OutputArgs) -> Result<BatchResult> {
    info!("Generating {} fonts into {}", jobs.len(), output.out_dir.display());

    let results: Vec<Result<PathBuf>> = collect_parallel(jobs, |job| generate_font(job, output));
    let batch = BatchResult::from_results(&results);

    let names: Vec<&str> = jobs
        .iter()
        .zip(&results)
        .filter(|(_, result)| result.is_ok())
        .map(|(job, _)| job.output_name.as_str())
        .collect();
    if !names.is_empty() {
        let index = SourceFile::module(&output.out_dir, "mod");
        index.write(emit_mod_index(&names))?;
        info!("Wrote {}", index.path().display());
    }

    println!("Batch: {} of {} fonts generated", batch.succeeded, batch.total());
    batch.ok_or_bail("Batch")?;
    Ok(batch)
}
