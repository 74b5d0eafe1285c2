use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::data::event::EventBatch;
use crate::error::SigmacResult;
use crate::workflow::SigmacOutput;

/// Read an event batch from a JSON file.
pub fn read_event_batch(path: &Path) -> SigmacResult<EventBatch> {
    let reader = BufReader::new(File::open(path)?);
    let batch: EventBatch = serde_json::from_reader(reader)?;
    log::info!(
        "Loaded {} collisions, {} tracks, {} Λc candidates, {} generated particles from {}",
        batch.collisions.len(),
        batch.tracks.len(),
        batch.lc_candidates.len(),
        batch.mc_particles.len(),
        path.display()
    );
    Ok(batch)
}

/// Write the output tables as one JSON document.
pub fn write_output(path: &Path, output: &SigmacOutput) -> SigmacResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, output)?;
    writer.flush()?;
    log::info!("Wrote {} Σc candidates to {}", output.tables.len(), path.display());
    Ok(())
}
