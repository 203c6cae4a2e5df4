use std::fs::{copy, create_dir_all};
use std::path::Path;

use tracing::info;

use crate::engine::PipelineError;

/// Copies the input file into the staging directory ahead of ingestion.
///
/// The copy is an archive of what was ingested; the run still reads `input_file`.
pub fn stage_input(input_file: &Path, staging_directory: &Path) -> Result<(), PipelineError> {
    let preparation_error = |source| PipelineError::Preparation {
        path: input_file.to_path_buf(),
        source
    };

    let file_name = input_file.file_name().ok_or_else(|| {
        preparation_error(std::io::Error::new(std::io::ErrorKind::InvalidInput, "input path has no file name"))
    })?;

    create_dir_all(staging_directory).map_err(preparation_error)?;

    let staged = staging_directory.join(file_name);
    copy(input_file, &staged).map_err(preparation_error)?;

    info!("Input staged at {}", staged.display());

    Ok(())
}
