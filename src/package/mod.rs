//! Archive packaging module
//!
//! Collects every file from the staging directory into one flat,
//! deflate-compressed zip archive. Member order follows filesystem
//! enumeration order of the staging directory; nothing more is guaranteed.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{SplitXError, SplitXResult};

/// Write all regular files under `staging_dir` into a zip at `archive_path`.
///
/// Entries are flat: each member is named by its file name only, since the
/// staging directory never contains subdirectories.
pub fn write_archive(staging_dir: &Path, archive_path: &Path) -> SplitXResult<()> {
    info!("Packaging archive: {}", archive_path.display());

    let file = File::create(archive_path).map_err(|e| SplitXError::Packaging {
        message: format!("Failed to create archive file: {e}"),
    })?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0usize;
    for entry in WalkDir::new(staging_dir) {
        let entry = entry.map_err(|e| SplitXError::Packaging {
            message: format!("Failed to enumerate staging directory: {e}"),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        zip.start_file(name.as_str(), options)
            .map_err(|e| SplitXError::Packaging {
                message: format!("Failed to start archive entry '{name}': {e}"),
            })?;

        let mut reader = File::open(entry.path()).map_err(|e| SplitXError::Packaging {
            message: format!("Failed to read staged file '{name}': {e}"),
        })?;
        io::copy(&mut reader, &mut zip).map_err(|e| SplitXError::Packaging {
            message: format!("Failed to write archive entry '{name}': {e}"),
        })?;

        debug!("Archived entry: {name}");
        entries += 1;
    }

    zip.finish().map_err(|e| SplitXError::Packaging {
        message: format!("Failed to finalize archive: {e}"),
    })?;

    info!("Archive written with {entries} entries");
    Ok(())
}
