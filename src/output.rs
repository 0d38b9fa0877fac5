use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DataMineError, Result};

/// Writes `content` verbatim to `output_dir/filename`.
///
/// The bytes go to a temporary file in `output_dir` first and are renamed
/// into place once fully written, so a failed write leaves no file behind.
pub fn write_bytes(output_dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let output_path = output_dir.join(filename);
    log::info!("Writing {} bytes to {:?}", content.len(), output_path);

    let io_err = |source| DataMineError::Io {
        path: output_path.clone(),
        source,
    };

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    // tempfile defaults to 0600; match a plain create, which the umask narrows.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut file = builder.tempfile_in(output_dir).map_err(io_err)?;
    file.write_all(content).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    file.persist(&output_path).map_err(|e| io_err(e.error))?;

    Ok(output_path)
}
