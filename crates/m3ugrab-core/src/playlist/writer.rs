//! Atomic playlist output.
//!
//! Renders land in a `.part` sibling first and are renamed into place, so a
//! failed run never leaves a truncated playlist at the target path.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path
/// (e.g. `canais.m3u` → `canais.m3u.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Write `contents` to `final_path` atomically: create the `.part` sibling,
/// write, fsync, rename. Any failure is `Error::Output` and leaves whatever
/// was previously at `final_path` untouched.
pub fn write_atomic(final_path: &Path, contents: &str) -> Result<()> {
    let tmp = temp_path(final_path);
    let output_err = |source: std::io::Error| Error::Output {
        path: final_path.to_path_buf(),
        source,
    };

    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, final_path)
    })();

    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(output_err(source));
    }
    Ok(())
}
