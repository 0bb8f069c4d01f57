//! Atomic file rewrites
//!
//! Edited files are rewritten whole. To avoid leaving a half-written file
//! behind, content goes to a sibling temp file first, is synced, and is then
//! renamed over the target. Symlinks are followed to the real file and the
//! target's permission bits are carried over to the new contents.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Suffix of in-flight temp files
pub const TEMP_SUFFIX: &str = ".edit-tmp";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique temp path next to `path`: `dir/.name.<pid>-<n>.edit-tmp`
pub fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{name}.{}-{n}{TEMP_SUFFIX}", std::process::id()))
}

/// Whether `name` looks like a file produced by [`temp_path_for`]
fn is_temp_name(name: &str) -> bool {
    let Some(stem) = name
        .strip_prefix('.')
        .and_then(|rest| rest.strip_suffix(TEMP_SUFFIX))
    else {
        return false;
    };
    let Some((_, tag)) = stem.rsplit_once('.') else {
        return false;
    };
    let Some((pid, n)) = tag.split_once('-') else {
        return false;
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    digits(pid) && digits(n)
}

/// Atomically replace the contents of `path`.
///
/// If `path` is a symlink the file it points to is rewritten and the link is
/// left in place.
pub async fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    let target = match fs::canonicalize(path).await {
        Ok(real) => real,
        Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(e),
    };
    let permissions = match fs::metadata(&target).await {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };

    let temp_path = temp_path_for(&target);
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .await?;

    let written = async {
        write_and_sync(&mut file, content).await?;
        drop(file);
        if let Some(permissions) = permissions {
            fs::set_permissions(&temp_path, permissions).await?;
        }
        fs::rename(&temp_path, &target).await
    }
    .await;

    if written.is_err() {
        let _ = fs::remove_file(&temp_path).await;
    }
    written
}

async fn write_and_sync(file: &mut fs::File, content: &str) -> std::io::Result<()> {
    file.write_all(content.as_bytes()).await?;
    file.sync_all().await
}

/// Remove temp files left behind by an interrupted rewrite, anywhere under
/// `dir`. Symlinked directories are not followed.
pub fn cleanup_temp_files(dir: &Path) -> std::io::Result<usize> {
    let mut cleaned = 0;

    if !dir.is_dir() {
        return Ok(0);
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();

        if file_type.is_dir() {
            cleaned += cleanup_temp_files(&path)?;
        } else if file_type.is_file() && is_temp_name(&entry.file_name().to_string_lossy()) {
            std::fs::remove_file(&path)?;
            cleaned += 1;
        }
    }

    Ok(cleaned)
}
