//! Output directory - 出力ディレクトリの準備
//!
//! # フロー
//! 1. `metadata` で状態を調べる
//! 2. 無ければ親ごと作る（あればそのまま使い、中身には触れない）
//! 3. ディレクトリ以外が置かれていたらエラー（置き換えない）
//! 4. 一時ファイルを作って消し、実際に書き込めることを確かめる

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SetupError;

/// Well-known output location inside the container image.
pub const DEFAULT_OUTPUT_DIR: &str = "/app/output";

/// An output directory that exists and accepted a test write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedOutput {
    path: PathBuf,
    created: bool,
}

impl PreparedOutput {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `true` when this call created the directory.
    pub fn created(&self) -> bool {
        self.created
    }
}

/// Make sure `path` is an existing, writable directory.
///
/// Idempotent: an existing directory is accepted and its contents are left
/// alone. A non-directory at `path` is an error and is never replaced.
pub fn ensure_output_dir(path: &Path) -> Result<PreparedOutput, SetupError> {
    let created = match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => false,
        Ok(_) => return Err(SetupError::NotADirectory(path.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|source| SetupError::Create {
                path: path.to_path_buf(),
                source,
            })?;
            true
        }
        Err(source) => {
            return Err(SetupError::Inspect {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    check_writable(path)?;
    debug!(path = %path.display(), created, "output directory ready");

    Ok(PreparedOutput {
        path: path.to_path_buf(),
        created,
    })
}

// The scratch file is removed when dropped, so the directory listing is unchanged.
fn check_writable(path: &Path) -> Result<(), SetupError> {
    tempfile::Builder::new()
        .prefix(".batchbox-write-check-")
        .tempfile_in(path)
        .map(drop)
        .map_err(|source| SetupError::NotWritable {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn creates_missing_directory_including_parents() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("app").join("output");

        let prepared = ensure_output_dir(&out).unwrap();

        assert!(out.is_dir());
        assert!(prepared.created());
        assert_eq!(prepared.path(), out.as_path());
        assert!(listing(&out).is_empty());
    }

    #[test]
    fn existing_directory_is_accepted_and_untouched() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("previous.xml"), "keep me").unwrap();

        let prepared = ensure_output_dir(root.path()).unwrap();

        assert!(!prepared.created());
        assert_eq!(listing(root.path()), vec!["previous.xml".to_string()]);
        assert_eq!(
            fs::read_to_string(root.path().join("previous.xml")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn second_call_is_a_no_op() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("output");

        let first = ensure_output_dir(&out).unwrap();
        fs::write(out.join("result.txt"), "1").unwrap();
        let before = listing(&out);
        let second = ensure_output_dir(&out).unwrap();

        assert!(first.created());
        assert!(!second.created());
        assert_eq!(listing(&out), before);
    }

    #[test]
    fn regular_file_in_place_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("output");
        fs::write(&out, "not a dir").unwrap();

        let err = ensure_output_dir(&out).unwrap_err();

        assert!(matches!(err, SetupError::NotADirectory(p) if p == out));
        assert_eq!(fs::read_to_string(&out).unwrap(), "not a dir");
    }

    #[test]
    fn file_as_parent_fails_creation() {
        let root = tempfile::tempdir().unwrap();
        let parent = root.path().join("app");
        fs::write(&parent, "").unwrap();

        let err = ensure_output_dir(&parent.join("output")).unwrap_err();
        assert!(matches!(
            err,
            SetupError::Create { .. } | SetupError::Inspect { .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn read_only_directory_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("output");
        fs::create_dir(&out).unwrap();
        fs::set_permissions(&out, fs::Permissions::from_mode(0o555)).unwrap();

        // privileged users bypass mode bits; nothing to assert then
        if fs::write(out.join("scratch"), "").is_ok() {
            fs::remove_file(out.join("scratch")).unwrap();
            return;
        }

        let err = ensure_output_dir(&out).unwrap_err();
        assert!(matches!(err, SetupError::NotWritable { .. }));

        fs::set_permissions(&out, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
