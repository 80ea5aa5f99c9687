//! Whole-file artifact writes.
//!
//! Emitters hand over fully rendered text; nothing here composes output.
//! Each destination is replaced through a sibling temp file and a rename,
//! so a failed run leaves the previous artifact in place and downstream
//! builds never see a half-written table.

use std::path::{Path, PathBuf};

/// One rendered output and the fixed destination it belongs to.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub text: String,
}

impl Artifact {
    pub fn new(path: impl AsRef<Path>, text: String) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            text,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error("write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write every artifact to its destination.
///
/// Destination directories are never created here: the generators run from
/// the OS tree root, and a missing directory means the invocation is
/// pointed at the wrong place.
pub fn write_all(artifacts: &[Artifact]) -> Result<(), WriteError> {
    for artifact in artifacts {
        log::debug!(
            "writing {:?} ({} bytes)",
            artifact.path,
            artifact.text.len()
        );
        replace_file(&artifact.path, &artifact.text).map_err(|source| WriteError::Io {
            path: artifact.path.clone(),
            source,
        })?;
    }
    Ok(())
}

fn replace_file(path: &Path, text: &str) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, text)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("tablegen-writer-tests").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn writes_all_artifacts() {
        let dir = scratch_dir("writes_all");
        let artifacts = [
            Artifact::new(dir.join("a.h"), "header\n".to_string()),
            Artifact::new(dir.join("b.asm"), "stubs\n".to_string()),
        ];
        write_all(&artifacts).unwrap();
        assert_eq!(std::fs::read_to_string(dir.join("a.h")).unwrap(), "header\n");
        assert_eq!(std::fs::read_to_string(dir.join("b.asm")).unwrap(), "stubs\n");
    }

    #[test]
    fn replaces_previous_content() {
        let dir = scratch_dir("replaces");
        let path = dir.join("out.h");
        write_all(&[Artifact::new(&path, "old\n".to_string())]).unwrap();
        write_all(&[Artifact::new(&path, "new\n".to_string())]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn missing_directory_is_an_error_and_names_the_path() {
        let dir = scratch_dir("missing_dir");
        let path = dir.join("no_such_subdir").join("out.h");
        let err = write_all(&[Artifact::new(&path, "text".to_string())]).unwrap_err();
        assert!(err.to_string().contains("no_such_subdir"));
    }

    #[test]
    fn leaves_no_temp_file_behind() {
        let dir = scratch_dir("no_temp");
        let path = dir.join("out.asm");
        write_all(&[Artifact::new(&path, "text\n".to_string())]).unwrap();
        assert!(path.exists());
        assert!(!dir.join("out.asm.tmp").exists());
    }
}
