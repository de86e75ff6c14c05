//! Filing of working-directory artifacts into per-job output folders.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::artifacts::{ArtifactKind, Destination};

/// Files moved out of the working directory by [`file_outputs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiledOutputs {
    /// `.csv` results moved to the OUT folder.
    pub to_out: Vec<String>,
    /// `.phonon`/`.oclimax`/`.params` intermediates moved to the TEMP folder.
    pub to_temp: Vec<String>,
}

/// Move tracked artifacts out of the working directory: `.csv` into
/// `output_folder`, the other tracked extensions into `temp_folder`.
///
/// Both folders are created if absent. Untracked files stay in place.
pub fn file_outputs(
    workdir: &Path,
    output_folder: &Path,
    temp_folder: &Path,
) -> Result<FiledOutputs> {
    fs::create_dir_all(output_folder)
        .with_context(|| format!("create {}", output_folder.display()))?;
    fs::create_dir_all(temp_folder).with_context(|| format!("create {}", temp_folder.display()))?;

    let mut tracked = Vec::new();
    for entry in fs::read_dir(workdir).with_context(|| format!("read {}", workdir.display()))? {
        let entry = entry.with_context(|| format!("read entry in {}", workdir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(kind) = ArtifactKind::from_file_name(&name) {
            tracked.push((entry.path(), entry.file_name(), name, kind));
        }
    }

    let mut filed = FiledOutputs::default();
    for (path, file_name, name, kind) in tracked {
        let (folder, bucket) = match kind.destination() {
            Destination::Out => (output_folder, &mut filed.to_out),
            Destination::Temp => (temp_folder, &mut filed.to_temp),
        };
        fs::rename(&path, folder.join(&file_name))
            .with_context(|| format!("move {} to {}", path.display(), folder.display()))?;
        bucket.push(name);
    }
    debug!(
        to_out = filed.to_out.len(),
        to_temp = filed.to_temp.len(),
        "filed outputs"
    );
    Ok(filed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").expect("touch");
    }

    #[test]
    fn csv_to_out_intermediates_to_temp() {
        let temp = tempfile::tempdir().expect("tempdir");
        let workdir = temp.path();
        let out = workdir.join("out/OUT_oclimax_x");
        let tmp = workdir.join("out/TEMP_oclimax_x");
        touch(workdir, "x.csv");
        touch(workdir, "x.phonon");
        touch(workdir, "x.oclimax");
        touch(workdir, "x.params");
        touch(workdir, "oclimax.bat");

        let filed = file_outputs(workdir, &out, &tmp).expect("file");
        assert_eq!(filed.to_out, vec!["x.csv"]);
        let mut to_temp = filed.to_temp;
        to_temp.sort();
        assert_eq!(to_temp, vec!["x.oclimax", "x.params", "x.phonon"]);

        assert!(out.join("x.csv").is_file());
        assert!(tmp.join("x.phonon").is_file());
        assert!(tmp.join("x.oclimax").is_file());
        assert!(tmp.join("x.params").is_file());
        for name in ["x.csv", "x.phonon", "x.oclimax", "x.params"] {
            assert!(!workdir.join(name).exists(), "{name} must leave workdir");
        }
        assert!(workdir.join("oclimax.bat").is_file(), "untracked stays put");
    }

    #[test]
    fn folders_are_created_even_when_nothing_moves() {
        let temp = tempfile::tempdir().expect("tempdir");
        let out = temp.path().join("o");
        let tmp = temp.path().join("t");

        let filed = file_outputs(temp.path(), &out, &tmp).expect("file");
        assert_eq!(filed, FiledOutputs::default());
        assert!(out.is_dir());
        assert!(tmp.is_dir());
    }
}
