//! Classification of transient OCLIMAX artifacts by file extension.
//!
//! The working directory is a shared scratch space across the whole run, so
//! the batch tracks exactly four extensions: `.phonon` inputs, `.oclimax`
//! and `.params` intermediates, and `.csv` results. Everything else in the
//! working directory is left alone.

use serde::Serialize;

/// Kind of tracked artifact, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Phonon,
    Oclimax,
    Params,
    Csv,
}

/// Where the filing step sends an artifact after a job finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// `out/OUT_oclimax_<dir>`: final results.
    Out,
    /// `out/TEMP_oclimax_<dir>`: intermediates.
    Temp,
}

impl ArtifactKind {
    /// Classify a file name by its final extension, case-sensitive.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        match extension {
            "phonon" => Some(Self::Phonon),
            "oclimax" => Some(Self::Oclimax),
            "params" => Some(Self::Params),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn destination(self) -> Destination {
        match self {
            Self::Csv => Destination::Out,
            Self::Phonon | Self::Oclimax | Self::Params => Destination::Temp,
        }
    }
}

/// Whether a file name carries one of the four tracked extensions.
pub fn is_tracked(name: &str) -> bool {
    ArtifactKind::from_file_name(name).is_some()
}

/// File name without its final extension.
pub fn base_name(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(base, _)| base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_all_tracked_extensions() {
        assert_eq!(
            ArtifactKind::from_file_name("a.phonon"),
            Some(ArtifactKind::Phonon)
        );
        assert_eq!(
            ArtifactKind::from_file_name("a.oclimax"),
            Some(ArtifactKind::Oclimax)
        );
        assert_eq!(
            ArtifactKind::from_file_name("a.params"),
            Some(ArtifactKind::Params)
        );
        assert_eq!(
            ArtifactKind::from_file_name("a.csv"),
            Some(ArtifactKind::Csv)
        );
    }

    #[test]
    fn other_extensions_are_untracked() {
        assert_eq!(ArtifactKind::from_file_name("a.txt"), None);
        assert_eq!(ArtifactKind::from_file_name("oclimax_convert.exe"), None);
        assert_eq!(ArtifactKind::from_file_name("no_extension"), None);
        assert!(!is_tracked("a.dat"));
    }

    #[test]
    fn csv_goes_to_out_everything_else_to_temp() {
        assert_eq!(ArtifactKind::Csv.destination(), Destination::Out);
        assert_eq!(ArtifactKind::Phonon.destination(), Destination::Temp);
        assert_eq!(ArtifactKind::Oclimax.destination(), Destination::Temp);
        assert_eq!(ArtifactKind::Params.destination(), Destination::Temp);
    }

    #[test]
    fn base_name_strips_only_the_final_extension() {
        assert_eq!(base_name("cc-2_PhonDOS.phonon"), "cc-2_PhonDOS");
        assert_eq!(base_name("a.b.phonon"), "a.b");
        assert_eq!(base_name("bare"), "bare");
    }
}
