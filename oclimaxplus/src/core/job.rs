//! Parsing of batch job-list lines.
//!
//! One job per line, two comma-separated fields. Lines whose first field is
//! empty or starts with `#` are skipped; any other field count is reported
//! as unknown without aborting the batch.

/// One unit of batch work: a data directory under `data/` and the phonon
/// file name expected inside each of its immediate subdirectories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub data_directory: String,
    pub phonon_file_name: String,
}

/// Classification of a single job-list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobLine {
    /// Blank line or `#`-prefixed comment.
    Skip,
    /// Exactly two fields: a valid job.
    Job(Job),
    /// Any other field count; carries the trimmed tokens for diagnostics.
    Unknown(Vec<String>),
}

/// Split a line on commas, trim every field, and classify it.
pub fn parse_line(line: &str) -> JobLine {
    let fields: Vec<String> = line.split(',').map(|f| f.trim().to_string()).collect();
    if fields[0].is_empty() || fields[0].starts_with('#') {
        return JobLine::Skip;
    }
    if let [data_directory, phonon_file_name] = fields.as_slice() {
        return JobLine::Job(Job {
            data_directory: data_directory.clone(),
            phonon_file_name: phonon_file_name.clone(),
        });
    }
    JobLine::Unknown(fields)
}

/// Classify every line of a job-list file, preserving line order.
pub fn parse_lines(contents: &str) -> Vec<JobLine> {
    contents.lines().map(parse_line).collect()
}
