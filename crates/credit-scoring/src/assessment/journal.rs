use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::domain::{ApplicantRecord, DecisionResult};

/// One evaluated submission: the applicant's answers merged with the decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(flatten)]
    pub applicant: ApplicantRecord,
    #[serde(flatten)]
    pub decision: DecisionResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl JournalEntry {
    pub fn new(applicant: ApplicantRecord, decision: DecisionResult) -> Self {
        Self {
            applicant,
            decision,
            recorded_at: Some(Utc::now()),
        }
    }
}

/// Append-only store of evaluated submissions.
///
/// Implementations must serialize writers; `load_all` returns entries in append order.
pub trait DecisionJournal: Send + Sync {
    fn append(&self, entry: JournalEntry) -> Result<(), JournalError>;
    fn load_all(&self) -> Result<Vec<JournalEntry>, JournalError>;
}

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("journal io failure at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("journal entry could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("journal export failed: {0}")]
    Export(#[from] csv::Error),
}

/// Journal kept as a single JSON array on disk.
///
/// Every append reads the whole file, pushes one entry, and replaces the file
/// through a uniquely named sibling temporary file. An exclusive lock on
/// `<journal>.lock` is held across the read-modify-write, so separate handles and
/// separate processes on the same path never interleave. Content that is not a
/// JSON array counts as an empty journal and is overwritten by the next append.
#[derive(Debug)]
pub struct JsonFileJournal {
    path: PathBuf,
}

impl JsonFileJournal {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> JournalError {
        JournalError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Open the sibling lock file without truncating it, creating the directory if needed.
    fn lock_file(&self) -> Result<fs::File, JournalError> {
        fs::create_dir_all(self.parent_dir()).map_err(|err| self.io_error(err))?;
        fs::OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|err| self.io_error(err))
    }

    fn read_values(&self) -> Result<Vec<Value>, JournalError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(values) => Ok(values),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "decision journal is malformed; starting fresh"
                );
                Ok(Vec::new())
            }
        }
    }

    fn write_values(&self, values: &[Value]) -> Result<(), JournalError> {
        let mut staging =
            NamedTempFile::new_in(self.parent_dir()).map_err(|err| self.io_error(err))?;
        serde_json::to_writer_pretty(&mut staging, values)?;
        staging.flush().map_err(|err| self.io_error(err))?;
        staging
            .as_file()
            .sync_all()
            .map_err(|err| self.io_error(err))?;

        staging
            .persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }
}

impl DecisionJournal for JsonFileJournal {
    fn append(&self, entry: JournalEntry) -> Result<(), JournalError> {
        let lock = self.lock_file()?;
        FileExt::lock_exclusive(&lock).map_err(|err| self.io_error(err))?;

        let mut values = self.read_values()?;
        values.push(serde_json::to_value(&entry)?);
        self.write_values(&values)?;

        debug!(path = %self.path.display(), entries = values.len(), "decision journal appended");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<JournalEntry>, JournalError> {
        let lock = self.lock_file()?;
        FileExt::lock_shared(&lock).map_err(|err| self.io_error(err))?;

        let entries = self
            .read_values()?
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(
                        path = %self.path.display(),
                        index,
                        error = %err,
                        "skipping unreadable journal entry"
                    );
                    None
                }
            })
            .collect();
        Ok(entries)
    }
}

#[derive(Debug, Serialize)]
struct JournalRow<'a> {
    recorded_at: Option<String>,
    name: Option<&'a str>,
    age: u8,
    education_type: &'a str,
    marital_status: &'a str,
    annual_income: f64,
    years_working: u32,
    years_unemployed: u32,
    family_size: u32,
    children_count: u32,
    own_property: bool,
    own_car: bool,
    own_workphone: bool,
    approved: bool,
    score: f64,
    max_monthly_commitment: f64,
}

impl<'a> From<&'a JournalEntry> for JournalRow<'a> {
    fn from(entry: &'a JournalEntry) -> Self {
        let applicant = &entry.applicant;
        Self {
            recorded_at: entry.recorded_at.map(|at| at.to_rfc3339()),
            name: applicant.name.as_deref(),
            age: applicant.age,
            education_type: applicant.education_type.label(),
            marital_status: applicant.marital_status.label(),
            annual_income: applicant.annual_income,
            years_working: applicant.years_working,
            years_unemployed: applicant.years_unemployed,
            family_size: applicant.family_size,
            children_count: applicant.children_count,
            own_property: applicant.own_property,
            own_car: applicant.own_car,
            own_workphone: applicant.own_workphone,
            approved: entry.decision.approved,
            score: entry.decision.score,
            max_monthly_commitment: entry.decision.max_monthly_commitment,
        }
    }
}

/// Write the journal as a CSV table, one row per entry.
pub fn export_csv<W: Write>(entries: &[JournalEntry], writer: W) -> Result<(), JournalError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in entries {
        csv_writer.serialize(JournalRow::from(entry))?;
    }
    csv_writer.flush().map_err(|source| JournalError::Io {
        path: "csv export".to_string(),
        source,
    })?;
    Ok(())
}
