//! Report store: finished reports on disk.

use crate::error::{ReportError, Result};
use crate::kind::ReportKind;
use chrono::{DateTime, Local};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Timestamp layout of stored file names (`MM-DD-YYYY_HH-MM-SS`).
pub const FILE_TIMESTAMP_FORMAT: &str = "%m-%d-%Y_%H-%M-%S";

/// Highest collision suffix tried before giving up.
const MAX_SUFFIX: u32 = 1000;

/// `<Kind>-<scope>-<MM-DD-YYYY_HH-MM-SS>.pdf`
///
/// Characters outside `[A-Za-z0-9._-]` in `scope` become `_` so the name
/// cannot leave the store directory.
pub fn report_file_name(kind: ReportKind, scope: &str, generated_at: &DateTime<Local>) -> String {
    let scope: String = scope
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "{}-{}-{}.pdf",
        kind.file_prefix(),
        scope,
        generated_at.format(FILE_TIMESTAMP_FORMAT)
    )
}

/// Directory of finished reports.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` under `file_name`, or under `<stem>-2.pdf`, `<stem>-3.pdf`,
    /// ... when that name is taken. Returns the final path.
    ///
    /// The bytes land in a uniquely named temp file first and are then hard
    /// linked to the first free name. Linking fails on an existing name, so a
    /// concurrent writer can never replace a stored report and a reader never
    /// sees a partial one.
    pub fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|source| ReportError::Store {
            path: self.dir.clone(),
            source,
        })?;

        let temp = self
            .dir
            .join(format!(".{}.{}.partial", file_name, Uuid::new_v4().simple()));
        fs::write(&temp, bytes).map_err(|source| ReportError::Store {
            path: temp.clone(),
            source,
        })?;

        let published = self.publish(&temp, file_name);
        let _ = fs::remove_file(&temp);
        let path = published?;

        info!(path = %path.display(), bytes = bytes.len(), "report stored");
        Ok(path)
    }

    fn publish(&self, temp: &Path, file_name: &str) -> Result<PathBuf> {
        for name in candidate_names(file_name) {
            let candidate = self.dir.join(&name);
            match fs::hard_link(temp, &candidate) {
                Ok(()) => {
                    if name != file_name {
                        debug!(requested = file_name, chosen = %name, "report name taken");
                    }
                    return Ok(candidate);
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(ReportError::Store { path: candidate, source }),
            }
        }
        Err(ReportError::Store {
            path: self.dir.join(file_name),
            source: std::io::Error::new(
                ErrorKind::AlreadyExists,
                format!("no free name after {} attempts", MAX_SUFFIX),
            ),
        })
    }
}

/// `file_name` followed by its suffixed variants up to `MAX_SUFFIX`.
fn candidate_names(file_name: &str) -> impl Iterator<Item = String> + '_ {
    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, Some(extension)),
        _ => (file_name, None),
    };
    std::iter::once(file_name.to_string()).chain((2..=MAX_SUFFIX).map(move |suffix| {
        match extension {
            Some(extension) => format!("{}-{}.{}", stem, suffix, extension),
            None => format!("{}-{}", stem, suffix),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name(ReportKind::HealthCheck, "prod", &at()),
            "HealthCheck-prod-01-02-2026_03-04-05.pdf"
        );
        assert_eq!(
            report_file_name(ReportKind::Test, "SAMPLE-NAMESPACE", &at()),
            "Test-SAMPLE-NAMESPACE-01-02-2026_03-04-05.pdf"
        );
    }

    #[test]
    fn test_report_file_name_sanitizes_scope() {
        assert_eq!(
            report_file_name(ReportKind::HealthCheck, "../etc", &at()),
            "HealthCheck-.._etc-01-02-2026_03-04-05.pdf"
        );
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("nested/pdf"));
        let path = store.write("a.pdf", b"%PDF-1.5").unwrap();
        assert_eq!(path, dir.path().join("nested/pdf/a.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.5");
    }

    #[test]
    fn test_write_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        let first = store.write("r.pdf", b"one").unwrap();
        let second = store.write("r.pdf", b"two").unwrap();
        let third = store.write("r.pdf", b"three").unwrap();

        assert_eq!(first.file_name().unwrap(), "r.pdf");
        assert_eq!(second.file_name().unwrap(), "r-2.pdf");
        assert_eq!(third.file_name().unwrap(), "r-3.pdf");
        assert_eq!(fs::read(&first).unwrap(), b"one");

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_candidate_names() {
        let names: Vec<String> = candidate_names("r.pdf").take(3).collect();
        assert_eq!(names, vec!["r.pdf", "r-2.pdf", "r-3.pdf"]);
        let names: Vec<String> = candidate_names("README").take(2).collect();
        assert_eq!(names, vec!["README", "README-2"]);
    }

    #[test]
    fn test_concurrent_writers_never_share_a_name() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        let dir = tempfile::tempdir().unwrap();
        for round in 0..25 {
            let name = format!("race-{}.pdf", round);
            let barrier = Arc::new(Barrier::new(2));
            let handles: Vec<_> = [b"left".as_slice(), b"right".as_slice()]
                .into_iter()
                .map(|body| {
                    let store = ReportStore::new(dir.path());
                    let barrier = Arc::clone(&barrier);
                    let name = name.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        (store.write(&name, body).unwrap(), body)
                    })
                })
                .collect();
            let results: Vec<(PathBuf, &[u8])> =
                handles.into_iter().map(|h| h.join().unwrap()).collect();

            assert_ne!(results[0].0, results[1].0, "round {}", round);
            for (path, body) in &results {
                assert_eq!(fs::read(path).unwrap(), *body, "round {}", round);
            }
        }

        let leftovers = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_write_to_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let store = ReportStore::new(&blocker);
        let err = store.write("r.pdf", b"x").unwrap_err();
        assert!(matches!(err, ReportError::Store { .. }));
    }
}
