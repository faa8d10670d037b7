use std::path::Path;

use chrono::{DateTime, Local};
use schemasync_common::{Error, Result};
use tracing::info;

use crate::invoker::MigrationArtifact;

/// Format of the `-- Migration generated on` header line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// `migration_YYYYMMDD_HHMMSS.sql`. Unique only at one-second resolution.
pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("migration_{}.sql", now.format("%Y%m%d_%H%M%S"))
}

/// Persists diff SQL inside a `BEGIN;`/`COMMIT;` envelope so a failed apply
/// leaves nothing half-committed (given transactional DDL).
pub struct MigrationWriter;

impl MigrationWriter {
    /// Render the full file contents.
    pub fn render(artifact: &MigrationArtifact) -> String {
        let source = artifact.source.to_string();
        let target = artifact.target.to_string();

        let mut out = String::with_capacity(artifact.sql.len() + 256);
        out.push_str(&format!(
            "-- Migration generated on {}\n",
            artifact.generated_at.format(TIMESTAMP_FORMAT)
        ));
        out.push_str(&format!("-- Source (target schema): {source}\n"));
        out.push_str(&format!("-- Target (current schema): {target}\n"));
        out.push_str(&format!(
            "-- Run this SQL on {} to match {} schema\n\n",
            target.to_uppercase(),
            source.to_uppercase()
        ));
        out.push_str("BEGIN;\n\n");
        out.push_str(&artifact.sql);
        out.push_str("\n\nCOMMIT;\n");
        out
    }

    /// Create or overwrite `path`. The parent directory must exist. An
    /// interrupted write can leave a truncated file behind.
    pub fn write(artifact: &MigrationArtifact, path: &Path) -> Result<()> {
        std::fs::write(path, Self::render(artifact)).map_err(|source| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        info!("migration written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::target::TargetRole;

    fn artifact(sql: &str) -> MigrationArtifact {
        MigrationArtifact {
            sql: sql.to_string(),
            source: TargetRole::Development,
            target: TargetRole::Production,
            generated_at: Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
        }
    }

    #[test]
    fn envelope_matches_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.sql");

        MigrationWriter::write(&artifact("ALTER TABLE t ADD COLUMN c int;"), &path).unwrap();

        let expected = "-- Migration generated on 2024-03-09 14:05:07.000000\n\
                        -- Source (target schema): Development\n\
                        -- Target (current schema): Production\n\
                        -- Run this SQL on PRODUCTION to match DEVELOPMENT schema\n\
                        \n\
                        BEGIN;\n\
                        \n\
                        ALTER TABLE t ADD COLUMN c int;\n\
                        \n\
                        COMMIT;\n";
        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn body_is_embedded_unmodified() {
        let sql = "create table \"public\".\"t\" (\n    \"id\" serial\n);\n\n-- trailing\n";
        let rendered = MigrationWriter::render(&artifact(sql));

        let body = rendered
            .split_once("BEGIN;\n\n")
            .and_then(|(_, rest)| rest.strip_suffix("\n\nCOMMIT;\n"))
            .unwrap();
        assert_eq!(body, sql);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.sql");
        std::fs::write(&path, "stale contents that are much longer than the new ones ".repeat(50))
            .unwrap();

        MigrationWriter::write(&artifact("SELECT 1;"), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.ends_with("SELECT 1;\n\nCOMMIT;\n"));
    }

    #[test]
    fn missing_directory_is_file_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("m.sql");

        let err = MigrationWriter::write(&artifact("SELECT 1;"), &path).unwrap_err();
        assert!(matches!(err, Error::FileWrite { path: ref p, .. } if *p == path));
    }

    #[test]
    fn default_file_name_uses_second_resolution_timestamp() {
        let now = Local.with_ymd_and_hms(2025, 12, 31, 23, 59, 1).unwrap();
        assert_eq!(default_file_name(now), "migration_20251231_235901.sql");
    }
}
