//! Runtime configuration for the CLI.
//!
//! Precedence: command-line flag, then environment variable, then default.

use anyhow::{anyhow, Context, Result};
use clap::{Args, ValueEnum};
use notesai_core::{
    default_log_level, FileNoteStore, NoteStore, SqliteNoteStore, NOTES_SLOT_KEY,
};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "notesai";
const SQLITE_FILE_NAME: &str = "notesai.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Storage backend holding the note collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// One row in a SQLite key-value table.
    #[default]
    Sqlite,
    /// One JSON file.
    File,
}

/// Configuration flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Directory holding the note store (default: platform data dir)
    #[arg(long, env = "NOTESAI_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage backend
    #[arg(long, env = "NOTESAI_BACKEND", value_enum, default_value_t = Backend::Sqlite, global = true)]
    pub backend: Backend,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "NOTESAI_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Directory for rolling log files (default: <data-dir>/logs)
    #[arg(long, env = "NOTESAI_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub backend: Backend,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn resolve(args: ConfigArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let data_dir = match args.data_dir {
            Some(dir) => absolutize(&cwd, dir),
            None => dirs::data_dir()
                .unwrap_or_else(|| cwd.clone())
                .join(APP_DIR_NAME),
        };
        let log_dir = match args.log_dir {
            Some(dir) => absolutize(&cwd, dir),
            None => data_dir.join(LOG_DIR_NAME),
        };
        let log_level = args
            .log_level
            .unwrap_or_else(|| default_log_level().to_string());

        Ok(Self {
            data_dir,
            backend: args.backend,
            log_level,
            log_dir,
        })
    }

    /// Location of the store for the configured backend.
    pub fn store_path(&self) -> PathBuf {
        match self.backend {
            Backend::Sqlite => self.data_dir.join(SQLITE_FILE_NAME),
            Backend::File => self.data_dir.join(format!("{NOTES_SLOT_KEY}.json")),
        }
    }

    pub fn open_store(&self) -> Result<Box<dyn NoteStore>> {
        let path = self.store_path();
        let store: Box<dyn NoteStore> = match self.backend {
            Backend::Sqlite => Box::new(SqliteNoteStore::open(&path).map_err(|err| {
                if err.is_corrupt() {
                    anyhow!(
                        "note store {} is corrupt ({err}); move it aside, or run with \
                         `--backend file` or a different `--data-dir`",
                        path.display()
                    )
                } else {
                    anyhow::Error::new(err)
                        .context(format!("failed to open note store {}", path.display()))
                }
            })?),
            Backend::File => Box::new(FileNoteStore::new(path)),
        };
        Ok(store)
    }
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, Backend, ConfigArgs};
    use clap::Parser;
    use notesai_core::default_log_level;
    use std::path::PathBuf;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    fn parse(argv: &[&str]) -> AppConfig {
        let cli = TestCli::try_parse_from(argv).unwrap();
        AppConfig::resolve(cli.config).unwrap()
    }

    fn args(data_dir: &str, backend: Backend) -> ConfigArgs {
        ConfigArgs {
            data_dir: Some(PathBuf::from(data_dir)),
            backend,
            log_level: None,
            log_dir: None,
        }
    }

    #[test]
    fn log_dir_defaults_under_data_dir() {
        let config = AppConfig::resolve(args("/tmp/notes", Backend::Sqlite)).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("/tmp/notes/logs"));
        assert_eq!(
            config.store_path(),
            PathBuf::from("/tmp/notes/notesai.sqlite3")
        );
    }

    #[test]
    fn file_backend_uses_slot_named_json() {
        let config = AppConfig::resolve(args("/tmp/notes", Backend::File)).unwrap();
        assert_eq!(
            config.store_path(),
            PathBuf::from("/tmp/notes/notesai-notes.json")
        );
    }

    #[test]
    fn relative_data_dir_becomes_absolute() {
        let config = AppConfig::resolve(args("rel/notes", Backend::File)).unwrap();
        assert!(config.data_dir.is_absolute());
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn log_level_prefers_flag_then_env_then_default() {
        std::env::set_var("NOTESAI_LOG_LEVEL", "warn");
        assert_eq!(parse(&["notesai", "--data-dir", "/tmp/notes"]).log_level, "warn");
        assert_eq!(
            parse(&["notesai", "--data-dir", "/tmp/notes", "--log-level", "error"]).log_level,
            "error"
        );

        std::env::remove_var("NOTESAI_LOG_LEVEL");
        assert_eq!(
            parse(&["notesai", "--data-dir", "/tmp/notes"]).log_level,
            default_log_level().to_string()
        );
    }

    #[test]
    fn corrupt_sqlite_store_points_at_alternatives() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args("/unused", Backend::Sqlite);
        args.data_dir = Some(dir.path().to_path_buf());
        let config = AppConfig::resolve(args).unwrap();
        std::fs::write(config.store_path(), "garbage ".repeat(256)).unwrap();

        let Err(err) = config.open_store() else {
            panic!("corrupt store opened");
        };
        let message = format!("{err:#}");
        assert!(message.contains("corrupt"), "{message}");
        assert!(message.contains("--backend file"), "{message}");
    }
}
