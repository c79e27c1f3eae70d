use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ident::{validate, Identifier, ValidationError};
use crate::patch::{self, Mutation, WriteError};
use crate::snapshot::{ParseError, RegistrySnapshot};

/// Invoked once, synchronously, after a successful persist so that
/// consumers of the registry file regenerate their in-memory view.
pub trait ReloadNotifier {
    fn reload(&self, path: &Path) -> anyhow::Result<()>;
}

/// Operation error, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid clip name: {0}")]
    Validation(#[from] ValidationError),
    #[error("failed to parse registry file: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to rewrite registry file: {0}")]
    Write(#[from] WriteError),
    #[error("failed to read registry file: {0}")]
    Io(#[from] io::Error),
    #[error("registry updated but reload notification failed: {0:#}")]
    ReloadFailed(anyhow::Error),
}

/// Orchestrates mutations of the backing registry file.
///
/// Every operation re-reads and re-parses the file immediately before
/// acting, so no state is cached across calls. The file itself is still
/// a shared resource: nothing guards against another process writing it
/// between two calls, and the accepted semantics for that race is
/// last-writer-wins.
pub struct ClipRegistry {
    path: PathBuf,
    notifier: Option<Box<dyn ReloadNotifier>>,
}

impl ClipRegistry {
    /// Binds the service to a backing file path. No IO happens here.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn ReloadNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates a fresh, empty registry file declaring `type_name`.
    /// Refuses to overwrite: an existing file at the path is an error
    /// and keeps its content.
    pub fn create(&self, type_name: &str) -> Result<(), RegistryError> {
        let ident = Identifier::new(type_name)?;
        let snapshot = RegistrySnapshot::empty(ident.as_str());
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)?;
        file.write_all(snapshot.render().as_bytes())?;
        file.flush()?;
        log::debug!("created registry {}", self.path.display());
        self.notify()
    }

    /// Validates `name` against the current registry and appends it.
    pub fn add(&self, name: &str) -> Result<(), RegistryError> {
        let snapshot = self.load()?;
        let ident = validate(name, snapshot.entries())?;
        let content = patch::apply(&snapshot, Mutation::Insert(ident))?;
        patch::persist(&self.path, &content)?;
        log::debug!("added clip {name} to {}", self.path.display());
        self.notify()
    }

    /// Removes `name` from the registry. Fails with `NotFound` (and
    /// leaves the file untouched) when the clip is not declared.
    pub fn remove(&self, name: &Identifier) -> Result<(), RegistryError> {
        let snapshot = self.load()?;
        let content = patch::apply(&snapshot, Mutation::Delete(name.clone()))?;
        patch::persist(&self.path, &content)?;
        log::debug!("removed clip {name} from {}", self.path.display());
        self.notify()
    }

    /// The declared clip names, in file order. Re-parses on every call.
    pub fn names(&self) -> Result<Vec<Identifier>, RegistryError> {
        Ok(self.load()?.entries().to_vec())
    }

    fn load(&self) -> Result<RegistrySnapshot, RegistryError> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(RegistrySnapshot::parse(&raw)?)
    }

    // The notifier runs after the rename has landed: its failure is
    // surfaced but the file change is not rolled back.
    fn notify(&self) -> Result<(), RegistryError> {
        if let Some(notifier) = &self.notifier {
            if let Err(err) = notifier.reload(&self.path) {
                log::warn!("reload failed for {}: {err:#}", self.path.display());
                return Err(RegistryError::ReloadFailed(err));
            }
        }
        Ok(())
    }
}
