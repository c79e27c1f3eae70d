use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use crate::ident::Identifier;
use crate::snapshot::RegistrySnapshot;

/// One registry mutation. Insert appends, Delete removes the first
/// matching entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Insert(Identifier),
    Delete(Identifier),
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("clip {0} is already declared in the registry")]
    AlreadyPresent(Identifier),
    #[error("clip {0} is not declared in the registry")]
    NotFound(Identifier),
    #[error("failed to persist registry file: {0}")]
    Persist(#[from] io::Error),
}

/// Applies one mutation to a parsed snapshot and returns the full new
/// file content. Re-applying a mutation that already took effect fails
/// (`AlreadyPresent` / `NotFound`) rather than silently succeeding, so
/// retries are detectable.
pub fn apply(snapshot: &RegistrySnapshot, mutation: Mutation) -> Result<String, WriteError> {
    let mut snapshot = snapshot.clone();
    match mutation {
        Mutation::Insert(name) => {
            if snapshot.contains(&name) {
                return Err(WriteError::AlreadyPresent(name));
            }
            snapshot.push(name);
        }
        Mutation::Delete(name) => {
            if !snapshot.remove_first(&name) {
                return Err(WriteError::NotFound(name));
            }
        }
    }
    Ok(snapshot.render())
}

/// Atomically replaces `path` with `content`: the new bytes land in a
/// sibling tmp file first and are renamed over the original, so a
/// failure leaves the previous content untouched.
pub fn persist(path: &Path, content: &str) -> Result<(), WriteError> {
    let tmp_path = path.with_extension("tmp");
    let mut file = File::create(&tmp_path)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    drop(file);

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(WriteError::Persist(err));
    }
    Ok(())
}
