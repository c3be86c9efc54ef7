//! This module provides the `ProgramLoader` struct, responsible for loading instruction lists
//! from files and strings.

use crate::parser::parse;
use crate::types::{Instruction, MachineError, MAX_PROGRAM_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of instruction files.
pub const PROGRAM_EXTENSION: &str = "tm";

/// `ProgramLoader` is a utility struct for loading five-tuple instruction lists.
/// It provides methods to load instructions from individual files, from string content,
/// and to discover and load all `.tm` files within a specified directory.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads the instructions stored in the specified file.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Instruction>)` if the file is successfully read and parsed.
    /// * `Err(MachineError::FileError)` if the file cannot be read or is too large.
    /// * `Err(MachineError::MalformedInstructionStream)` or `Err(MachineError::ParseError)`
    ///   if the content is not a valid instruction list.
    pub fn load_instructions(path: &Path) -> Result<Vec<Instruction>, MachineError> {
        let metadata = fs::metadata(path).map_err(|e| {
            MachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        if metadata.len() > MAX_PROGRAM_SIZE as u64 {
            return Err(MachineError::FileError(format!(
                "File {} is {} bytes, the limit is {} bytes",
                path.display(),
                metadata.len(),
                MAX_PROGRAM_SIZE
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), bytes = content.len(), "loaded instruction file");
        parse(&content)
    }

    /// Loads instructions from the provided string content, e.g. from user input.
    pub fn load_instructions_from_string(content: &str) -> Result<Vec<Instruction>, MachineError> {
        parse(content)
    }

    /// Loads all instruction files (`.tm` extension) from a given directory.
    ///
    /// Directories and files with other extensions are skipped. Every remaining file yields
    /// one entry, either its path with the parsed instructions or the error that stopped it.
    pub fn load_directory(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, Vec<Instruction>), MachineError>> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        return Some(Err(MachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                if path.is_dir() || path.extension().is_none_or(|ext| ext != PROGRAM_EXTENSION) {
                    return None;
                }

                Some(Self::load_instructions(&path).map(|instructions| (path, instructions)))
            })
            .collect()
    }
}
