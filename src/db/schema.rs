//! Schema file handling.
//!
//! The file is split on `;` with no awareness of quoting or comments, so a
//! semicolon inside a string literal or a comment breaks the statement in two.
//! Schema files fed to this tool must not contain such semicolons.

use crate::error::SetupError;
use std::{fs, io, path::Path};

/// Ordered statements from a schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaScript {
    statements: Vec<String>,
}

impl SchemaScript {
    pub fn parse(sql: &str) -> Self {
        Self {
            statements: split_statements(sql),
        }
    }

    /// Read and split the schema file at `path`.
    pub fn load(path: &Path) -> Result<Self, SetupError> {
        match fs::read_to_string(path) {
            Ok(sql) => Ok(Self::parse(&sql)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SetupError::SchemaFileMissing {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(SetupError::SchemaRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

pub fn split_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
