//! The setup run: database, schema, directories, access rules, verification.
//!
//! Every step is safe to repeat. The first failing step aborts the run and
//! nothing already done is undone, so a failed statement leaves the ones
//! before it applied.

use crate::config::Config;
use crate::console::Console;
use crate::db::{Connector, SchemaScript, ServerConnection, quote_identifier};
use crate::error::SetupError;
use crate::layout::{self, DirectoryOutcome};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Permission to run the setup.
///
/// Whoever launches the tool has to opt in explicitly; nothing in this crate
/// hands one out on its own.
#[derive(Debug)]
pub struct SetupMode {
    _private: (),
}

impl SetupMode {
    pub fn grant() -> Self {
        Self { _private: () }
    }

    /// `Some` only when the caller switched setup mode on.
    pub fn from_flag(enabled: bool) -> Option<Self> {
        enabled.then(Self::grant)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub database: String,
    pub statements_applied: usize,
    pub directories: Vec<DirectoryOutcome>,
    pub access_file: PathBuf,
    pub tables: Vec<String>,
}

/// Provision everything `cfg` describes, reporting progress to `console`.
pub async fn run<C, W>(
    _mode: SetupMode,
    cfg: &Config,
    connector: &C,
    console: &mut Console<W>,
) -> Result<SetupReport, SetupError>
where
    C: Connector,
    W: Write,
{
    let db_name = cfg.database.name.as_str();
    console.banner("Kalakaar Database Setup");
    console.line("");

    // Read the schema up front so a missing file never touches the server.
    let schema_path = cfg.layout.schema_path();
    let script = SchemaScript::load(&schema_path)?;
    if script.is_empty() {
        warn!(path = %schema_path.display(), "schema file contains no statements");
    } else {
        debug!(path = %schema_path.display(), statements = script.len(), "loaded schema");
    }

    let mut conn = connector
        .connect(None)
        .await
        .map_err(SetupError::Connection)?;
    info!(host = %cfg.database.host, port = cfg.database.port, user = %cfg.database.user, "connected");
    console.ok("Connected to MySQL server");

    let quoted = quote_identifier(db_name);
    let create = format!(
        "CREATE DATABASE IF NOT EXISTS {quoted} CHARACTER SET {} COLLATE {}",
        cfg.database.charset, cfg.database.collation
    );
    conn.execute(&create)
        .await
        .map_err(|source| SetupError::CreateDatabase {
            name: db_name.to_string(),
            source,
        })?;
    console.ok(format_args!("Database '{db_name}' created or already exists"));

    conn.execute(&format!("USE {quoted}"))
        .await
        .map_err(|source| SetupError::SelectDatabase {
            name: db_name.to_string(),
            source,
        })?;

    let statements_applied = apply_schema(&mut conn, &script).await?;
    console.ok("Database tables created successfully");

    let mut directories = Vec::with_capacity(layout::DIRECTORIES.len());
    for dir in layout::directories(&cfg.layout.base_dir) {
        let outcome = layout::ensure_directory(&dir)?;
        if outcome.created {
            console.ok(format_args!("Created directory: {}", dir.display()));
        } else {
            console.ok(format_args!("Directory already exists: {}", dir.display()));
        }
        directories.push(outcome);
    }

    let access_file =
        layout::write_access_control(&cfg.layout.base_dir.join(layout::UPLOADS_DIR))?;
    console.ok("Created uploads/.htaccess security file");

    let tables = verify(connector, db_name).await?;
    console.ok("Database connection test successful");
    console.ok(format_args!("Created {} tables", tables.len()));

    console.summary(db_name);

    Ok(SetupReport {
        database: db_name.to_string(),
        statements_applied,
        directories,
        access_file,
        tables,
    })
}

async fn apply_schema<S: ServerConnection>(
    conn: &mut S,
    script: &SchemaScript,
) -> Result<usize, SetupError> {
    for (i, stmt) in script.statements().iter().enumerate() {
        let index = i + 1;
        debug!(index, "executing schema statement");
        if let Err(source) = conn.execute(stmt).await {
            warn!(index, error = %source, "schema statement failed");
            return Err(SetupError::Statement {
                index,
                statement: stmt.clone(),
                source,
            });
        }
    }
    Ok(script.len())
}

async fn verify<C: Connector>(connector: &C, db_name: &str) -> Result<Vec<String>, SetupError> {
    let mut conn = connector
        .connect(Some(db_name))
        .await
        .map_err(SetupError::Verification)?;
    let tables = conn
        .list_tables()
        .await
        .map_err(SetupError::Verification)?;
    info!(database = %db_name, tables = tables.len(), "verified database");
    Ok(tables)
}
