//! Database access for the setup run.
//!
//! Layout:
//! - `schema.rs`: loading and splitting the SQL schema file
//! - `mysql.rs`: the sqlx-backed MySQL connector
//!
//! The provisioner only talks to the traits below, so tests can swap in a fake server.

pub mod mysql;
pub mod schema;

pub use mysql::MySqlConnector;
pub use schema::SchemaScript;

use sqlx::Error as SqlxError;

/// Opens connections to a database server.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Conn: ServerConnection;

    /// Connect with no default database when `database` is `None`.
    async fn connect(&self, database: Option<&str>) -> Result<Self::Conn, SqlxError>;
}

/// A single open connection.
#[allow(async_fn_in_trait)]
pub trait ServerConnection {
    /// Run one statement, discarding any result rows.
    async fn execute(&mut self, sql: &str) -> Result<(), SqlxError>;

    /// Names of the tables in the currently selected database.
    async fn list_tables(&mut self) -> Result<Vec<String>, SqlxError>;
}

/// Quote an identifier with backticks, doubling any embedded backtick.
pub fn quote_identifier(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::quote_identifier;

    #[test]
    fn quotes_plain_and_hostile_names() {
        assert_eq!(quote_identifier("kalakaar_db"), "`kalakaar_db`");
        assert_eq!(quote_identifier("a`b"), "`a``b`");
    }
}
