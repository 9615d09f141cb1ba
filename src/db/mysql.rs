use crate::config::DatabaseConfig;
use crate::db::{Connector, ServerConnection};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{Connection, Error as SqlxError, Row};
use tracing::{debug, info};

/// Connects to the MySQL server described by `DatabaseConfig`.
#[derive(Clone)]
pub struct MySqlConnector {
    options: MySqlConnectOptions,
}

impl MySqlConnector {
    pub fn new(cfg: &DatabaseConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&cfg.host)
            .port(cfg.port)
            .username(&cfg.user)
            .password(&cfg.password)
            .charset(&cfg.charset);
        let options = match cfg.socket_path() {
            Some(socket) => {
                info!(socket = %socket.display(), "connecting through unix socket");
                options.socket(socket)
            }
            None => {
                info!(host = %cfg.host, port = cfg.port, "connecting over TCP");
                options
            }
        };
        Self { options }
    }
}

impl Connector for MySqlConnector {
    type Conn = MySqlServerConnection;

    async fn connect(&self, database: Option<&str>) -> Result<Self::Conn, SqlxError> {
        let options = match database {
            Some(name) => self.options.clone().database(name),
            None => self.options.clone(),
        };
        debug!(database = ?database, "opening MySQL connection");
        let conn = MySqlConnection::connect_with(&options).await?;
        Ok(MySqlServerConnection { conn })
    }
}

pub struct MySqlServerConnection {
    conn: MySqlConnection,
}

impl ServerConnection for MySqlServerConnection {
    async fn execute(&mut self, sql: &str) -> Result<(), SqlxError> {
        // text protocol: `USE` and some DDL cannot be prepared
        sqlx::raw_sql(sql).execute(&mut self.conn).await?;
        Ok(())
    }

    async fn list_tables(&mut self) -> Result<Vec<String>, SqlxError> {
        let rows = sqlx::raw_sql("SHOW TABLES")
            .fetch_all(&mut self.conn)
            .await?;
        rows.iter()
            .map(|row| row.try_get::<Vec<u8>, _>(0).map(|raw| table_name(&raw)))
            .collect()
    }
}

// Binary collations report the column as VARBINARY, so decode the bytes ourselves.
fn table_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_decode_from_bytes() {
        assert_eq!(table_name(b"submissions"), "submissions");
        assert_eq!(table_name("künstler".as_bytes()), "künstler");
        assert_eq!(table_name(b"bad\xffname"), "bad\u{fffd}name");
    }
}
