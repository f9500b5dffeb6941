//! Live schema discovery
//!
//! This module wraps database introspection behind a uniform contract: list
//! the tables owned by the configured database, or fetch one table's column
//! definitions as a [`TableSchema`]. Every call re-queries the live database;
//! nothing is cached between invocations.

use async_trait::async_trait;
use sqlx::{FromRow, MySql, Pool, Postgres, Sqlite};

use crate::db::connection::DatabaseConnection;
use crate::error::{Error, Result};
use crate::schema::types::{ColumnDefinition, TableSchema};

/// Schema discovery contract consumed by the reconciliation handlers
#[async_trait]
pub trait Discovery: Send + Sync {
    /// List the names of all tables owned by the configured database
    async fn list_table_names(&self) -> Result<Vec<String>>;

    /// Fetch the column definitions of one table
    async fn discover_table(&self, table_name: &str) -> Result<TableSchema>;
}

/// Discovery implementation dispatching on the underlying connection
pub struct SchemaDiscoverer {
    connection: DatabaseConnection,
    datasource: String,
    database: String,
}

impl SchemaDiscoverer {
    /// Create a new discoverer for a named datasource
    pub fn new(connection: DatabaseConnection, datasource: &str, database: &str) -> Self {
        Self {
            connection,
            datasource: datasource.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl Discovery for SchemaDiscoverer {
    async fn list_table_names(&self) -> Result<Vec<String>> {
        match &self.connection {
            DatabaseConnection::Postgres(pool) => {
                PostgresDiscovery::new(pool, &self.datasource, &self.database)
                    .list_table_names()
                    .await
            }
            DatabaseConnection::MySql(pool) => {
                MySqlDiscovery::new(pool, &self.datasource, &self.database)
                    .list_table_names()
                    .await
            }
            DatabaseConnection::Sqlite(pool) => {
                SqliteDiscovery::new(pool, &self.datasource, &self.database)
                    .list_table_names()
                    .await
            }
        }
    }

    async fn discover_table(&self, table_name: &str) -> Result<TableSchema> {
        match &self.connection {
            DatabaseConnection::Postgres(pool) => {
                PostgresDiscovery::new(pool, &self.datasource, &self.database)
                    .discover_table(table_name)
                    .await
            }
            DatabaseConnection::MySql(pool) => {
                MySqlDiscovery::new(pool, &self.datasource, &self.database)
                    .discover_table(table_name)
                    .await
            }
            DatabaseConnection::Sqlite(pool) => {
                SqliteDiscovery::new(pool, &self.datasource, &self.database)
                    .discover_table(table_name)
                    .await
            }
        }
    }
}

// Row types for introspection queries
#[derive(FromRow)]
struct TableRow {
    table_name: String,
}

#[derive(FromRow)]
struct ColumnRow {
    column_name: String,
    data_type: String,
    is_nullable: String,
    character_maximum_length: Option<i64>,
    numeric_precision: Option<i64>,
    numeric_scale: Option<i64>,
    is_generated: Option<String>,
}

#[derive(FromRow)]
struct PrimaryKeyRow {
    column_name: String,
    ordinal_position: i64,
}

#[derive(FromRow)]
struct PragmaColumnRow {
    name: String,
    #[sqlx(rename = "type")]
    data_type: String,
    notnull: i64,
    pk: i64,
}

/// Assemble the settings map for one introspected column.
///
/// `type` and `required` are always present; `length`, `precision` and
/// `scale` only when the driver reports them, `generated` only for identity
/// or auto-increment columns, and `id` only for primary key columns (its
/// value is the 1-based position within the key).
fn build_column(
    name: String,
    data_type: String,
    nullable: bool,
    length: Option<i64>,
    precision: Option<i64>,
    scale: Option<i64>,
    generated: bool,
    id: Option<i64>,
) -> ColumnDefinition {
    let mut column = ColumnDefinition::new(&name)
        .set("type", data_type)
        .set("required", !nullable);

    if let Some(length) = length {
        column = column.set("length", length);
    }
    if let Some(precision) = precision {
        column = column.set("precision", precision);
    }
    if let Some(scale) = scale {
        column = column.set("scale", scale);
    }
    if generated {
        column = column.set("generated", true);
    }
    if let Some(id) = id {
        column = column.set("id", id);
    }

    column
}

/// PostgreSQL schema discovery
struct PostgresDiscovery<'a> {
    pool: &'a Pool<Postgres>,
    datasource: &'a str,
    database: &'a str,
}

impl<'a> PostgresDiscovery<'a> {
    fn new(pool: &'a Pool<Postgres>, datasource: &'a str, database: &'a str) -> Self {
        Self {
            pool,
            datasource,
            database,
        }
    }

    fn unavailable(&self, e: sqlx::Error) -> Error {
        Error::DatasourceUnavailable {
            datasource: self.datasource.to_string(),
            reason: e.to_string(),
        }
    }

    async fn list_table_names(&self) -> Result<Vec<String>> {
        let sql = r#"
            SELECT table_name
            FROM information_schema.tables
            WHERE table_schema = $1 AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#;

        let rows = sqlx::query_as::<_, TableRow>(sql)
            .bind(self.database)
            .fetch_all(self.pool)
            .await
            .map_err(|e| self.unavailable(e))?;

        Ok(rows.into_iter().map(|row| row.table_name).collect())
    }

    async fn discover_table(&self, table_name: &str) -> Result<TableSchema> {
        let sql = r#"
            SELECT
                column_name,
                data_type,
                is_nullable,
                character_maximum_length::int8 AS character_maximum_length,
                numeric_precision::int8 AS numeric_precision,
                numeric_scale::int8 AS numeric_scale,
                is_identity AS is_generated
            FROM information_schema.columns
            WHERE table_schema = $1 AND table_name = $2
            ORDER BY ordinal_position
        "#;

        let column_rows = sqlx::query_as::<_, ColumnRow>(sql)
            .bind(self.database)
            .bind(table_name)
            .fetch_all(self.pool)
            .await
            .map_err(|e| self.unavailable(e))?;

        if column_rows.is_empty() {
            return Err(Error::TableNotFound {
                table: table_name.to_string(),
                database: self.database.to_string(),
            });
        }

        let sql = r#"
            SELECT
                kcu.column_name,
                kcu.ordinal_position::int8 AS ordinal_position
            FROM information_schema.table_constraints tc
            JOIN information_schema.key_column_usage kcu
                ON tc.constraint_name = kcu.constraint_name
                AND tc.table_schema = kcu.table_schema
            WHERE
                tc.constraint_type = 'PRIMARY KEY'
                AND tc.table_schema = $1
                AND tc.table_name = $2
            ORDER BY kcu.ordinal_position
        "#;

        let pk_rows = sqlx::query_as::<_, PrimaryKeyRow>(sql)
            .bind(self.database)
            .bind(table_name)
            .fetch_all(self.pool)
            .await
            .map_err(|e| self.unavailable(e))?;

        let mut schema = TableSchema::new(table_name);
        for col in column_rows {
            let id = pk_rows
                .iter()
                .find(|pk| pk.column_name == col.column_name)
                .map(|pk| pk.ordinal_position);

            schema.add_column(build_column(
                col.column_name,
                col.data_type,
                col.is_nullable == "YES",
                col.character_maximum_length,
                col.numeric_precision,
                col.numeric_scale,
                col.is_generated.as_deref() == Some("YES"),
                id,
            ));
        }

        Ok(schema)
    }
}

/// MySQL schema discovery
struct MySqlDiscovery<'a> {
    pool: &'a Pool<MySql>,
    datasource: &'a str,
    database: &'a str,
}

impl<'a> MySqlDiscovery<'a> {
    fn new(pool: &'a Pool<MySql>, datasource: &'a str, database: &'a str) -> Self {
        Self {
            pool,
            datasource,
            database,
        }
    }

    fn unavailable(&self, e: sqlx::Error) -> Error {
        Error::DatasourceUnavailable {
            datasource: self.datasource.to_string(),
            reason: e.to_string(),
        }
    }

    async fn list_table_names(&self) -> Result<Vec<String>> {
        let sql = r#"
            SELECT table_name
            FROM information_schema.tables
            WHERE table_schema = ? AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#;

        let rows = sqlx::query_as::<_, TableRow>(sql)
            .bind(self.database)
            .fetch_all(self.pool)
            .await
            .map_err(|e| self.unavailable(e))?;

        Ok(rows.into_iter().map(|row| row.table_name).collect())
    }

    async fn discover_table(&self, table_name: &str) -> Result<TableSchema> {
        let sql = r#"
            SELECT
                column_name,
                data_type,
                is_nullable,
                CAST(character_maximum_length AS SIGNED) AS character_maximum_length,
                CAST(numeric_precision AS SIGNED) AS numeric_precision,
                CAST(numeric_scale AS SIGNED) AS numeric_scale,
                extra AS is_generated
            FROM information_schema.columns
            WHERE table_schema = ? AND table_name = ?
            ORDER BY ordinal_position
        "#;

        let column_rows = sqlx::query_as::<_, ColumnRow>(sql)
            .bind(self.database)
            .bind(table_name)
            .fetch_all(self.pool)
            .await
            .map_err(|e| self.unavailable(e))?;

        if column_rows.is_empty() {
            return Err(Error::TableNotFound {
                table: table_name.to_string(),
                database: self.database.to_string(),
            });
        }

        let sql = r#"
            SELECT
                column_name,
                CAST(ordinal_position AS SIGNED) AS ordinal_position
            FROM information_schema.key_column_usage
            WHERE table_schema = ? AND table_name = ? AND constraint_name = 'PRIMARY'
            ORDER BY ordinal_position
        "#;

        let pk_rows = sqlx::query_as::<_, PrimaryKeyRow>(sql)
            .bind(self.database)
            .bind(table_name)
            .fetch_all(self.pool)
            .await
            .map_err(|e| self.unavailable(e))?;

        let mut schema = TableSchema::new(table_name);
        for col in column_rows {
            let id = pk_rows
                .iter()
                .find(|pk| pk.column_name == col.column_name)
                .map(|pk| pk.ordinal_position);
            let generated = col
                .is_generated
                .as_deref()
                .is_some_and(|extra| extra.contains("auto_increment"));

            schema.add_column(build_column(
                col.column_name,
                col.data_type,
                col.is_nullable == "YES",
                col.character_maximum_length,
                col.numeric_precision,
                col.numeric_scale,
                generated,
                id,
            ));
        }

        Ok(schema)
    }
}

/// SQLite schema discovery
///
/// SQLite has no information_schema; tables come from `sqlite_master` and
/// columns from `PRAGMA table_info`, which reports no length or precision
/// metadata.
struct SqliteDiscovery<'a> {
    pool: &'a Pool<Sqlite>,
    datasource: &'a str,
    database: &'a str,
}

impl<'a> SqliteDiscovery<'a> {
    fn new(pool: &'a Pool<Sqlite>, datasource: &'a str, database: &'a str) -> Self {
        Self {
            pool,
            datasource,
            database,
        }
    }

    fn unavailable(&self, e: sqlx::Error) -> Error {
        Error::DatasourceUnavailable {
            datasource: self.datasource.to_string(),
            reason: e.to_string(),
        }
    }

    async fn list_table_names(&self) -> Result<Vec<String>> {
        let sql = r#"
            SELECT name AS table_name
            FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            ORDER BY name
        "#;

        let rows = sqlx::query_as::<_, TableRow>(sql)
            .fetch_all(self.pool)
            .await
            .map_err(|e| self.unavailable(e))?;

        Ok(rows.into_iter().map(|row| row.table_name).collect())
    }

    async fn discover_table(&self, table_name: &str) -> Result<TableSchema> {
        // PRAGMA arguments cannot be bound
        let sql = format!(
            "PRAGMA table_info(\"{}\")",
            table_name.replace('"', "\"\"")
        );

        let column_rows = sqlx::query_as::<_, PragmaColumnRow>(&sql)
            .fetch_all(self.pool)
            .await
            .map_err(|e| self.unavailable(e))?;

        if column_rows.is_empty() {
            return Err(Error::TableNotFound {
                table: table_name.to_string(),
                database: self.database.to_string(),
            });
        }

        let mut schema = TableSchema::new(table_name);
        for col in column_rows {
            let id = (col.pk > 0).then_some(col.pk);

            schema.add_column(build_column(
                col.name,
                col.data_type.to_lowercase(),
                col.notnull == 0,
                None,
                None,
                None,
                false,
                id,
            ));
        }

        Ok(schema)
    }
}

#[cfg(test)]
pub mod testing {
    //! In-memory discovery fake used by the command tests

    use std::collections::HashMap;

    use super::*;

    /// Serves a fixed set of table schemas without touching a database
    pub struct StaticDiscovery {
        tables: Vec<String>,
        schemas: HashMap<String, TableSchema>,
    }

    impl StaticDiscovery {
        pub fn new() -> Self {
            Self {
                tables: Vec::new(),
                schemas: HashMap::new(),
            }
        }

        pub fn with_table(mut self, schema: TableSchema) -> Self {
            self.tables.push(schema.table_name.clone());
            self.schemas.insert(schema.table_name.clone(), schema);
            self
        }

        /// A table that shows up in listings but fails discovery
        pub fn with_unreachable_table(mut self, table_name: &str) -> Self {
            self.tables.push(table_name.to_string());
            self
        }
    }

    #[async_trait]
    impl Discovery for StaticDiscovery {
        async fn list_table_names(&self) -> Result<Vec<String>> {
            Ok(self.tables.clone())
        }

        async fn discover_table(&self, table_name: &str) -> Result<TableSchema> {
            self.schemas
                .get(table_name)
                .cloned()
                .ok_or_else(|| Error::TableNotFound {
                    table: table_name.to_string(),
                    database: "static".to_string(),
                })
        }
    }
}
