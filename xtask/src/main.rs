// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Project automation for the relief ledger workspace.
//!
//! `cargo test` runs everything against in-memory `SQLite`. The commands
//! that need `MariaDB` (`test-mariadb`, `verify-migrations`) start a
//! throwaway Docker container and always remove it afterwards.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::{BTreeMap, BTreeSet};
use std::thread::sleep;
use std::time::Duration;
use std::{io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context, eyre::eyre};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const SQLITE_MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");
const MYSQL_MIGRATIONS: EmbeddedMigrations =
    embed_migrations!("../crates/persistence/migrations_mysql");

/// Environment variable that opts persistence tests into a live backend.
const TEST_BACKEND_ENV: &str = "RELIEF_LEDGER_TEST_BACKEND";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Lint formatting, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run `MariaDB` backend validation tests
    #[command(visible_alias = "tm")]
    TestMariadb,

    /// Verify schema parity between `SQLite` and `MySQL` migrations
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => run_cargo(vec!["build", "--all-targets", "--all-features"]),
            Self::Check => run_cargo(vec!["check", "--all-targets", "--all-features"]),
            Self::Coverage => run_cargo(vec![
                "llvm-cov",
                "--lcov",
                "--output-path",
                "target/lcov.info",
                "--all-features",
            ]),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => run_cargo_nightly(vec!["fmt", "--all", "--check"]),
            Self::FixClippy => run_cargo(vec![
                "clippy",
                "--all-targets",
                "--all-features",
                "--fix",
                "--allow-dirty",
                "--allow-staged",
                "--",
                "-D",
                "warnings",
            ]),
            Self::FixFormatting => run_cargo_nightly(vec!["fmt", "--all"]),
            Self::Test => test(),
            Self::TestMariadb => test_mariadb(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks. The `MariaDB` commands need Docker and are run separately.
fn ci() -> Result<()> {
    lint()?;
    run_cargo(vec!["build", "--all-targets", "--all-features"])?;
    test()
}

fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without warnings using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Run lib tests, then doc tests
fn test() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])?;
    run_cargo(vec!["test", "--doc", "--all-features"])
}

fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

// ============================================================================
// MariaDB container
// ============================================================================

/// A throwaway `MariaDB` container, removed on drop.
struct MariadbContainer {
    name: &'static str,
    database: &'static str,
    user: &'static str,
    password: &'static str,
    port: u16,
}

impl MariadbContainer {
    const READY_ATTEMPTS: u32 = 30;

    /// Starts the container and waits until it accepts connections.
    fn start(name: &'static str, database: &'static str, port: u16) -> Result<Self> {
        cmd!("docker", "--version")
            .run_with_trace()
            .wrap_err("Docker is not available. Please install Docker.")?;

        let container = Self {
            name,
            database,
            user: "relief",
            password: "relief_password",
            port,
        };
        container.remove();

        tracing::info!("Starting MariaDB container: {}", container.name);
        cmd!(
            "docker",
            "run",
            "--name",
            container.name,
            "-e",
            format!("MARIADB_DATABASE={}", container.database),
            "-e",
            format!("MARIADB_USER={}", container.user),
            "-e",
            format!("MARIADB_PASSWORD={}", container.password),
            "-e",
            "MARIADB_ROOT_PASSWORD=root_password",
            "-p",
            format!("{}:3306", container.port),
            "-d",
            "mariadb:11"
        )
        .run_with_trace()
        .wrap_err("Failed to start MariaDB container")?;

        container.wait_until_ready()?;
        Ok(container)
    }

    fn wait_until_ready(&self) -> Result<()> {
        for attempt in 1..=Self::READY_ATTEMPTS {
            sleep(Duration::from_secs(1));
            tracing::debug!("Connection attempt {}/{}", attempt, Self::READY_ATTEMPTS);

            let ready = cmd!(
                "docker",
                "exec",
                self.name,
                "mariadb",
                "-u",
                self.user,
                format!("-p{}", self.password),
                "-e",
                "SELECT 1"
            )
            .stdout_null()
            .stderr_null()
            .run();

            if ready.is_ok() {
                tracing::info!("MariaDB is ready");
                return Ok(());
            }
        }
        Err(eyre!("MariaDB did not become ready within timeout"))
    }

    fn database_url(&self) -> String {
        format!(
            "mysql://{}:{}@127.0.0.1:{}/{}",
            self.user, self.password, self.port, self.database
        )
    }

    fn remove(&self) {
        let _ = cmd!("docker", "stop", self.name)
            .stdout_null()
            .stderr_null()
            .run();
        let _ = cmd!("docker", "rm", self.name)
            .stdout_null()
            .stderr_null()
            .run();
    }
}

impl Drop for MariadbContainer {
    fn drop(&mut self) {
        tracing::info!("Removing MariaDB container: {}", self.name);
        self.remove();
    }
}

/// Run the ignored backend validation tests against a live `MariaDB`.
fn test_mariadb() -> Result<()> {
    let container = MariadbContainer::start("relief-ledger-test-mariadb", "relief_test", 3307)?;

    tracing::info!("Running MariaDB backend validation tests");
    cmd!(
        "cargo",
        "test",
        "--package",
        "relief-ledger-persistence",
        "backend_validation_tests",
        "--",
        "--ignored",
        "--test-threads=1"
    )
    .env("DATABASE_URL", container.database_url())
    .env(TEST_BACKEND_ENV, "mariadb")
    .run_with_trace()
    .wrap_err("MariaDB backend validation tests failed")?;

    tracing::info!("MariaDB backend validation completed successfully");
    Ok(())
}

// ============================================================================
// Schema parity
// ============================================================================

/// Apply both migration sets and fail if the resulting schemas differ.
fn verify_migrations() -> Result<()> {
    let container =
        MariadbContainer::start("relief-ledger-verify-migrations", "relief_verify", 3308)?;

    let mut sqlite_conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    sqlite_conn
        .run_pending_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply SQLite migrations: {e}"))?;

    let mut mysql_conn = MysqlConnection::establish(&container.database_url())
        .wrap_err("Failed to connect to MariaDB")?;
    mysql_conn
        .run_pending_migrations(MYSQL_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply MySQL migrations: {e}"))?;

    let sqlite_schema = introspect_sqlite_schema(&mut sqlite_conn)?;
    let mysql_schema = introspect_mysql_schema(&mut mysql_conn, container.database)?;

    let mismatches = compare_schemas(&sqlite_schema, &mysql_schema);
    if !mismatches.is_empty() {
        return Err(eyre!(
            "Schema parity check failed:\n{}",
            mismatches.join("\n")
        ));
    }

    tracing::info!("Schema parity verification passed");
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Table {
    /// Column name to (normalized type, nullable).
    columns: BTreeMap<String, (String, bool)>,
    primary_keys: BTreeSet<String>,
    /// (column, referenced table, referenced column).
    foreign_keys: BTreeSet<(String, String, String)>,
    /// Column lists of secondary indexes.
    indexes: BTreeSet<Vec<String>>,
}

type Schema = BTreeMap<String, Table>;

fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' \
         AND name != '__diesel_schema_migrations' ORDER BY name",
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    let mut schema = Schema::new();
    for table in tables {
        let mut info = Table::default();

        let columns: Vec<ColumnInfo> = diesel::sql_query(format!("PRAGMA table_info({})", table.name))
            .load(conn)
            .wrap_err_with(|| format!("Failed to get columns for {}", table.name))?;
        for col in columns {
            if col.pk > 0 {
                info.primary_keys.insert(col.name.clone());
            }
            info.columns
                .insert(col.name, (normalize_type(&col.r#type), col.notnull == 0 && col.pk == 0));
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get foreign keys for {}", table.name))?;
        info.foreign_keys
            .extend(fks.into_iter().map(|fk| (fk.from, fk.table, fk.to)));

        let indexes: Vec<IndexInfo> = diesel::sql_query(format!("PRAGMA index_list({})", table.name))
            .load(conn)
            .wrap_err_with(|| format!("Failed to get indexes for {}", table.name))?;
        for index in indexes
            .into_iter()
            .filter(|i| !i.name.starts_with("sqlite_autoindex_"))
        {
            let columns: Vec<IndexInfo> = diesel::sql_query(format!("PRAGMA index_info({})", index.name))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get columns of index {}", index.name))?;
            info.indexes
                .insert(columns.into_iter().map(|c| c.name).collect());
        }

        schema.insert(table.name, info);
    }

    Ok(schema)
}

fn introspect_mysql_schema(conn: &mut MysqlConnection, database: &str) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        table_name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        data_type: String,
        #[diesel(sql_type = Text)]
        is_nullable: String,
        #[diesel(sql_type = Text)]
        column_key: String,
    }

    #[derive(QueryableByName)]
    #[allow(clippy::struct_field_names)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        referenced_table_name: String,
        #[diesel(sql_type = Text)]
        referenced_column_name: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        index_name: String,
        #[diesel(sql_type = Text)]
        column_name: String,
    }

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT table_name FROM information_schema.tables WHERE table_schema = ? \
         AND table_name != '__diesel_schema_migrations' ORDER BY table_name",
    )
    .bind::<Text, _>(database)
    .load(conn)
    .wrap_err("Failed to query MySQL tables")?;

    let mut schema = Schema::new();
    for table in tables {
        let mut info = Table::default();

        let columns: Vec<ColumnInfo> = diesel::sql_query(
            "SELECT column_name, data_type, is_nullable, column_key FROM information_schema.columns \
             WHERE table_schema = ? AND table_name = ? ORDER BY ordinal_position",
        )
        .bind::<Text, _>(database)
        .bind::<Text, _>(&table.table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to get columns for {}", table.table_name))?;
        for col in columns {
            if col.column_key == "PRI" {
                info.primary_keys.insert(col.column_name.clone());
            }
            info.columns.insert(
                col.column_name,
                (normalize_type(&col.data_type), col.is_nullable == "YES"),
            );
        }

        let fks: Vec<ForeignKeyInfo> = diesel::sql_query(
            "SELECT column_name, referenced_table_name, referenced_column_name \
             FROM information_schema.key_column_usage \
             WHERE table_schema = ? AND table_name = ? AND referenced_table_name IS NOT NULL",
        )
        .bind::<Text, _>(database)
        .bind::<Text, _>(&table.table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to get foreign keys for {}", table.table_name))?;
        info.foreign_keys.extend(fks.into_iter().map(|fk| {
            (
                fk.column_name,
                fk.referenced_table_name,
                fk.referenced_column_name,
            )
        }));

        let index_rows: Vec<IndexInfo> = diesel::sql_query(
            "SELECT index_name, column_name FROM information_schema.statistics \
             WHERE table_schema = ? AND table_name = ? AND index_name != 'PRIMARY' \
             ORDER BY index_name, seq_in_index",
        )
        .bind::<Text, _>(database)
        .bind::<Text, _>(&table.table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to get indexes for {}", table.table_name))?;
        let mut by_name: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for row in index_rows {
            by_name.entry(row.index_name).or_default().push(row.column_name);
        }
        info.indexes.extend(by_name.into_values());

        schema.insert(table.table_name, info);
    }

    Ok(schema)
}

/// Maps backend column types onto a shared vocabulary.
fn normalize_type(column_type: &str) -> String {
    let upper = column_type.to_uppercase();
    if upper.contains("INT") {
        String::from("integer")
    } else if upper.contains("REAL")
        || upper.contains("FLOA")
        || upper.contains("DOUB")
        || upper.contains("DECIMAL")
    {
        String::from("real")
    } else if upper.contains("BLOB") || upper.contains("BINARY") {
        String::from("blob")
    } else {
        String::from("text")
    }
}

/// Returns one line per difference.
///
/// `InnoDB` indexes every foreign key column, so `MySQL` may carry extra
/// single-column indexes on those columns.
fn compare_schemas(sqlite: &Schema, mysql: &Schema) -> Vec<String> {
    let mut mismatches: Vec<String> = Vec::new();

    for name in sqlite.keys().filter(|name| !mysql.contains_key(*name)) {
        mismatches.push(format!("table '{name}' exists only in SQLite"));
    }
    for name in mysql.keys().filter(|name| !sqlite.contains_key(*name)) {
        mismatches.push(format!("table '{name}' exists only in MySQL"));
    }

    for (name, sqlite_table) in sqlite {
        let Some(mysql_table) = mysql.get(name) else {
            continue;
        };

        if sqlite_table.columns != mysql_table.columns {
            mismatches.push(format!(
                "table '{name}' columns differ\n  SQLite: {:?}\n  MySQL: {:?}",
                sqlite_table.columns, mysql_table.columns
            ));
        }
        if sqlite_table.primary_keys != mysql_table.primary_keys {
            mismatches.push(format!("table '{name}' primary keys differ"));
        }
        if sqlite_table.foreign_keys != mysql_table.foreign_keys {
            mismatches.push(format!(
                "table '{name}' foreign keys differ\n  SQLite: {:?}\n  MySQL: {:?}",
                sqlite_table.foreign_keys, mysql_table.foreign_keys
            ));
        }

        let fk_columns: BTreeSet<&String> = mysql_table
            .foreign_keys
            .iter()
            .map(|(column, _, _)| column)
            .collect();
        for missing in sqlite_table.indexes.difference(&mysql_table.indexes) {
            mismatches.push(format!("table '{name}' index {missing:?} missing in MySQL"));
        }
        for extra in mysql_table.indexes.difference(&sqlite_table.indexes) {
            let implicit_fk_index = extra.len() == 1 && fk_columns.contains(&extra[0]);
            if !implicit_fk_index {
                mismatches.push(format!("table '{name}' index {extra:?} exists only in MySQL"));
            }
        }
    }

    mismatches
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
