//! MySQL dialect.
//!
//! Lookups read `information_schema` for the connection's current database,
//! so a `USE` earlier in a script moves the lookups along with it.

use super::{Dialect, cell};

const TABLE_EXISTS_SQL: &str = r#"
SELECT CAST(COUNT(*) AS CHAR)
FROM information_schema.tables
WHERE table_schema = DATABASE() AND table_name = ?
"#;

const COLUMN_METADATA_SQL: &str = r#"
SELECT CAST(COLUMN_TYPE AS CHAR), CAST(IS_NULLABLE AS CHAR), CAST(COLUMN_DEFAULT AS CHAR),
       CAST(COLUMN_KEY AS CHAR), CAST(EXTRA AS CHAR)
FROM information_schema.columns
WHERE table_schema = DATABASE() AND table_name = ? AND column_name = ?
"#;

const INDEX_EXISTS_SQL: &str = r#"
SELECT CAST(COUNT(*) AS CHAR)
FROM information_schema.statistics
WHERE table_schema = DATABASE() AND table_name = ? AND index_name = ?
"#;

const STRING_TYPES: &[&str] = &[
    "char", "varchar", "tinytext", "text", "mediumtext", "longtext", "enum", "set", "binary",
    "varbinary", "date", "datetime", "timestamp", "time", "year",
];

/// MySQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn table_exists_sql(&self) -> &'static str {
        TABLE_EXISTS_SQL
    }

    fn column_metadata_sql(&self) -> &'static str {
        COLUMN_METADATA_SQL
    }

    fn index_exists_sql(&self) -> &'static str {
        INDEX_EXISTS_SQL
    }

    /// `<COLUMN_TYPE>[ NOT NULL][ DEFAULT <d>][ UNIQUE][ AUTO_INCREMENT]`
    fn column_definition(&self, row: &[Option<String>]) -> Option<String> {
        let column_type = cell(row, 0)?;
        let extra = cell(row, 4).unwrap_or_default().to_ascii_lowercase();
        let mut parts = vec![column_type.to_string()];
        if cell(row, 1) == Some("NO") {
            parts.push("NOT NULL".to_string());
        }
        if let Some(default) = cell(row, 2) {
            parts.push(format!(
                "DEFAULT {}",
                render_default(column_type, default, &extra)
            ));
        }
        if cell(row, 3) == Some("UNI") {
            parts.push("UNIQUE".to_string());
        }
        if extra.contains("auto_increment") {
            parts.push("AUTO_INCREMENT".to_string());
        }
        Some(parts.join(" "))
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn drop_index_sql(&self, table: &str, index: &str) -> String {
        format!(
            "DROP INDEX {} ON {}",
            self.quote_identifier(index),
            self.quote_identifier(table)
        )
    }
}

/// MySQL stores string defaults unquoted; put the quotes back so the value
/// compares equal to how it is written in DDL. MariaDB keeps the quotes
/// itself, so an already quoted literal passes through.
fn render_default(column_type: &str, default: &str, extra: &str) -> String {
    if is_quoted_literal(default) {
        return default.to_string();
    }
    let base_type = column_type
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let is_expression = extra.contains("default_generated")
        || default.to_ascii_uppercase().starts_with("CURRENT_TIMESTAMP");
    let is_numeric = !STRING_TYPES.contains(&base_type.as_str()) && default.parse::<f64>().is_ok();
    if is_expression || is_numeric {
        default.to_string()
    } else {
        format!("'{}'", default.replace('\'', "''"))
    }
}

fn is_quoted_literal(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'')
}
