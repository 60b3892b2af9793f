//! Statement classifier.
//!
//! Looks at the leading keywords of a statement and pulls out the fields the
//! engine needs to decide whether the statement has already taken effect.
//! Recognition is a handful of small parsers over a token cursor; anything
//! they do not accept is [`ClassifiedStatement::Other`] and runs verbatim.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::normalize::{NormalizedDefinition, normalize_columns};
use crate::report::preview;
use crate::splitter::RawStatement;

/// Kind of index created by a `CREATE ... INDEX` statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    /// Plain (B-tree) index, also used for `UNIQUE`.
    #[default]
    Index,
    /// `FULLTEXT` index.
    Fulltext,
    /// `SPATIAL` index.
    Spatial,
}

impl IndexType {
    /// Returns the modifier keyword, if any.
    #[must_use]
    pub const fn modifier(self) -> Option<&'static str> {
        match self {
            Self::Index => None,
            Self::Fulltext => Some("FULLTEXT"),
            Self::Spatial => Some("SPATIAL"),
        }
    }
}

/// A statement tagged with what it creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifiedStatement {
    /// `CREATE TABLE <name> ...`
    CreateTable {
        /// Target table.
        table_name: String,
        /// Statement as written.
        full_text: String,
    },
    /// `ALTER TABLE <table> ADD [COLUMN] <column> <definition>`
    AddColumn {
        /// Target table.
        table_name: String,
        /// Column being added.
        column_name: String,
        /// Everything after the column name.
        column_definition: String,
        /// Statement as written.
        full_text: String,
    },
    /// `CREATE [UNIQUE|FULLTEXT|SPATIAL] INDEX <name> ON <table> (<cols>)`
    CreateIndex {
        /// Indexed table.
        table_name: String,
        /// Index name.
        index_name: String,
        /// Indexed columns, in declaration order.
        column_names: Vec<String>,
        /// Whether `UNIQUE` was present.
        unique: bool,
        /// Index kind.
        index_type: IndexType,
        /// Statement as written.
        full_text: String,
    },
    /// Anything else; always executed, never skipped.
    Other {
        /// Statement as written.
        full_text: String,
    },
}

impl ClassifiedStatement {
    /// Builds a `CreateTable` from a complete `CREATE TABLE` statement.
    pub fn create_table(table_name: impl Into<String>, full_text: impl Into<String>) -> Self {
        Self::CreateTable {
            table_name: table_name.into(),
            full_text: full_text.into(),
        }
    }

    /// Builds an `AddColumn`, rendering the `ALTER TABLE` text.
    pub fn add_column(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        column_definition: impl Into<String>,
    ) -> Self {
        let table_name = table_name.into();
        let column_name = column_name.into();
        let column_definition = column_definition.into().trim().to_string();
        let full_text =
            format!("ALTER TABLE {table_name} ADD COLUMN {column_name} {column_definition}");
        Self::AddColumn {
            table_name,
            column_name,
            column_definition,
            full_text,
        }
    }

    /// Builds a `CreateIndex`, rendering the `CREATE INDEX` text.
    ///
    /// `unique` only applies to plain indexes.
    pub fn create_index(
        table_name: impl Into<String>,
        index_name: impl Into<String>,
        column_names: Vec<String>,
        index_type: IndexType,
        unique: bool,
    ) -> Self {
        let table_name = table_name.into();
        let index_name = index_name.into();
        let unique = unique && index_type == IndexType::Index;
        let modifier = if unique {
            Some("UNIQUE")
        } else {
            index_type.modifier()
        };
        let mut full_text = String::from("CREATE ");
        if let Some(modifier) = modifier {
            full_text.push_str(modifier);
            full_text.push(' ');
        }
        full_text.push_str(&format!(
            "INDEX {index_name} ON {table_name} ({})",
            column_names.join(", ")
        ));
        Self::CreateIndex {
            table_name,
            index_name,
            column_names,
            unique,
            index_type,
            full_text,
        }
    }

    /// Returns the statement text that is sent to the database.
    #[must_use]
    pub fn full_text(&self) -> &str {
        match self {
            Self::CreateTable { full_text, .. }
            | Self::AddColumn { full_text, .. }
            | Self::CreateIndex { full_text, .. }
            | Self::Other { full_text } => full_text,
        }
    }

    /// Returns a short tag for the variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CreateTable { .. } => "create_table",
            Self::AddColumn { .. } => "add_column",
            Self::CreateIndex { .. } => "create_index",
            Self::Other { .. } => "other",
        }
    }

    /// Describes the schema object the statement targets.
    #[must_use]
    pub fn target(&self) -> Option<String> {
        match self {
            Self::CreateTable { table_name, .. } => Some(table_name.clone()),
            Self::AddColumn {
                table_name,
                column_name,
                ..
            } => Some(format!("{table_name}.{column_name}")),
            Self::CreateIndex {
                table_name,
                index_name,
                column_names,
                ..
            } => {
                let columns: Vec<String> = normalize_columns(column_names)
                    .into_iter()
                    .map(NormalizedDefinition::into_string)
                    .collect();
                Some(format!(
                    "{index_name} ON {table_name} ({})",
                    columns.join(", ")
                ))
            }
            Self::Other { .. } => None,
        }
    }
}

/// A statement whose leading keywords matched a known shape but which lacked
/// a required part. It is still executed, as [`ClassifiedStatement::Other`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{shape} statement without a discoverable {missing}")]
pub struct ParseAmbiguity {
    /// The recognised shape, e.g. `CREATE TABLE`.
    pub shape: &'static str,
    /// The part that could not be extracted.
    pub missing: &'static str,
}

impl ParseAmbiguity {
    const fn new(shape: &'static str, missing: &'static str) -> Self {
        Self { shape, missing }
    }
}

/// Classifies a statement.
///
/// Pure: only the statement text is looked at. Statements that loosely match
/// a known shape but cannot be fully parsed are logged at WARN and returned
/// as `Other`.
#[must_use]
pub fn classify(raw: &RawStatement) -> ClassifiedStatement {
    let (classified, ambiguity) = classify_with_diagnostic(raw);
    if let Some(ambiguity) = ambiguity {
        warn!(
            statement = %preview(raw.text(), 100),
            reason = %ambiguity,
            "Falling back to verbatim execution"
        );
    } else if matches!(classified, ClassifiedStatement::Other { .. }) {
        debug!(statement = %preview(raw.text(), 100), "No existence check for statement");
    }
    classified
}

/// Classifies a statement, also returning why a recognised shape degraded
/// to `Other`.
#[must_use]
pub fn classify_with_diagnostic(
    raw: &RawStatement,
) -> (ClassifiedStatement, Option<ParseAmbiguity>) {
    let text = raw.text();
    let other = || ClassifiedStatement::Other {
        full_text: text.to_string(),
    };
    match recognize(text) {
        Recognition::Matched(classified) => (classified, None),
        Recognition::Ambiguous(ambiguity) => (other(), Some(ambiguity)),
        Recognition::Unrecognized => (other(), None),
    }
}

enum Recognition {
    Matched(ClassifiedStatement),
    Ambiguous(ParseAmbiguity),
    Unrecognized,
}

const CREATE_TABLE: &str = "CREATE TABLE";
const ADD_COLUMN: &str = "ALTER TABLE ... ADD COLUMN";
const CREATE_INDEX: &str = "CREATE INDEX";

/// Words that follow `ADD` in sub-clauses other than a column.
const ADD_NON_COLUMN: &[&str] = &[
    "INDEX",
    "KEY",
    "UNIQUE",
    "PRIMARY",
    "FOREIGN",
    "CONSTRAINT",
    "FULLTEXT",
    "SPATIAL",
    "CHECK",
    "PARTITION",
];

fn recognize(text: &str) -> Recognition {
    let mut cursor = Cursor::new(text);
    if cursor.keyword("CREATE") {
        if cursor.keyword("TABLE") {
            return create_table(&mut cursor);
        }
        let modifier = cursor.any_keyword(&["UNIQUE", "FULLTEXT", "SPATIAL"]);
        if cursor.keyword("INDEX") {
            return create_index(&mut cursor, modifier);
        }
        return Recognition::Unrecognized;
    }
    if cursor.keyword("ALTER") && cursor.keyword("TABLE") {
        return add_column(&mut cursor);
    }
    Recognition::Unrecognized
}

fn create_table(cursor: &mut Cursor<'_>) -> Recognition {
    if cursor.peek_keyword("IF") {
        return Recognition::Unrecognized;
    }
    let Some(table_name) = cursor.identifier() else {
        return Recognition::Ambiguous(ParseAmbiguity::new(CREATE_TABLE, "table name"));
    };
    if cursor.peek_punct('.') {
        return Recognition::Ambiguous(ParseAmbiguity::new(
            CREATE_TABLE,
            "unqualified table name",
        ));
    }
    Recognition::Matched(ClassifiedStatement::CreateTable {
        table_name,
        full_text: cursor.text.to_string(),
    })
}

fn add_column(cursor: &mut Cursor<'_>) -> Recognition {
    let Some(table_name) = cursor.identifier() else {
        return Recognition::Unrecognized;
    };
    let qualified = cursor.punct('.');
    if qualified && cursor.identifier().is_none() {
        return Recognition::Unrecognized;
    }
    if !cursor.keyword("ADD") {
        return Recognition::Unrecognized;
    }
    let explicit_column = cursor.keyword("COLUMN");
    if !explicit_column && cursor.peek_any_keyword(ADD_NON_COLUMN) {
        return Recognition::Unrecognized;
    }
    if cursor.peek_punct('(') {
        return Recognition::Unrecognized;
    }
    if qualified {
        return Recognition::Ambiguous(ParseAmbiguity::new(ADD_COLUMN, "unqualified table name"));
    }
    let Some(column_name) = cursor.identifier() else {
        return Recognition::Ambiguous(ParseAmbiguity::new(ADD_COLUMN, "column name"));
    };
    if cursor.has_top_level_comma() {
        return Recognition::Unrecognized;
    }
    let column_definition = cursor.rest().to_string();
    if column_definition.is_empty() {
        return Recognition::Ambiguous(ParseAmbiguity::new(ADD_COLUMN, "column definition"));
    }
    Recognition::Matched(ClassifiedStatement::AddColumn {
        table_name,
        column_name,
        column_definition,
        full_text: cursor.text.to_string(),
    })
}

fn create_index(cursor: &mut Cursor<'_>, modifier: Option<&'static str>) -> Recognition {
    if cursor.peek_keyword("IF") {
        return Recognition::Unrecognized;
    }
    let Some(index_name) = cursor.identifier() else {
        return Recognition::Ambiguous(ParseAmbiguity::new(CREATE_INDEX, "index name"));
    };
    if !cursor.keyword("ON") {
        return Recognition::Ambiguous(ParseAmbiguity::new(CREATE_INDEX, "ON clause"));
    }
    let Some(table_name) = cursor.identifier() else {
        return Recognition::Ambiguous(ParseAmbiguity::new(CREATE_INDEX, "table name"));
    };
    if cursor.peek_punct('.') {
        return Recognition::Ambiguous(ParseAmbiguity::new(
            CREATE_INDEX,
            "unqualified table name",
        ));
    }
    let Some(column_names) = cursor.column_list() else {
        return Recognition::Ambiguous(ParseAmbiguity::new(CREATE_INDEX, "column list"));
    };
    let (unique, index_type) = match modifier {
        Some("UNIQUE") => (true, IndexType::Index),
        Some("FULLTEXT") => (false, IndexType::Fulltext),
        Some("SPATIAL") => (false, IndexType::Spatial),
        _ => (false, IndexType::Index),
    };
    Recognition::Matched(ClassifiedStatement::CreateIndex {
        table_name,
        index_name,
        column_names,
        unique,
        index_type,
        full_text: cursor.text.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    /// Bare word: keyword, identifier or number.
    Word,
    /// Identifier wrapped in the given delimiter.
    Quoted(char),
    /// `'...'` string literal.
    Literal,
    /// Any other single character.
    Punct(char),
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        let kind = if is_word_char(c) {
            while chars.next_if(|&(_, next)| is_word_char(next)).is_some() {}
            TokenKind::Word
        } else if matches!(c, '`' | '"' | '\'') {
            // Closing delimiter, skipping doubled (escaped) delimiters.
            while let Some((_, next)) = chars.next() {
                if next == c && chars.next_if(|&(_, after)| after == c).is_none() {
                    break;
                }
            }
            if c == '\'' {
                TokenKind::Literal
            } else {
                TokenKind::Quoted(c)
            }
        } else {
            TokenKind::Punct(c)
        };
        let end = chars.peek().map_or(text.len(), |&(index, _)| index);
        tokens.push(Token { kind, start, end });
    }
    tokens
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Parser state over the tokens of one statement.
struct Cursor<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            tokens: tokenize(text),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn slice(&self, token: Token) -> &'a str {
        &self.text[token.start..token.end]
    }

    fn is_keyword(&self, token: Token, keyword: &str) -> bool {
        token.kind == TokenKind::Word && self.slice(token).eq_ignore_ascii_case(keyword)
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| self.is_keyword(t, keyword))
    }

    fn peek_any_keyword(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.peek_keyword(k))
    }

    /// Consumes `keyword` if it is next.
    fn keyword(&mut self, keyword: &str) -> bool {
        let matched = self.peek_keyword(keyword);
        if matched {
            self.pos += 1;
        }
        matched
    }

    /// Consumes whichever of `keywords` is next.
    fn any_keyword(&mut self, keywords: &[&'static str]) -> Option<&'static str> {
        let found = keywords.iter().copied().find(|k| self.peek_keyword(k))?;
        self.pos += 1;
        Some(found)
    }

    fn peek_punct(&self, c: char) -> bool {
        self.peek().is_some_and(|t| t.kind == TokenKind::Punct(c))
    }

    fn punct(&mut self, c: char) -> bool {
        let matched = self.peek_punct(c);
        if matched {
            self.pos += 1;
        }
        matched
    }

    /// Consumes a bare or delimited identifier, returning it undelimited.
    fn identifier(&mut self) -> Option<String> {
        let token = self.peek()?;
        let name = self.identifier_value(token)?;
        self.pos += 1;
        Some(name)
    }

    fn identifier_value(&self, token: Token) -> Option<String> {
        let raw = self.slice(token);
        match token.kind {
            TokenKind::Word => Some(raw.to_string()),
            TokenKind::Quoted(delimiter) => {
                let inner = raw.strip_prefix(delimiter)?.strip_suffix(delimiter)?;
                let doubled: String = [delimiter, delimiter].iter().collect();
                let name = inner.replace(&doubled, &delimiter.to_string());
                (!name.is_empty()).then_some(name)
            }
            TokenKind::Literal | TokenKind::Punct(_) => None,
        }
    }

    /// Remaining statement text, trimmed.
    fn rest(&self) -> &'a str {
        self.peek()
            .map_or("", |token| self.text[token.start..].trim())
    }

    fn has_top_level_comma(&self) -> bool {
        let mut depth = 0usize;
        for token in &self.tokens[self.pos..] {
            match token.kind {
                TokenKind::Punct('(') => depth += 1,
                TokenKind::Punct(')') => depth = depth.saturating_sub(1),
                TokenKind::Punct(',') if depth == 0 => return true,
                _ => {}
            }
        }
        false
    }

    /// Consumes `( item, item, ... )`, returning each item.
    ///
    /// An item that is a single identifier is returned undelimited; anything
    /// else (prefix lengths, sort order) is returned as written.
    fn column_list(&mut self) -> Option<Vec<String>> {
        if !self.punct('(') {
            return None;
        }
        let mut columns = Vec::new();
        let mut item: Vec<Token> = Vec::new();
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            self.pos += 1;
            match token.kind {
                TokenKind::Punct(')') if depth == 0 => {
                    columns.push(self.column_item(&item)?);
                    return Some(columns);
                }
                TokenKind::Punct(',') if depth == 0 => {
                    columns.push(self.column_item(&item)?);
                    item.clear();
                }
                TokenKind::Punct('(') => {
                    depth += 1;
                    item.push(token);
                }
                TokenKind::Punct(')') => {
                    depth -= 1;
                    item.push(token);
                }
                _ => item.push(token),
            }
        }
        None
    }

    fn column_item(&self, item: &[Token]) -> Option<String> {
        match item {
            [] => None,
            [single] => self
                .identifier_value(*single)
                .or_else(|| Some(self.slice(*single).to_string())),
            [first, .., last] => Some(self.text[first.start..last.end].to_string()),
        }
    }
}

impl fmt::Display for ClassifiedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target() {
            Some(target) => write!(f, "{} {target}", self.kind()),
            None => f.write_str(self.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_text(text: &str) -> ClassifiedStatement {
        classify(&RawStatement::new(text))
    }

    fn ambiguity(text: &str) -> Option<ParseAmbiguity> {
        classify_with_diagnostic(&RawStatement::new(text)).1
    }

    #[test]
    fn test_create_table() {
        let text = "CREATE TABLE users(id INT PRIMARY KEY)";
        assert_eq!(
            classify_text(text),
            ClassifiedStatement::CreateTable {
                table_name: "users".to_string(),
                full_text: text.to_string(),
            }
        );
    }

    #[test]
    fn test_create_table_strips_delimiters_and_ignores_case() {
        let statement = classify_text("create table `order items` (id int)");
        assert!(matches!(
            statement,
            ClassifiedStatement::CreateTable { ref table_name, .. } if table_name == "order items"
        ));

        let statement = classify_text("Create Table \"Users\" (id int)");
        assert!(matches!(
            statement,
            ClassifiedStatement::CreateTable { ref table_name, .. } if table_name == "Users"
        ));
    }

    #[test]
    fn test_create_table_if_not_exists_is_other() {
        let text = "CREATE TABLE IF NOT EXISTS users (id INT)";
        assert_eq!(
            classify_text(text),
            ClassifiedStatement::Other {
                full_text: text.to_string()
            }
        );
        assert_eq!(ambiguity(text), None);
    }

    #[test]
    fn test_create_table_without_name_falls_back() {
        let text = "CREATE TABLE (id INT)";
        assert!(matches!(
            classify_text(text),
            ClassifiedStatement::Other { .. }
        ));
        assert_eq!(
            ambiguity(text),
            Some(ParseAmbiguity {
                shape: "CREATE TABLE",
                missing: "table name"
            })
        );
    }

    #[test]
    fn test_add_column_with_and_without_keyword() {
        let expected = |full_text: &str| ClassifiedStatement::AddColumn {
            table_name: "users".to_string(),
            column_name: "age".to_string(),
            column_definition: "INT DEFAULT 0".to_string(),
            full_text: full_text.to_string(),
        };

        let text = "ALTER TABLE users ADD COLUMN age INT DEFAULT 0";
        assert_eq!(classify_text(text), expected(text));

        let text = "alter table `users` add `age`   INT DEFAULT 0  ";
        assert_eq!(classify_text(text), expected(text));
    }

    #[test]
    fn test_add_column_definition_keeps_literals() {
        let statement =
            classify_text("ALTER TABLE users ADD COLUMN status VARCHAR(20) DEFAULT 'a, b'");
        assert!(matches!(
            statement,
            ClassifiedStatement::AddColumn { ref column_definition, .. }
                if column_definition == "VARCHAR(20) DEFAULT 'a, b'"
        ));
    }

    #[test]
    fn test_alter_table_other_clauses_are_other() {
        for text in [
            "ALTER TABLE users ADD INDEX idx_age (age)",
            "ALTER TABLE users ADD CONSTRAINT pk PRIMARY KEY (id)",
            "ALTER TABLE users ADD UNIQUE (email)",
            "ALTER TABLE users ADD COLUMN a INT, ADD COLUMN b INT",
            "ALTER TABLE users ADD COLUMN (a INT, b INT)",
            "ALTER TABLE users DROP COLUMN age",
            "ALTER TABLE users RENAME TO people",
        ] {
            assert!(
                matches!(classify_text(text), ClassifiedStatement::Other { .. }),
                "{text}"
            );
            assert_eq!(ambiguity(text), None, "{text}");
        }
    }

    #[test]
    fn test_add_column_without_definition_falls_back() {
        let text = "ALTER TABLE users ADD COLUMN age";
        assert!(matches!(
            classify_text(text),
            ClassifiedStatement::Other { .. }
        ));
        assert_eq!(
            ambiguity(text).map(|a| a.missing),
            Some("column definition")
        );
    }

    #[test]
    fn test_create_index_plain() {
        let text = "CREATE INDEX idx_age ON users(age)";
        assert_eq!(
            classify_text(text),
            ClassifiedStatement::CreateIndex {
                table_name: "users".to_string(),
                index_name: "idx_age".to_string(),
                column_names: vec!["age".to_string()],
                unique: false,
                index_type: IndexType::Index,
                full_text: text.to_string(),
            }
        );
    }

    #[test]
    fn test_create_index_modifiers() {
        let statement = classify_text("CREATE UNIQUE INDEX idx ON t (b, `a`)");
        assert!(matches!(
            statement,
            ClassifiedStatement::CreateIndex {
                unique: true,
                index_type: IndexType::Index,
                ref column_names,
                ..
            } if column_names == &["b", "a"]
        ));

        let statement = classify_text("create fulltext index ft ON posts (body)");
        assert!(matches!(
            statement,
            ClassifiedStatement::CreateIndex {
                unique: false,
                index_type: IndexType::Fulltext,
                ..
            }
        ));

        let statement = classify_text("CREATE SPATIAL INDEX sp ON places (geo)");
        assert!(matches!(
            statement,
            ClassifiedStatement::CreateIndex {
                index_type: IndexType::Spatial,
                ..
            }
        ));
    }

    #[test]
    fn test_create_index_keeps_complex_items() {
        let statement = classify_text("CREATE INDEX idx ON t (name(10), created_at DESC)");
        assert!(matches!(
            statement,
            ClassifiedStatement::CreateIndex { ref column_names, .. }
                if column_names == &["name(10)", "created_at DESC"]
        ));
    }

    #[test]
    fn test_create_index_missing_parts_falls_back() {
        assert_eq!(
            ambiguity("CREATE INDEX idx users (age)").map(|a| a.missing),
            Some("ON clause")
        );
        assert_eq!(
            ambiguity("CREATE INDEX idx ON users").map(|a| a.missing),
            Some("column list")
        );
        assert_eq!(
            ambiguity("CREATE INDEX idx ON users (age").map(|a| a.missing),
            Some("column list")
        );
        assert_eq!(
            ambiguity("CREATE INDEX idx ON users (a,,b)").map(|a| a.missing),
            Some("column list")
        );
    }

    #[test]
    fn test_dml_and_other_ddl_are_other() {
        for text in [
            "INSERT INTO users VALUES (1)",
            "UPDATE users SET age = 1",
            "DELETE FROM users",
            "DROP TABLE users",
            "CREATE VIEW v AS SELECT 1",
            "CREATE TEMPORARY TABLE t (id INT)",
        ] {
            assert!(
                matches!(classify_text(text), ClassifiedStatement::Other { .. }),
                "{text}"
            );
        }
    }

    #[test]
    fn test_constructors_render_statements() {
        let statement = ClassifiedStatement::add_column("users", "age", " INT DEFAULT 0 ");
        assert_eq!(
            statement.full_text(),
            "ALTER TABLE users ADD COLUMN age INT DEFAULT 0"
        );
        assert_eq!(
            classify_text(statement.full_text()),
            statement,
            "rendered text classifies back to the same statement"
        );

        let statement = ClassifiedStatement::create_index(
            "users",
            "idx_username_email",
            vec!["username".to_string(), "email".to_string()],
            IndexType::Index,
            true,
        );
        assert_eq!(
            statement.full_text(),
            "CREATE UNIQUE INDEX idx_username_email ON users (username, email)"
        );

        let statement = ClassifiedStatement::create_index(
            "posts",
            "ft_body",
            vec!["body".to_string()],
            IndexType::Fulltext,
            true,
        );
        assert_eq!(
            statement.full_text(),
            "CREATE FULLTEXT INDEX ft_body ON posts (body)"
        );
    }

    #[test]
    fn test_target_description() {
        let statement = classify_text("CREATE INDEX idx ON users ( Email ,  Name )");
        assert_eq!(
            statement.target().as_deref(),
            Some("idx ON users (email, name)")
        );
        assert_eq!(statement.to_string(), "create_index idx ON users (email, name)");
        assert_eq!(classify_text("SELECT 1").target(), None);
    }
}
