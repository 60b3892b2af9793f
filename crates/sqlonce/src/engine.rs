//! Idempotency engine.
//!
//! Drives a script through splitting, classification and per-statement
//! decisions, then runs each decision as one unit of work on the gateway.
//! A drop-then-recreate pair shares a transaction; anything else runs in
//! autocommit mode.
//! Statements run strictly in source order. A failed statement is recorded
//! and the run moves on; only a lost connection stops it.

use tracing::{debug, error, info, warn};

use crate::classifier::{ClassifiedStatement, classify, classify_with_diagnostic};
use crate::error::{GatewayError, StatementError};
use crate::gateway::Gateway;
use crate::inspector::SchemaInspector;
use crate::normalize::equivalent;
use crate::report::{Decision, Outcome, ReportEntry, RunReport};
use crate::splitter::split;

/// A decision plus the physical statements that carry it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// What to do with the statement.
    pub decision: Decision,
    /// SQL to send, in order. Empty for [`Decision::Skip`].
    pub actions: Vec<String>,
}

impl Plan {
    fn apply(full_text: &str) -> Self {
        Self {
            decision: Decision::Apply,
            actions: vec![full_text.to_string()],
        }
    }

    fn skip() -> Self {
        Self {
            decision: Decision::Skip,
            actions: Vec::new(),
        }
    }

    fn replace(drop_sql: String, full_text: &str) -> Self {
        Self {
            decision: Decision::Replace,
            actions: vec![drop_sql, full_text.to_string()],
        }
    }
}

/// Applies statements so that each takes effect once.
pub struct IdempotencyEngine<'g, G: Gateway> {
    gateway: &'g mut G,
    dry_run: bool,
}

impl<'g, G: Gateway> IdempotencyEngine<'g, G> {
    /// Creates an engine that owns `gateway` for the length of a run.
    pub fn new(gateway: &'g mut G) -> Self {
        Self {
            gateway,
            dry_run: false,
        }
    }

    /// Enables dry-run mode (decisions are made and reported, nothing is
    /// executed).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Returns whether this engine is in dry-run mode.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Decides what to do with `statement` against the live schema.
    ///
    /// Only metadata is read; the same plan is produced in dry-run and live
    /// mode for the same schema state.
    pub async fn plan(&mut self, statement: &ClassifiedStatement) -> Result<Plan, StatementError> {
        let mut inspector = SchemaInspector::new(&mut *self.gateway);
        let plan = match statement {
            ClassifiedStatement::CreateTable {
                table_name,
                full_text,
            } => {
                let exists = inspector
                    .table_exists(table_name)
                    .await
                    .map_err(StatementError::Inspection)?;
                if exists {
                    let drop_sql = self.gateway.dialect().drop_table_sql(table_name);
                    Plan::replace(drop_sql, full_text)
                } else {
                    Plan::apply(full_text)
                }
            }
            ClassifiedStatement::AddColumn {
                table_name,
                column_name,
                column_definition,
                full_text,
            } => {
                let existing = inspector
                    .column_definition(table_name, column_name)
                    .await
                    .map_err(StatementError::Inspection)?;
                match existing {
                    None => Plan::apply(full_text),
                    Some(current) if equivalent(&current, column_definition) => Plan::skip(),
                    Some(current) => {
                        debug!(
                            table = %table_name,
                            column = %column_name,
                            current = %current,
                            requested = %column_definition,
                            "Column definition differs"
                        );
                        let drop_sql = self
                            .gateway
                            .dialect()
                            .drop_column_sql(table_name, column_name);
                        Plan::replace(drop_sql, full_text)
                    }
                }
            }
            // Existence alone triggers a replace; definitions are not compared.
            ClassifiedStatement::CreateIndex {
                table_name,
                index_name,
                full_text,
                ..
            } => {
                let exists = inspector
                    .index_exists(table_name, index_name)
                    .await
                    .map_err(StatementError::Inspection)?;
                if exists {
                    let drop_sql = self.gateway.dialect().drop_index_sql(table_name, index_name);
                    Plan::replace(drop_sql, full_text)
                } else {
                    Plan::apply(full_text)
                }
            }
            ClassifiedStatement::Other { full_text } => Plan::apply(full_text),
        };
        Ok(plan)
    }

    /// Runs a single statement through the decision table.
    pub async fn apply_statement(&mut self, statement: &ClassifiedStatement) -> ReportEntry {
        self.run_statement(1, statement).await.0
    }

    /// Splits, classifies and applies every statement of `script`.
    pub async fn execute_script(&mut self, script: &str) -> RunReport {
        let mut report = RunReport::new(self.dry_run);
        let statements = split(script);
        if statements.is_empty() {
            warn!("Script contains no statements");
            return report;
        }

        info!(
            statements = statements.len(),
            dry_run = self.dry_run,
            "Executing script"
        );

        let mut remaining = statements.iter().enumerate();
        for (offset, raw) in remaining.by_ref() {
            let statement = classify(raw);
            let (entry, fatal) = self.run_statement(offset + 1, &statement).await;
            report.entries.push(entry);
            if fatal {
                report.aborted = true;
                break;
            }
        }

        for (offset, raw) in remaining {
            let (statement, _) = classify_with_diagnostic(raw);
            report
                .entries
                .push(unattempted_entry(offset + 1, &statement));
        }

        let counts = report.counts();
        if report.aborted {
            error!(
                not_attempted = counts.not_attempted,
                "Connection lost, remaining statements not attempted"
            );
        }
        info!(
            success = counts.applied + counts.replaced,
            skipped = counts.skipped,
            errors = counts.failed,
            dry_run = self.dry_run,
            "Script execution completed"
        );
        report
    }

    /// Returns the report entry and whether the run must stop.
    async fn run_statement(
        &mut self,
        index: usize,
        statement: &ClassifiedStatement,
    ) -> (ReportEntry, bool) {
        let mut entry = unattempted_entry(index, statement);

        let plan = match self.plan(statement).await {
            Ok(plan) => plan,
            Err(error) => return fail(entry, &error),
        };

        info!(
            index,
            kind = statement.kind(),
            target = %statement.target().unwrap_or_default(),
            decision = %plan.decision,
            "Statement decided"
        );
        entry.decision = Some(plan.decision);
        entry.actions = plan.actions;

        if self.dry_run {
            for sql in &entry.actions {
                info!(index, sql = %sql, "Would execute");
            }
        } else if let Err(error) = self.run_unit(&entry.actions).await {
            return fail(entry, &error);
        }

        entry.outcome = Outcome::from_decision(plan.decision);
        (entry, false)
    }

    /// Runs `actions` as one unit of work.
    ///
    /// A single statement runs as sent, in the connection's autocommit mode,
    /// so transaction control and statements like `VACUUM` in a script work.
    /// A drop-then-recreate pair runs inside one transaction that is rolled
    /// back if either statement or the commit fails.
    async fn run_unit(&mut self, actions: &[String]) -> Result<(), StatementError> {
        match actions {
            [] => Ok(()),
            [sql] => {
                debug!(sql = %sql, "Executing SQL");
                self.gateway
                    .execute(sql, &[])
                    .await
                    .map(|_| ())
                    .map_err(StatementError::Execution)
            }
            _ => self.run_transaction(actions).await,
        }
    }

    async fn run_transaction(&mut self, actions: &[String]) -> Result<(), StatementError> {
        self.gateway
            .begin()
            .await
            .map_err(StatementError::Execution)?;
        for sql in actions {
            debug!(sql = %sql, "Executing SQL");
            if let Err(failure) = self.gateway.execute(sql, &[]).await {
                return Err(self.abandon_transaction(failure).await);
            }
        }
        if let Err(failure) = self.gateway.commit().await {
            return Err(self.abandon_transaction(failure).await);
        }
        Ok(())
    }

    /// Rolls back after `failure` unless the connection is gone.
    async fn abandon_transaction(&mut self, failure: GatewayError) -> StatementError {
        if !failure.is_fatal() {
            if let Err(rollback) = self.gateway.rollback().await {
                warn!(error = %rollback, "Rollback failed");
                if rollback.is_fatal() {
                    return StatementError::Execution(rollback);
                }
            }
        }
        StatementError::Execution(failure)
    }
}

/// Runs `script` on `gateway` and returns the report.
pub async fn execute_script<G: Gateway>(gateway: &mut G, script: &str, dry_run: bool) -> RunReport {
    IdempotencyEngine::new(gateway)
        .dry_run(dry_run)
        .execute_script(script)
        .await
}

fn unattempted_entry(index: usize, statement: &ClassifiedStatement) -> ReportEntry {
    ReportEntry {
        index,
        statement: statement.full_text().to_string(),
        kind: statement.kind(),
        decision: None,
        actions: Vec::new(),
        outcome: Outcome::NotAttempted,
    }
}

fn fail(mut entry: ReportEntry, error: &StatementError) -> (ReportEntry, bool) {
    error!(
        index = entry.index,
        statement = %entry.preview(),
        error = %error,
        "Statement failed"
    );
    entry.outcome = Outcome::from(error);
    (entry, error.is_fatal())
}
