//! Accounting export.
//!
//! Produces a double-entry journal as CSV for the bookkeeper. Each confirmed
//! income breakdown line becomes two rows (debit the account holding the money,
//! credit the category account) and each expense becomes two rows (debit the
//! category account, credit the account it was paid from). Categories without
//! an assigned account export an empty code so the bookkeeper can fill it in.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use shared::{Expense, FundSource, Income};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalLine {
    pub date: NaiveDate,
    pub document: String,
    pub account: String,
    pub description: String,
    pub third_party: String,
    pub debit: String,
    pub credit: String,
}

#[derive(Debug, Clone)]
pub struct JournalExport {
    pub csv_content: String,
    pub filename: String,
    pub line_count: usize,
}

fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

fn account(code: Option<&'static str>) -> String {
    code.unwrap_or_default().to_string()
}

fn source_account(source: FundSource) -> String {
    account(source.account_code())
}

/// Journal rows for the given records, incomes first, in stored order
pub fn journal_lines(incomes: &[Income], expenses: &[Expense]) -> Vec<JournalLine> {
    let mut lines = Vec::new();

    for income in incomes.iter().filter(|i| i.is_confirmed()) {
        let holding_account = source_account(income.fund_source());
        for part in &income.breakdown {
            let third_party = part
                .member_name
                .clone()
                .unwrap_or_else(|| income.member_name.clone());
            let description = format!("{} {}", part.category, third_party);

            lines.push(JournalLine {
                date: income.date,
                document: income.id.clone(),
                account: holding_account.clone(),
                description: description.clone(),
                third_party: third_party.clone(),
                debit: amount(part.amount),
                credit: String::new(),
            });
            lines.push(JournalLine {
                date: income.date,
                document: income.id.clone(),
                account: account(part.category.account_code()),
                description,
                third_party,
                debit: String::new(),
                credit: amount(part.amount),
            });
        }
    }

    for expense in expenses {
        lines.push(JournalLine {
            date: expense.date,
            document: expense.id.clone(),
            account: account(expense.category.account_code()),
            description: expense.description.clone(),
            third_party: expense.third_party.clone(),
            debit: amount(expense.amount),
            credit: String::new(),
        });
        lines.push(JournalLine {
            date: expense.date,
            document: expense.id.clone(),
            account: source_account(expense.source),
            description: expense.description.clone(),
            third_party: expense.third_party.clone(),
            debit: String::new(),
            credit: amount(expense.amount),
        });
    }

    lines
}

/// Render the journal as CSV with a header row
pub fn export_journal_csv(
    incomes: &[Income],
    expenses: &[Expense],
    today: NaiveDate,
) -> Result<JournalExport> {
    let lines = journal_lines(incomes, expenses);

    let mut writer = csv::Writer::from_writer(Vec::new());
    for line in &lines {
        writer
            .serialize(line)
            .with_context(|| format!("Failed to write journal line for {}", line.document))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish journal CSV: {}", e.error()))?;
    let csv_content = String::from_utf8(bytes).context("Journal CSV is not valid UTF-8")?;

    let export = JournalExport {
        csv_content,
        filename: format!("canaan_journal_{}.csv", today.format("%Y%m%d")),
        line_count: lines.len(),
    };
    info!(
        "Exported {} journal lines ({} bytes) as {}",
        export.line_count,
        export.csv_content.len(),
        export.filename
    );
    Ok(export)
}

/// Write an export into `directory`, returning the full path of the file
pub fn write_export(export: &JournalExport, directory: &Path) -> Result<PathBuf> {
    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create export directory {:?}", directory))?;
    let path = directory.join(&export.filename);
    fs::write(&path, &export.csv_content)
        .with_context(|| format!("Failed to write export file {:?}", path))?;
    info!("Journal written to {}", path.display());
    Ok(path)
}
