use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use canaan_ledger::domain::commands::income::{ConfirmIncomeCommand, MarkRemittanceSentCommand};
use canaan_ledger::domain::commands::report::ReportQuery;
use canaan_ledger::domain::MovementFilter;
use canaan_ledger::storage::FileKeyValueRepository;
use canaan_ledger::Backend;
use shared::{FundSource, Income, UserRole};

#[derive(Parser, Debug)]
#[command(name = "canaan-ledger", version, about = "Church income, expense and remittance ledger")]
struct Cli {
    /// Data directory (defaults to CANAAN_LEDGER_DIR, then ~/Documents/Canaan Ledger)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Role recorded on generated expenses (defaults to the configured role)
    #[arg(long, global = true, value_enum)]
    role: Option<RoleArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show cash, bank and outstanding remittance balances
    Balances,

    /// List movements behind the cash or bank balance
    Movements {
        #[arg(value_enum)]
        side: SideArg,
    },

    /// List incomes waiting for bank confirmation
    Pending,

    /// Confirm an income against a bank statement
    Confirm {
        income_id: String,

        /// Date of the bank statement line (YYYY-MM-DD)
        #[arg(long)]
        statement_date: NaiveDate,
    },

    /// List incomes with a remittance still to send
    Queue,

    /// Mark an income's remittance as sent
    Remit {
        income_id: String,

        /// Account the money leaves from
        #[arg(long, value_enum)]
        from: SourceArg,

        /// Date sent (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Pay a bulk remittance out of the cash register
    Swap { amount: f64 },

    /// List members
    Members {
        /// Include inactive members
        #[arg(long)]
        all: bool,
    },

    /// Category totals over an optional date range
    Report {
        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Write the accounting journal CSV
    Export {
        /// Output directory (default: <data dir>/exports)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RoleArg {
    Admin,
    Treasurer,
    Auditor,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => UserRole::Admin,
            RoleArg::Treasurer => UserRole::Treasurer,
            RoleArg::Auditor => UserRole::Auditor,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SourceArg {
    Cash,
    Bancolombia,
    CajaSocial,
}

impl From<SourceArg> for FundSource {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Cash => FundSource::CashRegister,
            SourceArg::Bancolombia => FundSource::Bancolombia,
            SourceArg::CajaSocial => FundSource::CajaSocial,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SideArg {
    Cash,
    Banks,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut backend = Backend::open(cli.data_dir, cli.role.map(UserRole::from))?;

    for warning in backend.ledger.store().load_warnings() {
        eprintln!(
            "warning: stored {} could not be read and was reset ({})",
            warning.key, warning.message
        );
    }

    match cli.command {
        Command::Balances => print_balances(&backend),

        Command::Movements { side } => {
            let filter = match side {
                SideArg::Cash => MovementFilter::Cash,
                SideArg::Banks => MovementFilter::Banks,
            };
            for m in backend.ledger.movements(filter) {
                println!(
                    "{} | {:<14} | {:<40} | {:>12.2}",
                    m.date, m.source, m.description, m.amount
                );
            }
        }

        Command::Pending => {
            print_incomes(&backend.ledger.pending_incomes());
        }

        Command::Confirm {
            income_id,
            statement_date,
        } => {
            let income = backend.ledger.confirm_income(ConfirmIncomeCommand {
                income_id,
                bank_statement_date: statement_date,
            })?;
            println!("Confirmed {} ({:.2})", income.id, income.total);
        }

        Command::Queue => {
            print_incomes(&backend.ledger.remittance_queue());
        }

        Command::Remit {
            income_id,
            from,
            date,
        } => {
            let sent_date = date.unwrap_or_else(|| backend.ledger.today());
            let outcome = backend.ledger.mark_remittance_sent(MarkRemittanceSentCommand {
                income_id,
                sent_date,
                destination: from.into(),
            })?;
            match outcome.expense {
                Some(expense) => println!(
                    "Remittance sent: {} for {:.2} ({})",
                    expense.id, expense.amount, expense.description
                ),
                None => println!(
                    "Income {} marked as sent; it carried no remittance amount",
                    outcome.income.id
                ),
            }
        }

        Command::Swap { amount } => {
            if !amount.is_finite() || amount <= 0.0 {
                bail!("Swap amount must be a positive number, got {}", amount);
            }
            let swap = backend.swap_cash_for_remittance(amount)?;
            println!("Recorded {} for {:.2}", swap.id, swap.amount);
            print_balances(&backend);
        }

        Command::Members { all } => {
            let members: Vec<_> = if all {
                backend.ledger.store().members().iter().collect()
            } else {
                backend.ledger.active_members()
            };
            for m in members {
                println!("{:<12} {:<30} {} {:?}", m.id, m.name, m.join_date, m.status);
            }
        }

        Command::Report { from, to } => {
            let report = backend.ledger.report(ReportQuery {
                start_date: from,
                end_date: to,
            });
            println!("{}", backend.config.organization_name);
            println!("Income");
            for line in report.income_by_category.iter().filter(|l| l.total != 0.0) {
                println!("  {:<20} {:>12.2}", line.category, line.total);
            }
            println!("Expenses");
            for line in report.expense_by_category.iter().filter(|l| l.total != 0.0) {
                println!("  {:<20} {:>12.2}", line.category, line.total);
            }
            println!("Total income   {:>12.2}", report.total_income);
            println!("Total expenses {:>12.2}", report.total_expense);
            println!("Net            {:>12.2}", report.net);
        }

        Command::Export { out } => {
            let directory = out.unwrap_or_else(|| backend.data_directory().join("exports"));
            let path = backend.export_journal(&directory)?;
            println!("Journal written to {}", path.display());
        }
    }

    Ok(())
}

fn print_balances(backend: &Backend<FileKeyValueRepository>) {
    let balances = backend.ledger.balances();
    println!("Cash         {:>12.2}", balances.cash);
    println!("Banks        {:>12.2}", balances.banks);
    println!("Remittances  {:>12.2}", balances.remittances);
    for account in backend.ledger.account_balances() {
        println!("  {:<14} {:>12.2}", account.source, account.balance);
    }
}

fn print_incomes(incomes: &[&Income]) {
    if incomes.is_empty() {
        println!("Nothing to show");
        return;
    }
    for i in incomes {
        println!(
            "{:<38} {} {:<25} {:<12} {:>12.2}",
            i.id,
            i.date,
            i.member_name,
            i.origin_name(),
            i.total
        );
    }
}
