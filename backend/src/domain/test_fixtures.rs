//! Record builders shared by the domain unit tests.

use chrono::NaiveDate;
use shared::{
    BankAccount, Expense, ExpenseCategory, FundSource, Income, IncomeBreakdown, IncomeCategory,
    Member, MemberStatus, TransactionMethod, TransactionStatus,
};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Single-member income dated 2024-03-03 whose total equals its breakdown
pub fn income(
    id: &str,
    method: TransactionMethod,
    bank: BankAccount,
    status: TransactionStatus,
    lines: &[(IncomeCategory, f64)],
) -> Income {
    let breakdown: Vec<IncomeBreakdown> = lines
        .iter()
        .map(|(category, amount)| IncomeBreakdown::new(*category, *amount))
        .collect();
    let total = breakdown.iter().map(|b| b.amount).sum();

    Income {
        id: id.to_string(),
        date: date("2024-03-03"),
        worship_date: date("2024-03-03"),
        member_id: "123456".to_string(),
        member_name: "Juan Pérez".to_string(),
        method,
        bank,
        breakdown,
        total,
        notes: String::new(),
        status,
        reconciliation_date: None,
        is_remittance: None,
        remittance_sent: None,
        remittance_sent_date: None,
        is_batch: None,
    }
}

pub fn expense(id: &str, amount: f64, category: ExpenseCategory, source: FundSource) -> Expense {
    Expense {
        id: id.to_string(),
        date: date("2024-03-04"),
        amount,
        category,
        source,
        responsible: "Tesorero".to_string(),
        third_party: "Proveedor".to_string(),
        description: format!("{} {}", category, id),
    }
}

pub fn member(id: &str, name: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        join_date: date("2024-01-01"),
        status: MemberStatus::Active,
    }
}
