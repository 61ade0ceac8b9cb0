//! Category totals for the reports screen.
//!
//! Incomes are counted by breakdown line, so a single deposit split across
//! tithe and offering shows up under both. Pending incomes are included: the
//! report is about what was collected, not what has cleared the bank.

use serde::{Deserialize, Serialize};
use shared::{Expense, ExpenseCategory, Income, IncomeCategory};

use crate::domain::commands::report::ReportQuery;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal<C> {
    pub category: C,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerReport {
    pub query: ReportQuery,
    /// One entry per income category, in `IncomeCategory::ALL` order
    pub income_by_category: Vec<CategoryTotal<IncomeCategory>>,
    /// One entry per expense category, in `ExpenseCategory::ALL` order
    pub expense_by_category: Vec<CategoryTotal<ExpenseCategory>>,
    pub total_income: f64,
    pub total_expense: f64,
    pub net: f64,
}

pub fn build_report(incomes: &[Income], expenses: &[Expense], query: ReportQuery) -> LedgerReport {
    let incomes: Vec<&Income> = incomes.iter().filter(|i| query.contains(i.date)).collect();
    let expenses: Vec<&Expense> = expenses.iter().filter(|e| query.contains(e.date)).collect();

    let income_by_category: Vec<CategoryTotal<IncomeCategory>> = IncomeCategory::ALL
        .iter()
        .map(|category| CategoryTotal {
            category: *category,
            total: incomes
                .iter()
                .flat_map(|i| i.breakdown.iter())
                .filter(|b| b.category == *category)
                .map(|b| b.amount)
                .sum(),
        })
        .collect();

    let expense_by_category: Vec<CategoryTotal<ExpenseCategory>> = ExpenseCategory::ALL
        .iter()
        .map(|category| CategoryTotal {
            category: *category,
            total: expenses
                .iter()
                .filter(|e| e.category == *category)
                .map(|e| e.amount)
                .sum(),
        })
        .collect();

    let total_income: f64 = income_by_category.iter().map(|c| c.total).sum();
    let total_expense: f64 = expense_by_category.iter().map(|c| c.total).sum();

    LedgerReport {
        query,
        income_by_category,
        expense_by_category,
        total_income,
        total_expense,
        net: total_income - total_expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{date, expense, income};
    use shared::{BankAccount, FundSource, TransactionMethod, TransactionStatus};

    fn total_for(report: &LedgerReport, category: IncomeCategory) -> f64 {
        report
            .income_by_category
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.total)
            .unwrap()
    }

    #[test]
    fn test_report_totals_and_net() {
        let incomes = vec![
            income(
                "i1",
                TransactionMethod::Cash,
                BankAccount::NotApplicable,
                TransactionStatus::Confirmed,
                &[(IncomeCategory::Tithe, 70.0), (IncomeCategory::CentralChurch, 30.0)],
            ),
            income(
                "i2",
                TransactionMethod::Bank,
                BankAccount::Bancolombia,
                TransactionStatus::Pending,
                &[(IncomeCategory::Tithe, 50.0)],
            ),
        ];
        let expenses = vec![
            expense("e1", 40.0, ExpenseCategory::Rent, FundSource::Bancolombia),
            expense("e2", 30.0, ExpenseCategory::Remittances, FundSource::CashRegister),
        ];

        let report = build_report(&incomes, &expenses, ReportQuery::default());

        assert_eq!(total_for(&report, IncomeCategory::Tithe), 120.0);
        assert_eq!(total_for(&report, IncomeCategory::CentralChurch), 30.0);
        assert_eq!(total_for(&report, IncomeCategory::Offering), 0.0);
        assert_eq!(report.income_by_category.len(), IncomeCategory::ALL.len());
        assert_eq!(report.expense_by_category.len(), ExpenseCategory::ALL.len());
        assert_eq!(report.total_income, 150.0);
        assert_eq!(report.total_expense, 70.0);
        assert_eq!(report.net, 80.0);
    }

    #[test]
    fn test_report_date_window() {
        let mut early = income(
            "i1",
            TransactionMethod::Cash,
            BankAccount::NotApplicable,
            TransactionStatus::Confirmed,
            &[(IncomeCategory::Offering, 10.0)],
        );
        early.date = date("2024-02-01");
        let late = income(
            "i2",
            TransactionMethod::Cash,
            BankAccount::NotApplicable,
            TransactionStatus::Confirmed,
            &[(IncomeCategory::Offering, 25.0)],
        );

        let query = ReportQuery {
            start_date: Some(date("2024-03-01")),
            end_date: Some(date("2024-03-31")),
        };
        let report = build_report(&[early, late], &[], query);

        assert_eq!(report.total_income, 25.0);
        assert_eq!(report.query.start_date, Some(date("2024-03-01")));
    }
}
