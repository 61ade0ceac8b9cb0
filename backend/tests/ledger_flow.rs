use chrono::NaiveDate;
use tempfile::TempDir;

use canaan_ledger::domain::commands::income::{ConfirmIncomeCommand, MarkRemittanceSentCommand};
use canaan_ledger::Backend;
use shared::{
    BankAccount, Balances, FundSource, Income, IncomeBreakdown, IncomeCategory, TransactionMethod,
    TransactionStatus, UserRole, EXPENSES_KEY, INCOMES_KEY,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn sunday_income() -> Income {
    Income {
        id: "ing-2024-03-03".to_string(),
        date: date("2024-03-03"),
        worship_date: date("2024-03-03"),
        member_id: "123456".to_string(),
        member_name: "Juan Pérez".to_string(),
        method: TransactionMethod::Cash,
        bank: BankAccount::NotApplicable,
        breakdown: vec![
            IncomeBreakdown::new(IncomeCategory::Tithe, 70.0),
            IncomeBreakdown::new(IncomeCategory::CentralChurch, 30.0),
        ],
        total: 100.0,
        notes: String::new(),
        status: TransactionStatus::Pending,
        reconciliation_date: None,
        is_remittance: None,
        remittance_sent: None,
        remittance_sent_date: None,
        is_batch: None,
    }
}

#[test]
fn test_income_to_remittance_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut backend =
            Backend::open(Some(dir.path().to_path_buf()), Some(UserRole::Treasurer)).unwrap();
        backend.save_income(sunday_income()).unwrap();
        assert_eq!(
            backend.ledger.balances(),
            Balances {
                cash: 0.0,
                banks: 0.0,
                remittances: 30.0
            }
        );

        backend
            .ledger
            .confirm_income(ConfirmIncomeCommand {
                income_id: "ing-2024-03-03".to_string(),
                bank_statement_date: date("2024-03-05"),
            })
            .unwrap();
        backend
            .ledger
            .mark_remittance_sent(MarkRemittanceSentCommand {
                income_id: "ing-2024-03-03".to_string(),
                sent_date: date("2024-03-10"),
                destination: FundSource::CashRegister,
            })
            .unwrap();
    }

    assert!(dir.path().join(format!("{}.json", INCOMES_KEY)).exists());
    assert!(dir.path().join(format!("{}.json", EXPENSES_KEY)).exists());
    assert!(dir.path().join("ledger_config.yaml").exists());

    let backend = Backend::open(Some(dir.path().to_path_buf()), None).unwrap();
    assert_eq!(backend.ledger.role(), UserRole::Admin);
    assert_eq!(
        backend.ledger.balances(),
        Balances {
            cash: 70.0,
            banks: 0.0,
            remittances: 0.0
        }
    );

    let expenses = backend.ledger.store().expenses();
    assert_eq!(expenses.len(), 1);
    assert!(expenses[0].is_auto_remittance());
    assert_eq!(expenses[0].responsible, "Tesorero");
    assert_eq!(expenses[0].amount, 30.0);

    let income = &backend.ledger.store().incomes()[0];
    assert_eq!(income.reconciliation_date, Some(date("2024-03-05")));
    assert_eq!(income.remittance_sent_date, Some(date("2024-03-10")));
}

#[test]
fn test_saved_documents_use_stored_field_names() {
    let dir = TempDir::new().unwrap();
    let mut backend = Backend::open(Some(dir.path().to_path_buf()), None).unwrap();
    backend.save_income(sunday_income()).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("canaan_incomes.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["memberName"], "Juan Pérez");
    assert_eq!(value[0]["method"], "Efectivo");
    assert_eq!(value[0]["status"], "Pendiente");
    assert_eq!(value[0]["breakdown"][1]["category"], "Iglesia Central");
}

#[test]
fn test_corrupt_document_is_reported_and_kept() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("canaan_expenses.json"), "[{\"id\":").unwrap();

    let backend = Backend::open(Some(dir.path().to_path_buf()), None).unwrap();

    let warnings = backend.ledger.store().load_warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, EXPENSES_KEY);
    assert!(backend.ledger.store().expenses().is_empty());
    assert_eq!(backend.ledger.store().members().len(), 4);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("canaan_expenses_malformed.json")).unwrap(),
        "[{\"id\":"
    );
}

#[test]
fn test_member_removal_leaves_history_and_export() {
    let dir = TempDir::new().unwrap();
    let mut backend = Backend::open(Some(dir.path().to_path_buf()), None).unwrap();
    let mut income = sunday_income();
    income.status = TransactionStatus::Confirmed;
    backend.save_income(income).unwrap();

    backend.ledger.delete_member("123456").unwrap();

    let reopened = Backend::open(Some(dir.path().to_path_buf()), None).unwrap();
    assert!(reopened.ledger.store().member("123456").is_none());
    assert_eq!(reopened.ledger.store().incomes()[0].member_name, "Juan Pérez");

    let path = reopened.export_journal(&dir.path().join("exports")).unwrap();
    let csv = std::fs::read_to_string(path).unwrap();
    assert_eq!(csv.lines().count(), 5);
    assert!(csv.contains("Juan Pérez"));
}
