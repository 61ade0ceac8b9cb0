//! Domain-level command and query types.
//!
//! Services take these instead of long argument lists; callers (the CLI or an
//! embedding UI) build them from their own input.

pub mod income {
    use chrono::NaiveDate;
    use shared::{FundSource, Income};

    /// Confirm a pending income against a bank statement line
    #[derive(Debug, Clone)]
    pub struct ConfirmIncomeCommand {
        pub income_id: String,
        pub bank_statement_date: NaiveDate,
    }

    /// Record that the remittance portion of an income was sent
    #[derive(Debug, Clone)]
    pub struct MarkRemittanceSentCommand {
        pub income_id: String,
        pub sent_date: NaiveDate,
        /// Account the money left from
        pub destination: FundSource,
    }

    /// Result of deleting an income.
    #[derive(Debug, Clone)]
    pub struct DeleteIncomeResult {
        pub income: Income,
        pub success_message: String,
    }
}

pub mod member {
    use chrono::NaiveDate;
    use shared::{Member, MemberStatus};

    /// Partial update: only the fields that are `Some` change
    #[derive(Debug, Clone, Default)]
    pub struct UpdateMemberCommand {
        pub member_id: String,
        pub name: Option<String>,
        pub join_date: Option<NaiveDate>,
        pub status: Option<MemberStatus>,
    }

    /// Result of deleting a member.
    #[derive(Debug, Clone)]
    pub struct DeleteMemberResult {
        pub member: Member,
        pub success_message: String,
    }
}

pub mod report {
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    /// Inclusive date window. `None` leaves that side open.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ReportQuery {
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    impl ReportQuery {
        pub fn contains(&self, date: NaiveDate) -> bool {
            self.start_date.map_or(true, |start| date >= start)
                && self.end_date.map_or(true, |end| date <= end)
        }
    }
}
