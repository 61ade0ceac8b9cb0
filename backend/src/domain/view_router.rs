//! Which screen is active and which income, if any, it is editing.
//!
//! The edit context only lives on the two income forms. Every primary
//! navigation, save and cancel drops it.

use log::debug;
use shared::{Income, View};

/// What an income form is doing
#[derive(Debug, Clone, PartialEq)]
pub enum EditContext<'a> {
    Create,
    Edit(&'a Income),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewRouter {
    view: View,
    editing: Option<Income>,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn editing(&self) -> Option<&Income> {
        self.editing.as_ref()
    }

    /// Id of the record being edited, used to replace it on save
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|i| i.id.as_str())
    }

    pub fn edit_context(&self) -> EditContext<'_> {
        match &self.editing {
            Some(income) if self.view.is_income_form() => EditContext::Edit(income),
            _ => EditContext::Create,
        }
    }

    /// Primary navigation
    pub fn navigate(&mut self, view: View) {
        debug!("Navigating from {:?} to {:?}", self.view, view);
        self.view = view;
        self.editing = None;
    }

    /// Open an income in the form that fits it
    pub fn edit_income(&mut self, income: Income) {
        self.view = if income.is_batch_deposit() {
            View::BatchIncomeEntry
        } else {
            View::IncomeEntry
        };
        debug!("Editing income {} in {:?}", income.id, self.view);
        self.editing = Some(income);
    }

    /// Called after an income or expense was saved
    pub fn after_save(&mut self) {
        self.navigate(View::Dashboard);
    }

    pub fn cancel(&mut self) {
        self.navigate(View::Dashboard);
    }
}
