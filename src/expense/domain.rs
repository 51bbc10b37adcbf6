//! Core expense domain types and form validation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, auth::UserID, category::CategoryId, database_id::DatabaseId};

/// Database identifier for an expense.
pub type ExpenseId = DatabaseId;

/// Money spent against a category.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub category_id: CategoryId,
    pub amount: f64,
    /// An optional description, never an empty string.
    pub title: Option<String>,
    pub user_id: UserID,
    pub created_at: OffsetDateTime,
}

/// An expense that has been validated but not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub category_id: CategoryId,
    pub amount: f64,
    pub title: Option<String>,
    pub user_id: UserID,
}

/// The raw data entered in the add expense form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseForm {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub title: String,
}

impl ExpenseForm {
    /// Validate the form for an expense in `category_id` owned by `user_id`.
    ///
    /// # Errors
    ///
    /// See [parse_amount].
    pub fn validate(&self, category_id: CategoryId, user_id: UserID) -> Result<NewExpense, Error> {
        let amount = parse_amount(&self.amount)?;
        let title = Some(self.title.trim())
            .filter(|title| !title.is_empty())
            .map(str::to_owned);

        Ok(NewExpense {
            category_id,
            amount,
            title,
            user_id,
        })
    }
}

/// Parse the amount of an expense.
///
/// # Errors
///
/// - [Error::MissingAmount] if `raw` is empty.
/// - [Error::InvalidAmount] if `raw` is not a finite number greater than zero.
pub fn parse_amount(raw: &str) -> Result<f64, Error> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(Error::MissingAmount);
    }

    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount(raw.to_owned())),
    }
}

/// Parse the amount being typed into the add expense form for the progress preview.
///
/// Anything that is not a valid amount yet counts as zero.
pub fn parse_pending_amount(raw: Option<&str>) -> f64 {
    raw.and_then(|raw| parse_amount(raw).ok()).unwrap_or(0.0)
}
