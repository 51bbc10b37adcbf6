//! Core category domain types and form validation.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, auth::UserID, database_id::DatabaseId};

/// The icons a user can pick for a category.
pub const ICONS: [&str; 12] = [
    "🛒", "🍽️", "🏠", "🚗", "🎉", "💼", "🧾", "💡", "📚", "🎵", "🏋️", "✈️",
];
/// The icon selected when the create form is first shown.
pub const DEFAULT_ICON: &str = ICONS[0];

/// The colours a user can pick for a category.
pub const COLORS: [&str; 8] = [
    "#6E9CFF", "#FF6EC7", "#6EFFA1", "#FFD36E", "#C96EFF", "#6EFFF2", "#FF8A6E", "#A16EFF",
];
/// The colour selected when the create form is first shown.
pub const DEFAULT_COLOR: &str = COLORS[0];

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name from `name` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyCategoryName] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a category name without validation, e.g. for names read back from the database.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a category.
pub type CategoryId = DatabaseId;

/// A budget bucket that expenses are recorded against.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    /// The monthly budget. Only positive, finite values count towards totals.
    pub total_budget: f64,
    pub icon: String,
    pub color: String,
    pub user_id: UserID,
    pub created_at: OffsetDateTime,
}

/// A category that has been validated but not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub total_budget: f64,
    pub icon: String,
    pub color: String,
    pub user_id: UserID,
}

/// The raw data entered in the create category form.
///
/// Every field defaults to an empty string so that a form with missing
/// fields still deserializes and can be shown again with an error message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub total_budget: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

impl CategoryForm {
    /// Validate the form for the category owner `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the first of [Error::EmptyCategoryName], [Error::InvalidBudget],
    /// [Error::InvalidIcon] or [Error::InvalidColor] that applies.
    pub fn validate(&self, user_id: UserID) -> Result<NewCategory, Error> {
        let name = CategoryName::new(&self.name)?;
        let total_budget = parse_budget(&self.total_budget)?;
        let icon = parse_choice(&self.icon, &ICONS, DEFAULT_ICON)
            .ok_or_else(|| Error::InvalidIcon(self.icon.clone()))?;
        let color = parse_choice(&self.color, &COLORS, DEFAULT_COLOR)
            .ok_or_else(|| Error::InvalidColor(self.color.clone()))?;

        Ok(NewCategory {
            name,
            total_budget,
            icon,
            color,
            user_id,
        })
    }
}

/// Parse a budget entered by the user.
///
/// # Errors
///
/// Returns [Error::InvalidBudget] unless `raw` is a finite number greater than zero.
pub fn parse_budget(raw: &str) -> Result<f64, Error> {
    match raw.trim().parse::<f64>() {
        Ok(budget) if budget.is_finite() && budget > 0.0 => Ok(budget),
        _ => Err(Error::InvalidBudget(raw.to_owned())),
    }
}

/// An empty choice falls back to `default`, anything else must be one of `choices`.
fn parse_choice(raw: &str, choices: &[&str], default: &str) -> Option<String> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Some(default.to_owned());
    }

    choices
        .iter()
        .find(|choice| choice.eq_ignore_ascii_case(raw))
        .map(|choice| (*choice).to_owned())
}
