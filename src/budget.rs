//! Budget aggregation over a user's categories and expenses.
//!
//! Every function here is a pure reduction over lists that have already been
//! fetched from the stores. Malformed numbers (non-finite budgets or amounts)
//! are excluded or counted as zero instead of producing an error, so these
//! functions never fail.

use crate::{
    category::{Category, CategoryId},
    expense::Expense,
};

/// The slice colour used when a category has no colour of its own.
pub const FALLBACK_CHART_COLOR: &str = "#6366F1";

/// The amount spent in a category and how it compares to the category's budget.
///
/// At most one of `remaining` and `over_by` is positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryStatus {
    /// The sum of the amounts of the category's expenses.
    pub spent: f64,
    /// How much of the budget is left, zero if the budget has been exceeded.
    pub remaining: f64,
    /// How much the budget has been exceeded by, zero if it has not.
    pub over_by: f64,
}

/// The value to show for a category: either what is left or what is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetDisplay {
    /// Spending is within budget, the value is the remaining budget.
    Remaining(f64),
    /// Spending exceeds the budget, the value is the overspend.
    OverBy(f64),
}

impl CategoryStatus {
    /// Whether more has been spent than was budgeted.
    pub fn is_over_budget(&self) -> bool {
        self.over_by > 0.0
    }

    /// The single value that should be displayed for this status.
    pub fn display(&self) -> BudgetDisplay {
        if self.is_over_budget() {
            BudgetDisplay::OverBy(self.over_by)
        } else {
            BudgetDisplay::Remaining(self.remaining)
        }
    }
}

/// One slice of the budget pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

fn has_valid_budget(category: &Category) -> bool {
    category.total_budget.is_finite() && category.total_budget > 0.0
}

/// The categories whose budget is a positive, finite number, in their original order.
pub fn valid_categories(categories: &[Category]) -> Vec<&Category> {
    categories
        .iter()
        .filter(|category| has_valid_budget(category))
        .collect()
}

/// The sum of the budgets of the valid categories in `categories`.
///
/// Categories with a zero, negative or non-finite budget contribute nothing.
pub fn total_budget<'a>(categories: impl IntoIterator<Item = &'a Category>) -> f64 {
    categories
        .into_iter()
        .filter(|category| has_valid_budget(category))
        .map(|category| category.total_budget)
        .sum()
}

/// The sum of the amounts of the expenses recorded against `category_id`.
pub fn spent_for_category(expenses: &[Expense], category_id: CategoryId) -> f64 {
    expenses
        .iter()
        .filter(|expense| expense.category_id == category_id)
        .map(|expense| finite_or_zero(expense.amount))
        .sum()
}

/// Compare what has been spent in `category` against its budget.
///
/// A category without a valid budget is treated as having a budget of zero,
/// so any spending puts it over budget.
pub fn category_status(category: &Category, expenses: &[Expense]) -> CategoryStatus {
    let spent = spent_for_category(expenses, category.id);
    let budget = if has_valid_budget(category) {
        category.total_budget
    } else {
        0.0
    };

    if spent > budget {
        CategoryStatus {
            spent,
            remaining: 0.0,
            over_by: spent - budget,
        }
    } else {
        CategoryStatus {
            spent,
            remaining: budget - spent,
            over_by: 0.0,
        }
    }
}

/// Map each category to a pie chart slice sized by its budget.
///
/// Callers should pass the output of [valid_categories]. An empty result means
/// there is nothing to chart and a placeholder should be shown instead.
pub fn portfolio_chart_data<'a>(
    categories: impl IntoIterator<Item = &'a Category>,
) -> Vec<ChartSlice> {
    categories
        .into_iter()
        .map(|category| ChartSlice {
            label: category.name.to_string(),
            value: category.total_budget,
            color: if category.color.trim().is_empty() {
                FALLBACK_CHART_COLOR.to_owned()
            } else {
                category.color.clone()
            },
        })
        .collect()
}

/// The fraction of `budget` that would be used if `pending_amount` were added
/// to `current_spent`, clamped to the range [0, 1].
///
/// Budgets below one are treated as one so that an unset budget does not
/// divide by zero.
pub fn projected_progress(current_spent: f64, pending_amount: f64, budget: f64) -> f64 {
    let divisor = if budget.is_finite() { budget.max(1.0) } else { 1.0 };
    let progress = (current_spent + pending_amount) / divisor;

    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// The expenses that do not belong to any of `categories`.
///
/// These contribute nothing to any category's spend.
pub fn orphaned_expenses<'a>(categories: &[Category], expenses: &'a [Expense]) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|expense| {
            !categories
                .iter()
                .any(|category| category.id == expense.category_id)
        })
        .collect()
}

#[inline]
fn finite_or_zero(number: f64) -> f64 {
    if number.is_finite() { number } else { 0.0 }
}



#[cfg(test)]
mod spent_for_category_tests {
    use super::{spent_for_category, test_fixtures::expense};

    #[test]
    fn sums_matching_expenses() {
        let expenses = vec![
            expense(1, 1, 1200.0),
            expense(2, 1, 300.0),
            expense(3, 2, 50.0),
        ];

        assert_eq!(spent_for_category(&expenses, 1), 1500.0);
        assert_eq!(spent_for_category(&expenses, 2), 50.0);
    }

    #[test]
    fn no_matches_is_zero() {
        let expenses = vec![expense(1, 1, 10.0)];

        assert_eq!(spent_for_category(&expenses, 42), 0.0);
        assert_eq!(spent_for_category(&[], 1), 0.0);
    }

    #[test]
    fn non_finite_amounts_count_as_zero() {
        let expenses = vec![expense(1, 1, f64::NAN), expense(2, 1, 25.0)];

        assert_eq!(spent_for_category(&expenses, 1), 25.0);
    }
}




#[cfg(test)]
mod orphaned_expenses_tests {
    use super::{
        orphaned_expenses, spent_for_category,
        test_fixtures::{category, expense},
    };

    #[test]
    fn finds_expenses_without_a_category() {
        let categories = vec![category(1, 100.0)];
        let expenses = vec![expense(1, 1, 10.0), expense(2, 7, 99.0)];

        let orphans = orphaned_expenses(&categories, &expenses);

        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].id, 2);
        assert_eq!(spent_for_category(&expenses, 1), 10.0);
    }
}
