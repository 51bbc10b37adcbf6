//! The home page with the budget overview.

mod chart;
mod page;

pub use page::{HomePageState, get_category_list_partial, get_home_page, get_summary_partial};
