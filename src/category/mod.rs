//! Budget categories: the domain types, the create page and the delete endpoint.

mod create;
mod delete;
mod domain;

pub use create::{CreateCategoryState, create_category_endpoint, get_new_category_page};
pub use delete::{CATEGORIES_CHANGED_EVENT, DeleteCategoryState, delete_category_endpoint};
pub use domain::{
    COLORS, Category, CategoryForm, CategoryId, CategoryName, DEFAULT_COLOR, DEFAULT_ICON, ICONS,
    NewCategory, parse_budget,
};
