//! UI Components
//!
//! Leptos components for the list and form views.

mod choice_select;
mod delete_confirm_button;
mod nav_bar;
mod pagination;
mod resume_form;
mod resume_list;
mod resume_row;
mod search_bar;

pub use choice_select::{source_options, status_options, ChoiceSelect};
pub use delete_confirm_button::DeleteConfirmButton;
pub use nav_bar::NavBar;
pub use pagination::Pagination;
pub use resume_form::ResumeForm;
pub use resume_list::ResumeList;
pub use resume_row::ResumeRow;
pub use search_bar::SearchBar;
