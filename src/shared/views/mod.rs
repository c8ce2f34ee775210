//! HTML views served to browsers.
//!
//! The pages are static shells; all complaint data is fetched client-side
//! from `/get_complaints`.

mod engine;

pub use engine::{TemplateError, TemplateRenderer, VIEW_ADMIN, VIEW_DASHBOARD, VIEW_SUBMIT};
