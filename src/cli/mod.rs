/// Dashboard pages
pub mod pages;

pub use pages::{Page, PageError};
