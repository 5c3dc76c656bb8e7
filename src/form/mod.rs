pub mod controller;
pub mod page;

pub use controller::FormController;
pub use page::{form_description, render_html, FormDescription};
