pub mod chat;
pub mod health;
pub mod testimonials;

pub use chat::chat;
pub use health::{health_check, not_found};
pub use testimonials::{generate_testimonials, view_testimonials};
