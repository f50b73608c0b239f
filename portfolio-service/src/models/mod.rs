pub mod chat;
pub mod testimonial;

pub use chat::{ChatRequest, ChatResponse};
pub use testimonial::{GenerateTestimonialsResponse, Testimonial};
