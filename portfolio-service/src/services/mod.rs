pub mod profile;
pub mod providers;
pub mod storage;
pub mod testimonials;

pub use providers::{CompletionProvider, OpenAiProvider, ProviderError, ScriptedProvider};
pub use storage::{JsonStore, LocalJsonStore};
pub use testimonials::{TestimonialGenerator, TESTIMONIALS_KEY};
