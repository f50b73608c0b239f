use serde::{Deserialize, Serialize};

/// A client quote as shown on the portfolio site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub company: String,
    pub role: String,
}

impl Testimonial {
    pub fn new(
        quote: impl Into<String>,
        author: impl Into<String>,
        company: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            quote: quote.into(),
            author: author.into(),
            company: company.into(),
            role: role.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTestimonialsResponse {
    pub message: String,
    pub testimonial_count: usize,
    pub storage_key: String,
}
