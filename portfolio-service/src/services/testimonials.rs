//! Testimonial generation: scenario prompts, the reply parser and the
//! sequential generation run.

use crate::models::Testimonial;
use crate::services::providers::{ChatMessage, CompletionProvider, GenerationParams};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Storage key of the generated testimonial list.
pub const TESTIMONIALS_KEY: &str = "testimonials.json";

/// Short replies, more varied phrasing than the chatbot.
pub const TESTIMONIAL_PARAMS: GenerationParams = GenerationParams {
    max_tokens: 150,
    temperature: 0.7,
};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub project_type: &'static str,
    pub client_industry: &'static str,
}

/// Scenario catalog; a generation run uses the first `testimonials.count`.
pub const SCENARIOS: [Scenario; 6] = [
    Scenario {
        project_type: "AI-Powered E-commerce Platform",
        client_industry: "Retail Tech",
    },
    Scenario {
        project_type: "Real-time Data Analytics Dashboard",
        client_industry: "Financial Services",
    },
    Scenario {
        project_type: "Collaborative Project Management Tool",
        client_industry: "SaaS / Technology",
    },
    Scenario {
        project_type: "Mobile Health & Wellness App",
        client_industry: "Healthcare",
    },
    Scenario {
        project_type: "Custom CRM Integration",
        client_industry: "B2B Services",
    },
    Scenario {
        project_type: "Educational Platform Development",
        client_industry: "EdTech",
    },
];

pub fn scenario_messages(
    developer_name: &str,
    developer_role: &str,
    scenario: &Scenario,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!(
            "You are an AI assistant tasked with generating a concise, positive, and authentic-sounding \
             client testimonial for a {role} named {name}. The testimonial should highlight their work on \
             a {project} project for a client in the {industry} industry. The tone should be professional \
             but genuine. Provide the testimonial quote, a fictional client name, their company, and their role.",
            role = developer_role,
            name = developer_name,
            project = scenario.project_type,
            industry = scenario.client_industry,
        )),
        ChatMessage::user(format!(
            "Please generate a testimonial for {name} who worked as a {role} on a {project} for our \
             company in the {industry} sector. Highlight aspects like skill, communication, and project \
             impact. Keep the quote to 2-3 sentences.",
            name = developer_name,
            role = developer_role,
            project = scenario.project_type,
            industry = scenario.client_industry,
        )),
    ]
}

/// Stand-in for a scenario whose model call failed or returned no text.
pub fn placeholder_for(scenario: &Scenario) -> Testimonial {
    Testimonial::new(
        format!(
            "Placeholder for a great testimonial about the {}.",
            scenario.project_type
        ),
        "Satisfied Client",
        format!("{} Co.", scenario.client_industry),
        "Project Lead",
    )
}

/// Returned by the parser when no quote can be recovered from a reply.
pub fn failure_record() -> Testimonial {
    Testimonial::new(
        "Failed to generate a well-formatted testimonial.",
        "AI System",
        "Internal",
        "Content Generator",
    )
}

// Each field runs up to the next label or the end of the text. The quote may
// span lines; the other fields end at a line break.
static QUOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)\b(?:quote|testimonial):\s*["']?(.*?)["']?\s*(?:\b(?:author|company|role):|\z)"#,
    )
    .expect("quote pattern is valid")
});
static AUTHOR_RE: Lazy<Regex> = Lazy::new(|| field_regex("author"));
static COMPANY_RE: Lazy<Regex> = Lazy::new(|| field_regex("company"));
static ROLE_RE: Lazy<Regex> = Lazy::new(|| field_regex("role"));

fn field_regex(label: &str) -> Regex {
    Regex::new(&format!(
        r"(?im)\b{}:\s*(.*?)\s*(?:\b(?:quote|testimonial|author|company|role):|$)",
        label
    ))
    .expect("field pattern is valid")
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

fn strip_label<'a>(line: &'a str, labels: &[&str]) -> &'a str {
    let line = line.trim();
    for label in labels {
        if line.len() >= label.len()
            && line.is_char_boundary(label.len())
            && line[..label.len()].eq_ignore_ascii_case(label)
        {
            return line[label.len()..].trim();
        }
    }
    line
}

fn unescape_quotes(text: &str) -> String {
    text.replace("\\\"", "\"")
}

/// Best-effort extraction of a testimonial from a free-form model reply.
///
/// Four or more lines are read positionally as quote, author, company and
/// role. Shorter replies are searched for `Quote:`/`Testimonial:`, `Author:`,
/// `Company:` and `Role:` labels, with missing fields set to `N/A`. A reply
/// with no recoverable quote yields [`failure_record`].
pub fn parse_testimonial(raw: &str) -> Testimonial {
    let text = raw.trim();
    let lines: Vec<&str> = text.lines().collect();

    if lines.len() >= 4 {
        return Testimonial::new(
            unescape_quotes(strip_label(lines[0], &["Quote:", "Testimonial:"])),
            strip_label(lines[1], &["Author:"]),
            strip_label(lines[2], &["Company:"]),
            strip_label(lines[3], &["Role:"]),
        );
    }

    let Some(quote) = capture(&QUOTE_RE, text) else {
        tracing::warn!(
            response = %raw,
            "Could not parse testimonial details from response"
        );
        return failure_record();
    };

    Testimonial {
        quote: unescape_quotes(&quote),
        author: capture(&AUTHOR_RE, text).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        company: capture(&COMPANY_RE, text).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        role: capture(&ROLE_RE, text).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

/// Runs one model call per scenario, strictly one after another.
pub struct TestimonialGenerator {
    provider: Arc<dyn CompletionProvider>,
    developer_name: String,
    developer_role: String,
}

impl TestimonialGenerator {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        developer_name: impl Into<String>,
        developer_role: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            developer_name: developer_name.into(),
            developer_role: developer_role.into(),
        }
    }

    /// Never fails: call errors and empty replies become placeholders.
    pub async fn generate_one(&self, scenario: &Scenario) -> Testimonial {
        let messages = scenario_messages(&self.developer_name, &self.developer_role, scenario);

        match self.provider.complete(&messages, &TESTIMONIAL_PARAMS).await {
            Ok(completion) => match completion.text {
                Some(text) => {
                    tracing::info!(
                        model = %self.provider.model(),
                        output_tokens = completion.output_tokens,
                        response = %text,
                        "Received testimonial response"
                    );
                    parse_testimonial(&text)
                }
                None => {
                    tracing::warn!(
                        project_type = %scenario.project_type,
                        "Model returned no content for testimonial"
                    );
                    placeholder_for(scenario)
                }
            },
            Err(e) => {
                tracing::error!(
                    project_type = %scenario.project_type,
                    client_industry = %scenario.client_industry,
                    error = %e,
                    "Error generating testimonial"
                );
                placeholder_for(scenario)
            }
        }
    }

    pub async fn generate_all(&self, scenarios: &[Scenario]) -> Vec<Testimonial> {
        let mut testimonials = Vec::with_capacity(scenarios.len());
        for (i, scenario) in scenarios.iter().enumerate() {
            tracing::info!(
                index = i + 1,
                project_type = %scenario.project_type,
                client_industry = %scenario.client_industry,
                "Generating testimonial"
            );
            testimonials.push(self.generate_one(scenario).await);
        }
        testimonials
    }
}
