//! Static developer profile the chatbot answers from.

pub const DEVELOPER_NAME: &str = "Mwenda_Dipark Solutions";
pub const DEVELOPER_ROLE: &str = "Full-Stack Developer";

pub const CORE_SKILLS: [&str; 10] = [
    "Python",
    "React",
    "MongoDB",
    "PostgreSQL",
    "FastAPI",
    "TypeScript",
    "Tailwind CSS",
    "Node.js",
    "Docker",
    "AWS",
];

pub const PROJECT_HIGHLIGHTS: [&str; 4] = [
    "DevFolio AI: An intelligent portfolio website with an AI chatbot assistant (this very project!). Technologies: React, FastAPI, OpenAI.",
    "IntelliShop AI Platform: An e-commerce solution with AI-driven recommendations and dynamic pricing. Technologies: Python, React, PostgreSQL, TensorFlow.",
    "LiveInsights Analytics Dashboard: A real-time data visualization tool for business intelligence. Technologies: React, Node.js, WebSocket, MongoDB, D3.js.",
    "TaskFlow Pro Manager: A SaaS application for team collaboration and agile project management. Technologies: React, Node.js, PostgreSQL, GraphQL.",
];

/// Biography paragraph embedded in the chat system prompt.
pub fn about_developer() -> String {
    let projects = PROJECT_HIGHLIGHTS
        .iter()
        .map(|project| format!("- {}", project))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{name} is a proficient {role} with a strong background in building innovative and efficient solutions.\n\
         Key technical proficiencies include: {skills}.\n\
         {name} has experience in developing a range of applications, from AI-integrated web platforms to data analytics dashboards and collaborative tools.\n\
         Example projects include:\n\
         {projects}\n\
         When answering questions, be concise, friendly, and professional. If you don't know the answer or if it's outside your scope of knowledge about {name}, politely say so.\n\
         Do not answer questions unrelated to {name}'s professional profile, skills, or projects.",
        name = DEVELOPER_NAME,
        role = DEVELOPER_ROLE,
        skills = CORE_SKILLS.join(", "),
        projects = projects,
    )
}

pub fn chat_system_prompt() -> String {
    format!(
        "You are a helpful AI assistant for {name}.\n\
         Your purpose is to answer questions from potential clients or recruiters about {name}'s skills, experience, and projects.\n\
         You have the following information about {name}:\n\
         {about}\n\
         Please use this information to answer the user's questions.\n\
         Keep your answers focused on {name}.\n\
         If a question is vague, ask for clarification.\n\
         If a question is unrelated to {name}'s professional profile, politely decline to answer.",
        name = DEVELOPER_NAME,
        about = about_developer(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn about_lists_every_skill_and_project() {
        let about = about_developer();

        assert!(about.contains(&CORE_SKILLS.join(", ")));
        for project in PROJECT_HIGHLIGHTS {
            assert!(about.contains(&format!("- {}", project)));
        }
    }

    #[test]
    fn system_prompt_embeds_biography() {
        let prompt = chat_system_prompt();

        assert!(prompt.starts_with("You are a helpful AI assistant for Mwenda_Dipark Solutions."));
        assert!(prompt.contains(&about_developer()));
        assert!(prompt.contains("politely decline to answer"));
    }
}
