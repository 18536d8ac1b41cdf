//! Prompt templates for interview response generation

use std::collections::HashMap;

/// Template for generating prompts
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Fill in the template with variables
    #[must_use]
    pub fn render(&self, values: &HashMap<String, String>) -> String {
        let mut result = self.template.clone();
        for var in &self.variables {
            if let Some(value) = values.get(var) {
                result = result.replace(&format!("{{{{{var}}}}}"), value);
            }
        }
        result
    }

    /// Get required variables
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// Extract variable names from template
fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '{' && chars.peek() == Some(&'{') {
            chars.next(); // skip second '{'
            let mut var_name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch == '}' {
                    chars.next();
                    if chars.peek() == Some(&'}') {
                        chars.next();
                        break;
                    }
                } else {
                    var_name.push(ch);
                    chars.next();
                }
            }
            if !var_name.is_empty() && !variables.contains(&var_name) {
                variables.push(var_name);
            }
        }
    }

    variables
}

/// Interview prompt templates.
///
/// The persona facts are fixed at compile time; only the retrieved context
/// summary changes per question.
pub struct InterviewPrompts;

impl InterviewPrompts {
    /// System instruction for role-played interview answers
    #[must_use]
    pub fn system() -> PromptTemplate {
        PromptTemplate::new(
            r"You are Niño Marcos in a professional interview or networking conversation. Respond naturally in first person.

CORE IDENTITY:
- IT Student at St. Paul University Philippines (BS Information Technology, Expected 2027)
- Location: Tuguegarao City, Philippines
- Age: Young professional, eager to learn and contribute
- Open to: Remote work, internships, OJT, entry-level positions

KEY ACHIEVEMENTS:
- 4th place internationally (118 teams, 5 countries) - STEAM Challenge 2018, Programming Skills Excellence
- 5th place nationally (43 schools) - Robothon 2018, Excellence Award
- 3+ deployed production applications on Vercel
- Built functional RAG system with hosted LLM + vector search

TECHNICAL EXPERTISE:
- Frontend: Next.js 15, React, TypeScript, Tailwind CSS, Framer Motion
- Backend: Node.js, Express, REST APIs, Prisma ORM
- Databases: PostgreSQL, hosted vector and key-value stores
- AI/ML: RAG systems, Vector databases, LLM integration
- Auth: OAuth (Google), secure authentication patterns
- Languages: JavaScript (2y, Advanced), TypeScript (2y, Advanced), Python (5y, Intermediate)

NOTABLE PROJECTS:
1. AI-Powered Portfolio with RAG System - Real-time professional query answering
2. Person Search App - OAuth authentication, Prisma ORM, PostgreSQL
3. Modern Portfolio - Dark/light themes, animations, responsive design

SOFT SKILLS:
- Self-directed learner with proven track record
- International competition experience
- Strong problem-solving under pressure
- Clean code practices and documentation
- Team collaboration

CONTEXT FROM PROFILE: {{context}}

RESPONSE GUIDELINES:
- Be conversational but professional
- Use specific examples and numbers when possible
- Show enthusiasm without being over-eager
- Be honest about student status while highlighting achievements
- Keep responses concise (2-4 sentences unless asked for details)
- Use 'I' statements naturally
- Show growth mindset when discussing areas for improvement",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_variables() {
        let template = PromptTemplate::new("Hello {{name}}, context: {{context}}");
        assert_eq!(template.variables(), &["name", "context"]);
    }

    #[test]
    fn test_render_replaces_variables() {
        let template = PromptTemplate::new("Context: {{context}}");
        let mut values = HashMap::new();
        values.insert("context".to_string(), "skills (relevance: 0.91)".to_string());
        assert_eq!(template.render(&values), "Context: skills (relevance: 0.91)");
    }

    #[test]
    fn test_system_prompt_has_single_context_variable() {
        let template = InterviewPrompts::system();
        assert_eq!(template.variables(), &["context"]);
    }

    #[test]
    fn test_system_prompt_carries_persona_facts() {
        let template = InterviewPrompts::system();
        let mut values = HashMap::new();
        values.insert("context".to_string(), "General profile knowledge".to_string());
        let rendered = template.render(&values);
        assert!(rendered.contains("Niño Marcos"));
        assert!(rendered.contains("St. Paul University Philippines"));
        assert!(rendered.contains("CONTEXT FROM PROFILE: General profile knowledge"));
    }
}
