//! Profile chunking: the pure transform from the nested profile document to
//! the flat, ordered list of retrieval chunks.
//!
//! This is the only part of the system with non-trivial structure. The
//! transform is deterministic and total: absent scalar fields render as the
//! literal `N/A` placeholder, absent lists join to the empty string, and the
//! section order is fixed so two runs over the same document produce
//! identical chunks (ids included).

use crate::models::Category;
use crate::models::Chunk;
use crate::models::ChunkMetadata;
use crate::models::ChunkType;
use crate::models::ProfileRecord;

/// Scalar placeholder for absent fields
const PLACEHOLDER: &str = "N/A";

/// Build the full chunk list for a profile document.
///
/// Emission rules:
/// - personal, contact, compensation, education and career-goals chunks are
///   always emitted, placeholder-filled when the section is absent;
/// - experience produces one chunk per role plus one per STAR achievement,
///   projects one chunk per entry, weakness mitigation one per entry, all in
///   source order;
/// - the combined skills, achievements-metrics and professional-development
///   chunks are only emitted when at least one of their categories is
///   non-empty.
pub fn build_chunks(profile: &ProfileRecord) -> Vec<Chunk> {
    let mut builder = ChunkBuilder::default();

    push_personal(&mut builder, profile);
    push_contact(&mut builder, profile);
    push_compensation(&mut builder, profile);
    push_experience(&mut builder, profile);
    push_technical_skills(&mut builder, profile);
    push_soft_skills(&mut builder, profile);
    push_education(&mut builder, profile);
    push_projects(&mut builder, profile);
    push_career_goals(&mut builder, profile);
    push_achievements_metrics(&mut builder, profile);
    push_interview_prep(&mut builder, profile);
    push_professional_development(&mut builder, profile);

    builder.chunks
}

#[derive(Default)]
struct ChunkBuilder {
    chunks: Vec<Chunk>,
}

impl ChunkBuilder {
    fn push(
        &mut self,
        title: impl Into<String>,
        kind: ChunkType,
        content: String,
        category: Category,
        tags: Vec<String>,
    ) {
        let id = format!("chunk_{}", self.chunks.len() + 1);
        self.chunks.push(Chunk {
            id,
            title: title.into(),
            kind,
            content,
            metadata: ChunkMetadata { category, tags },
        });
    }
}

/// Scalar render: value or the `N/A` placeholder
fn scalar(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(PLACEHOLDER)
}

/// List render: comma-joined, empty string when the list is empty
fn join(values: &[String]) -> String {
    values.join(", ")
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| (*t).to_string()).collect()
}

/// Lowercased, space-to-underscore entity name for tag sets
fn normalize_tag(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

fn push_personal(builder: &mut ChunkBuilder, profile: &ProfileRecord) {
    let personal = profile.personal.clone().unwrap_or_default();
    builder.push(
        "Personal Profile",
        ChunkType::PersonalInfo,
        format!(
            "Name: {}. Title: {}. Location: {}. Summary: {}. Elevator Pitch: {}",
            scalar(&personal.name),
            scalar(&personal.title),
            scalar(&personal.location),
            scalar(&personal.summary),
            scalar(&personal.elevator_pitch),
        ),
        Category::Personal,
        tags(&["profile", "introduction", "summary"]),
    );
}

fn push_contact(builder: &mut ChunkBuilder, profile: &ProfileRecord) {
    let contact = profile
        .personal
        .as_ref()
        .and_then(|p| p.contact.clone())
        .unwrap_or_default();
    builder.push(
        "Contact Information",
        ChunkType::Contact,
        format!(
            "Email: {}. LinkedIn: {}. GitHub: {}. Portfolio: {}",
            scalar(&contact.email),
            scalar(&contact.linkedin),
            scalar(&contact.github),
            scalar(&contact.portfolio),
        ),
        Category::Contact,
        tags(&["contact", "social", "links"]),
    );
}

fn push_compensation(builder: &mut ChunkBuilder, profile: &ProfileRecord) {
    let sl = profile.salary_location.clone().unwrap_or_default();
    builder.push(
        "Salary and Location Preferences",
        ChunkType::Compensation,
        format!(
            "Current Status: {}. Salary Expectations: {}. Location Preferences: {}. \
             Relocation Willing: {}. Remote Experience: {}. Work Authorization: {}. \
             Student Status: {}",
            scalar(&sl.current_status),
            scalar(&sl.salary_expectations),
            join(&sl.location_preferences),
            sl.relocation_willing,
            scalar(&sl.remote_experience),
            scalar(&sl.work_authorization),
            scalar(&sl.student_status),
        ),
        Category::Compensation,
        tags(&["salary", "location", "remote", "relocation"]),
    );
}

fn push_experience(builder: &mut ChunkBuilder, profile: &ProfileRecord) {
    for exp in &profile.experience {
        let company_title = exp.company.as_deref().unwrap_or("Unknown");
        let mut role_tags = tags(&["work", "employment", "company"]);
        if let Some(company) = exp.company.as_deref() {
            role_tags.push(normalize_tag(company));
        }
        builder.push(
            format!("Experience at {company_title}"),
            ChunkType::Experience,
            format!(
                "Company: {}. Title: {}. Duration: {}. Company Context: {}. \
                 Team Structure: {}. Technical Skills Used: {}. Leadership Examples: {}",
                scalar(&exp.company),
                scalar(&exp.title),
                scalar(&exp.duration),
                scalar(&exp.company_context),
                scalar(&exp.team_structure),
                join(&exp.technical_skills_used),
                join(&exp.leadership_examples),
            ),
            Category::Experience,
            role_tags,
        );

        for achievement in &exp.achievements_star {
            builder.push(
                format!("Achievement at {company_title}"),
                ChunkType::Achievement,
                format!(
                    "Situation: {}. Task: {}. Action: {}. Result: {}",
                    scalar(&achievement.situation),
                    scalar(&achievement.task),
                    scalar(&achievement.action),
                    scalar(&achievement.result),
                ),
                Category::Achievements,
                tags(&["star", "accomplishment", "results", "impact"]),
            );
        }
    }
}

fn push_technical_skills(builder: &mut ChunkBuilder, profile: &ProfileRecord) {
    let technical = profile
        .skills
        .as_ref()
        .and_then(|s| s.technical.clone())
        .unwrap_or_default();

    if !technical.programming_languages.is_empty() {
        let lang_details: Vec<String> = technical
            .programming_languages
            .iter()
            .map(|lang| {
                format!(
                    "{}: {} years, {} level, frameworks: {}",
                    lang.language.as_deref().unwrap_or("Unknown"),
                    lang.years,
                    lang.proficiency.as_deref().unwrap_or("Unknown"),
                    join(&lang.frameworks),
                )
            })
            .collect();
        builder.push(
            "Programming Languages",
            ChunkType::TechnicalSkills,
            format!("Programming Languages: {}", lang_details.join(". ")),
            Category::Skills,
            tags(&["programming", "languages", "technical"]),
        );
    }

    // Combined chunk over the remaining technical categories; each is
    // included only when non-empty.
    let mut other_skills = Vec::new();
    if !technical.databases.is_empty() {
        other_skills.push(format!("Databases: {}", join(&technical.databases)));
    }
    if !technical.cloud_platforms.is_empty() {
        other_skills.push(format!(
            "Cloud Platforms: {}",
            join(&technical.cloud_platforms)
        ));
    }
    if !technical.frontend.is_empty() {
        other_skills.push(format!("Frontend: {}", join(&technical.frontend)));
    }
    if !technical.backend.is_empty() {
        other_skills.push(format!("Backend: {}", join(&technical.backend)));
    }
    if !technical.ai_ml.is_empty() {
        other_skills.push(format!("AI/ML: {}", join(&technical.ai_ml)));
    }

    if !other_skills.is_empty() {
        builder.push(
            "Technical Skills and Tools",
            ChunkType::TechnicalSkills,
            other_skills.join(". "),
            Category::Skills,
            tags(&["technical", "tools", "frameworks"]),
        );
    }
}

fn push_soft_skills(builder: &mut ChunkBuilder, profile: &ProfileRecord) {
    let soft_skills = profile
        .skills
        .as_ref()
        .map(|s| s.soft_skills.as_slice())
        .unwrap_or_default();
    if !soft_skills.is_empty() {
        builder.push(
            "Soft Skills",
            ChunkType::SoftSkills,
            format!("Soft Skills: {}", join(soft_skills)),
            Category::Skills,
            tags(&["soft", "interpersonal", "communication"]),
        );
    }
}

fn push_education(builder: &mut ChunkBuilder, profile: &ProfileRecord) {
    let education = profile.education.clone().unwrap_or_default();
    builder.push(
        "Education Background",
        ChunkType::Education,
        format!(
            "University: {}. Degree: {}. Graduation Year: {}. Location: {}. Status: {}. \
             Relevant Coursework: {}. Previous Education: {}",
            scalar(&education.university),
            scalar(&education.degree),
            scalar(&education.graduation_year),
            scalar(&education.location),
            scalar(&education.status),
            join(&education.relevant_coursework),
            scalar(&education.previous_education),
        ),
        Category::Education,
        tags(&["university", "degree", "academic"]),
    );
}

fn push_projects(builder: &mut ChunkBuilder, profile: &ProfileRecord) {
    for project in &profile.projects_portfolio {
        let project_title = project.name.as_deref().unwrap_or("Unknown");
        let mut project_tags = tags(&["project", "portfolio", "demo"]);
        if let Some(name) = project.name.as_deref() {
            project_tags.push(normalize_tag(name));
        }
        builder.push(
            format!("Project: {project_title}"),
            ChunkType::Project,
            format!(
                "Name: {}. Description: {}. Technologies: {}. Impact: {}. \
                 Key Features: {}. GitHub: {}. Demo: {}",
                scalar(&project.name),
                scalar(&project.description),
                join(&project.technologies),
                scalar(&project.impact),
                join(&project.key_features),
                scalar(&project.github_url),
                scalar(&project.live_demo),
            ),
            Category::Projects,
            project_tags,
        );
    }
}

fn push_career_goals(builder: &mut ChunkBuilder, profile: &ProfileRecord) {
    let goals = profile.career_goals.clone().unwrap_or_default();
    builder.push(
        "Career Goals and Aspirations",
        ChunkType::CareerGoals,
        format!(
            "Short Term: {}. Long Term: {}. Learning Focus: {}. Industries Interested: {}",
            scalar(&goals.short_term),
            scalar(&goals.long_term),
            join(&goals.learning_focus),
            join(&goals.industries_interested),
        ),
        Category::Goals,
        tags(&["career", "future", "aspirations", "learning"]),
    );
}

fn push_achievements_metrics(builder: &mut ChunkBuilder, profile: &ProfileRecord) {
    let Some(metrics) = profile.achievements_metrics.as_ref() else {
        return;
    };

    let mut all_achievements = Vec::new();
    if !metrics.competition_achievements.is_empty() {
        all_achievements.push(format!(
            "Competition Achievements: {}",
            join(&metrics.competition_achievements)
        ));
    }
    if !metrics.technical_achievements.is_empty() {
        all_achievements.push(format!(
            "Technical Achievements: {}",
            join(&metrics.technical_achievements)
        ));
    }
    if !metrics.personal_metrics.is_empty() {
        all_achievements.push(format!(
            "Personal Metrics: {}",
            join(&metrics.personal_metrics)
        ));
    }

    if !all_achievements.is_empty() {
        builder.push(
            "Key Achievements and Metrics",
            ChunkType::Achievements,
            all_achievements.join(". "),
            Category::Achievements,
            tags(&["metrics", "accomplishments", "competition", "technical"]),
        );
    }
}

fn push_interview_prep(builder: &mut ChunkBuilder, profile: &ProfileRecord) {
    let Some(prep) = profile.interview_prep.as_ref() else {
        return;
    };
    for weakness in &prep.weakness_mitigation {
        builder.push(
            "Weakness Mitigation Strategy",
            ChunkType::InterviewPrep,
            format!(
                "Weakness: {}. Mitigation: {}",
                scalar(&weakness.weakness),
                scalar(&weakness.mitigation),
            ),
            Category::Interview,
            tags(&["weakness", "improvement", "strategy"]),
        );
    }
}

fn push_professional_development(builder: &mut ChunkBuilder, profile: &ProfileRecord) {
    let Some(dev) = profile.professional_development.as_ref() else {
        return;
    };

    let mut dev_content = Vec::new();
    if !dev.recent_learning.is_empty() {
        dev_content.push(format!("Recent Learning: {}", join(&dev.recent_learning)));
    }
    if !dev.learning_resources.is_empty() {
        dev_content.push(format!(
            "Learning Resources: {}",
            join(&dev.learning_resources)
        ));
    }
    if !dev.future_learning.is_empty() {
        dev_content.push(format!("Future Learning: {}", join(&dev.future_learning)));
    }
    if !dev.open_source.is_empty() {
        dev_content.push(format!("Open Source: {}", join(&dev.open_source)));
    }

    if !dev_content.is_empty() {
        builder.push(
            "Professional Development",
            ChunkType::Development,
            dev_content.join(". "),
            Category::Development,
            tags(&["learning", "growth", "skills"]),
        );
    }
}
