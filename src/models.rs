//! Data model: the nested profile document and the flat retrieval chunks
//! derived from it.

use serde::Deserialize;
use serde::Serialize;

/// The full nested profile document (source of truth for chunking).
///
/// Every field is optional: the chunker substitutes placeholders rather than
/// failing on absent data, so a sparse document still chunks cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub personal: Option<Personal>,
    #[serde(default)]
    pub salary_location: Option<SalaryLocation>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub skills: Option<Skills>,
    #[serde(default)]
    pub education: Option<Education>,
    #[serde(default)]
    pub projects_portfolio: Vec<Project>,
    #[serde(default)]
    pub career_goals: Option<CareerGoals>,
    #[serde(default)]
    pub achievements_metrics: Option<AchievementsMetrics>,
    #[serde(default)]
    pub interview_prep: Option<InterviewPrep>,
    #[serde(default)]
    pub professional_development: Option<ProfessionalDevelopment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Personal {
    pub name: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub elevator_pitch: Option<String>,
    #[serde(default)]
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryLocation {
    pub current_status: Option<String>,
    pub salary_expectations: Option<String>,
    #[serde(default)]
    pub location_preferences: Vec<String>,
    #[serde(default)]
    pub relocation_willing: bool,
    pub remote_experience: Option<String>,
    pub work_authorization: Option<String>,
    pub student_status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    pub company: Option<String>,
    pub title: Option<String>,
    pub duration: Option<String>,
    pub company_context: Option<String>,
    pub team_structure: Option<String>,
    #[serde(default)]
    pub technical_skills_used: Vec<String>,
    #[serde(default)]
    pub leadership_examples: Vec<String>,
    #[serde(default)]
    pub achievements_star: Vec<StarAchievement>,
}

/// Situation/Task/Action/Result record nested under an experience entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StarAchievement {
    pub situation: Option<String>,
    pub task: Option<String>,
    pub action: Option<String>,
    pub result: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub technical: Option<TechnicalSkills>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalSkills {
    #[serde(default)]
    pub programming_languages: Vec<ProgrammingLanguage>,
    #[serde(default)]
    pub databases: Vec<String>,
    #[serde(default)]
    pub cloud_platforms: Vec<String>,
    #[serde(default)]
    pub frontend: Vec<String>,
    #[serde(default)]
    pub backend: Vec<String>,
    #[serde(default)]
    pub ai_ml: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgrammingLanguage {
    pub language: Option<String>,
    #[serde(default)]
    pub years: u32,
    pub proficiency: Option<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    pub university: Option<String>,
    pub degree: Option<String>,
    pub graduation_year: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub relevant_coursework: Vec<String>,
    pub previous_education: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub impact: Option<String>,
    #[serde(default)]
    pub key_features: Vec<String>,
    pub github_url: Option<String>,
    pub live_demo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareerGoals {
    pub short_term: Option<String>,
    pub long_term: Option<String>,
    #[serde(default)]
    pub learning_focus: Vec<String>,
    #[serde(default)]
    pub industries_interested: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementsMetrics {
    #[serde(default)]
    pub competition_achievements: Vec<String>,
    #[serde(default)]
    pub technical_achievements: Vec<String>,
    #[serde(default)]
    pub personal_metrics: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterviewPrep {
    #[serde(default)]
    pub weakness_mitigation: Vec<WeaknessMitigation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaknessMitigation {
    pub weakness: Option<String>,
    pub mitigation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessionalDevelopment {
    #[serde(default)]
    pub recent_learning: Vec<String>,
    #[serde(default)]
    pub learning_resources: Vec<String>,
    #[serde(default)]
    pub future_learning: Vec<String>,
    #[serde(default)]
    pub open_source: Vec<String>,
}

/// Section-of-origin tag for a chunk. Serialized as the literal snake_case
/// strings the persisted document and vector attributes carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    PersonalInfo,
    Contact,
    Compensation,
    Experience,
    Achievement,
    TechnicalSkills,
    SoftSkills,
    Education,
    Project,
    CareerGoals,
    Achievements,
    InterviewPrep,
    Development,
}

/// Coarser grouping than [`ChunkType`], used for relevance-summary labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Personal,
    Contact,
    Compensation,
    Experience,
    Achievements,
    Skills,
    Education,
    Projects,
    Goals,
    Interview,
    Development,
}

impl Category {
    /// The label used in relevance summaries and vector attributes
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Contact => "contact",
            Category::Compensation => "compensation",
            Category::Experience => "experience",
            Category::Achievements => "achievements",
            Category::Skills => "skills",
            Category::Education => "education",
            Category::Projects => "projects",
            Category::Goals => "goals",
            Category::Interview => "interview",
            Category::Development => "development",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub category: Category,
    pub tags: Vec<String>,
}

/// The atomic retrieval unit derived from one profile subsection.
///
/// `id` is run-scoped: a sequential `chunk_<n>` counter restarts at 1 on
/// every chunking run, and every embed run re-uploads the full set. Ids are
/// not stable across runs when section content is added, removed, or
/// reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ChunkType,
    pub content: String,
    pub metadata: ChunkMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_type_serializes_snake_case() {
        let json = serde_json::to_string(&ChunkType::PersonalInfo).unwrap();
        assert_eq!(json, "\"personal_info\"");
        let json = serde_json::to_string(&ChunkType::CareerGoals).unwrap();
        assert_eq!(json, "\"career_goals\"");
    }

    #[test]
    fn test_chunk_serializes_type_field_name() {
        let chunk = Chunk {
            id: "chunk_1".to_string(),
            title: "Personal Profile".to_string(),
            kind: ChunkType::PersonalInfo,
            content: "Name: Test".to_string(),
            metadata: ChunkMetadata {
                category: Category::Personal,
                tags: vec!["profile".to_string()],
            },
        };
        let value = serde_json::to_value(&chunk).unwrap();
        assert_eq!(value["type"], "personal_info");
        assert_eq!(value["metadata"]["category"], "personal");
        assert_eq!(value["metadata"]["tags"][0], "profile");
    }

    #[test]
    fn test_profile_record_tolerates_empty_document() {
        let profile: ProfileRecord = serde_json::from_str("{}").unwrap();
        assert!(profile.personal.is_none());
        assert!(profile.experience.is_empty());
        assert!(profile.projects_portfolio.is_empty());
    }

    #[test]
    fn test_profile_record_parses_partial_sections() {
        let profile: ProfileRecord = serde_json::from_value(serde_json::json!({
            "personal": { "name": "Ada" },
            "experience": [ { "company": "Acme Corp" } ],
            "salary_location": { "relocation_willing": true }
        }))
        .unwrap();
        assert_eq!(profile.personal.unwrap().name.as_deref(), Some("Ada"));
        assert_eq!(
            profile.experience[0].company.as_deref(),
            Some("Acme Corp")
        );
        assert!(profile.salary_location.unwrap().relocation_willing);
    }
}
