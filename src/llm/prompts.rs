//! Prompt templates for every model call in the pipelines

/// Prompt templates with `{placeholder}` substitution
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub resume_parser: String,
    pub job_requirements: String,
    pub verification_questions: String,
    pub roadmap: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            resume_parser: RESUME_PARSER_TEMPLATE.to_string(),
            job_requirements: JOB_REQUIREMENTS_TEMPLATE.to_string(),
            verification_questions: VERIFICATION_QUESTIONS_TEMPLATE.to_string(),
            roadmap: ROADMAP_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Resume text must already be truncated to the context budget.
    pub fn render_resume_parser(&self, resume_text: &str) -> String {
        self.resume_parser.replace("{resume}", resume_text)
    }

    pub fn render_job_requirements(&self, job_title: &str, count: usize) -> String {
        self.job_requirements
            .replace("{count}", &count.to_string())
            .replace("{job_title}", job_title)
    }

    pub fn render_verification_questions(&self, skills: &[String]) -> String {
        let list = serde_json::to_string(skills).unwrap_or_else(|_| skills.join(", "));
        self.verification_questions.replace("{skills}", &list)
    }

    pub fn render_roadmap(&self, report: &str) -> String {
        self.roadmap.replace("{report}", report)
    }
}

const RESUME_PARSER_TEMPLATE: &str = r#"You are a professional Resume Parser. Extract data from this text into a strict JSON format.

CRITICAL RULES:
1. "experience" MUST be a list of objects with keys: "title", "company", "dates", "description".
2. "description" should be a short summary string, NOT a list.
3. If "dates" are missing, estimate them from context or put "Present".

JSON STRUCTURE:
{
    "name": "Candidate Name",
    "email": "candidate@email.com",
    "phone": "Phone Number",
    "linkedin": "https://linkedin.com/in/...",
    "github": "https://github.com/...",
    "location": "City, Country",
    "summary": "Professional summary...",
    "skills": ["Skill A", "Skill B", "Skill C"],
    "experience": [
        {"title": "Software Engineer", "company": "Tech Corp", "dates": "Jan 2020 - Present", "description": "Developed web applications."}
    ],
    "education": [
        {"degree": "B.Sc Computer Science", "institution": "University Name", "year": "2023"}
    ],
    "projects": [
        {"title": "Project Name", "technologies": "Python, AI", "description": "Built an AI agent."}
    ]
}

RESUME TEXT:
{resume}

Return ONLY valid JSON. No Markdown."#;

const JOB_REQUIREMENTS_TEMPLATE: &str = r#"You are an expert Technical Recruiter.
List the top {count} most critical technical skills required for a "{job_title}".

Return ONLY a JSON list of strings. Example:
["Python", "React", "AWS", "SQL"]"#;

const VERIFICATION_QUESTIONS_TEMPLATE: &str = r#"You are a Technical Recruiter. A candidate is missing these skills: {skills}.
Generate a very short, crisp question for each skill to check if they actually know it.
The question format should strictly be: "Do you have experience with [Skill Name]?"

Return a strict JSON list of objects matching this schema exactly:
[ {"skill": "Skill Name", "question": "...", "options": ["1. Yes", "2. No"]} ]

CRITICAL INSTRUCTION: Return ONLY the raw JSON list. No markdown."#;

const ROADMAP_TEMPLATE: &str = r#"Analyze the following Skill Report and identify the missing skills.
Then, create a structured learning roadmap in JSON format.

Report: {report}

Return ONLY a JSON object with this structure:
{
    "roadmap_title": "...",
    "modules": [
        { "skill": "...", "week": 1, "topic": "...", "recommended_action": "..." }
    ]
}"#;
