//! Vocabulary tables — the fixed word lists every pipeline stage keys off.
//!
//! Components never read these constants directly. They receive a `Vocabulary`
//! (usually `Vocabulary::default()`) so tests can swap in small, targeted tables.

use std::collections::HashSet;

/// Skills recognized in resumes and job descriptions, in display form.
/// Order matters: job skills are reported in this order.
const SKILLS: &[&str] = &[
    "Python", "Java", "C++", "C", "JavaScript", "TypeScript", "Go", "Rust", "Swift", "Kotlin",
    "SQL", "NoSQL", "PostgreSQL", "MySQL", "MongoDB", "Redis", "SQLite", "OracleDB", "GraphQL",
    "PL/SQL", "Firebase", "Machine Learning", "Deep Learning", "Data Structures", "Algorithms",
    "Computer Vision", "OpenCV", "TensorFlow", "Keras", "PyTorch", "Scikit-learn", "Pandas",
    "NumPy", "Matplotlib", "Seaborn", "NLTK", "spaCy", "Hugging Face Transformers", "Flask",
    "Django", "FastAPI", "Spring Boot", "Express.js", "Node.js", "React", "Next.js", "Angular",
    "Vue.js", "Svelte", "Bootstrap", "Tailwind CSS", "Material-UI", "jQuery", "Three.js",
    "WebAssembly", "REST API", "Microservices", "Docker", "Kubernetes", "Git", "GitHub",
    "GitLab", "CI/CD", "Jenkins", "Terraform", "Ansible", "AWS", "Azure", "Google Cloud",
    "Linux", "Shell Scripting", "Bash", "PowerShell", "Operating Systems", "Embedded Systems",
    "Cybersecurity", "Cryptography", "Blockchain", "Smart Contracts", "Solidity", "Ethereum",
    "Hyperledger", "Arduino", "Raspberry Pi", "Computer Networks", "Network Security", "DevOps",
    "Agile", "Scrum", "Data Science", "Big Data", "Hadoop", "Spark", "Kafka", "Airflow",
    "Natural Language Processing", "Reinforcement Learning", "Generative AI", "LLMs", "AutoML",
    "Data Engineering", "ETL", "Snowflake", "Data Warehousing", "ELK Stack", "Selenium", "Jest",
    "Mocha", "Cypress", "Unity", "Unreal Engine", "Blender",
];

/// Tokens that open a raw education window.
const EDUCATION_KEYWORDS: &[&str] = &[
    "B.Tech", "M.Tech", "Bachelor", "Master", "Ph.D", "Diploma", "12th", "10th",
];

/// Closed degree vocabulary used to classify education entries.
const DEGREES: &[&str] = &["B.Tech", "M.Tech", "B.Sc", "M.Sc", "PhD", "MBA", "BCA", "MCA"];

const EXPERIENCE_HEADERS: &[&str] = &["Internship", "Experience", "Employment", "Job", "Work"];

const SECTION_HEADERS: &[&str] = &[
    "Profile",
    "Academic Details",
    "Internship",
    "Experience",
    "Projects",
    "Technical Skills",
    "Skills",
    "Certifications",
    "Achievements",
    "Positions of Responsibility",
];

const BUZZWORDS: &[&str] = &[
    "game-changer",
    "disruptive",
    "leverage",
    "synergy",
    "cutting-edge",
    "paradigm",
    "streamlined",
    "holistic",
    "next-gen",
    "transformative",
];

const MAJOR_TECH_COMPANIES: &[&str] = &[
    "Google", "Amazon", "Microsoft", "Apple", "Facebook", "Meta", "Tesla", "Intel", "IBM",
    "Oracle", "Cisco", "Nvidia", "Adobe", "Salesforce", "Amazon Web Services", "AWS",
    "Accenture", "Deloitte", "Tata Consultancy Services", "TCS", "Infosys", "Wipro",
    "Cognizant", "Capgemini", "HCL Technologies", "Qualcomm", "SAP", "VMware", "ServiceNow",
    "PayPal", "Intuit", "Atlassian", "Snowflake", "Databricks", "Palantir", "Epic Systems",
    "Workday",
];

/// English stop-words. A skill equal to one of these is never reported as unsupported.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Injected word lists for the extractor, normalizer, matcher and checker.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub skills: Vec<String>,
    pub education_keywords: Vec<String>,
    pub degrees: Vec<String>,
    pub experience_headers: Vec<String>,
    pub section_headers: Vec<String>,
    pub buzzwords: Vec<String>,
    pub major_tech_companies: Vec<String>,
    pub stop_words: HashSet<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            skills: owned(SKILLS),
            education_keywords: owned(EDUCATION_KEYWORDS),
            degrees: owned(DEGREES),
            experience_headers: owned(EXPERIENCE_HEADERS),
            section_headers: owned(SECTION_HEADERS),
            buzzwords: owned(BUZZWORDS),
            major_tech_companies: owned(MAJOR_TECH_COMPANIES),
            stop_words: STOP_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Vocabulary {
    /// Case-folded skill set, for token membership checks.
    pub fn skill_set(&self) -> HashSet<String> {
        self.skills.iter().map(|s| s.to_lowercase()).collect()
    }

    /// Multi-word skills split into case-folded words, for phrase matching over tokens.
    pub fn skill_phrases(&self) -> Vec<Vec<String>> {
        self.skills
            .iter()
            .map(|s| s.to_lowercase())
            .filter(|s| s.contains(' '))
            .map(|s| s.split_whitespace().map(String::from).collect())
            .collect()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
