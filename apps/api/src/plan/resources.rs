//! Static training-resource catalog.

use serde::Serialize;

use crate::models::skill::normalize_skill_name;

const GENERAL_PLATFORMS: &[&str] = &["Coursera", "Udemy", "LinkedIn Learning", "edX", "Pluralsight"];

const GENERIC_APPROACH: &str =
    "Start with introductory courses, then consolidate with hands-on projects.";

struct CatalogEntry {
    skill: &'static str,
    courses: &'static [&'static str],
    platforms: &'static [&'static str],
    books: &'static [&'static str],
    projects: &'static [&'static str],
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        skill: "Python",
        courses: &["Python for Data Science and Machine Learning Bootcamp", "Complete Python Bootcamp"],
        platforms: &["Coursera", "Udemy", "DataCamp"],
        books: &["Python Crash Course", "Automate the Boring Stuff with Python"],
        projects: &["Build a personal portfolio website", "Create a data analysis tool"],
    },
    CatalogEntry {
        skill: "JavaScript",
        courses: &["Modern JavaScript From The Beginning", "JavaScript: Understanding the Weird Parts"],
        platforms: &["Udemy", "Frontend Masters", "freeCodeCamp"],
        books: &["Eloquent JavaScript", "You Don't Know JS"],
        projects: &["Build an interactive web application", "Create a browser game"],
    },
    CatalogEntry {
        skill: "TypeScript",
        courses: &["Understanding TypeScript", "TypeScript Fundamentals"],
        platforms: &["Udemy", "Frontend Masters", "Pluralsight"],
        books: &["Programming TypeScript", "Effective TypeScript"],
        projects: &["Migrate a JavaScript project to TypeScript", "Build a typed REST client"],
    },
    CatalogEntry {
        skill: "Machine Learning",
        courses: &["Machine Learning by Andrew Ng", "Machine Learning A-Z"],
        platforms: &["Coursera", "Udemy", "edX"],
        books: &[
            "Hands-On Machine Learning with Scikit-Learn and TensorFlow",
            "Pattern Recognition and Machine Learning",
        ],
        projects: &["Build a recommendation system", "Create a predictive model for a real dataset"],
    },
    CatalogEntry {
        skill: "Data Analysis",
        courses: &["Data Analysis with Python", "SQL for Data Analysis"],
        platforms: &["Coursera", "DataCamp", "Udacity"],
        books: &["Python for Data Analysis", "Storytelling with Data"],
        projects: &["Analyze a public dataset end to end", "Build a KPI dashboard"],
    },
    CatalogEntry {
        skill: "AWS",
        courses: &["AWS Certified Solutions Architect", "AWS Certified Developer"],
        platforms: &["A Cloud Guru", "AWS Training", "Pluralsight"],
        books: &["AWS Certified Solutions Architect Study Guide", "Amazon Web Services in Action"],
        projects: &["Deploy a scalable web application", "Build a serverless API"],
    },
    CatalogEntry {
        skill: "Docker",
        courses: &["Docker Mastery", "Docker for Developers"],
        platforms: &["Udemy", "Pluralsight", "KodeKloud"],
        books: &["Docker Deep Dive", "Docker in Action"],
        projects: &["Containerize an existing web service", "Write a multi-stage build pipeline"],
    },
    CatalogEntry {
        skill: "Kubernetes",
        courses: &["Certified Kubernetes Application Developer", "Kubernetes for the Absolute Beginners"],
        platforms: &["KodeKloud", "Linux Foundation", "Udemy"],
        books: &["Kubernetes Up & Running", "The Kubernetes Book"],
        projects: &["Deploy a service with rolling updates", "Run a local multi-node cluster"],
    },
    CatalogEntry {
        skill: "Leadership",
        courses: &["Leadership Development Program", "People Management Skills"],
        platforms: &["LinkedIn Learning", "Coursera", "edX"],
        books: &["Leaders Eat Last", "The 7 Habits of Highly Effective People"],
        projects: &["Lead a team project", "Mentor junior colleagues"],
    },
];

/// Suggestions for one skill. Serialized untagged: known skills render
/// `{courses, platforms, books, projects}`, others a generic suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrainingResources {
    Curated {
        courses: Vec<String>,
        platforms: Vec<String>,
        books: Vec<String>,
        projects: Vec<String>,
    },
    Generic {
        suggestion: String,
        general_platforms: Vec<String>,
        approach: String,
    },
}

impl TrainingResources {
    pub fn is_curated(&self) -> bool {
        matches!(self, TrainingResources::Curated { .. })
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Case-insensitive catalog lookup with a generic fallback.
pub fn resources_for(skill_name: &str) -> TrainingResources {
    let key = normalize_skill_name(skill_name);
    match CATALOG.iter().find(|e| normalize_skill_name(e.skill) == key) {
        Some(entry) => TrainingResources::Curated {
            courses: owned(entry.courses),
            platforms: owned(entry.platforms),
            books: owned(entry.books),
            projects: owned(entry.projects),
        },
        None => TrainingResources::Generic {
            suggestion: format!(
                "Look for {} courses on platforms such as Coursera, Udemy or LinkedIn Learning.",
                skill_name.trim()
            ),
            general_platforms: owned(GENERAL_PLATFORMS),
            approach: GENERIC_APPROACH.to_string(),
        },
    }
}
