use serde::{Deserialize, Serialize};

use crate::models::{fallback_list, fallback_text, sample};

/// Contact block and headline of a résumé.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
    /// Profile photo URL. Only `data:` URLs are drawn; remote ones are never fetched.
    /// Never sample-filled: no photo means none is drawn.
    pub photo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    /// When set, `end_date` is ignored and the role renders as ongoing.
    pub current: bool,
    pub description: String,
    pub highlights: Vec<String>,
}

impl Experience {
    pub fn period(&self) -> String {
        let end = if self.current {
            "Present"
        } else {
            self.end_date.as_str()
        };
        join_period(&self.start_date, end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
}

impl Education {
    pub fn period(&self) -> String {
        join_period(&self.start_date, &self.end_date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub name: String,
    pub proficiency: String,
}

/// The complete résumé as submitted by the editor. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<Language>,
}

impl ResumeData {
    /// Returns a copy in which every empty field is replaced by sample content.
    ///
    /// The substitution is per field: a résumé with real experience but no
    /// education renders the real experience next to sample education.
    pub fn with_sample_fallback(&self) -> ResumeData {
        let info = &self.personal_info;
        let sample_info = sample::personal_info();

        ResumeData {
            personal_info: PersonalInfo {
                full_name: fallback_text(&info.full_name, &sample_info.full_name),
                title: fallback_text(&info.title, &sample_info.title),
                email: fallback_text(&info.email, &sample_info.email),
                phone: fallback_text(&info.phone, &sample_info.phone),
                location: fallback_text(&info.location, &sample_info.location),
                website: fallback_text(&info.website, &sample_info.website),
                summary: fallback_text(&info.summary, &sample_info.summary),
                photo: info.photo.trim().to_string(),
            },
            experience: fallback_list(&self.experience, sample::experience),
            education: fallback_list(&self.education, sample::education),
            skills: fallback_list(&self.skills, sample::skills),
            projects: fallback_list(&self.projects, sample::projects),
            certifications: fallback_list(&self.certifications, sample::certifications),
            languages: fallback_list(&self.languages, sample::languages),
        }
    }
}

fn join_period(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (s, "") => s.to_string(),
        ("", e) => e.to_string(),
        (s, e) => format!("{s} – {e}"),
    }
}
