//! Built-in placeholder content shown for any field the user left empty.

use crate::models::cover_letter::{CoverLetterData, RecipientInfo, SenderInfo};
use crate::models::resume::{
    Certification, Education, Experience, Language, PersonalInfo, Project, Skill,
};

pub fn personal_info() -> PersonalInfo {
    PersonalInfo {
        full_name: "Alex Morgan".to_string(),
        title: "Senior Software Engineer".to_string(),
        email: "alex.morgan@example.com".to_string(),
        phone: "+1 (555) 014-2233".to_string(),
        location: "Portland, OR".to_string(),
        website: "alexmorgan.dev".to_string(),
        summary: "Engineer with eight years of experience designing reliable backend \
                  services and developer tooling. Comfortable owning systems end to end, \
                  from data modelling to on-call."
            .to_string(),
        photo: String::new(),
    }
}

pub fn experience() -> Vec<Experience> {
    vec![
        Experience {
            company: "Northwind Logistics".to_string(),
            position: "Senior Software Engineer".to_string(),
            start_date: "2021".to_string(),
            end_date: String::new(),
            current: true,
            description: "Lead engineer for the shipment tracking platform.".to_string(),
            highlights: vec![
                "Cut p99 tracking latency from 900ms to 120ms by replacing polling with event streams".to_string(),
                "Mentored four engineers through their first production launches".to_string(),
            ],
        },
        Experience {
            company: "Contoso Health".to_string(),
            position: "Software Engineer".to_string(),
            start_date: "2017".to_string(),
            end_date: "2021".to_string(),
            current: false,
            description: "Built patient scheduling APIs used by 40 clinics.".to_string(),
            highlights: vec![
                "Migrated the appointment store to PostgreSQL with zero downtime".to_string(),
            ],
        },
    ]
}

pub fn education() -> Vec<Education> {
    vec![Education {
        institution: "State University".to_string(),
        degree: "B.Sc.".to_string(),
        field: "Computer Science".to_string(),
        start_date: "2013".to_string(),
        end_date: "2017".to_string(),
        gpa: String::new(),
    }]
}

pub fn skills() -> Vec<Skill> {
    [
        ("Rust", "Advanced"),
        ("PostgreSQL", "Advanced"),
        ("Distributed systems", "Intermediate"),
        ("Kubernetes", "Intermediate"),
    ]
    .into_iter()
    .map(|(name, level)| Skill {
        name: name.to_string(),
        level: level.to_string(),
    })
    .collect()
}

pub fn projects() -> Vec<Project> {
    vec![Project {
        name: "tidewatch".to_string(),
        description: "Open-source tide prediction service with a public HTTP API.".to_string(),
        technologies: vec!["Rust".to_string(), "axum".to_string()],
        link: "github.com/alexmorgan/tidewatch".to_string(),
    }]
}

pub fn certifications() -> Vec<Certification> {
    vec![Certification {
        name: "Certified Kubernetes Administrator".to_string(),
        issuer: "CNCF".to_string(),
        date: "2022".to_string(),
    }]
}

pub fn languages() -> Vec<Language> {
    vec![
        Language {
            name: "English".to_string(),
            proficiency: "Native".to_string(),
        },
        Language {
            name: "Spanish".to_string(),
            proficiency: "Professional".to_string(),
        },
    ]
}

pub fn cover_letter() -> CoverLetterData {
    CoverLetterData {
        sender: SenderInfo {
            full_name: "Alex Morgan".to_string(),
            email: "alex.morgan@example.com".to_string(),
            phone: "+1 (555) 014-2233".to_string(),
            address: "Portland, OR".to_string(),
        },
        recipient: RecipientInfo {
            name: "Jordan Lee".to_string(),
            title: "Engineering Manager".to_string(),
            company: "Fabrikam".to_string(),
            address: "Seattle, WA".to_string(),
        },
        date: "January 15, 2025".to_string(),
        subject: "Application for Senior Backend Engineer".to_string(),
        greeting: "Dear Jordan Lee,".to_string(),
        paragraphs: vec![
            "I am writing to apply for the Senior Backend Engineer role at Fabrikam. \
             Over the past eight years I have built and operated services that move \
             millions of events a day, and I would like to bring that experience to your team."
                .to_string(),
            "At Northwind Logistics I led the redesign of our tracking platform, reducing \
             tail latency by an order of magnitude while keeping the system simple enough \
             for a small team to run."
                .to_string(),
            "I would welcome the chance to discuss how I can contribute. Thank you for \
             your time and consideration."
                .to_string(),
        ],
        closing: "Sincerely,".to_string(),
        signature: "Alex Morgan".to_string(),
    }
}
