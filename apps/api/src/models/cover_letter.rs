use serde::{Deserialize, Serialize};

use crate::models::{fallback_list, fallback_text, sample};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SenderInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipientInfo {
    pub name: String,
    pub title: String,
    pub company: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverLetterData {
    pub sender: SenderInfo,
    pub recipient: RecipientInfo,
    pub date: String,
    pub subject: String,
    pub greeting: String,
    /// Body paragraphs in reading order.
    pub paragraphs: Vec<String>,
    pub closing: String,
    pub signature: String,
}

impl CoverLetterData {
    /// Per-field sample substitution, same semantics as `ResumeData::with_sample_fallback`.
    pub fn with_sample_fallback(&self) -> CoverLetterData {
        let sample = sample::cover_letter();

        CoverLetterData {
            sender: SenderInfo {
                full_name: fallback_text(&self.sender.full_name, &sample.sender.full_name),
                email: fallback_text(&self.sender.email, &sample.sender.email),
                phone: fallback_text(&self.sender.phone, &sample.sender.phone),
                address: fallback_text(&self.sender.address, &sample.sender.address),
            },
            recipient: RecipientInfo {
                name: fallback_text(&self.recipient.name, &sample.recipient.name),
                title: fallback_text(&self.recipient.title, &sample.recipient.title),
                company: fallback_text(&self.recipient.company, &sample.recipient.company),
                address: fallback_text(&self.recipient.address, &sample.recipient.address),
            },
            date: fallback_text(&self.date, &sample.date),
            subject: fallback_text(&self.subject, &sample.subject),
            greeting: fallback_text(&self.greeting, &sample.greeting),
            paragraphs: fallback_list(&self.paragraphs, || sample.paragraphs.clone()),
            closing: fallback_text(&self.closing, &sample.closing),
            signature: fallback_text(&self.signature, &sample.signature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_letter_keeps_real_body() {
        let letter = CoverLetterData {
            paragraphs: vec!["I build compilers.".to_string()],
            ..Default::default()
        };
        let resolved = letter.with_sample_fallback();
        assert_eq!(resolved.paragraphs, vec!["I build compilers.".to_string()]);
        assert_eq!(resolved.greeting, sample::cover_letter().greeting);
        assert_eq!(resolved.sender.full_name, sample::cover_letter().sender.full_name);
    }

    #[test]
    fn test_blank_paragraph_list_is_sampled() {
        let resolved = CoverLetterData::default().with_sample_fallback();
        assert_eq!(resolved.paragraphs, sample::cover_letter().paragraphs);
    }
}
