//! Single column, centred masthead, ruled section headings.

use crate::models::ResumeData;
use crate::render::templates::{
    certification_line, contact_line, education_entry, experience_entry, language_line,
    photo, project_entry, section,
};
use crate::render::tree::{Edges, TextAlign, VisualNode};
use crate::render::Template;
use crate::theme::ThemeToken;

pub struct ClassicTemplate;

impl Template for ClassicTemplate {
    fn resume(&self, data: &ResumeData) -> VisualNode {
        let info = &data.personal_info;
        let accent = ThemeToken::Primary;

        let mut masthead = Vec::new();
        masthead.extend(photo(info, 80.0, TextAlign::Center).map(|p| p.margin_bottom(8.0)));
        masthead.extend([
            VisualNode::text(&info.full_name)
                .size(24.0)
                .bold()
                .align(TextAlign::Center),
            VisualNode::text(&info.title)
                .size(12.0)
                .color(accent)
                .align(TextAlign::Center),
            VisualNode::text(contact_line(info, " · "))
                .size(10.0)
                .align(TextAlign::Center)
                .margin_bottom(8.0),
            VisualNode::rule(2.0).color(accent),
        ]);
        let masthead = VisualNode::block(masthead).margin_bottom(14.0);

        let skills = data
            .skills
            .iter()
            .map(|s| s.name.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" · ");

        VisualNode::block(vec![
            masthead,
            section("Summary", accent, true, vec![VisualNode::text(&info.summary)]),
            section(
                "Professional Experience",
                accent,
                true,
                data.experience
                    .iter()
                    .map(|e| experience_entry(e, accent))
                    .collect(),
            ),
            section(
                "Education",
                accent,
                true,
                data.education.iter().map(education_entry).collect(),
            ),
            section("Skills", accent, true, vec![VisualNode::text(skills)]),
            section(
                "Projects",
                accent,
                true,
                data.projects.iter().map(project_entry).collect(),
            ),
            section(
                "Certifications",
                accent,
                true,
                data.certifications.iter().map(certification_line).collect(),
            ),
            section(
                "Languages",
                accent,
                true,
                data.languages.iter().map(language_line).collect(),
            ),
        ])
        .padding(Edges::symmetric(48.0, 56.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::templates::{collect_images, collect_text};

    #[test]
    fn test_skills_render_on_one_line() {
        let data = ResumeData::default().with_sample_fallback();
        let texts = collect_text(&ClassicTemplate.resume(&data));
        assert!(texts.iter().any(|t| t == "Rust · PostgreSQL · Distributed systems · Kubernetes"));
    }

    #[test]
    fn test_photo_heads_the_masthead() {
        let mut data = ResumeData::default().with_sample_fallback();
        data.personal_info.photo = "data:image/png;base64,AAAA".to_string();
        let tree = ClassicTemplate.resume(&data);
        assert_eq!(collect_images(&tree).len(), 1);
        let masthead = &tree.children()[0];
        assert!(matches!(masthead.children()[0].content, crate::render::tree::Content::Image(_)));
    }
}
