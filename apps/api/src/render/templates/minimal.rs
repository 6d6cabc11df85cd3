use crate::models::ResumeData;
use crate::render::templates::{
    certification_line, contact_line, education_entry, experience_entry, language_line,
    project_entry, section, skill_line,
};
use crate::render::tree::{Edges, VisualNode};
use crate::render::Template;
use crate::theme::{Paint, Rgb, ThemeToken};

/// Contact details stay a muted grey whatever the theme.
const MUTED: Rgb = Rgb(0x6b, 0x72, 0x80);

pub struct MinimalTemplate;

impl Template for MinimalTemplate {
    fn resume(&self, data: &ResumeData) -> VisualNode {
        let info = &data.personal_info;
        let accent = ThemeToken::Text;

        VisualNode::block(vec![
            VisualNode::text(&info.full_name).size(22.0),
            VisualNode::text(&info.title).size(12.0).color(ThemeToken::Primary),
            VisualNode::text(contact_line(info, "   "))
                .size(9.5)
                .paint(Paint::Solid(MUTED))
                .margin_bottom(20.0),
            VisualNode::text(&info.summary).margin_bottom(16.0),
            section(
                "Experience",
                accent,
                false,
                data.experience
                    .iter()
                    .map(|e| experience_entry(e, ThemeToken::Primary))
                    .collect(),
            ),
            section(
                "Education",
                accent,
                false,
                data.education.iter().map(education_entry).collect(),
            ),
            section("Skills", accent, false, data.skills.iter().map(skill_line).collect()),
            section(
                "Projects",
                accent,
                false,
                data.projects.iter().map(project_entry).collect(),
            ),
            section(
                "Certifications",
                accent,
                false,
                data.certifications.iter().map(certification_line).collect(),
            ),
            section(
                "Languages",
                accent,
                false,
                data.languages.iter().map(language_line).collect(),
            ),
        ])
        .padding(Edges::symmetric(52.0, 64.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tree::Content;

    #[test]
    fn test_contact_line_uses_fixed_grey() {
        let data = ResumeData::default().with_sample_fallback();
        let tree = MinimalTemplate.resume(&data);
        let contact = contact_line(&data.personal_info, "   ");
        let node = tree
            .children()
            .iter()
            .find(|n| matches!(&n.content, Content::Text(t) if *t == contact))
            .unwrap();
        assert_eq!(node.style.color, Some(Paint::Solid(MUTED)));
        // The name still follows the theme's text colour through inheritance.
        assert_eq!(tree.children()[0].style.color, None);
    }
}
