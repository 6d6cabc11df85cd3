//! Two-column layout with a full-width accent banner.

use crate::models::ResumeData;
use crate::render::templates::{
    certification_line, contact_line, education_entry, experience_entry, language_line,
    photo, project_entry, section, skill_line,
};
use crate::render::tree::{Edges, TextAlign, VisualNode};
use crate::render::Template;
use crate::theme::ThemeToken;

pub struct ModernTemplate;

impl Template for ModernTemplate {
    fn resume(&self, data: &ResumeData) -> VisualNode {
        let info = &data.personal_info;
        let accent = ThemeToken::Primary;

        let details = VisualNode::block(vec![
            VisualNode::text(&info.full_name)
                .size(26.0)
                .bold()
                .color(ThemeToken::Secondary),
            VisualNode::text(&info.title)
                .size(13.0)
                .color(ThemeToken::Secondary)
                .margin_bottom(6.0),
            VisualNode::text(contact_line(info, "  |  "))
                .size(10.0)
                .color(ThemeToken::Secondary),
        ]);
        let header = match photo(info, 84.0, TextAlign::Left) {
            Some(picture) => VisualNode::row(vec![
                VisualNode::block(vec![picture]).flex(1.0),
                details.flex(5.0),
            ]),
            None => details,
        };
        let banner = VisualNode::block(vec![header])
            .background(ThemeToken::Primary)
            .padding(Edges::symmetric(28.0, 36.0));

        let mut main = vec![section(
            "Profile",
            accent,
            true,
            vec![VisualNode::text(&info.summary)],
        )];
        main.push(section(
            "Experience",
            accent,
            true,
            data.experience
                .iter()
                .map(|e| experience_entry(e, accent))
                .collect(),
        ));
        main.push(section(
            "Projects",
            accent,
            true,
            data.projects.iter().map(project_entry).collect(),
        ));

        let sidebar = vec![
            section("Skills", accent, false, data.skills.iter().map(skill_line).collect()),
            section(
                "Education",
                accent,
                false,
                data.education.iter().map(education_entry).collect(),
            ),
            section(
                "Languages",
                accent,
                false,
                data.languages.iter().map(language_line).collect(),
            ),
            section(
                "Certifications",
                accent,
                false,
                data.certifications.iter().map(certification_line).collect(),
            ),
        ];

        let body = VisualNode::row(vec![
            VisualNode::block(main)
                .padding(Edges::symmetric(24.0, 28.0))
                .flex(2.0),
            VisualNode::block(sidebar)
                .background(ThemeToken::Background)
                .padding(Edges::symmetric(24.0, 20.0))
                .flex(1.0),
        ]);

        VisualNode::block(vec![banner, body])
    }
}
