//! Built-in templates and the building blocks they share.

pub mod classic;
pub mod letter;
pub mod minimal;
pub mod modern;

use crate::models::resume::{Certification, Education, Experience, Language, PersonalInfo, Project, Skill};
use crate::render::tree::{Edges, TextAlign, VisualNode};
use crate::theme::ThemeToken;

pub(crate) fn heading(title: &str, accent: ThemeToken, with_rule: bool) -> VisualNode {
    let mut children = vec![VisualNode::text(title.to_uppercase())
        .size(12.0)
        .bold()
        .color(accent)
        .margin_bottom(3.0)];
    if with_rule {
        children.push(VisualNode::rule(1.0).color(accent));
    }
    VisualNode::block(children).margin_bottom(6.0)
}

pub(crate) fn section(
    title: &str,
    accent: ThemeToken,
    with_rule: bool,
    body: Vec<VisualNode>,
) -> VisualNode {
    let mut children = vec![heading(title, accent, with_rule)];
    children.extend(body);
    VisualNode::block(children).margin_bottom(12.0)
}

/// Contact details joined on one line, blank parts omitted.
pub(crate) fn contact_line(info: &PersonalInfo, separator: &str) -> String {
    [&info.email, &info.phone, &info.location, &info.website]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Profile photo, when one was supplied.
pub(crate) fn photo(info: &PersonalInfo, size: f32, align: TextAlign) -> Option<VisualNode> {
    let src = info.photo.trim();
    if src.is_empty() {
        return None;
    }
    Some(VisualNode::image(src, size).align(align))
}

pub(crate) fn bullet(text: &str) -> VisualNode {
    VisualNode::text(format!("• {text}")).padding(Edges {
        left: 10.0,
        ..Edges::default()
    })
}

pub(crate) fn experience_entry(exp: &Experience, accent: ThemeToken) -> VisualNode {
    let mut children = vec![
        VisualNode::row(vec![
            VisualNode::text(&exp.position).bold().size(11.5).flex(3.0),
            VisualNode::text(exp.period())
                .align(TextAlign::Right)
                .flex(1.0),
        ]),
        VisualNode::text(&exp.company).color(accent).margin_bottom(2.0),
    ];
    if !exp.description.trim().is_empty() {
        children.push(VisualNode::text(&exp.description).margin_bottom(2.0));
    }
    children.extend(exp.highlights.iter().map(|h| bullet(h)));
    VisualNode::block(children).margin_bottom(8.0)
}

pub(crate) fn education_entry(edu: &Education) -> VisualNode {
    let degree = match (edu.degree.trim(), edu.field.trim()) {
        (d, "") => d.to_string(),
        ("", f) => f.to_string(),
        (d, f) => format!("{d} in {f}"),
    };
    let mut children = vec![
        VisualNode::text(degree).bold(),
        VisualNode::text(&edu.institution),
    ];
    let mut details = edu.period();
    if !edu.gpa.trim().is_empty() {
        details = format!("{details}  GPA {}", edu.gpa.trim());
    }
    if !details.trim().is_empty() {
        children.push(VisualNode::text(details.trim()).size(10.0));
    }
    VisualNode::block(children).margin_bottom(6.0)
}

pub(crate) fn skill_line(skill: &Skill) -> VisualNode {
    if skill.level.trim().is_empty() {
        VisualNode::text(&skill.name)
    } else {
        VisualNode::text(format!("{} — {}", skill.name, skill.level))
    }
}

pub(crate) fn project_entry(project: &Project) -> VisualNode {
    let mut children = vec![VisualNode::text(&project.name).bold()];
    if !project.description.trim().is_empty() {
        children.push(VisualNode::text(&project.description));
    }
    if !project.technologies.is_empty() {
        children.push(VisualNode::text(project.technologies.join(", ")).size(10.0));
    }
    if !project.link.trim().is_empty() {
        children.push(VisualNode::text(&project.link).size(10.0));
    }
    VisualNode::block(children).margin_bottom(6.0)
}

pub(crate) fn certification_line(cert: &Certification) -> VisualNode {
    let issuer = [cert.issuer.trim(), cert.date.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if issuer.is_empty() {
        VisualNode::text(&cert.name)
    } else {
        VisualNode::text(format!("{} ({issuer})", cert.name))
    }
}

pub(crate) fn language_line(language: &Language) -> VisualNode {
    if language.proficiency.trim().is_empty() {
        VisualNode::text(&language.name)
    } else {
        VisualNode::text(format!("{}: {}", language.name, language.proficiency))
    }
}

/// Sources of every image node in document order.
#[cfg(test)]
pub(crate) fn collect_images(node: &VisualNode) -> Vec<String> {
    use crate::render::tree::Content;

    let mut out = Vec::new();
    if let Content::Image(image) = &node.content {
        out.push(image.src.clone());
    }
    for child in node.children() {
        out.extend(collect_images(child));
    }
    out
}

/// Every text run in document order.
#[cfg(test)]
pub(crate) fn collect_text(node: &VisualNode) -> Vec<String> {
    use crate::render::tree::Content;

    let mut out = Vec::new();
    if let Content::Text(text) = &node.content {
        out.push(text.clone());
    }
    for child in node.children() {
        out.extend(collect_text(child));
    }
    out
}
