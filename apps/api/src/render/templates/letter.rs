use crate::models::CoverLetterData;
use crate::render::tree::{Edges, VisualNode};
use crate::theme::ThemeToken;

/// Block-format business letter used by every template; `accent` colours the letterhead.
pub fn standard_letter(data: &CoverLetterData, accent: ThemeToken) -> VisualNode {
    let sender = &data.sender;
    let recipient = &data.recipient;

    let contact: Vec<&str> = [&sender.email, &sender.phone, &sender.address]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    let mut children = vec![
        VisualNode::text(&sender.full_name)
            .size(20.0)
            .bold()
            .color(accent),
        VisualNode::text(contact.join("  ·  "))
            .size(10.0)
            .margin_bottom(6.0),
        VisualNode::rule(1.0).color(accent).margin_bottom(18.0),
        VisualNode::text(&data.date).margin_bottom(14.0),
    ];

    let recipient_lines = [
        &recipient.name,
        &recipient.title,
        &recipient.company,
        &recipient.address,
    ];
    children.push(
        VisualNode::block(
            recipient_lines
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .map(VisualNode::text)
                .collect(),
        )
        .margin_bottom(14.0),
    );

    children.push(VisualNode::text(format!("Re: {}", data.subject)).bold().margin_bottom(12.0));
    children.push(VisualNode::text(&data.greeting).margin_bottom(10.0));
    children.extend(
        data.paragraphs
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| VisualNode::text(p).margin_bottom(10.0)),
    );
    children.push(VisualNode::text(&data.closing).margin_bottom(28.0));
    children.push(VisualNode::text(&data.signature).bold());

    VisualNode::block(children).padding(Edges::symmetric(56.0, 60.0))
}
