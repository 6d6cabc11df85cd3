//! Template rendering — document model + formatting options → visual tree.
//!
//! Every template implements the same `Template` contract. The free functions
//! `render_resume` / `render_cover_letter` apply the per-field sample fallback
//! and stamp the stable element id on the root, so the export path never depends
//! on which template produced the tree.

pub mod templates;
pub mod tree;

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFamily;
use crate::models::{CoverLetterData, ResumeData};
use crate::theme::ThemeToken;

use tree::VisualNode;

pub const RESUME_ELEMENT_ID: &str = "resume-preview";
pub const COVER_LETTER_ELEMENT_ID: &str = "cover-letter-preview";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineHeight {
    Tight,
    #[default]
    Normal,
    Relaxed,
}

impl LineHeight {
    pub fn multiplier(self) -> f32 {
        match self {
            LineHeight::Tight => 1.25,
            LineHeight::Normal => 1.5,
            LineHeight::Relaxed => 1.75,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormattingOptions {
    pub font_family: FontFamily,
    pub line_height: LineHeight,
}

/// Shared contract of all interchangeable templates.
///
/// Implementations receive data that already went through sample fallback and must
/// be pure: same input, same tree. Themed surfaces use `ThemeToken` paints only.
pub trait Template: Send + Sync {
    fn resume(&self, data: &ResumeData) -> VisualNode;

    fn cover_letter(&self, data: &CoverLetterData) -> VisualNode {
        templates::letter::standard_letter(data, ThemeToken::Primary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Modern,
    Classic,
    Minimal,
}

impl TemplateKind {
    pub fn template(self) -> &'static dyn Template {
        match self {
            TemplateKind::Modern => &templates::modern::ModernTemplate,
            TemplateKind::Classic => &templates::classic::ClassicTemplate,
            TemplateKind::Minimal => &templates::minimal::MinimalTemplate,
        }
    }
}

pub fn render_resume(
    kind: TemplateKind,
    data: &ResumeData,
    formatting: &FormattingOptions,
) -> VisualNode {
    let resolved = data.with_sample_fallback();
    let root = kind.template().resume(&resolved);
    finish_root(root, RESUME_ELEMENT_ID, formatting)
}

pub fn render_cover_letter(
    kind: TemplateKind,
    data: &CoverLetterData,
    formatting: &FormattingOptions,
) -> VisualNode {
    let resolved = data.with_sample_fallback();
    let root = kind.template().cover_letter(&resolved);
    finish_root(root, COVER_LETTER_ELEMENT_ID, formatting)
}

/// Applies the parts of the contract every root shares: element id, document
/// surface painted with the page-fill token, formatting inherited by all text.
fn finish_root(root: VisualNode, element_id: &str, formatting: &FormattingOptions) -> VisualNode {
    let mut root = root.with_id(element_id).background(ThemeToken::Secondary);
    root.style.font_family = Some(formatting.font_family);
    root.style.line_height = Some(formatting.line_height.multiplier());
    if root.style.color.is_none() {
        root.style.color = Some(crate::theme::Paint::Token(ThemeToken::Text));
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Paint;

    const ALL_KINDS: [TemplateKind; 3] = [
        TemplateKind::Modern,
        TemplateKind::Classic,
        TemplateKind::Minimal,
    ];

    #[test]
    fn test_every_template_honours_root_contract() {
        let formatting = FormattingOptions {
            font_family: FontFamily::Lato,
            line_height: LineHeight::Relaxed,
        };
        for kind in ALL_KINDS {
            let root = render_resume(kind, &ResumeData::default(), &formatting);
            assert_eq!(root.id.as_deref(), Some(RESUME_ELEMENT_ID), "{kind:?}");
            assert_eq!(root.style.background, Some(Paint::Token(ThemeToken::Secondary)));
            assert_eq!(root.style.font_family, Some(FontFamily::Lato));
            assert_eq!(root.style.line_height, Some(1.75));
            assert!(!root.is_constrained(), "templates must not clip");

            let letter = render_cover_letter(kind, &CoverLetterData::default(), &formatting);
            assert_eq!(letter.id.as_deref(), Some(COVER_LETTER_ELEMENT_ID));
        }
    }

    #[test]
    fn test_rendering_is_pure() {
        let data = ResumeData::default();
        let fmt = FormattingOptions::default();
        for kind in ALL_KINDS {
            assert_eq!(render_resume(kind, &data, &fmt), render_resume(kind, &data, &fmt));
        }
    }

    #[test]
    fn test_partial_data_renders_mixed_content() {
        let mut data = ResumeData::default();
        data.personal_info.full_name = "Grace Hopper".to_string();
        let root = render_resume(TemplateKind::Classic, &data, &FormattingOptions::default());
        let texts = templates::collect_text(&root);
        assert!(texts.iter().any(|t| t.contains("Grace Hopper")));
        // Sample experience sits next to the real name.
        assert!(texts.iter().any(|t| t.contains("Northwind Logistics")));
    }

    #[test]
    fn test_formatting_options_deserialize() {
        let fmt: FormattingOptions =
            serde_json::from_str(r#"{"fontFamily":"eb-garamond","lineHeight":"tight"}"#).unwrap();
        assert_eq!(fmt.font_family, FontFamily::EbGaramond);
        assert_eq!(fmt.line_height, LineHeight::Tight);
    }
}
