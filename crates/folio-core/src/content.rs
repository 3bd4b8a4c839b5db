//! Rich content blocks (portable text).
//!
//! Bodies, biographies, and CV descriptions are ordered arrays of typed
//! blocks. Each block carries a `_type` tag; [`ContentBlock`] has one
//! variant per tag and every consumer dispatches on the variant. Unknown
//! block types deserialize to [`ContentBlock::Unknown`] and are skipped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{nullable, ImageAsset, Reference};

/// One block of rich content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum ContentBlock {
    #[serde(rename = "block")]
    Text(TextBlock),
    #[serde(rename = "image")]
    Image(ImageBlock),
    #[serde(rename = "codeBlock")]
    Code(CodeBlock),
    #[serde(rename = "mathBlock")]
    Math(MathBlock),
    #[serde(other)]
    Unknown,
}

/// A paragraph, heading, quote, or list item made of spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub children: Vec<Span>,
    #[serde(default, deserialize_with = "nullable")]
    pub mark_defs: Vec<MarkDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

/// A run of text with decorator and annotation marks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub marks: Vec<String>,
}

/// Annotation definitions referenced from span marks by `_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum MarkDef {
    #[serde(rename = "link")]
    Link {
        #[serde(rename = "_key", default)]
        key: Option<String>,
        #[serde(default)]
        href: Option<String>,
        #[serde(default)]
        blank: Option<bool>,
    },
    #[serde(rename = "internalLink")]
    InternalLink {
        #[serde(rename = "_key", default)]
        key: Option<String>,
        #[serde(default)]
        reference: Option<Reference>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub asset: Option<ImageAsset>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MathBlock {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub latex: String,
    #[serde(default)]
    pub caption: Option<String>,
}

impl ContentBlock {
    /// Plain-text rendering of a single block, if it has any text.
    pub fn plain_text(&self) -> Option<String> {
        let text = match self {
            ContentBlock::Text(block) => block
                .children
                .iter()
                .map(|s| s.text.as_str())
                .collect::<String>(),
            ContentBlock::Code(block) => block.code.clone(),
            ContentBlock::Math(block) => block.latex.clone(),
            ContentBlock::Image(block) => block
                .alt
                .clone()
                .or_else(|| block.caption.clone())
                .unwrap_or_default(),
            ContentBlock::Unknown => String::new(),
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Link targets declared on a text block.
    pub fn links(&self) -> Vec<&str> {
        match self {
            ContentBlock::Text(block) => block
                .mark_defs
                .iter()
                .filter_map(|m| match m {
                    MarkDef::Link { href, .. } => href.as_deref(),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Join the text of every block with blank lines.
pub fn to_plain_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(ContentBlock::plain_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Plain text of a raw field value: strings pass through, block arrays
/// are flattened, anything else is empty.
pub fn value_plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(_) => serde_json::from_value::<Vec<ContentBlock>>(value.clone())
            .map(|blocks| to_plain_text(&blocks))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_body() -> Value {
        json!([
            {
                "_type": "block",
                "_key": "a1",
                "style": "h3",
                "children": [
                    {"_type": "span", "text": "Knot ", "marks": []},
                    {"_type": "span", "text": "invariants", "marks": ["em", "l1"]}
                ],
                "markDefs": [{"_type": "link", "_key": "l1", "href": "https://arxiv.org"}]
            },
            {"_type": "mathBlock", "latex": "\\chi = V - E + F", "caption": "Euler"},
            {"_type": "codeBlock", "code": "print(1)", "language": "python"},
            {"_type": "image", "alt": "A trefoil knot"},
            {"_type": "youtubeEmbed", "url": "https://example.com"}
        ])
    }

    #[test]
    fn test_dispatches_on_type_tag() {
        let blocks: Vec<ContentBlock> = serde_json::from_value(sample_body()).unwrap();
        assert_eq!(blocks.len(), 5);
        assert!(matches!(blocks[0], ContentBlock::Text(_)));
        assert!(matches!(blocks[1], ContentBlock::Math(_)));
        assert!(matches!(blocks[2], ContentBlock::Code(_)));
        assert!(matches!(blocks[3], ContentBlock::Image(_)));
        assert_eq!(blocks[4], ContentBlock::Unknown);
        assert_eq!(blocks[0].links(), vec!["https://arxiv.org"]);
    }

    #[test]
    fn test_plain_text() {
        let blocks: Vec<ContentBlock> = serde_json::from_value(sample_body()).unwrap();
        assert_eq!(
            to_plain_text(&blocks),
            "Knot invariants\n\n\\chi = V - E + F\n\nprint(1)\n\nA trefoil knot"
        );
    }

    #[test]
    fn test_value_plain_text() {
        assert_eq!(value_plain_text(&json!("plain")), "plain");
        assert_eq!(value_plain_text(&json!(null)), "");
        assert!(value_plain_text(&sample_body()).starts_with("Knot invariants"));
    }

    #[test]
    fn test_null_children_tolerated() {
        let block: ContentBlock =
            serde_json::from_value(json!({"_type": "block", "children": null})).unwrap();
        assert_eq!(block.plain_text(), None);
    }
}
