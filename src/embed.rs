use serde::{Deserialize, Serialize};

use crate::utils::truncate_chars;

// Limits enforced by the chat platform
pub const TITLE_LIMIT: usize = 256;
pub const DESCRIPTION_LIMIT: usize = 4096;
pub const FIELD_NAME_LIMIT: usize = 256;
pub const FIELD_VALUE_LIMIT: usize = 1024;
pub const FOOTER_LIMIT: usize = 2048;

/// Rich message body rendered by the chat client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: Option<String>,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl AsRef<str>) -> Self {
        self.title = Some(truncate_chars(title.as_ref(), TITLE_LIMIT));
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl AsRef<str>) -> Self {
        self.description = Some(truncate_chars(description.as_ref(), DESCRIPTION_LIMIT));
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn author(mut self, name: &str, url: Option<&str>, icon_url: Option<&str>) -> Self {
        self.author = Some(EmbedAuthor {
            name: name.to_string(),
            url: url.map(str::to_string),
            icon_url: icon_url.map(str::to_string),
        });
        self
    }

    /// Append a field, clipping name and value to the platform limits.
    /// Empty names or values are replaced, the platform rejects them.
    pub fn field(mut self, name: impl AsRef<str>, value: impl AsRef<str>, inline: bool) -> Self {
        let name = non_empty(name.as_ref(), "\u{200b}");
        let value = non_empty(value.as_ref(), "\u{200b}");
        self.fields.push(EmbedField {
            name: truncate_chars(name, FIELD_NAME_LIMIT),
            value: truncate_chars(value, FIELD_VALUE_LIMIT),
            inline,
        });
        self
    }

    pub fn footer(mut self, text: impl AsRef<str>) -> Self {
        self.footer = Some(truncate_chars(text.as_ref(), FOOTER_LIMIT));
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Plain text rendering for terminals and logs
    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();
        if let Some(author) = &self.author {
            lines.push(format!("[{}]", author.name));
        }
        match (&self.title, &self.url) {
            (Some(title), Some(url)) => lines.push(format!("== {} <{}>", title, url)),
            (Some(title), None) => lines.push(format!("== {}", title)),
            (None, Some(url)) => lines.push(format!("<{}>", url)),
            (None, None) => {}
        }
        if let Some(description) = &self.description {
            lines.push(description.clone());
        }
        for field in &self.fields {
            lines.push(String::new());
            lines.push(format!("# {}", field.name));
            lines.push(field.value.clone());
        }
        if let Some(thumbnail) = &self.thumbnail {
            lines.push(format!("thumbnail: {}", thumbnail));
        }
        if let Some(image) = &self.image {
            lines.push(format!("image: {}", image));
        }
        if let Some(footer) = &self.footer {
            lines.push(format!("-- {}", footer));
        }
        lines.join("\n")
    }
}

fn non_empty<'a>(text: &'a str, replacement: &'a str) -> &'a str {
    if text.trim().is_empty() { replacement } else { text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_is_clipped() {
        let embed = Embed::new().field("name", "x".repeat(2000), false);
        assert_eq!(embed.fields[0].value.chars().count(), FIELD_VALUE_LIMIT);
    }

    #[test]
    fn test_render_text_contains_parts() {
        let embed = Embed::new()
            .title("Title")
            .url("https://example.com")
            .description("Body")
            .field("Field", "Value", true)
            .footer("Footer");
        let text = embed.render_text();
        assert!(text.contains("== Title <https://example.com>"));
        assert!(text.contains("# Field\nValue"));
        assert!(text.ends_with("-- Footer"));
    }

    #[test]
    fn test_serializes_without_empty_parts() {
        let json = serde_json::to_value(Embed::new().title("T")).unwrap();
        assert_eq!(json, serde_json::json!({"title": "T"}));
    }
}
