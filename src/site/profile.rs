use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::{BuildError, BuildResult};

/// Page content, read from `resources/site.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    /// Document title; the name is used when absent.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Trusted HTML fragments, one per paragraph.
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub links: Vec<ProfileLink>,
    /// Avatar image, relative to the resources directory.
    #[serde(default = "default_avatar")]
    pub avatar: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileLink {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub icon: LinkIcon,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkIcon {
    Email,
    Gitlab,
    Github,
    #[default]
    Link,
}

fn default_lang() -> String {
    "en".into()
}

fn default_avatar() -> PathBuf {
    PathBuf::from("avatar.png")
}

impl Profile {
    pub async fn load(path: &Path) -> BuildResult<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| BuildError::io(path, err))?;
        Self::parse(&text).map_err(|err| BuildError::json(path, err))
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

impl LinkIcon {
    /// Inline 16px SVG drawn with `currentcolor`.
    pub fn svg(self) -> &'static str {
        match self {
            Self::Email => concat!(
                r#"<svg width="16px" height="16px" stroke-width="1.9" stroke="currentcolor" fill="none" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg">"#,
                r#"<path d="M7 9l5 3.5L17 9" stroke-linecap="round" stroke-linejoin="round"></path>"#,
                r#"<path d="M2 17V7a2 2 0 012-2h16a2 2 0 012 2v10a2 2 0 01-2 2H4a2 2 0 01-2-2z"></path>"#,
                "</svg>"
            ),
            Self::Gitlab => concat!(
                r#"<svg width="16px" height="16px" stroke-width="1.9" stroke="currentcolor" fill="none" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg">"#,
                r#"<path clip-rule="evenodd" d="M17.057 2.544a.2.2 0 01.378-.008l3.114 8.31 1.398 3.73a.2.2 0 01-.07.232l-9.76 7.106a.2.2 0 01-.235 0l-9.76-7.106a.2.2 0 01-.069-.231l1.398-3.73.167-.45 2.944-7.861a.2.2 0 01.378.008l2.47 7.6a.2.2 0 00.19.137h4.8a.2.2 0 00.19-.138l2.467-7.599z"></path>"#,
                "</svg>"
            ),
            Self::Github => concat!(
                r#"<svg width="16px" height="16px" stroke-width="1.9" stroke="currentcolor" fill="none" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg">"#,
                r#"<path d="M16 22v-3.9a3.4 3.4 0 00-.9-2.6c3-.3 6.2-1.5 6.2-6.7a5.2 5.2 0 00-1.4-3.6 4.8 4.8 0 00-.1-3.6s-1.1-.3-3.7 1.4a12.6 12.6 0 00-6.6 0C6.9 1.3 5.8 1.6 5.8 1.6a4.8 4.8 0 00-.1 3.6 5.2 5.2 0 00-1.4 3.6c0 5.2 3.2 6.4 6.2 6.7a3.4 3.4 0 00-.9 2.6V22" stroke-linecap="round" stroke-linejoin="round"></path>"#,
                r#"<path d="M9 20c-5 1.5-5-2.5-7-3" stroke-linecap="round" stroke-linejoin="round"></path>"#,
                "</svg>"
            ),
            Self::Link => concat!(
                r#"<svg width="16px" height="16px" stroke-width="1.9" stroke="currentcolor" fill="none" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg">"#,
                r#"<path d="M14 11.998C14 9.506 11.683 7 8.857 7H7.143C4.303 7 2 9.238 2 11.998c0 2.378 1.71 4.368 4 4.873" stroke-linecap="round" stroke-linejoin="round"></path>"#,
                r#"<path d="M10 11.998c0 2.491 2.317 4.997 5.143 4.997h1.714c2.84 0 5.143-2.237 5.143-4.997 0-2.379-1.71-4.37-4-4.874" stroke-linecap="round" stroke-linejoin="round"></path>"#,
                "</svg>"
            ),
        }
    }
}
