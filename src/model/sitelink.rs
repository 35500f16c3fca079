use serde::{Deserialize, Serialize};

/// A link from an item to a page on a connected site.
///
/// The site code is the key of the `sitelinks` map on the wire, so it is not
/// serialized with the link itself.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct Sitelink {
    #[serde(skip)]
    pub site: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub badges: Vec<String>,
}

impl Sitelink {
    pub fn new(site: impl Into<String>, title: impl Into<String>) -> Self {
        Sitelink {
            site: site.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Adds a badge item id unless it is already present.
    pub fn add_badge(&mut self, badge: impl Into<String>) {
        let badge = badge.into();
        if !self.badges.contains(&badge) {
            self.badges.push(badge);
        }
    }

    pub fn remove_badge(&mut self, badge: &str) -> bool {
        let before = self.badges.len();
        self.badges.retain(|b| b != badge);
        self.badges.len() != before
    }

    pub fn badges(&self) -> &[String] {
        &self.badges
    }
}
