use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platforms an app can be listed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "iOS")]
    Ios,
    #[serde(rename = "macOS")]
    MacOs,
    #[serde(rename = "Web")]
    Web,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Ios, Platform::MacOs, Platform::Web];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::MacOs => "macOS",
            Platform::Web => "Web",
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown platform '{s}'"))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Design,
    Development,
    Productivity,
    Security,
    Automation,
    Communication,
    Utilities,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Design,
        Category::Development,
        Category::Productivity,
        Category::Security,
        Category::Automation,
        Category::Communication,
        Category::Utilities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Design => "design",
            Category::Development => "development",
            Category::Productivity => "productivity",
            Category::Security => "security",
            Category::Automation => "automation",
            Category::Communication => "communication",
            Category::Utilities => "utilities",
        }
    }

    /// Display metadata for the category landing pages
    pub fn info(&self) -> CategoryInfo {
        let (name, emoji, description) = match self {
            Category::Design => (
                "Design",
                "🎨",
                "Create stunning visuals, edit photos and videos, and bring your designs to life.",
            ),
            Category::Development => (
                "Development",
                "💻",
                "Write code, manage databases, and build software with powerful development tools.",
            ),
            Category::Productivity => (
                "Productivity",
                "⚡",
                "Organize your life, manage projects, and boost your productivity.",
            ),
            Category::Security => (
                "Security",
                "🔐",
                "Protect your privacy, secure your data, and stay safe online.",
            ),
            Category::Automation => (
                "Automation",
                "🤖",
                "Automate repetitive tasks, streamline your workflow, and work smarter with AI.",
            ),
            Category::Communication => (
                "Communication",
                "💬",
                "Connect with your team, chat with collaborators, and communicate effectively.",
            ),
            Category::Utilities => (
                "Utilities",
                "🛠️",
                "Essential tools for file management, system optimization, and everyday computing.",
            ),
        };
        CategoryInfo {
            id: *self,
            name,
            emoji,
            description,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Utilities
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub id: Category,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

/// Where the primary link of an entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrlType {
    #[serde(rename = "App Store")]
    AppStore,
    #[serde(rename = "GitHub")]
    GitHub,
    #[serde(rename = "Website")]
    Website,
    #[serde(rename = "Direct Download")]
    DirectDownload,
}

impl UrlType {
    pub const ALL: [UrlType; 4] = [
        UrlType::AppStore,
        UrlType::GitHub,
        UrlType::Website,
        UrlType::DirectDownload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrlType::AppStore => "App Store",
            UrlType::GitHub => "GitHub",
            UrlType::Website => "Website",
            UrlType::DirectDownload => "Direct Download",
        }
    }
}

impl Default for UrlType {
    fn default() -> Self {
        UrlType::Website
    }
}

impl FromStr for UrlType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UrlType::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| format!("unknown URL type '{s}'"))
    }
}

impl fmt::Display for UrlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of an entry. Only `Published` entries are ever served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    #[serde(rename = "Published")]
    Published,
    #[serde(rename = "Pending Review")]
    PendingReview,
    #[serde(rename = "Archived")]
    Archived,
}

impl EntryStatus {
    pub const ALL: [EntryStatus; 3] = [
        EntryStatus::Published,
        EntryStatus::PendingReview,
        EntryStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Published => "Published",
            EntryStatus::PendingReview => "Pending Review",
            EntryStatus::Archived => "Archived",
        }
    }
}

impl Default for EntryStatus {
    fn default() -> Self {
        EntryStatus::Published
    }
}

impl FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| format!("unknown status '{s}'"))
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One listed application, normalized from a store record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub short_description: String,
    pub full_description: String,
    pub category: Category,
    pub platforms: Vec<Platform>,
    #[serde(rename = "primaryURL")]
    pub primary_url: String,
    pub url_type: UrlType,
    pub tags: Vec<String>,
    pub installation_notes: Option<String>,
    pub last_verified: Option<NaiveDate>,
    pub verified_by: Option<String>,
    pub quality_score: Option<f64>,
    pub featured: bool,
    pub status: EntryStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl CatalogEntry {
    pub fn is_published(&self) -> bool {
        self.status == EntryStatus::Published
    }

    pub fn has_platform(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}

/// A public suggestion for a new listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub app_name: String,
    pub url: String,
    pub short_description: String,
    pub why_great: String,
    pub email: String,
    #[serde(default)]
    pub platform: Option<Vec<Platform>>,
    #[serde(default)]
    pub submitter_name: Option<String>,
}
