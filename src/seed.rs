use chrono::Utc;
use tracing::{error, info, warn};

use crate::catalog::adapter::RawFields;
use crate::catalog::slug::slugify;
use crate::constants::SEED_VERIFIER;
use crate::domain::{Category, EntryStatus, Platform, UrlType};
use crate::storage::{CatalogStore, RecordQuery};

pub struct SampleApp {
    pub name: &'static str,
    pub short_description: &'static str,
    pub full_description: &'static str,
    pub category: Category,
    pub platforms: &'static [Platform],
    pub primary_url: &'static str,
    pub url_type: UrlType,
    pub tags: &'static [&'static str],
    pub featured: bool,
}

pub const SAMPLE_APPS: &[SampleApp] = &[
    SampleApp {
        name: "Figma",
        short_description: "Collaborative design tool for teams. Create interfaces, prototypes, and more.",
        full_description: "Figma is a browser-based design tool that is free for individual use, with vector editing, prototyping and real-time collaboration.",
        category: Category::Design,
        platforms: &[Platform::Web, Platform::MacOs],
        primary_url: "https://www.figma.com",
        url_type: UrlType::Website,
        tags: &["design", "collaboration", "prototyping"],
        featured: true,
    },
    SampleApp {
        name: "Photopea",
        short_description: "Online Photoshop alternative that works in your browser.",
        full_description: "Photopea is a free online image editor supporting PSD, XCF and Sketch files. No installation and no account needed.",
        category: Category::Design,
        platforms: &[Platform::Web],
        primary_url: "https://www.photopea.com",
        url_type: UrlType::Website,
        tags: &["design", "photo-editing", "beginner-friendly"],
        featured: false,
    },
    SampleApp {
        name: "VS Code",
        short_description: "Free, open-source code editor with extensions and IntelliSense.",
        full_description: "Visual Studio Code is a lightweight editor with built-in Git integration, debugging and an extensive extension marketplace.",
        category: Category::Development,
        platforms: &[Platform::MacOs],
        primary_url: "https://code.visualstudio.com",
        url_type: UrlType::Website,
        tags: &["development", "code-editor", "open-source"],
        featured: true,
    },
    SampleApp {
        name: "iTerm2",
        short_description: "Enhanced terminal emulator for macOS with advanced features.",
        full_description: "iTerm2 brings split panes, search, autocomplete and deep customization to the macOS terminal. Free and open-source.",
        category: Category::Development,
        platforms: &[Platform::MacOs],
        primary_url: "https://iterm2.com",
        url_type: UrlType::Website,
        tags: &["development", "terminal", "open-source"],
        featured: false,
    },
    SampleApp {
        name: "Obsidian",
        short_description: "Powerful note-taking app with markdown support and linking.",
        full_description: "Obsidian stores markdown notes locally and offers bidirectional links, a graph view, plugins and themes.",
        category: Category::Productivity,
        platforms: &[Platform::MacOs, Platform::Ios],
        primary_url: "https://obsidian.md",
        url_type: UrlType::Website,
        tags: &["productivity", "note-taking", "markdown"],
        featured: true,
    },
    SampleApp {
        name: "TickTick",
        short_description: "Task management app with reminders, lists, and calendar view.",
        full_description: "TickTick has a generous free tier with unlimited tasks, lists, reminders and a calendar view.",
        category: Category::Productivity,
        platforms: &[Platform::Ios, Platform::MacOs, Platform::Web],
        primary_url: "https://www.ticktick.com",
        url_type: UrlType::AppStore,
        tags: &["productivity", "task-management"],
        featured: false,
    },
    SampleApp {
        name: "Bitwarden",
        short_description: "Free, open-source password manager with unlimited devices.",
        full_description: "Bitwarden offers unlimited vault items and devices at no cost, with secure password generation and sync.",
        category: Category::Security,
        platforms: &[Platform::Ios, Platform::MacOs, Platform::Web],
        primary_url: "https://bitwarden.com",
        url_type: UrlType::Website,
        tags: &["security", "password-manager", "open-source"],
        featured: true,
    },
    SampleApp {
        name: "ProtonVPN",
        short_description: "Secure VPN service with free tier and no data limits.",
        full_description: "ProtonVPN's free tier has no data limits and no ads, with strong encryption on every connection.",
        category: Category::Security,
        platforms: &[Platform::Ios, Platform::MacOs],
        primary_url: "https://protonvpn.com",
        url_type: UrlType::AppStore,
        tags: &["security", "vpn", "privacy"],
        featured: false,
    },
    SampleApp {
        name: "Rectangle",
        short_description: "Open-source window management for macOS.",
        full_description: "Rectangle moves and resizes windows with keyboard shortcuts or snap areas. Completely free with no limitations.",
        category: Category::Automation,
        platforms: &[Platform::MacOs],
        primary_url: "https://rectangleapp.com",
        url_type: UrlType::Website,
        tags: &["automation", "window-management", "open-source"],
        featured: false,
    },
    SampleApp {
        name: "Maccy",
        short_description: "Open-source clipboard manager for macOS.",
        full_description: "Maccy keeps a searchable clipboard history in a lightweight menu bar app.",
        category: Category::Automation,
        platforms: &[Platform::MacOs],
        primary_url: "https://github.com/p0deje/Maccy",
        url_type: UrlType::GitHub,
        tags: &["automation", "clipboard", "open-source"],
        featured: false,
    },
    SampleApp {
        name: "Signal",
        short_description: "Private messaging app with end-to-end encryption.",
        full_description: "Signal is an open-source messenger where every message and call is end-to-end encrypted.",
        category: Category::Communication,
        platforms: &[Platform::Ios, Platform::MacOs],
        primary_url: "https://signal.org",
        url_type: UrlType::AppStore,
        tags: &["communication", "privacy", "open-source"],
        featured: false,
    },
    SampleApp {
        name: "VLC",
        short_description: "Free, open-source media player that plays almost any format.",
        full_description: "VLC plays virtually any video or audio format and includes DVD playback, streaming and conversion.",
        category: Category::Utilities,
        platforms: &[Platform::MacOs],
        primary_url: "https://www.videolan.org",
        url_type: UrlType::Website,
        tags: &["utilities", "media-player", "open-source"],
        featured: true,
    },
];

impl SampleApp {
    /// Store columns for a published, system-verified record
    pub fn to_fields(&self, verified_on: &str) -> RawFields {
        RawFields {
            app_name: Some(self.name.to_string()),
            slug: Some(slugify(self.name)),
            short_description: Some(self.short_description.to_string()),
            full_description: Some(self.full_description.to_string()),
            category: Some(self.category.as_str().to_string()),
            platform: Some(self.platforms.iter().map(|p| p.as_str().to_string()).collect()),
            primary_url: Some(self.primary_url.to_string()),
            url_type: Some(self.url_type.as_str().to_string()),
            tags: Some(self.tags.iter().map(|t| t.to_string()).collect()),
            installation_notes: Some(String::new()),
            last_verified: Some(verified_on.to_string()),
            verified_by: Some(SEED_VERIFIER.to_string()),
            featured: Some(self.featured),
            status: Some(EntryStatus::Published.as_str().to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub added: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Write the sample catalog to `store`, one record at a time.
/// Apps whose slug is already published are skipped. A failing record is
/// logged and counted; the remaining records are still written.
pub async fn seed_sample_apps(store: &dyn CatalogStore) -> SeedReport {
    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let mut report = SeedReport::default();

    for app in SAMPLE_APPS {
        let slug = slugify(app.name);
        match store.list_records(&RecordQuery::BySlug(slug.clone())).await {
            Ok(existing) if !existing.is_empty() => {
                warn!("Skipped {}: slug '{}' already published", app.name, slug);
                report.skipped += 1;
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                error!("Error checking {}: {}", app.name, e);
                report.failed += 1;
                continue;
            }
        }

        match store.create_record(&app.to_fields(&today)).await {
            Ok(record) => {
                info!("Added {} as {}", app.name, record.id);
                report.added += 1;
            }
            Err(e) => {
                error!("Error adding {}: {}", app.name, e);
                report.failed += 1;
            }
        }
    }

    info!(
        "Seeding finished: {} added, {} skipped, {} failed",
        report.added, report.skipped, report.failed
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::adapter::adapt;
    use crate::catalog::RawRecord;
    use crate::storage::InMemoryStore;

    #[test]
    fn sample_fields_adapt_cleanly() {
        for app in SAMPLE_APPS {
            let record = RawRecord {
                id: "recSample".into(),
                created_time: None,
                fields: app.to_fields("2024-05-01"),
            };
            assert!(record.is_well_formed());
            let entry = adapt(&record);
            assert_eq!(entry.name, app.name);
            assert_eq!(entry.category, app.category);
            assert_eq!(entry.url_type, app.url_type);
            assert_eq!(entry.platforms, app.platforms.to_vec());
            assert_eq!(entry.verified_by.as_deref(), Some("System"));
            assert!(entry.last_verified.is_some());
        }
    }

    #[test]
    fn sample_slugs_are_unique() {
        let mut slugs: Vec<String> = SAMPLE_APPS.iter().map(|a| slugify(a.name)).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), SAMPLE_APPS.len());
    }

    #[tokio::test]
    async fn seeds_every_sample() {
        let store = InMemoryStore::new();
        let report = seed_sample_apps(&store).await;
        assert_eq!(report.added, SAMPLE_APPS.len());
        assert_eq!(report.failed, 0);
        assert_eq!(store.len(), SAMPLE_APPS.len());
    }

    #[tokio::test]
    async fn reseeding_skips_published_slugs() {
        let store = InMemoryStore::new();
        seed_sample_apps(&store).await;

        let again = seed_sample_apps(&store).await;
        assert_eq!(
            again,
            SeedReport {
                added: 0,
                skipped: SAMPLE_APPS.len(),
                failed: 0
            }
        );
        assert_eq!(store.len(), SAMPLE_APPS.len());
    }
}
