//! Site content and settings, embedded from `content/` at build time.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Utc};
use rust_embed::Embed;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::motion::config::AnimationConfig;
use crate::viewport::DEFAULT_BREAKPOINT;

#[derive(Embed)]
#[folder = "content"]
pub struct ContentAssets;

#[derive(Error, Debug, Clone)]
pub enum ContentError {
    #[error("Content file {0} not found")]
    NotFound(String),
    #[error("Couldn't parse {file}: {message}")]
    Parse { file: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFeature {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    /// Display ordinal, e.g. "01".
    pub number: String,
    pub title: String,
    pub description: String,
    pub features: Vec<ServiceFeature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub brief: String,
    pub video: String,
    /// Still shown until the video has loaded.
    #[serde(default)]
    pub placeholder: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothScrollSettings {
    pub enabled: bool,
    /// Seconds to ease toward a new wheel target.
    pub duration: f64,
}

impl Default for SmoothScrollSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            duration: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Social {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub name: String,
    pub full_name: String,
    pub title: String,
    pub description: String,
    pub role: Vec<String>,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub breakpoint_px: u32,
    pub nav_threshold: f64,
    pub smooth_scroll: SmoothScrollSettings,
    pub socials: Vec<Social>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            full_name: String::new(),
            title: String::new(),
            description: String::new(),
            role: Vec::new(),
            location: String::new(),
            email: String::new(),
            phone: String::new(),
            breakpoint_px: DEFAULT_BREAKPOINT,
            nav_threshold: crate::interaction::nav::DEFAULT_THRESHOLD,
            smooth_scroll: SmoothScrollSettings::default(),
            socials: Vec::new(),
        }
    }
}

impl SiteSettings {
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }

    pub fn tel(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }
}

fn read(file: &str) -> Result<String, ContentError> {
    let asset = ContentAssets::get(file).ok_or_else(|| ContentError::NotFound(file.to_string()))?;
    String::from_utf8(asset.data.into_owned()).map_err(|e| ContentError::Parse {
        file: file.to_string(),
        message: e.to_string(),
    })
}

pub fn load<T: DeserializeOwned>(file: &str) -> Result<T, ContentError> {
    let raw = read(file)?;
    serde_json::from_str(&raw).map_err(|e| ContentError::Parse {
        file: file.to_string(),
        message: e.to_string(),
    })
}

fn load_or_default<T: DeserializeOwned + Default>(file: &str) -> T {
    load(file).unwrap_or_else(|e| {
        log::error!("{e}");
        T::default()
    })
}

static SERVICES: LazyLock<Vec<Service>> = LazyLock::new(|| load_or_default("services.json"));
static PROJECTS: LazyLock<Vec<Project>> = LazyLock::new(|| load_or_default("projects.json"));
static SITE: LazyLock<SiteSettings> = LazyLock::new(|| load_or_default("site.json"));
static ANIMATION: LazyLock<AnimationConfig> = LazyLock::new(|| {
    let parsed = read("animation.json").and_then(|raw| {
        AnimationConfig::from_json(&raw).map_err(|e| ContentError::Parse {
            file: "animation.json".to_string(),
            message: e.to_string(),
        })
    });
    parsed.unwrap_or_else(|e| {
        log::warn!("{e}, using built-in animation settings");
        AnimationConfig::default()
    })
});

pub fn services() -> &'static [Service] {
    &SERVICES
}

pub fn projects() -> &'static [Project] {
    &PROJECTS
}

pub fn site() -> &'static SiteSettings {
    &SITE
}

pub fn animation_config() -> &'static AnimationConfig {
    &ANIMATION
}

/// Year the site was built, for the copyright line.
pub fn build_year() -> i32 {
    DateTime::parse_from_rfc3339(env!("BUILD_TIME"))
        .map(|t| t.with_timezone(&Utc).year())
        .unwrap_or_else(|_| Utc::now().year())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_services_load() {
        let services: Vec<Service> = load("services.json").unwrap();
        let ids: Vec<_> = services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["web-development", "web-design", "seo"]);
        let numbers: Vec<_> = services.iter().map(|s| s.number.as_str()).collect();
        assert_eq!(numbers, ["01", "02", "03"]);
        for service in &services {
            let feature_ids: HashSet<_> = service.features.iter().map(|f| &f.id).collect();
            assert_eq!(feature_ids.len(), service.features.len());
        }
    }

    #[test]
    fn test_projects_have_unique_ids_and_tags() {
        let projects = projects();
        assert_eq!(projects.len(), 2);
        let ids: HashSet<_> = projects.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), projects.len());
        assert!(projects.iter().all(|p| !p.tags.is_empty()));
        assert_eq!(projects[1].placeholder, None);
    }

    #[test]
    fn test_site_settings() {
        let site: SiteSettings = load("site.json").unwrap();
        assert_eq!(site.breakpoint_px, 768);
        assert!(!site.smooth_scroll.enabled);
        assert_eq!(site.mailto(), "mailto:talyawy@proton.me");
        assert_eq!(site.tel(), "tel:+201149173309");
        assert_eq!(site.socials.len(), 3);
    }

    #[test]
    fn test_animation_config_matches_defaults() {
        assert_eq!(*animation_config(), AnimationConfig::default());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load::<SiteSettings>("missing.json"),
            Err(ContentError::NotFound(_))
        ));
    }

    #[test]
    fn test_build_year() {
        assert!(build_year() >= 2024);
    }
}
