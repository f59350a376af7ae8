// src/site_config.rs
use serde::{Deserialize, Serialize};

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Deployment prefix, e.g. "/portfolio" when served from a project page.
    pub base_path: String,
    pub log_level: String,
    pub navbar: NavbarConfig,
    pub back_to_top: BackToTopConfig,
    pub fade_in: FadeInConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Viewports at or below this width always use the solid logo.
    pub mobile_breakpoint: f64,
    pub logo_solid: String,
    pub logo_default: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackToTopConfig {
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeInConfig {
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub success_message: String,
    pub failure_message: String,
    pub network_error_message: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            log_level: String::from("info"),
            navbar: NavbarConfig::default(),
            back_to_top: BackToTopConfig::default(),
            fade_in: FadeInConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            logo_solid: String::from("img/logo-w-wordmark-yellow.png"),
            logo_default: String::from("img/logo-w-wordmark.png"),
        }
    }
}

impl Default for BackToTopConfig {
    fn default() -> Self {
        Self { threshold: 300.0 }
    }
}

impl Default for FadeInConfig {
    fn default() -> Self {
        Self { threshold: 0.1 }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            success_message: String::from("Thank you for your message! I'll be in touch soon."),
            failure_message: String::from(
                "Sorry, this form is currently unavailable. Please try again later or email me directly.",
            ),
            network_error_message: String::from("Network error. Please try again later."),
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid site config: {}", e))
    }

    /// Reads overrides embedded in the page. A page without a config element
    /// gets the defaults.
    pub fn from_page() -> Result<Self, String> {
        let element = gloo::utils::document().get_element_by_id(CONFIG_ELEMENT_ID);
        match element.and_then(|e| e.text_content()) {
            Some(json) if !json.trim().is_empty() => Self::from_json(&json),
            _ => Ok(Self::default()),
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.base_path, "");
        assert_eq!(config.navbar.mobile_breakpoint, 768.0);
        assert_eq!(config.back_to_top.threshold, 300.0);
        assert_eq!(config.fade_in.threshold, 0.1);
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SiteConfig::from_json(
            r#"{ "base_path": "/portfolio", "navbar": { "mobile_breakpoint": 600 } }"#,
        )
        .unwrap();
        assert_eq!(config.base_path, "/portfolio");
        assert_eq!(config.navbar.mobile_breakpoint, 600.0);
        assert_eq!(config.navbar.logo_default, NavbarConfig::default().logo_default);
        assert_eq!(config.contact, ContactConfig::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = SiteConfig::from_json("{ base_path: ").unwrap_err();
        assert!(err.starts_with("Invalid site config"));
    }

    #[test]
    fn test_log_level_parsing() {
        let mut config = SiteConfig::default();
        config.log_level = "DEBUG".to_string();
        assert_eq!(config.log_level(), log::Level::Debug);
        config.log_level = "chatty".to_string();
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut config = SiteConfig::default();
        config.base_path = "/site".to_string();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SiteConfig::from_json(&json).unwrap(), config);
    }
}
