use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::{IVec2, Vec4};
use serde::{Deserialize, Serialize};

/// Window settings a host application starts from.
/// Every field is optional in JSON; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    /// RGBA, each component in 0..1
    pub background: [f32; 4],
    pub core_profile: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL lesson".to_string(),
            width: 800,
            height: 600,
            background: [0.15, 0.15, 0.2, 1.0],
            core_profile: true,
        }
    }
}

impl HostConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse host config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    pub fn background_color(&self) -> Vec4 {
        Vec4::from_array(self.background)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            bail!("window size must be positive, got {}x{}", self.width, self.height);
        }
        if self.background.iter().any(|c| !(0.0..=1.0).contains(c)) {
            bail!("background components must be within 0..1: {:?}", self.background);
        }
        Ok(())
    }
}
