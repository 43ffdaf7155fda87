// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use glam::Vec4;

use crate::config::HostConfig;
use crate::math::parse_rgba;

#[derive(Parser, Debug, Clone)]
#[command(name = "gl-window-host")]
#[command(about = "OpenGL lesson window host", long_about = None)]
pub struct Cli {
    /// JSON file with window settings; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Window title
    #[arg(long)]
    pub title: Option<String>,

    /// Window width in pixels
    #[arg(long)]
    pub width: Option<i32>,

    /// Window height in pixels
    #[arg(long)]
    pub height: Option<i32>,

    /// Background color as r,g,b[,a] with components in 0..1
    #[arg(long, value_parser = parse_rgba)]
    pub background: Option<Vec4>,

    /// Request a compatibility profile instead of core
    #[arg(long = "compat", default_value = "false")]
    pub compat: bool,
}

impl Cli {
    /// Defaults, then the config file, then explicit flags
    pub fn resolve(&self) -> Result<HostConfig> {
        let mut config = match &self.config {
            Some(path) => HostConfig::load(path)?,
            None => HostConfig::default(),
        };

        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(background) = self.background {
            config.background = background.to_array();
        }
        if self.compat {
            config.core_profile = false;
        }
        config.validate()?;
        Ok(config)
    }
}
