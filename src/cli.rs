// Command-line flags. Anything given here wins over the config file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ViewerConfig;
use crate::error::Error;
use crate::types::Region;

#[derive(Debug, Parser)]
#[command(name = "pdf-annotator", version, about = "Ink on a PDF page, only inside allowed regions")]
pub struct Args {
    /// Document to show: a file path or an http(s) URL
    pub document: Option<String>,

    /// JSON config file (document, page, scale, regions, style)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 1-based page number
    #[arg(short, long)]
    pub page: Option<u16>,

    /// Render scale
    #[arg(short, long)]
    pub scale: Option<f32>,

    /// Allowed region in surface pixels; repeat for more. Replaces the configured regions.
    #[arg(short, long = "region", value_name = "X1,Y1,X2,Y2")]
    pub regions: Vec<Region>,
}

impl Args {
    pub fn into_config(self) -> Result<ViewerConfig, Error> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };
        if let Some(document) = self.document {
            config.document = document;
        }
        if let Some(page) = self.page {
            config.page = page;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if !self.regions.is_empty() {
            config.regions = self.regions;
        }
        config.validate()?;
        Ok(config)
    }
}
