// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::{Context, Result};
use clap::Parser;
use dominance::{DominantColors, ExtractionOptions};
use std::{fs, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Report the dominant colors of background-removed images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths. Transparent pixels are treated as background.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON file with extraction options. Flags given on the command line override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sampling density; higher samples more pixels
    #[arg(short, long)]
    sample_size: Option<u32>,

    /// Distance under which a pixel joins an existing color group
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Maximum number of colors to report per image
    #[arg(short = 'n', long)]
    max_colors: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(serde::Serialize)]
struct Report<'a> {
    path: &'a str,
    total_samples: u32,
    colors: Vec<NamedColor<'a>>,
}

#[derive(serde::Serialize)]
struct NamedColor<'a> {
    name: &'static str,
    #[serde(flatten)]
    color: &'a dominance::ColorInfo,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "dominance=warn".into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let options = resolve_options(&args)?;

    let mut reports = Vec::new();
    for input in &args.inputs {
        let image = dominance::load_image(input)?;
        let colors = DominantColors::from_image(image).options(options).generate();
        tracing::info!(path = %input.display(), colors = colors.colors().len(), "analyzed image");

        reports.push((input.display().to_string(), colors));
    }

    if args.json {
        let reports: Vec<_> = reports
            .iter()
            .map(|(path, colors)| Report {
                path,
                total_samples: colors.total_samples(),
                colors: colors.named().map(|(color, name)| NamedColor { name, color }).collect(),
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for (path, colors) in &reports {
        println!("{path}");

        if colors.is_empty() {
            println!("  no colors detected");
        }

        for color in colors.colors() {
            println!("  {color}");
        }
    }

    Ok(())
}

fn resolve_options(args: &Args) -> Result<ExtractionOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => ExtractionOptions::default(),
    };

    if let Some(sample_size) = args.sample_size {
        options.sample_size = sample_size;
    }

    if let Some(threshold) = args.threshold {
        options.color_threshold = threshold;
    }

    if let Some(max_colors) = args.max_colors {
        options.maximum_color_count = max_colors;
    }

    options.validate()?;
    Ok(options)
}
