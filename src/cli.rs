/// CLI argument parsing and command handling.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::color::{self, Hsl, Rgb};
use crate::config::{Config, SamplerConfig};
use crate::palette::{self, Palette};
use crate::presets::{self, Preset};
use crate::sampler::{ColorSampler, PickHandle, SamplingError};

#[derive(Parser, Debug)]
#[command(
    name = "tonefit",
    version,
    about = "Tonefit - Outfit color suggestions for a skin tone"
)]
pub struct Cli {
    /// Config file (defaults to <config dir>/tonefit/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Color picker program to use as the eyedropper
    #[arg(long, global = true)]
    pub sampler: Option<String>,
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[arg(long, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the suggested top and bottom colors for a skin tone
    Palette { color: Rgb },
    /// Convert #RRGGBB to HSL
    Hsl { color: Rgb },
    /// Convert HSL to #rrggbb (saturation and lightness in percent)
    Hex {
        #[arg(allow_negative_numbers = true, value_parser = finite_f64)]
        hue: f64,
        #[arg(value_parser = finite_f64)]
        saturation: f64,
        #[arg(value_parser = finite_f64)]
        lightness: f64,
    },
    /// Pick a color with the configured picker and print its palette
    Sample,
    /// List skin tone presets
    Presets {
        /// Print the palette of a random preset instead
        #[arg(long)]
        random: bool,
    },
}

/// Like `f64::from_str`, minus NaN and the infinities.
fn finite_f64(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|err: std::num::ParseFloatError| err.to_string())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{s} is not a finite number"))
    }
}

impl Cli {
    pub fn log_level<'a>(&self, config: &'a Config) -> &'a str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            config.log.level.as_str()
        }
    }

    /// `--sampler` replaces the configured picker and its arguments.
    pub fn sampler_config(&self, config: &Config) -> SamplerConfig {
        match &self.sampler {
            Some(command) => SamplerConfig {
                command: Some(command.clone()),
                args: Vec::new(),
            },
            None => config.sampler.clone(),
        }
    }
}

/// Execute a one-shot CLI command.
pub fn run(command: Command, sampler: &dyn ColorSampler, presets: &[Preset]) -> Result<()> {
    match command {
        Command::Palette { color } => print!("{}", format_palette(color)),
        Command::Hsl { color } => println!("{}", format_hsl(color::to_hsl(color))),
        Command::Hex {
            hue,
            saturation,
            lightness,
        } => {
            let hsl = Hsl {
                h: hue,
                s: saturation.clamp(0.0, 100.0),
                l: lightness.clamp(0.0, 100.0),
            };
            println!("{}", color::to_hex(hsl));
        }
        Command::Sample => handle_sample(sampler)?,
        Command::Presets { random: false } => {
            for preset in presets {
                println!("{:<14} {}", preset.name, preset.color);
            }
        }
        Command::Presets { random: true } => match presets::random_index(presets) {
            Some(index) => {
                let preset = &presets[index];
                println!("{}", preset.name);
                print!("{}", format_palette(preset.color));
            }
            None => println!("No presets configured."),
        },
    }
    Ok(())
}

fn handle_sample(sampler: &dyn ColorSampler) -> Result<()> {
    if !sampler.is_supported() {
        return Err(SamplingError::Unsupported.into());
    }
    // Ctrl+C ends the whole process, picker included.
    let color = sampler.sample(&PickHandle::default())?;
    info!(%color, "color picked");
    print!("{}", format_palette(color));
    Ok(())
}

pub fn format_hsl(hsl: Hsl) -> String {
    // 359.96 would print as 360.0
    let h = (hsl.h * 10.0).round() / 10.0 % 360.0;
    format!("hsl({h:.1}, {:.1}%, {:.1}%)", hsl.s, hsl.l)
}

pub fn format_palette(base: Rgb) -> String {
    let Palette { top, bottom } = palette::generate(base);
    let join = |colors: &[Rgb]| {
        colors
            .iter()
            .map(Rgb::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!(
        "base    {base}  {}\ntop     {}\nbottom  {}\n",
        format_hsl(color::to_hsl(base)),
        join(&top),
        join(&bottom)
    )
}
