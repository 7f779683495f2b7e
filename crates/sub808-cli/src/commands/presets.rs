//! Preset management commands.
//!
//! Lists the factory catalog and user presets, prints a preset's values and
//! exports any preset to a TOML file for editing.

use anyhow::{Context, bail};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use sub808_config::{Preset, factory_presets, paths};

use super::common::{PresetSource, resolve_preset};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show the values of a preset
    Show {
        /// Factory preset name or index, user preset name or path
        #[arg(value_name = "NAME|INDEX")]
        name: String,
    },

    /// Write a preset to a TOML file
    Export {
        /// Factory preset name or index, user preset name or path
        #[arg(value_name = "NAME|INDEX")]
        name: String,

        /// Destination file
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the user preset directory
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Export { name, path, force } => export_preset(&name, path, force),
        PresetsCommand::Paths => {
            println!("User presets: {}", paths::user_presets_dir().display());
            Ok(())
        }
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only;
    let show_user = !factory_only;

    if show_factory {
        println!("Factory Presets:");
        println!("================");
        for (index, preset) in factory_presets().iter().enumerate() {
            println!("  {index:>2}  {}", preset.name);
        }
        println!();
    }

    if show_user {
        println!("User Presets:");
        println!("=============");
        let user_presets = paths::list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Start one with: sub808 presets export \"Punch 808\" my_808.toml");
        } else {
            for path in user_presets {
                let name = paths::preset_name_from_path(&path).unwrap_or_default();
                match Preset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {:20} - {}", name, desc);
                    }
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %err, "unreadable preset");
                        println!("  {:20} - (error loading)", name);
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let resolved = resolve_preset(name)?;

    println!("{}", resolved.name);
    println!("{}", "=".repeat(resolved.name.len()));
    match resolved.source {
        PresetSource::Factory(index) => println!("Factory preset #{index}"),
        PresetSource::User => {
            if let Some(desc) = &resolved.description {
                println!("{desc}");
            }
        }
    }
    println!();

    for (param, value) in resolved.params.iter() {
        let desc = param.descriptor();
        println!("  {:16} {}", desc.string_id, desc.format_value(value));
    }
    Ok(())
}

fn export_preset(name: &str, path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let resolved = resolve_preset(name)?;
    resolved
        .to_preset()
        .save(&path)
        .with_context(|| format!("failed to export {}", resolved.name))?;

    tracing::info!(preset = %resolved.name, path = %path.display(), "exported preset");
    println!("Exported '{}' to {}", resolved.name, path.display());
    Ok(())
}
