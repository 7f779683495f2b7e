//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use sub808_config::param_by_name;
use sub808_core::{ParamDescriptor, ParamScale, SynthParam};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for a single parameter
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if let Some(name) = &args.param {
        let param = param_by_name(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {}", name))?;
        show_param(param.descriptor());
        return Ok(());
    }

    println!("Parameters:");
    println!();
    println!(
        "  {:16}  {:10}  {:10}  {:24}  {}",
        "Key", "Name", "Default", "Range", "Scale"
    );
    println!(
        "  {:16}  {:10}  {:10}  {:24}  {}",
        "---", "----", "-------", "-----", "-----"
    );
    for param in SynthParam::ALL {
        let desc = param.descriptor();
        println!(
            "  {:16}  {:10}  {:10}  {:24}  {}",
            desc.string_id,
            desc.name,
            desc.format_value(desc.default),
            range_text(desc),
            scale_text(desc.scale)
        );
    }
    println!();
    println!("Set values with: sub808 render out.wav --set drive=0.5 --set \"tone=450 Hz\"");
    Ok(())
}

fn show_param(desc: &ParamDescriptor) {
    println!("{} ({})", desc.name, desc.string_id);
    println!("{}", "=".repeat(desc.name.len() + desc.string_id.len() + 3));
    println!();
    println!("  Id:       {}", desc.id.0);
    println!("  Group:    {}", desc.group);
    println!("  Default:  {}", desc.format_value(desc.default));
    println!("  Range:    {}", range_text(desc));
    println!("  Scale:    {}", scale_text(desc.scale));
    println!("  Step:     {}", desc.step);
}

fn range_text(desc: &ParamDescriptor) -> String {
    format!(
        "{} .. {}",
        desc.format_value(desc.min),
        desc.format_value(desc.max)
    )
}

fn scale_text(scale: ParamScale) -> String {
    match scale {
        ParamScale::Linear => "linear".to_string(),
        ParamScale::Logarithmic => "log".to_string(),
        ParamScale::Power(exp) => format!("power {exp}"),
    }
}
