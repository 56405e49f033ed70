//! Control listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use std::path::PathBuf;

use clap::Args;
use keyroute_core::ParamScale;
use keyroute_router::{ControlBinding, factory_panel};

use super::common::load_table;

#[derive(Args)]
pub struct ControlsArgs {
    /// Show details for a specific control
    #[arg(value_name = "CONTROL")]
    control: Option<String>,

    /// Binding table to list instead of the user or factory bindings
    #[arg(short, long, value_name = "FILE")]
    bindings: Option<PathBuf>,
}

pub fn run(args: ControlsArgs) -> anyhow::Result<()> {
    let bindings = load_table(args.bindings.as_deref())?.to_bindings()?;
    let panel = factory_panel();

    if let Some(name) = &args.control {
        if let Some((id, binding)) = bindings.iter().find(|(id, _)| id.as_str() == name) {
            println!("{id}");
            println!("{}", "=".repeat(id.as_str().len()));
            println!();
            println!("  Label:      {}", binding.label);
            println!("  Scale:      {}", binding.range.scale.name());
            println!("  Range:      {}", range_text(binding));
            println!("  Post-scale: {}", binding.post_scale);
            println!("  Default:    {} ({})", binding.default, binding.value(binding.default));
            println!();
            if binding.is_display_only() {
                println!("  Display only, writes no parameters.");
            } else {
                println!("  Targets:");
                for target in &binding.targets {
                    if target.multiplier == 1.0 {
                        println!("    {}", target.param);
                    } else {
                        println!("    {} x{}", target.param, target.multiplier);
                    }
                }
            }
            return Ok(());
        }
        if let Some(switch) = panel.switch(name) {
            println!("{name}: switch '{}'", switch.label);
            match switch.target {
                Some(param) => println!("  Writes 1 when on, 0 when off: {param}"),
                None => println!("  Display only."),
            }
            return Ok(());
        }
        if let Some(selector) = panel.selector(name) {
            let choices: Vec<&str> = selector.choices().iter().map(|w| w.name()).collect();
            println!("{name}: selector '{}'", selector.label);
            println!("  Segments: {}", choices.join(", "));
            return Ok(());
        }
        anyhow::bail!("Unknown control: {name}");
    }

    println!("Knobs and Sliders");
    println!("=================");
    println!();
    println!("  {:16}  {:12}  {:8}  {:20}  {}", "Id", "Label", "Scale", "Range", "Targets");
    println!("  {:16}  {:12}  {:8}  {:20}  {}", "--", "-----", "-----", "-----", "-------");
    for (id, binding) in &bindings {
        let targets: Vec<String> = binding.targets.iter().map(|t| t.param.to_string()).collect();
        println!(
            "  {:16}  {:12}  {:8}  {:20}  {}",
            id.as_str(),
            binding.label,
            binding.range.scale.name(),
            range_text(binding),
            if targets.is_empty() {
                "-".to_string()
            } else {
                targets.join(", ")
            }
        );
    }

    println!();
    println!("Switches");
    println!("--------");
    for (id, switch) in panel.switches() {
        println!("  {:16}  {}", id.as_str(), switch.label);
    }

    println!();
    println!("Selectors");
    println!("---------");
    for (id, selector) in panel.selectors() {
        let choices: Vec<&str> = selector.choices().iter().map(|w| w.name()).collect();
        println!("  {:16}  {}", id.as_str(), choices.join(", "));
    }

    println!();
    println!("Use 'keyroute controls <id>' for details.");
    Ok(())
}

fn range_text(binding: &ControlBinding) -> String {
    let range = binding.range;
    let text = match range.scale {
        ParamScale::Stepped => format!("{}..{}", range.min, range.max),
        _ => format!("{:.2}..{:.2}", range.min, range.max),
    };
    if binding.post_scale == 1.0 {
        text
    } else {
        format!("{text} x{}", binding.post_scale)
    }
}
