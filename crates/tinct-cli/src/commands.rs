//! Subcommand implementations.
//!
//! Every command writes its result to the given writer so it can be tested
//! without capturing stdout.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tinct::StyleManager;

/// Parses a `name=value` override.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

pub fn styles(manager: &StyleManager, out: &mut impl Write) -> Result<()> {
    if manager.styles().is_empty() {
        bail!("no styles found in {}", manager.styles_dir().display());
    }
    for style in manager.styles() {
        writeln!(out, "{}", style)?;
    }
    Ok(())
}

pub fn themes(manager: &mut StyleManager, style: &str, out: &mut impl Write) -> Result<()> {
    manager.set_current_style(style)?;
    let default = manager.default_theme().unwrap_or_default().to_string();
    for theme in manager.themes() {
        if *theme == default {
            writeln!(out, "{} (default)", theme)?;
        } else {
            writeln!(out, "{}", theme)?;
        }
    }
    Ok(())
}

fn select(manager: &mut StyleManager, style: &str, theme: Option<&str>) -> Result<()> {
    manager.set_current_style(style)?;
    match theme {
        Some(theme) => manager.set_current_theme(theme)?,
        None => manager.set_default_theme()?,
    }
    Ok(())
}

pub fn export(
    manager: &mut StyleManager,
    style: &str,
    theme: Option<&str>,
    overrides: &[(String, String)],
    out: &mut impl Write,
) -> Result<()> {
    select(manager, style, theme)?;
    for (name, value) in overrides {
        manager.set_theme_variable_value(name.as_str(), value.as_str());
    }
    manager
        .regenerate()
        .with_context(|| format!("exporting style '{}'", style))?;

    let output = manager.current_style_output_path().unwrap_or_default();
    writeln!(
        out,
        "{} / {} -> {}",
        style,
        manager.current_theme().unwrap_or_default(),
        output.display()
    )?;
    if let Some(variants) = manager.descriptor().and_then(|d| d.resource_variants.as_ref()) {
        for variant in variants.keys() {
            writeln!(out, "  {}/", variant)?;
        }
    }
    if !manager.stylesheet().is_empty() {
        writeln!(out, "  stylesheet: {} bytes", manager.stylesheet().len())?;
    }
    Ok(())
}

pub fn process(
    manager: &mut StyleManager,
    style: &str,
    template: &Path,
    theme: Option<&str>,
    output: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let source = fs::read_to_string(template)
        .with_context(|| format!("reading template {}", template.display()))?;
    select(manager, style, theme)?;
    let text = manager.process_stylesheet_template(&source, output)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}
