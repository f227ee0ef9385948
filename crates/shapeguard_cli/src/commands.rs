//! Subcommand implementations.

use anyhow::{bail, Context, Result};
use log::info;
use shapeguard_core::{
    ContractDocument, ContractError, ContractKernel, KernelConfig, SeedPolicy, Value,
};
use std::fmt::{self, Write as _};
use std::path::Path;

/// Result of a command that ran to completion.
#[derive(Debug)]
pub enum Outcome {
    Pass(String),
    Violation(ContractError),
}

pub fn ping() -> String {
    format!(
        "shapeguard_core ping={}\nshapeguard_core version={}",
        shapeguard_core::ping(),
        shapeguard_core::core_version()
    )
}

pub fn check(defs: &Path, interface: &str, record: &Path, trust_seeds: bool) -> Result<Outcome> {
    let seed_policy = if trust_seeds {
        SeedPolicy::Trust
    } else {
        SeedPolicy::Validate
    };
    let mut kernel = ContractKernel::new(KernelConfig::default().with_seed_policy(seed_policy));
    let document = read_document(defs)?;
    if let Err(err) = kernel.load_document(&document) {
        return Ok(Outcome::Violation(err));
    }

    let raw = std::fs::read_to_string(record)
        .with_context(|| format!("failed to read record `{}`", record.display()))?;
    let json: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("record `{}` is not valid JSON", record.display()))?;
    let Value::Object(seed) = Value::from_json(json) else {
        bail!("record `{}` must be a JSON object", record.display());
    };

    let outcome = kernel
        .interface(interface)
        .and_then(|constructor| constructor.construct_with(seed));
    match outcome {
        Ok(instance) => {
            info!(
                "event=record_check module=cli status=ok interface={} instance={}",
                interface,
                instance.id()
            );
            Ok(Outcome::Pass("ok".to_string()))
        }
        Err(err) => {
            info!(
                "event=record_check module=cli status=error interface={} reason={}",
                interface,
                err.code()
            );
            Ok(Outcome::Violation(err))
        }
    }
}

pub fn describe(defs: &Path) -> Result<String> {
    let mut kernel = ContractKernel::default();
    let document = read_document(defs)?;
    kernel
        .load_document(&document)
        .context("document does not load")?;
    Ok(render_description(&kernel)?)
}

fn read_document(defs: &Path) -> Result<ContractDocument> {
    ContractDocument::from_path(defs)
        .with_context(|| format!("failed to load definitions `{}`", defs.display()))
}

fn render_description(kernel: &ContractKernel) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for name in kernel.interface_names() {
        writeln!(out, "interface {name}")?;
        if let Some(shape) = kernel.shape_definition(&name) {
            for (field, kind) in shape.iter() {
                match kind {
                    Some(kind) => writeln!(out, "  {field}: {kind}")?,
                    None => writeln!(out, "  {field}: any")?,
                }
            }
        }
    }
    for name in kernel.type_names() {
        if let Some(kind) = kernel.kind_definition(&name) {
            writeln!(out, "type {name} = {kind}")?;
        }
    }
    Ok(out.trim_end().to_string())
}
