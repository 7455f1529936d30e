use std::collections::HashMap;
use std::sync::OnceLock;

use anyhow::Error;
use cli::prompt::Confirm;
use inventory::api::InventoryApi;
use itertools::Itertools;
use regex::{Captures, Regex};
use tracing::{info, warn};

use crate::load_parts;

/// Per-category name templates. `{...}` placeholders name part parameters; categories not listed
/// here are never renamed.
const RENAME_TEMPLATES: &[(&str, &str)] = &[
    (
        "Resistors",
        "{Number of resistors} {Resistance} {Tolerance} {Power} {Case - inch} {Mounting}",
    ),
    (
        "Ceramic Caps",
        "{Capacitance} {Tolerance} {Operating voltage} {Dielectric} {Case - inch} {Mounting}",
    ),
    ("Electrolytic Caps", "{Capacitance} {Tolerance} {Operating voltage} {Mounting}"),
    ("Tantalum Caps", "{Capacitance} {Tolerance} {Operating voltage} {Case} {Mounting}"),
    ("Fuses", "{Current rating} {Fuse characteristics} {Rated voltage} {Mounting}"),
];

fn template_for(category: &str) -> Option<&'static str> {
    RENAME_TEMPLATES
        .iter()
        .find(|(template_category, _)| *template_category == category)
        .map(|(_, template)| *template)
}

/// Expands a template against a part's parameters.
///
/// Missing parameters render as empty strings, never an error; collapsing repeated whitespace
/// afterwards removes the gaps they leave behind.
pub fn render_template(template: &str, parameters: &HashMap<String, String>) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let placeholder = PLACEHOLDER.get_or_init(|| Regex::new(r"\{([^{}]+)\}").unwrap());

    let expanded = placeholder.replace_all(template, |captures: &Captures| {
        parameters.get(&captures[1]).cloned().unwrap_or_default()
    });

    expanded.split_whitespace().join(" ")
}

#[derive(Debug, Default)]
pub struct RenameOptions {
    /// Restrict the run to a single part.
    pub id: Option<u64>,
}

/// Proposes a name per part from its category template and asks before writing each one.
pub fn rename_from_parameters(
    api: &dyn InventoryApi,
    confirm: &mut dyn Confirm,
    options: &RenameOptions,
) -> Result<(), Error> {
    let mut parts = load_parts(api, options.id)?;
    let num_parts = parts.len();

    for (index, part) in parts.iter_mut().enumerate() {
        info!("[{:5}/{:5}] Processing {}", index + 1, num_parts, part.name);

        let Some(template) = template_for(&part.category.name) else {
            continue;
        };

        let parameters: HashMap<String, String> = part
            .parameters
            .iter()
            .map(|parameter| (parameter.name.clone(), parameter.string_value.clone()))
            .collect();

        let new_name = render_template(template, &parameters);

        if new_name.is_empty() {
            info!("Renaming would result in an empty name, skipping");
            continue;
        }

        if new_name == part.name {
            info!("Name unchanged, skipping");
            continue;
        }

        if !confirm.confirm(&format!("Rename {} to {}?", part.name, new_name))? {
            continue;
        }

        info!("Updating part");
        part.name = new_name;
        if let Err(error) = api.update_part(part) {
            warn!("Failed to update part. part: {}, cause: {}", part.name, error);
        }
    }

    Ok(())
}
