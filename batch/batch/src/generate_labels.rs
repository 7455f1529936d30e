use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Error};
use inventory::api::InventoryApi;
use inventory::part::Part;
use labels::{render_label, LabelEntry, LabelError, LabelSpec};
use tracing::{info, warn};

#[derive(Debug)]
pub struct GenerateLabelsOptions {
    pub spec: LabelSpec,
    /// Restrict to one storage location, case-insensitively.
    pub location: Option<String>,
    pub font_file: PathBuf,
    pub output: PathBuf,
}

/// A location left out of the document because it holds too many parts.
#[derive(Debug, PartialEq, Eq)]
pub struct SkippedLocation {
    pub name: String,
    pub part_count: usize,
}

/// Renders one label per storage location into a multi-page PDF.
///
/// Returns the locations skipped for exceeding the per-label part limit. A run that renders no
/// label at all fails when the document is written.
pub fn generate_labels(
    api: &dyn InventoryApi,
    options: &GenerateLabelsOptions,
) -> Result<Vec<SkippedLocation>, Error> {
    info!("Loading parts");
    let parts = api.get_parts()?;
    let parts_by_location = group_by_location(&parts);

    let (selected, skipped) = partition_locations(
        parts_by_location,
        options.location.as_deref(),
        options.spec.max_parts_per_label,
    );

    let font = labels::load_font(&options.font_file)
        .with_context(|| format!("Loading label font. path: {}", options.font_file.display()))?;

    let mut pages = Vec::new();

    for (location_name, located_parts) in &selected {
        info!(
            "Processing storage location {}: {} parts",
            location_name,
            located_parts.len()
        );

        let entries = label_entries(located_parts)?;
        match render_label(&options.spec, &font, location_name, &entries) {
            Ok(image) => pages.push(image),
            Err(error @ (LabelError::SlotTooSmall { .. } | LabelError::BarcodeOverflow { .. })) => {
                warn!("Skipping storage location {}: {}", location_name, error);
            }
            Err(error) => return Err(error.into()),
        }
    }

    info!("Writing label document. path: {}", options.output.display());
    labels::document::write_pdf(&options.output, &pages, options.spec.dpi)?;

    Ok(skipped)
}

/// Groups parts by storage-location name. BTreeMap iteration gives the name-sorted processing
/// order; parts without a location are not labelled.
fn group_by_location(parts: &[Part]) -> BTreeMap<String, Vec<&Part>> {
    let mut parts_by_location: BTreeMap<String, Vec<&Part>> = BTreeMap::new();

    for part in parts {
        if let Some(location) = &part.storage_location {
            parts_by_location
                .entry(location.name.clone())
                .or_default()
                .push(part);
        }
    }

    parts_by_location
}

/// Applies the location filter and the per-label part limit. Over-full locations are skipped
/// whole, never truncated.
fn partition_locations<'a>(
    parts_by_location: BTreeMap<String, Vec<&'a Part>>,
    filter: Option<&str>,
    max_parts_per_label: usize,
) -> (Vec<(String, Vec<&'a Part>)>, Vec<SkippedLocation>) {
    let mut selected = Vec::new();
    let mut skipped = Vec::new();

    for (location_name, located_parts) in parts_by_location {
        if let Some(filter) = filter {
            if location_name.to_lowercase() != filter.to_lowercase() {
                continue;
            }
        }

        if located_parts.len() > max_parts_per_label {
            warn!(
                "Skipping storage location {}: {} parts",
                location_name,
                located_parts.len()
            );
            skipped.push(SkippedLocation {
                name: location_name,
                part_count: located_parts.len(),
            });
            continue;
        }

        selected.push((location_name, located_parts));
    }

    (selected, skipped)
}

fn label_entries(parts: &[&Part]) -> Result<Vec<LabelEntry>, Error> {
    parts
        .iter()
        .map(|part| {
            let id = part
                .id
                .numeric_id()
                .with_context(|| format!("Part has no numeric id. part: {}", part.name))?;

            Ok(LabelEntry {
                id,
                caption: format!("{}: {}", part.category.name, part.name),
            })
        })
        .collect()
}
