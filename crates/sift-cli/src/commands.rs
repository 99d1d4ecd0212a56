//! Command implementations.
//!
//! Each command loads the frame into a [`TableFilters`], applies the filter
//! file through its store and prints JSON to stdout.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use sift_core::{DataFrame, Filter, FilterOperator, SiftConfig};
use sift_engine::{search_options, FacetCount, TableFilters};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Command::View { frame, filter } => view(&config, &frame, filter.as_deref())?,
        Command::Options {
            frame,
            column,
            filter,
            search,
            operator,
            values_only,
        } => {
            let request = OptionsRequest {
                column,
                search,
                operator,
                values_only,
            };
            let output = options(&config, &frame, filter.as_deref(), &request)?;
            serde_json::to_string_pretty(&output)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SiftConfig, CliError> {
    match path {
        Some(path) => Ok(SiftConfig::load(path)?),
        None => Ok(SiftConfig::load_default()?),
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_filter(path: Option<&Path>) -> Result<Filter, CliError> {
    let Some(path) = path else {
        return Ok(Filter::new());
    };
    serde_json::from_str(&read(path)?).map_err(|source| CliError::Filter {
        path: PathBuf::from(path),
        source,
    })
}

fn load_table(
    config: &SiftConfig,
    frame: &Path,
    filter: Option<&Path>,
) -> Result<TableFilters, CliError> {
    let frame = DataFrame::from_json(&read(frame)?)?;
    let table = frame.to_table(&config.display)?;
    tracing::info!(
        "Loaded {} rows across {} fields",
        table.rows.len(),
        table.fields.len()
    );

    let filters = TableFilters::new(table.rows, table.fields);
    filters.filters().set(read_filter(filter)?);
    Ok(filters)
}

// =============================================================================
// view
// =============================================================================

fn view(config: &SiftConfig, frame: &Path, filter: Option<&Path>) -> Result<String, CliError> {
    let table = load_table(config, frame, filter)?;
    let view = table.view();
    tracing::info!("{} of {} rows pass", view.len(), table.rows().len());
    Ok(serde_json::to_string_pretty(&*view)?)
}

// =============================================================================
// options
// =============================================================================

struct OptionsRequest {
    column: String,
    search: Option<String>,
    operator: Option<FilterOperator>,
    values_only: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum OptionsOutput {
    Facets(Vec<FacetCount>),
    Values(Vec<String>),
}

fn options(
    config: &SiftConfig,
    frame: &Path,
    filter: Option<&Path>,
    request: &OptionsRequest,
) -> Result<OptionsOutput, CliError> {
    let table = load_table(config, frame, filter)?;
    if sift_engine::find_field(&table.fields(), &request.column).is_none() {
        return Err(CliError::UnknownColumn(request.column.clone()));
    }

    // Flags win over the search saved with the column's filter
    let (stored_search, stored_operator) = table
        .filters()
        .with_filter_ref(|filter| {
            filter
                .get(&request.column)
                .map(|spec| (spec.search_filter.clone(), spec.operator))
        })
        .unwrap_or_default();
    let search = request.search.clone().or(stored_search).unwrap_or_default();
    let operator = request
        .operator
        .or(stored_operator)
        .unwrap_or(config.filter.default_operator);
    let case_sensitive = config.filter.case_sensitive_search;

    if request.values_only {
        let values = table
            .unique_values(&request.column)
            .into_iter()
            .filter(|value| operator.matches(value, &search, case_sensitive))
            .collect();
        return Ok(OptionsOutput::Values(values));
    }

    let facets = table.facets(&request.column);
    Ok(OptionsOutput::Facets(search_options(
        &facets,
        operator,
        &search,
        case_sensitive,
    )))
}
