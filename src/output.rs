//! Rendering of a [`UniverseView`] for the terminal.

use std::str::FromStr;
use wut_core::UniverseView;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("unknown output format {0:?} (expected one of: table, json, yaml)")]
    Unknown(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns, one line per project and collection.
    #[default]
    Table,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(FormatError::Unknown(other.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

pub fn render(view: &UniverseView, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Table => Ok(render_table(view)),
        OutputFormat::Json => Ok(serde_json::to_string(view)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(view)?),
    }
}

const HEADERS: [&str; 3] = ["ProjectName", "CollectionName", "TermName"];

fn render_table(view: &UniverseView) -> String {
    if view.is_empty() {
        return "Empty universe view".to_string();
    }

    let rows: Vec<[String; 3]> = view
        .groups()
        .map(|(project, collection, terms)| {
            [project.to_string(), collection.to_string(), terms.join(", ")]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = table_line(&widths, HEADERS);
    for [project, collection, terms] in &rows {
        out.push('\n');
        out.push_str(&table_line(&widths, [project.as_str(), collection.as_str(), terms.as_str()]));
    }
    out
}

fn table_line(widths: &[usize; 3], cells: [&str; 3]) -> String {
    format!(
        "{:<w0$}  {:<w1$}  {}",
        cells[0],
        cells[1],
        cells[2],
        w0 = widths[0],
        w1 = widths[1],
    )
}
