//! Built-in grade library commands

use std::path::PathBuf;

use anyhow::{Result, bail};
use cinegrade_core::RandomId;
use cinegrade_core::library::{self, Category, LibraryGrade};

use crate::config::ExportConfig;

pub fn run_list(category: Option<Category>, verbose: bool) -> Result<()> {
    let grades: Vec<&LibraryGrade> = match category {
        Some(category) => library::by_category(category).collect(),
        None => library::all().iter().collect(),
    };

    let id_width = grades.iter().map(|g| g.id.len()).max().unwrap_or(0);
    let name_width = grades.iter().map(|g| g.grade.name().chars().count()).max().unwrap_or(0);
    for entry in grades {
        println!(
            "{:<id_width$}  {:<name_width$}  {:<8}  {}",
            entry.id,
            entry.grade.name(),
            entry.category,
            entry.author
        );
        if verbose {
            println!("    {}", entry.grade.description());
            for note in &entry.highlights {
                println!("    - {note}");
            }
        }
    }
    Ok(())
}

/// Grades selected by `id`, where `all` selects the whole library.
pub fn select(id: &str) -> Result<Vec<&'static LibraryGrade>> {
    if id.eq_ignore_ascii_case("all") {
        return Ok(library::all().iter().collect());
    }
    match library::find(id) {
        Some(entry) => Ok(vec![entry]),
        None => bail!("Unknown library grade `{id}` (see `cinegrade library list`)"),
    }
}

pub fn run_export(id: &str, config: &ExportConfig, verbose: bool) -> Result<()> {
    let written = export_grades(id, config)?;
    for path in &written {
        println!("{}", path.display());
    }
    if verbose {
        println!("Done.");
    }
    Ok(())
}

pub fn export_grades(id: &str, config: &ExportConfig) -> Result<Vec<PathBuf>> {
    super::ensure_some_output(config)?;

    let mut ids = RandomId::default();
    let mut written = Vec::new();
    for entry in select(id)? {
        tracing::debug!("exporting library grade `{}`", entry.id);
        written.extend(super::write_grade(&entry.grade, config, &mut ids)?);
    }
    Ok(written)
}
