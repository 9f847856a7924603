//! Site generation driver.
//!
//! Pages are rendered in parallel (rendering only reads the finalized
//! database), then written one at a time in discovery order, flushing each
//! page's diagnostics as it goes.

use crate::config::{Options, DEFAULT_STYLESHEET};
use crate::database::Database;
use crate::error::{FatalError, GenerateError};
use crate::links::Linker;
use crate::model::EntityId;
use crate::render::{render_page, Page, Rendered};
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Page-scoped write failures tolerated before the run is abandoned.
pub const MAX_IO_FAILURES: usize = 8;

const STYLESHEET: &str = include_str!("cppdoc.css");

/// What a run produced.
#[derive(Debug, Default)]
pub struct Report {
    pub pages_written: usize,
    /// Pages that failed, in page order.
    pub failures: Vec<GenerateError>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Render and write every visible page of `db` under the output root.
pub fn generate(db: &Database, options: &Options) -> Result<Report, FatalError> {
    let root = &options.output_root;
    fs::create_dir_all(root).map_err(|source| FatalError::OutputRoot {
        path: root.clone(),
        source,
    })?;
    if options.uses_default_stylesheet() {
        let path = root.join(DEFAULT_STYLESHEET);
        fs::write(&path, STYLESHEET).map_err(|source| FatalError::OutputRoot { path, source })?;
    }

    let linker = Linker::new(db, options);
    let ids: Vec<EntityId> = db
        .iter()
        .filter(|(id, entity)| !entity.hidden() && linker.has_page(*id))
        .map(|(id, _)| id)
        .collect();
    tracing::debug!(pages = ids.len(), "Rendering pages");

    let rendered: Vec<Rendered> = ids
        .par_iter()
        .map(|&id| render_page(linker, options, id))
        .collect();

    let mut report = Report::default();
    let mut io_failures = 0;
    for Rendered {
        id,
        page,
        mut diagnostics,
    } in rendered
    {
        diagnostics.flush();
        let written = page.and_then(|page| match page {
            Some(page) => write_page(root, &page).map(|()| true),
            None => Ok(false),
        });
        match written {
            Ok(true) => {
                report.pages_written += 1;
                tracing::debug!(entity = %db.qualified_name(id), "Wrote page");
            }
            Ok(false) => {}
            Err(err) => {
                tracing::error!("{err}");
                if matches!(err, GenerateError::Io { .. }) {
                    io_failures += 1;
                    if io_failures >= MAX_IO_FAILURES {
                        return Err(FatalError::TooManyIoFailures(io_failures));
                    }
                }
                report.failures.push(err);
            }
        }
    }

    tracing::info!(
        written = report.pages_written,
        failed = report.failures.len(),
        "Generated site in {}",
        root.display()
    );
    Ok(report)
}

fn write_page(root: &Path, page: &Page) -> Result<(), GenerateError> {
    let path = root.join(&page.path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GenerateError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, &page.html).map_err(|source| GenerateError::Io { path, source })
}
