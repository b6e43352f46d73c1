//! `locus find`: list collected files

use locus_core::{Result, find_all, prettify_path};
use std::path::PathBuf;

/// How collected files are found and displayed
#[derive(Debug, Clone)]
pub struct FindOptions {
    pub pattern: String,
    /// Shorten paths for display
    pub pretty: bool,
    /// Prefix stripped by `pretty`; the current directory when `None`
    pub leading: Option<String>,
}

/// Display lines for every file matching `options` below `paths`
pub fn find_files(paths: &[PathBuf], options: &FindOptions) -> Result<Vec<String>> {
    let files = find_all(paths, &options.pattern)?;
    log::debug!("find matched {} file(s)", files.len());

    files
        .iter()
        .map(|file| {
            let display = file.to_string_lossy();
            if options.pretty {
                prettify_path(&display, options.leading.as_deref())
            } else {
                Ok(display.into_owned())
            }
        })
        .collect()
}
