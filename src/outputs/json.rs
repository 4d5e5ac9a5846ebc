//! JSON dataset files.
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── bangla_articles_temp.json    # checkpoint, removed after final save
//! ├── english_articles_temp.json   # checkpoint, removed after final save
//! ├── bangla_articles.json
//! ├── english_articles.json
//! └── all_articles.json            # Bangla first, then English
//! ```
//!
//! Files are pretty-printed with two-space indentation. `serde_json` writes
//! non-ASCII characters verbatim, so Bangla text stays readable on disk.

use crate::models::{Article, Language};
use crate::utils::megabytes;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

pub const ALL_ARTICLES_FILE: &str = "all_articles.json";

/// `bangla_articles.json` / `english_articles.json`.
pub fn final_path(dir: &Path, language: Language) -> PathBuf {
    dir.join(format!("{}_articles.json", language.group_name()))
}

/// `bangla_articles_temp.json` / `english_articles_temp.json`.
pub fn checkpoint_path(dir: &Path, language: Language) -> PathBuf {
    dir.join(format!("{}_articles_temp.json", language.group_name()))
}

/// Serialize `articles` as an indented JSON array and write it to `path`.
/// Returns the number of bytes written.
pub async fn write_articles(path: &Path, articles: &[Article]) -> Result<u64, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(articles)?;
    fs::write(path, &json).await?;
    Ok(json.len() as u64)
}

/// Overwrite the checkpoint for `language` with everything collected so far.
#[instrument(level = "debug", skip(articles), fields(count = articles.len()))]
pub async fn write_checkpoint(
    dir: &Path,
    language: Language,
    articles: &[Article],
) -> Result<(), Box<dyn Error>> {
    let path = checkpoint_path(dir, language);
    write_articles(&path, articles).await?;
    debug!(path = %path.display(), "Wrote checkpoint");
    Ok(())
}

/// Write the per-language and combined files, then delete checkpoints.
///
/// # Arguments
///
/// * `dir` - Output directory
/// * `bangla` - Bangla articles, written first in `all_articles.json`
/// * `english` - English articles
///
/// # Errors
///
/// Any write failure is returned; checkpoints are only removed after all
/// three files are on disk.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn write_final(dir: &Path, bangla: &[Article], english: &[Article]) -> Result<(), Box<dyn Error>> {
    for (language, articles) in [(Language::Bn, bangla), (Language::En, english)] {
        let path = final_path(dir, language);
        let bytes = write_articles(&path, articles).await?;
        info!(
            path = %path.display(),
            articles = articles.len(),
            size_mb = %format!("{:.2}", megabytes(bytes)),
            "Saved"
        );
    }

    let all: Vec<Article> = bangla.iter().chain(english).cloned().collect();
    let path = dir.join(ALL_ARTICLES_FILE);
    let bytes = write_articles(&path, &all).await?;
    info!(
        path = %path.display(),
        articles = all.len(),
        size_mb = %format!("{:.2}", megabytes(bytes)),
        "Saved"
    );

    for language in [Language::Bn, Language::En] {
        let temp = checkpoint_path(dir, language);
        if fs::try_exists(&temp).await? {
            fs::remove_file(&temp).await?;
            debug!(path = %temp.display(), "Removed checkpoint");
        }
    }
    Ok(())
}
