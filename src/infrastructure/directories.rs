use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::config::DirectoryConfig;

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
}

pub fn ensure_directories(cfg: &DirectoryConfig) -> Result<ResolvedPaths> {
    let logs_dir = ensure_dir(&cfg.logs_dir)?;

    let marker = logs_dir.join(".write-test");
    fs::write(&marker, b"ok")
        .with_context(|| format!("log directory {} is not writable", logs_dir.display()))?;
    fs::remove_file(&marker)?;
    Ok(ResolvedPaths { logs_dir })
}

fn ensure_dir(path: &str) -> Result<PathBuf> {
    let dir = PathBuf::from(path);
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("failed to create directory {}", path))?;
    }
    Ok(dir.canonicalize().unwrap_or(dir))
}
