//! Artifact directory lookup: `classic-docs --stage <STAGE> --print-subdirs`.

use anyhow::{Context, Result};

pub fn cmd_subdirs(stage: &str, json: bool) -> Result<()> {
    let subdirs = classic_docs::classic_docs_subdirs(stage)?;

    if json {
        let out = serde_json::to_string(subdirs).context("Failed to serialize subdirectories")?;
        println!("{}", out);
    } else {
        for dir in subdirs {
            println!("{}", dir);
        }
    }
    Ok(())
}
