//! Resource embedding.
//!
//! Converts the project's optional `resources/` directory into a single
//! generated Go source file, so the compiled binary needs no external
//! resource files at runtime. Resources are OS and arch independent, so this
//! runs once per bundle call rather than once per environment.

use crate::bundler::error::{Error, ErrorExt, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use std::io;
use std::path::Path;

/// Name of the generated source file, written at the input root.
pub const GENERATED_FILE_NAME: &str = "resources_gen.go";

/// Embeds the resource directory into generated source.
///
/// A missing or non-directory resource path is a silent no-op, not an error.
/// The output is always fully regenerated; entries are sorted by path so the
/// file is deterministic for a given tree.
pub async fn bind(input_path: &Path, resources_path: &Path) -> Result<()> {
    match tokio::fs::metadata(resources_path).await {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            log::debug!(
                "{} is not a directory, skipping resource binding",
                resources_path.display()
            );
            return Ok(());
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!(
                "{} does not exist, skipping resource binding",
                resources_path.display()
            );
            return Ok(());
        }
        Err(e) => return Err(e).fs_context("reading metadata of", resources_path),
    }

    let input = input_path.to_path_buf();
    let root = resources_path.to_path_buf();
    let mut entries = tokio::task::spawn_blocking(move || -> Result<Vec<(String, Vec<u8>)>> {
        let mut entries = Vec::new();
        for entry in walkdir::WalkDir::new(&root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&input)?;
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let contents =
                std::fs::read(entry.path()).fs_context("reading resource", entry.path())?;
            entries.push((name, contents));
        }
        Ok(entries)
    })
    .await
    .map_err(|e| Error::GenericError(format!("resource walk task panicked: {e}")))??;
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let output_path = input_path.join(GENERATED_FILE_NAME);
    log::debug!("Writing {}", output_path.display());
    tokio::fs::write(&output_path, render_source(&entries))
        .await
        .fs_context("writing generated resources to", &output_path)
}

/// Renders the generated Go source embedding the given entries.
fn render_source(entries: &[(String, Vec<u8>)]) -> String {
    let mut src = String::new();
    src.push_str("// Code generated by appshell_bundler. DO NOT EDIT.\n\n");
    src.push_str("package main\n\n");
    src.push_str("import (\n\t\"encoding/base64\"\n\t\"fmt\"\n)\n\n");
    src.push_str(
        "// resourceData maps resource paths relative to the project root to their\n// base64 encoded content.\n",
    );
    src.push_str("var resourceData = map[string]string{\n");
    for (name, contents) in entries {
        src.push_str(&format!("\t{:?}: \"{}\",\n", name, BASE64.encode(contents)));
    }
    src.push_str("}\n\n");
    src.push_str(
        "// Resource returns the decoded content of an embedded resource.\n\
         func Resource(name string) ([]byte, error) {\n\
         \td, ok := resourceData[name]\n\
         \tif !ok {\n\
         \t\treturn nil, fmt.Errorf(\"resource %s does not exist\", name)\n\
         \t}\n\
         \treturn base64.StdEncoding.DecodeString(d)\n\
         }\n",
    );
    src
}
