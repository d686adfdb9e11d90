use std::{path::Path, sync::Arc};

use {anyhow::Result, tracing::info};

use {scribe_graphql::build_schema, scribe_store::InMemoryStore};

/// The schema in SDL form. The store is never touched while rendering.
pub fn render_sdl() -> String {
    build_schema(Arc::new(InMemoryStore::new())).sdl()
}

/// Print the SDL, or write it to `output`.
pub fn export(output: Option<&Path>) -> Result<()> {
    let sdl = render_sdl();
    match output {
        Some(path) => {
            std::fs::write(path, &sdl)?;
            info!(path = %path.display(), bytes = sdl.len(), "schema exported");
        },
        None => print!("{sdl}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn writes_sdl_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.graphql");
        export(Some(&path)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("type BlogSchema"));
        assert!(written.contains("type Mutations"));
    }
}
