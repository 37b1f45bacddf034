use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Fixture '{name}' has no {}", path.display())]
    MissingFile { name: String, path: PathBuf },
}

impl FixtureError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FixtureError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        FixtureError::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn missing_file(name: &str, path: impl Into<PathBuf>) -> Self {
        FixtureError::MissingFile {
            name: name.to_string(),
            path: path.into(),
        }
    }
}
