use std::path::PathBuf;

/// Every failure that aborts a site build.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("image error for {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}:\n{output}")]
    ProcessFailed {
        program: PathBuf,
        status: String,
        output: String,
    },

    #[error("build interrupted")]
    Interrupted,

    #[error("copy failed: {0}")]
    Copy(String),

    #[error("invalid crop for {path}: {reason}")]
    Crop { path: PathBuf, reason: String },

    #[error("background task failed: {0}")]
    Task(String),
}

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}

impl From<tokio::task::JoinError> for BuildError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

impl From<fs_extra::error::Error> for BuildError {
    fn from(err: fs_extra::error::Error) -> Self {
        Self::Copy(err.to_string())
    }
}

pub type BuildResult<T> = Result<T, BuildError>;
