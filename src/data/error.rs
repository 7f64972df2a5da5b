use std::path::PathBuf;

use thiserror::Error;

/// Failures while locating or reading a channel's files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The channel id has no configured directory.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),
    /// The channel directory holds no file with the requested suffix.
    #[error("no *{suffix} files in {}", dir.display())]
    NoFiles { dir: PathBuf, suffix: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_error_keeps_path_and_source() {
        let err = LoadError::Io {
            path: PathBuf::from("/data/ch1"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "cannot read /data/ch1: gone");
        assert!(err.source().is_some());
    }

    #[test]
    fn messages() {
        assert_eq!(LoadError::UnknownChannel("7".into()).to_string(), "unknown channel: 7");
        let err = LoadError::NoFiles {
            dir: PathBuf::from("ch2"),
            suffix: "#tem.txt".into(),
        };
        assert_eq!(err.to_string(), "no *#tem.txt files in ch2");
        assert!(err.source().is_none());
    }
}
