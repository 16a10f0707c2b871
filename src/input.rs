use crate::error::AppError;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Where the already-resolved match log comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    Stdin,
    File(PathBuf),
}

impl LogSource {
    /// `-` and a missing path both mean stdin.
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(p) if p.as_os_str() != "-" => LogSource::File(p.to_path_buf()),
            _ => LogSource::Stdin,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            LogSource::Stdin => "<stdin>".to_string(),
            LogSource::File(path) => path.display().to_string(),
        }
    }
}

pub fn read_log(source: &LogSource) -> Result<String, AppError> {
    let result = match source {
        LogSource::Stdin => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer).map(|_| buffer)
        }
        LogSource::File(path) => fs::read(path),
    };

    result
        .map(|bytes| decode_log(&bytes))
        .map_err(|e| AppError::UnreadableInput {
            source_name: source.describe(),
            reason: e.to_string(),
        })
}

/// Invalid UTF-8 sequences become U+FFFD instead of failing the whole read.
pub fn decode_log(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
