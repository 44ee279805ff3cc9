//! Problem-file serialization.
//!
//! Writes a [`MipModel`] in one of two text formats understood by common
//! MIP solvers:
//!
//! - **MPS** (free format): the column-oriented matrix format, with
//!   `MARKER INTORG/INTEND` blocks for integer columns.
//! - **CIP**: a human-readable constraint-program listing of variables
//!   and linear constraints.
//!
//! Only writers are provided; reading solver files back is out of scope.

mod cip;
mod mps;

use crate::mip::{MipModel, ModelError};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub use cip::write_cip;
pub use mps::{write_mps, OBJECTIVE_ROW};

/// Errors raised while serializing a model.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The model failed validation.
    #[error("invalid model: {0}")]
    Model(#[from] ModelError),

    /// The path extension does not name a supported format.
    #[error("unsupported problem file extension: {}", .0.display())]
    UnknownExtension(PathBuf),

    /// A model name collides with a name reserved by the format.
    #[error("name {0:?} is reserved by the output format")]
    ReservedName(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Supported problem file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemFormat {
    /// Free-format MPS (`.mps`).
    Mps,
    /// Constraint-program listing (`.cip`).
    Cip,
}

impl ProblemFormat {
    /// Picks the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("mps") => Ok(ProblemFormat::Mps),
            Some("cip") => Ok(ProblemFormat::Cip),
            _ => Err(FormatError::UnknownExtension(path.to_path_buf())),
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ProblemFormat::Mps => "mps",
            ProblemFormat::Cip => "cip",
        }
    }
}

/// Validates `model` and writes it to `writer` in `format`.
pub fn write_to<W: Write>(
    model: &MipModel,
    format: ProblemFormat,
    writer: &mut W,
) -> Result<(), FormatError> {
    model.validate()?;
    match format {
        ProblemFormat::Mps => write_mps(model, writer),
        ProblemFormat::Cip => write_cip(model, writer),
    }
}

/// Writes `model` to `path`, choosing the format from the extension.
///
/// Overwrites an existing file. Batch drivers that must not overwrite use
/// [`crate::batch::write_once`] together with [`write_to`].
pub fn write_problem(model: &MipModel, path: impl AsRef<Path>) -> Result<(), FormatError> {
    let path = path.as_ref();
    let format = ProblemFormat::from_path(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    write_to(model, format, &mut writer)?;
    writer.flush()?;
    debug!(model = %model.name, path = %path.display(), "problem written");
    Ok(())
}

/// Formats a finite number the shortest way that parses back exactly.
pub(crate) fn fmt_num(x: f64) -> String {
    if x == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{x}")
}
