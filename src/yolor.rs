//! Yolor label writer.
//!
//! A yolor label file holds one line per annotated object: the five rotated
//! box fields followed by the integer class index, joined by single spaces.
//! Geometry tokens are carried as text, exactly as they appeared in the
//! source annotation.

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;

pub const LABEL_EXTENSION: &str = "txt";

/// One converted object: five verbatim geometry tokens plus a class index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelRecord {
    pub cx: String,
    pub cy: String,
    pub w: String,
    pub h: String,
    pub angle: String,
    pub class_index: usize,
}

impl Display for LabelRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.cx, self.cy, self.w, self.h, self.angle, self.class_index
        )
    }
}

/// Write the label file for one source annotation file.
///
/// The output file lives directly under `out_dir` and reuses the source
/// file name with its extension replaced by `.txt`; directory structure
/// under the source root is flattened away. An empty record list still
/// produces the file, so every discovered annotation file has a label file.
pub fn write_labels(
    out_dir: &Path,
    source: &Path,
    records: &[LabelRecord],
) -> Result<PathBuf, ConvertError> {
    let file_name = source.file_name().ok_or_else(|| ConvertError::LabelWrite {
        path: source.to_path_buf(),
        message: "source path has no file name".to_string(),
    })?;

    let label_path = out_dir.join(Path::new(file_name).with_extension(LABEL_EXTENSION));
    let mut label_file = fs::File::create(&label_path).map_err(ConvertError::Io)?;

    for record in records {
        writeln!(label_file, "{record}").map_err(ConvertError::Io)?;
    }

    Ok(label_path)
}
