use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModflowError>;

/// Problems with stress-period input, found before any file is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StressPeriodError {
    #[error("period {period} is outside the {nper} stress periods of the model")]
    PeriodOutOfRange { period: usize, nper: usize },

    #[error("control signal has {found} entries but the model has {expected} stress periods")]
    ControlLength { expected: usize, found: usize },

    #[error("first stress period asks to repeat the previous period, there is nothing to repeat")]
    RepeatAtFirstPeriod,

    #[error("period {period} declares new records but none were supplied")]
    MissingRecords { period: usize },

    #[error("no value given for the first stress period")]
    MissingFirstPeriod,
}

#[derive(Error, Debug)]
pub enum ModflowError {
    #[error("array `{name}` has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        name: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("{package}: cell (layer {layer}, row {row}, column {column}) is outside the grid")]
    CellOutOfBounds {
        package: &'static str,
        layer: usize,
        row: usize,
        column: usize,
    },

    #[error(transparent)]
    StressPeriod(#[from] StressPeriodError),

    #[error("invalid model configuration: {0}")]
    Config(String),

    #[error("not supported: {0}")]
    Unsupported(String),

    #[error("could not launch `{exe}`: {source}")]
    Launch {
        exe: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("MODFLOW did not terminate normally (exit status {status:?})")]
    AbnormalTermination {
        status: Option<i32>,
        tail: Vec<String>,
    },

    #[error("no `{text}` record at {at} in {}", file.display())]
    RecordNotFound {
        file: PathBuf,
        text: String,
        at: String,
    },

    #[error("malformed output file {}: {reason}", file.display())]
    Malformed { file: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Tiff(#[from] tiff::TiffError),

    #[error("invalid configuration file: {0}")]
    ConfigFile(#[from] toml::de::Error),
}
