use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid content rect: left={left}, top={top}, right={right}, bottom={bottom}")]
    InvalidContentRect {
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("entries must be sorted by x: entry {index} precedes its predecessor")]
    UnsortedEntries { index: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("data set index {index} out of range for {len} data sets")]
    DataSetIndexOutOfRange { index: usize, len: usize },

    #[error("serialization failed: {0}")]
    Serialization(String),
}
