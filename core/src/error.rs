use thiserror::Error;

pub type Result<T> = std::result::Result<T, KnnError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KnnError {
    #[error("malformed document {source_ref}: missing {marker} marker")]
    MalformedDocument { source_ref: String, marker: &'static str },

    #[error("document \"{title}\" contains no tokens")]
    EmptyDocument { title: String },

    #[error("duplicate title \"{title}\" at positions {first} and {second}")]
    DuplicateTitle { title: String, first: usize, second: usize },

    #[error("title not found: \"{0}\"")]
    TitleNotFound(String),

    #[error("invalid neighbor count: {0} (must be >= 0)")]
    InvalidNeighborCount(i64),

    #[error("matrix has {rows} rows but {titles} titles were given")]
    ShapeMismatch { rows: usize, titles: usize },

    #[error("row {row} out of range for matrix with {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },
}
