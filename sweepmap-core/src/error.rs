use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Unrecoverable error: {0}")]
    UnrecoverableError(&'static str),
}
