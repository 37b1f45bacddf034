#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write diagnostic line: {0}")]
    Write(#[from] std::io::Error),
}
