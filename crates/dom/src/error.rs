use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),
}
