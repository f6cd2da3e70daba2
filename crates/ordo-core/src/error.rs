use ordo_corpus::CorpusError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
