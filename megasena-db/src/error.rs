use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("são necessários {expected} números, {found} informados")]
    WrongCount { expected: usize, found: usize },

    #[error("número {value} fora do intervalo (1-{max})")]
    OutOfRange { value: i64, max: u8 },

    #[error("valor não numérico: '{0}'")]
    NotNumeric(String),

    #[error("número repetido no conjunto: {0}")]
    DuplicateWithinSet(u8),
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("conjunto #{position} inválido: {source}", position = .index + 1)]
    InvalidImportEntry {
        index: usize,
        source: ValidationError,
    },

    #[error("formato de arquivo JSON inválido: {0}")]
    MalformedImportFile(String),

    #[error("não há histórico para exportar")]
    EmptyHistory,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
