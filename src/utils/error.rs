use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invoice key is empty")]
    EmptyKeyError,

    #[error("Invoice key is malformed: {reason}")]
    MalformedKeyError { reason: String },

    #[error("Invoice lookup request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("No invoice data found: {reason}")]
    EmptyResultError { reason: String },

    #[error("An invoice lookup is already in progress")]
    LookupInProgressError,

    #[error("Session storage error: {message}")]
    StorageError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unrecognized command '{input}': {reason}")]
    InvalidCommandError { input: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Data,
    Concurrency,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::EmptyKeyError
            | AppError::MalformedKeyError { .. }
            | AppError::InvalidCommandError { .. } => ErrorCategory::Input,
            AppError::NetworkError(_) => ErrorCategory::Network,
            AppError::EmptyResultError { .. } => ErrorCategory::Data,
            AppError::LookupInProgressError => ErrorCategory::Concurrency,
            AppError::StorageError { .. }
            | AppError::IoError(_)
            | AppError::SerializationError(_) => ErrorCategory::Storage,
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Data | ErrorCategory::Concurrency => {
                ErrorSeverity::Low
            }
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的通知文字
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::EmptyKeyError => "Por favor, insira a chave da nota fiscal.".to_string(),
            AppError::MalformedKeyError { .. } => {
                "Chave da nota fiscal inválida. Deve conter 44 dígitos.".to_string()
            }
            AppError::NetworkError(_) => {
                "Erro ao conectar ao servidor. Por favor, tente novamente mais tarde.".to_string()
            }
            AppError::EmptyResultError { .. } => {
                "Nenhum dado encontrado para a chave da nota fiscal fornecida.".to_string()
            }
            AppError::LookupInProgressError => {
                "Uma consulta já está em andamento. Aguarde o resultado.".to_string()
            }
            AppError::StorageError { .. }
            | AppError::IoError(_)
            | AppError::SerializationError(_) => {
                "Não foi possível salvar a lista de produtos nesta sessão.".to_string()
            }
            AppError::InvalidCommandError { input, .. } => {
                format!("Comando não reconhecido: '{}'.", input)
            }
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => format!("Configuração inválida: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::EmptyKeyError | AppError::MalformedKeyError { .. } => {
                "Cole os 44 dígitos da chave, sem espaços ou separadores."
            }
            AppError::NetworkError(_) => {
                "Verifique a conexão e se o proxy da SEFAZ está no ar, depois tente de novo."
            }
            AppError::EmptyResultError { .. } => {
                "Confira se a chave pertence a uma nota fiscal de consumidor já autorizada."
            }
            AppError::LookupInProgressError => "Espere a consulta atual terminar.",
            AppError::StorageError { .. }
            | AppError::IoError(_)
            | AppError::SerializationError(_) => {
                "Verifique as permissões do diretório de sessão."
            }
            AppError::InvalidCommandError { .. } => "Digite 'ajuda' para ver os comandos.",
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => {
                "Revise o arquivo de configuração e os argumentos da linha de comando."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
