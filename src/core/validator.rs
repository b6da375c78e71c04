use crate::domain::model::InvoiceKey;
use crate::utils::error::{AppError, Result};

pub const INVOICE_KEY_LENGTH: usize = 44;

pub struct KeyValidator;

impl KeyValidator {
    /// 驗證發票金鑰：去除前後空白後必須剛好是 44 個十進位數字
    pub fn validate(input: &str) -> Result<InvoiceKey> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AppError::EmptyKeyError);
        }

        if let Some((position, ch)) = trimmed.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(AppError::MalformedKeyError {
                reason: format!("non-digit character {:?} at position {}", ch, position + 1),
            });
        }

        if trimmed.len() != INVOICE_KEY_LENGTH {
            return Err(AppError::MalformedKeyError {
                reason: format!(
                    "expected {} digits, got {}",
                    INVOICE_KEY_LENGTH,
                    trimmed.len()
                ),
            });
        }

        Ok(InvoiceKey::from_validated(trimmed.to_string()))
    }
}
