use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialItem {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    /// Accepted as free text and never parsed.
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Carried for context only; plays no part in generation.
    pub user_id: i64,
    pub items: Vec<FinancialItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendation: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Financial AI Service is running.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyItems,
    NonPositivePrice { index: usize, name: String, price: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyItems => {
                write!(f, "No financial items provided for recommendation.")
            }
            ValidationError::NonPositivePrice { index, name, price } => write!(
                f,
                "items[{index}] ({name}): price must be greater than 0 (got {price})"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

impl RecommendationRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::EmptyItems);
        }

        for (index, item) in self.items.iter().enumerate() {
            // Written as a negated comparison so NaN is rejected too.
            if !(item.price > 0.0) {
                return Err(ValidationError::NonPositivePrice {
                    index,
                    name: item.name.clone(),
                    price: item.price,
                });
            }
        }

        Ok(())
    }
}
