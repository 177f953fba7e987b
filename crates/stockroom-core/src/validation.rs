//! # Validation Module
//!
//! Input validation and coercion for Stockroom request bodies.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (apps/api)                                    │
//! │  └── Malformed JSON → 400                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Presence checks (name, phone, username, ...)                      │
//! │  └── Numeric coercion: 5, "5", 5.0 → 5   |   "abc", 5.5 → error        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Invoicing pre-validation (stock, references)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::product_fields;
//! use stockroom_core::{NumericInput, ProductInput};
//!
//! let input = ProductInput {
//!     name: Some("Widget".into()),
//!     quantity: Some(NumericInput::Text("10".into())),
//!     price: Some(NumericInput::Float(2.5)),
//! };
//! let fields = product_fields(input).unwrap();
//! assert_eq!(fields.quantity, 10);
//! ```

use crate::error::ValidationError;
use crate::types::{ClientFields, ClientInput, NumericInput, ProductFields, ProductInput};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field and returns it trimmed.
pub fn required_text(field: &str, value: Option<String>) -> ValidationResult<String> {
    let value = value.unwrap_or_default();
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    Ok(value.to_string())
}

/// Validates a product or client name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_name(value: Option<String>) -> ValidationResult<String> {
    let name = required_text("name", value)?;

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(name)
}

/// Validates registration/login credentials.
///
/// Both fields are compared verbatim later on, so they are not trimmed.
pub fn validate_credentials(
    username: Option<String>,
    password: Option<String>,
) -> ValidationResult<(String, String)> {
    let username = username.filter(|u| !u.is_empty());
    let password = password.filter(|p| !p.is_empty());

    match (username, password) {
        (Some(username), Some(password)) => Ok((username, password)),
        (None, _) => Err(ValidationError::required("username")),
        (Some(_), None) => Err(ValidationError::required("password")),
    }
}

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces a numeric input into a whole number.
///
/// ## Rules
/// - JSON integers pass through
/// - Floats and numeric strings are accepted when they have no fractional part
/// - Anything else is an error (never NaN)
pub fn parse_integer(field: &str, input: &NumericInput) -> ValidationResult<i64> {
    let value = match input {
        NumericInput::Integer(n) => return Ok(*n),
        NumericInput::Float(f) => *f,
        NumericInput::Text(text) => {
            let text = text.trim();
            if let Ok(n) = text.parse::<i64>() {
                return Ok(n);
            }
            text.parse::<f64>().map_err(|_| ValidationError::InvalidNumber {
                field: field.to_string(),
                value: text.to_string(),
            })?
        }
    };

    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    if value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
        return Err(ValidationError::NotAnInteger {
            field: field.to_string(),
        });
    }

    Ok(value as i64)
}

/// Coerces a numeric input into a finite decimal number.
pub fn parse_decimal(field: &str, input: &NumericInput) -> ValidationResult<f64> {
    let value = match input {
        NumericInput::Integer(n) => *n as f64,
        NumericInput::Float(f) => *f,
        NumericInput::Text(text) => {
            let text = text.trim();
            text.parse::<f64>().map_err(|_| ValidationError::InvalidNumber {
                field: field.to_string(),
                value: text.to_string(),
            })?
        }
    };

    // "NaN" and "inf" parse as f64 but are not prices
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    Ok(value)
}

/// Coerces a quantity field.
pub fn parse_quantity(input: &NumericInput) -> ValidationResult<i64> {
    parse_integer("quantity", input)
}

/// Coerces a price field.
pub fn parse_price(input: &NumericInput) -> ValidationResult<f64> {
    parse_decimal("price", input)
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a product create/update body.
///
/// ## Rules
/// - `name`, `quantity` and `price` are all required (full replace on update)
/// - `quantity` is a whole number ≥ 0
/// - `price` is a finite number ≥ 0
pub fn product_fields(input: ProductInput) -> ValidationResult<ProductFields> {
    let name = validate_name(input.name)?;

    let quantity = input
        .quantity
        .as_ref()
        .ok_or_else(|| ValidationError::required("quantity"))
        .and_then(parse_quantity)?;

    let price = input
        .price
        .as_ref()
        .ok_or_else(|| ValidationError::required("price"))
        .and_then(parse_price)?;

    if quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(ProductFields {
        name,
        quantity,
        price,
    })
}

/// Validates a client create/update body.
///
/// ## Rules
/// - `name` and `phone` are required
/// - `email` and `address` default to empty strings
pub fn client_fields(input: ClientInput) -> ValidationResult<ClientFields> {
    let name = validate_name(input.name)?;
    let phone = required_text("phone", input.phone)?;

    Ok(ClientFields {
        name,
        phone,
        email: input.email.map(|e| e.trim().to_string()).unwrap_or_default(),
        address: input.address.map(|a| a.trim().to_string()).unwrap_or_default(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
