//! Derivative and integral requests.
//!
//! The service does all symbolic work; this module only shapes the request
//! and reads the answer back.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ValidationError};
use crate::service::ComputeService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Derivative,
    Integral,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Derivative => "derivative",
            Self::Integral => "integral",
        })
    }
}

/// Body of a `/api/calc` request.
///
/// Integral bounds are either both present (definite integral) or both
/// absent (antiderivative); they are never sent for derivatives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcRequest {
    expression: String,
    operation: Operation,
    order: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    b: Option<f64>,
}

impl CalcRequest {
    /// `order`-th derivative with respect to `x`.
    pub fn derivative(expression: impl Into<String>, order: u32) -> Self {
        Self {
            expression: expression.into(),
            operation: Operation::Derivative,
            order,
            a: None,
            b: None,
        }
    }

    /// Indefinite integral.
    pub fn integral(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            operation: Operation::Integral,
            order: 1,
            a: None,
            b: None,
        }
    }

    /// Integral over `[a, b]` when both bounds are given, indefinite otherwise.
    pub fn integral_between(expression: impl Into<String>, a: Option<f64>, b: Option<f64>) -> Self {
        let request = Self::integral(expression);
        match (a, b) {
            (Some(a), Some(b)) => Self {
                a: Some(a),
                b: Some(b),
                ..request
            },
            _ => request,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.a.zip(self.b)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.expression.trim().is_empty() {
            return Err(ValidationError::EmptyExpression);
        }
        if self.order == 0 {
            return Err(ValidationError::ZeroOrder);
        }
        match self.bounds() {
            Some((a, b)) if !(a.is_finite() && b.is_finite()) => {
                Err(ValidationError::NonFiniteIntegralBounds)
            }
            _ => Ok(()),
        }
    }
}

/// Answer to a [`CalcRequest`]. Definite integrals also carry a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalcResult {
    #[serde(default)]
    pub result_expression: Option<String>,
    #[serde(default)]
    pub definite_value: Option<f64>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Validates `request` and forwards it to the service.
pub fn calculate<S: ComputeService>(
    service: &S,
    request: &CalcRequest,
) -> Result<CalcResult, CalcError> {
    request.validate()?;
    debug!("{} of '{}'", request.operation(), request.expression());
    Ok(service.calculate(request)?)
}
