//! # REST API for Field Validation
//!
//! A single endpoint that checks one field value against a named rule, so
//! the form can validate on blur without duplicating the rules client-side.

use axum::response::{IntoResponse, Json};
use serde::Deserialize;
use tracing::info;

use crate::domain::validators;

/// Which validation rule to apply
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Required,
    Name,
    DateOfBirth,
    Age,
    Height,
    Email,
    Phone,
    Select,
    TextLength,
}

fn default_field_name() -> String {
    "This field".to_string()
}

fn default_max_length() -> usize {
    1000
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateFieldRequest {
    pub field: FieldKind,
    #[serde(default)]
    pub value: String,
    /// Label used in error messages
    #[serde(default = "default_field_name")]
    pub field_name: String,
    /// Only consulted by rules that distinguish optional fields
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

/// Validate one field value
pub async fn validate_field(Json(request): Json<ValidateFieldRequest>) -> impl IntoResponse {
    info!("POST /api/validate - field: {:?}", request.field);

    let result = match request.field {
        FieldKind::Required => validators::validate_required(&request.value, &request.field_name),
        FieldKind::Name => validators::validate_name(&request.value, &request.field_name),
        FieldKind::DateOfBirth => validators::validate_date_of_birth(&request.value),
        FieldKind::Age => validators::validate_age(&request.value),
        FieldKind::Height => validators::validate_height(&request.value),
        FieldKind::Email => validators::validate_email(&request.value),
        FieldKind::Phone => validators::validate_phone(&request.value, request.required),
        FieldKind::Select => validators::validate_select(&request.value, &request.field_name),
        FieldKind::TextLength => validators::validate_text_length(
            &request.value,
            request.min_length,
            request.max_length,
            &request.field_name,
        ),
    };

    Json(result)
}
