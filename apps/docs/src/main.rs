//! Asset Manager OpenAPI document exporter.
//!
//! Prints the document to stdout so deployment tooling can capture it.

#![forbid(unsafe_code)]

mod doc;

use utoipa::OpenApi;

use asset_manager_core::AppError;

use crate::doc::ApiDoc;

fn main() -> Result<(), AppError> {
    let document = ApiDoc::openapi().to_pretty_json().map_err(|error| {
        AppError::Internal(format!("failed to serialize OpenAPI document: {error}"))
    })?;

    println!("{document}");
    Ok(())
}
