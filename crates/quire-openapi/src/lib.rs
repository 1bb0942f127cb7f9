//! OpenAPI parser for API reference pages.
//!
//! Reads an OpenAPI 3.x YAML document and produces endpoint records grouped
//! by tag, with resolved `$ref`s, flattened request body parameters, response
//! examples and sidebar tag icons.

pub mod parser;
pub mod types;

pub use parser::{OpenApiError, OpenApiParser, SpecSource, DEFAULT_SERVER_URL};
pub use types::{
    ApiInfo, ApiSpec, Endpoint, EndpointGroup, Parameter, ParameterLocation, Response,
};
