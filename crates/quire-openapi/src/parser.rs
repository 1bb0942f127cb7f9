//! OpenAPI YAML parser.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use serde_yaml::Value;

use crate::types::{
    ApiInfo, ApiSpec, Endpoint, EndpointGroup, Parameter, ParameterLocation, Response,
    DEFAULT_TAG, DEFAULT_TAG_ICON,
};

/// Server URL used when the document declares no `servers`.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000/api/v1";

/// Path item keys that describe operations.
const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

const JSON_MEDIA_TYPE: &str = "application/json";

/// Built-in sidebar icons (Material Symbols names) for common tags.
const DEFAULT_TAG_ICONS: [(&str, &str); 8] = [
    ("Authentication", "lock"),
    ("User", "person"),
    ("Users", "group"),
    ("Booking", "calendar_month"),
    ("Bookings", "calendar_month"),
    ("Portfolio", "photo_library"),
    ("Admin", "admin_panel_settings"),
    ("General", "api"),
];

/// Errors that can occur when reading an OpenAPI document.
#[derive(Debug, thiserror::Error)]
pub enum OpenApiError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid OpenAPI document: {0}")]
    InvalidDocument(String),
}

/// Anything that can load an [`ApiSpec`] from a path.
pub trait SpecSource: Send + Sync {
    fn parse_file(&self, path: &Path) -> Result<ApiSpec, OpenApiError>;
}

/// Parses OpenAPI 3.x YAML into endpoint groups.
#[derive(Debug, Clone)]
pub struct OpenApiParser {
    tag_icons: BTreeMap<String, String>,
}

impl Default for OpenApiParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenApiParser {
    pub fn new() -> Self {
        Self {
            tag_icons: DEFAULT_TAG_ICONS
                .iter()
                .map(|(tag, icon)| (tag.to_string(), icon.to_string()))
                .collect(),
        }
    }

    /// Override or extend the built-in tag icons.
    pub fn with_tag_icons<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tag_icons
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Parse a document from disk. A missing file yields an empty spec.
    pub fn parse_file(&self, path: &Path) -> Result<ApiSpec, OpenApiError> {
        match std::fs::read_to_string(path) {
            Ok(source) => self.parse_str(&source),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("OpenAPI file not found: {}", path.display());
                Ok(ApiSpec::default())
            }
            Err(e) => Err(OpenApiError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Parse a document from YAML source.
    pub fn parse_str(&self, source: &str) -> Result<ApiSpec, OpenApiError> {
        let root: Value = serde_yaml::from_str(source)?;
        let root = match root {
            Value::Null => Value::Mapping(Default::default()),
            Value::Mapping(_) => root,
            _ => {
                return Err(OpenApiError::InvalidDocument(
                    "document root must be a mapping".to_string(),
                ))
            }
        };

        let document = Document { root: &root };

        Ok(ApiSpec {
            info: document.info(),
            groups: document.endpoint_groups(),
            tag_icons: document.tag_icons(&self.tag_icons),
            server_url: document.server_url(),
        })
    }
}

impl SpecSource for OpenApiParser {
    fn parse_file(&self, path: &Path) -> Result<ApiSpec, OpenApiError> {
        OpenApiParser::parse_file(self, path)
    }
}

/// Read-only view over a parsed document root.
struct Document<'a> {
    root: &'a Value,
}

impl<'a> Document<'a> {
    fn info(&self) -> ApiInfo {
        let info = self.root.get("info");
        let field = |key: &str, default: &str| {
            info.and_then(|info| info.get(key))
                .map(scalar_string)
                .unwrap_or_else(|| default.to_string())
        };

        ApiInfo {
            title: field("title", "API Reference"),
            description: field("description", ""),
            version: field("version", "1.0.0"),
        }
    }

    fn server_url(&self) -> String {
        self.root
            .get("servers")
            .and_then(|servers| servers.get(0))
            .and_then(|server| server.get("url"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_SERVER_URL)
            .to_string()
    }

    fn tag_icons(&self, icons: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let Some(tags) = self.root.get("tags").and_then(Value::as_sequence) else {
            return BTreeMap::new();
        };

        tags.iter()
            .filter_map(|tag| tag.get("name").and_then(Value::as_str))
            .map(|name| {
                let icon = icons
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_TAG_ICON.to_string());
                (name.to_string(), icon)
            })
            .collect()
    }

    fn endpoint_groups(&self) -> Vec<EndpointGroup> {
        let mut groups: Vec<EndpointGroup> = Vec::new();

        let Some(paths) = self.root.get("paths").and_then(Value::as_mapping) else {
            return groups;
        };

        for (path, item) in paths {
            let Some(path) = path.as_str() else {
                continue;
            };
            let Some(item) = self.resolve(item).and_then(Value::as_mapping) else {
                tracing::warn!("Skipping path {}: not a path item", path);
                continue;
            };

            for (method, operation) in item {
                let Some(method) = method.as_str().filter(|m| HTTP_METHODS.contains(m)) else {
                    continue;
                };
                if !operation.is_mapping() {
                    tracing::warn!("Skipping {} {}: not an operation", method, path);
                    continue;
                }

                let endpoint = self.endpoint(path, method, operation);
                for tag in operation_tags(operation) {
                    match groups.iter_mut().find(|group| group.tag == tag) {
                        Some(group) => group.endpoints.push(endpoint.clone()),
                        None => groups.push(EndpointGroup {
                            tag,
                            endpoints: vec![endpoint.clone()],
                        }),
                    }
                }
            }
        }

        groups
    }

    fn endpoint(&self, path: &str, method: &str, operation: &Value) -> Endpoint {
        Endpoint {
            path: path.to_string(),
            method: method.to_uppercase(),
            operation_id: operation
                .get("operationId")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| generate_operation_id(path, method)),
            summary: string_field(operation, "summary"),
            description: string_field(operation, "description"),
            parameters: self.parameters(operation),
            responses: self.responses(operation),
            security: self.security(operation),
            url: String::new(),
        }
    }

    /// Declared parameters followed by JSON request body properties.
    fn parameters(&self, operation: &Value) -> Vec<Parameter> {
        let mut params: Vec<Parameter> = operation
            .get("parameters")
            .and_then(Value::as_sequence)
            .into_iter()
            .flatten()
            .filter_map(|param| self.resolve(param))
            .map(|param| {
                let schema = param.get("schema").and_then(|s| self.resolve(s));
                Parameter {
                    name: string_field(param, "name"),
                    location: ParameterLocation::from_openapi(
                        param.get("in").and_then(Value::as_str).unwrap_or("query"),
                    ),
                    schema_type: schema
                        .and_then(|s| s.get("type"))
                        .and_then(Value::as_str)
                        .unwrap_or("string")
                        .to_string(),
                    required: param
                        .get("required")
                        .and_then(Value::as_bool)
                        .unwrap_or(false),
                    description: string_field(param, "description"),
                    example: param
                        .get("example")
                        .or_else(|| schema.and_then(|s| s.get("example")))
                        .map(scalar_string)
                        .unwrap_or_default(),
                }
            })
            .collect();

        if let Some(body) = operation
            .get("requestBody")
            .and_then(|body| self.resolve(body))
        {
            params.extend(self.body_parameters(body));
        }

        params
    }

    fn body_parameters(&self, body: &Value) -> Vec<Parameter> {
        let Some(content) = body.get("content").and_then(|c| c.get(JSON_MEDIA_TYPE)) else {
            return Vec::new();
        };
        let Some(schema) = content.get("schema").and_then(|s| self.resolve(s)) else {
            return Vec::new();
        };

        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_sequence)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .collect();
        let example = content.get("example");

        let Some(properties) = schema.get("properties").and_then(Value::as_mapping) else {
            return Vec::new();
        };

        properties
            .iter()
            .filter_map(|(name, property)| {
                let name = key_string(name)?;
                let property = self.resolve(property);
                let field = |key: &str| property.and_then(|p| p.get(key));

                Some(Parameter {
                    required: required.contains(&name.as_str()),
                    location: ParameterLocation::Body,
                    schema_type: field("type")
                        .and_then(Value::as_str)
                        .unwrap_or("string")
                        .to_string(),
                    description: field("description")
                        .map(scalar_string)
                        .unwrap_or_default(),
                    example: example
                        .and_then(|e| e.get(name.as_str()))
                        .or_else(|| field("example"))
                        .map(scalar_string)
                        .unwrap_or_default(),
                    name,
                })
            })
            .collect()
    }

    fn responses(&self, operation: &Value) -> BTreeMap<String, Response> {
        let Some(responses) = operation.get("responses").and_then(Value::as_mapping) else {
            return BTreeMap::new();
        };

        responses
            .iter()
            .filter_map(|(code, response)| {
                let code = key_string(code)?;
                let response = self.resolve(response);

                Some((
                    code,
                    Response {
                        description: response
                            .and_then(|r| r.get("description"))
                            .map(scalar_string)
                            .unwrap_or_default(),
                        example: response.and_then(response_example),
                    },
                ))
            })
            .collect()
    }

    /// Scheme names of the operation's security, or the document's when absent.
    fn security(&self, operation: &Value) -> Vec<String> {
        let requirements = operation
            .get("security")
            .or_else(|| self.root.get("security"))
            .and_then(Value::as_sequence);

        requirements
            .into_iter()
            .flatten()
            .filter_map(Value::as_mapping)
            .flat_map(|requirement| requirement.keys())
            .filter_map(key_string)
            .collect()
    }

    /// Follow a `$ref` from the document root.
    ///
    /// Values without a reference resolve to themselves. A reference that
    /// points nowhere resolves to `None`, which callers treat as empty.
    fn resolve<'v>(&self, value: &'v Value) -> Option<&'v Value>
    where
        'a: 'v,
    {
        let Some(reference) = value.get("$ref").and_then(Value::as_str) else {
            return Some(value);
        };

        let mut resolved = self.root;
        for segment in reference.trim_start_matches(['#', '/']).split('/') {
            let segment = segment.replace("~1", "/").replace("~0", "~");
            match resolved.get(segment.as_str()) {
                Some(next) => resolved = next,
                None => {
                    tracing::debug!("Unresolved reference: {}", reference);
                    return None;
                }
            }
        }

        resolved.is_mapping().then_some(resolved)
    }
}

fn operation_tags(operation: &Value) -> Vec<String> {
    let tags: Vec<String> = operation
        .get("tags")
        .and_then(Value::as_sequence)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    if tags.is_empty() {
        vec![DEFAULT_TAG.to_string()]
    } else {
        tags
    }
}

/// `{method}-{path}` with slashes turned into dashes and braces dropped.
fn generate_operation_id(path: &str, method: &str) -> String {
    let slug = path
        .trim_matches('/')
        .replace('/', "-")
        .replace(['{', '}'], "");
    format!("{}-{}", method.to_lowercase(), slug)
}

fn response_example(response: &Value) -> Option<String> {
    let example = response.get("content")?.get(JSON_MEDIA_TYPE)?.get("example")?;

    let empty = match example {
        Value::Null => true,
        Value::Mapping(map) => map.is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        _ => false,
    };
    if empty {
        return None;
    }

    match serde_json::to_string_pretty(example) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::warn!("Response example is not representable as JSON: {}", e);
            None
        }
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value.get(key).map(scalar_string).unwrap_or_default()
}

/// Mapping keys such as status codes may be parsed as numbers.
fn key_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const SPEC: &str = r#"
openapi: 3.0.3
info:
  title: Test API
  version: 1.0.0
servers:
  - url: http://localhost:8000/api/v1
tags:
  - name: Authentication
  - name: User
  - name: Billing
paths:
  /auth/register:
    post:
      tags: [Authentication]
      summary: Register a new user
      operationId: registerUser
      requestBody:
        required: true
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/RegisterRequest'
            example:
              name: Jane Doe
              email: jane@example.com
      responses:
        201:
          description: User registered
          content:
            application/json:
              example:
                token: abc123
                url: https://example.com/users/1
        422:
          $ref: '#/components/responses/ValidationError'
  /auth/login:
    post:
      tags: [Authentication]
      summary: Log in
      operationId: loginUser
      responses:
        '200':
          description: Logged in
  /auth/logout:
    post:
      tags: [Authentication]
      summary: Log out
      operationId: logoutUser
      security:
        - bearerAuth: []
      responses:
        '204':
          description: Logged out
  /users/{id}:
    parameters:
      - name: id
        in: path
        required: true
    get:
      tags: [User]
      summary: Get a user
      parameters:
        - name: id
          in: path
          required: true
          schema:
            type: integer
            example: 42
        - $ref: '#/components/parameters/Include'
      responses:
        '200':
          description: The user
components:
  parameters:
    Include:
      name: include
      in: query
      description: Related resources
      schema:
        type: string
  schemas:
    RegisterRequest:
      type: object
      required: [name, email, password]
      properties:
        name:
          type: string
        email:
          type: string
          example: someone@example.com
        password:
          type: string
        password_confirmation:
          type: string
        device_name:
          $ref: '#/components/schemas/DeviceName'
    DeviceName:
      type: string
      description: Device label
  responses:
    ValidationError:
      description: Validation failed
"#;

    fn parse() -> ApiSpec {
        OpenApiParser::new().parse_str(SPEC).unwrap()
    }

    #[test]
    fn extracts_info_and_server() {
        let spec = parse();

        assert_eq!(spec.info.title, "Test API");
        assert_eq!(spec.info.version, "1.0.0");
        assert_eq!(spec.info.description, "");
        assert_eq!(spec.server_url, "http://localhost:8000/api/v1");
    }

    #[test]
    fn defaults_info_and_server() {
        let spec = OpenApiParser::new().parse_str("paths: {}").unwrap();

        assert_eq!(spec.info.title, "API Reference");
        assert_eq!(spec.info.version, "1.0.0");
        assert_eq!(spec.server_url, DEFAULT_SERVER_URL);
        assert!(spec.is_empty());
    }

    #[test]
    fn groups_endpoints_by_tag_in_order() {
        let spec = parse();

        let tags: Vec<&str> = spec.groups.iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(tags, vec!["Authentication", "User"]);
        assert_eq!(spec.group("Authentication").unwrap().endpoints.len(), 3);
        assert_eq!(spec.group("User").unwrap().endpoints.len(), 1);
        assert_eq!(spec.endpoint_count(), 4);
    }

    #[test]
    fn extracts_endpoint_details() {
        let spec = parse();
        let register = &spec.group("Authentication").unwrap().endpoints[0];

        assert_eq!(register.method, "POST");
        assert_eq!(register.path, "/auth/register");
        assert_eq!(register.operation_id, "registerUser");
        assert_eq!(register.summary, "Register a new user");
        assert_eq!(register.url, "");
    }

    #[test]
    fn extracts_request_body_parameters() {
        let spec = parse();
        let register = &spec.group("Authentication").unwrap().endpoints[0];

        let names: Vec<&str> = register.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["name", "email", "password", "password_confirmation", "device_name"]
        );

        let email = &register.parameters[1];
        assert!(email.required);
        assert_eq!(email.location, ParameterLocation::Body);
        assert_eq!(email.example, "jane@example.com");

        let confirmation = &register.parameters[3];
        assert!(!confirmation.required);
        assert_eq!(confirmation.example, "");

        let device = &register.parameters[4];
        assert_eq!(device.description, "Device label");
    }

    #[test]
    fn extracts_declared_parameters() {
        let spec = parse();
        let user = &spec.group("User").unwrap().endpoints[0];

        assert_eq!(user.parameters.len(), 2);
        assert_eq!(user.parameters[0].location, ParameterLocation::Path);
        assert_eq!(user.parameters[0].schema_type, "integer");
        assert_eq!(user.parameters[0].example, "42");
        assert!(user.parameters[0].required);
        assert_eq!(user.parameters[1].name, "include");
        assert_eq!(user.parameters[1].location, ParameterLocation::Query);
    }

    #[test]
    fn generates_operation_id_when_missing() {
        let spec = parse();
        let user = &spec.group("User").unwrap().endpoints[0];

        assert_eq!(user.operation_id, "get-users-id");
    }

    #[test]
    fn extracts_responses() {
        let spec = parse();
        let register = &spec.group("Authentication").unwrap().endpoints[0];

        let codes: Vec<&str> = register.responses.keys().map(String::as_str).collect();
        assert_eq!(codes, vec!["201", "422"]);

        let created = &register.responses["201"];
        assert_eq!(
            created.example.as_deref(),
            Some("{\n  \"token\": \"abc123\",\n  \"url\": \"https://example.com/users/1\"\n}")
        );
        assert_eq!(register.responses["422"].description, "Validation failed");
        assert_eq!(register.responses["422"].example, None);
    }

    #[test]
    fn extracts_security() {
        let spec = parse();
        let auth = &spec.group("Authentication").unwrap().endpoints;

        assert_eq!(auth[2].security, vec!["bearerAuth".to_string()]);
        assert!(auth[0].security.is_empty());
    }

    #[test]
    fn falls_back_to_document_security() {
        let yaml = r#"
security:
  - apiKey: []
paths:
  /a:
    get:
      responses: {}
  /b:
    get:
      security: []
      responses: {}
"#;

        let spec = OpenApiParser::new().parse_str(yaml).unwrap();
        let general = &spec.group("General").unwrap().endpoints;

        assert_eq!(general[0].security, vec!["apiKey".to_string()]);
        assert!(general[1].security.is_empty());
    }

    #[test]
    fn duplicates_multi_tag_operations() {
        let yaml = r#"
paths:
  /bookings:
    get:
      tags: [Bookings, Admin]
      operationId: listBookings
      responses: {}
"#;

        let spec = OpenApiParser::new().parse_str(yaml).unwrap();

        let bookings = &spec.group("Bookings").unwrap().endpoints[0];
        let admin = &spec.group("Admin").unwrap().endpoints[0];
        assert_eq!(bookings.operation_id, "listBookings");
        assert_eq!(admin.operation_id, "listBookings");
        assert_eq!(spec.endpoint_count(), 2);
    }

    #[test]
    fn ignores_non_operation_keys() {
        let spec = parse();

        assert!(spec
            .endpoints()
            .all(|(_, endpoint)| endpoint.method != "PARAMETERS"));
    }

    #[test]
    fn builds_tag_icons_for_declared_tags() {
        let spec = parse();

        assert_eq!(spec.tag_icons.len(), 3);
        assert_eq!(spec.icon_for("Authentication"), "lock");
        assert_eq!(spec.icon_for("User"), "person");
        assert_eq!(spec.icon_for("Billing"), "api");
    }

    #[test]
    fn tag_icon_overrides_win() {
        let parser = OpenApiParser::new().with_tag_icons([("User", "face"), ("Billing", "payments")]);

        let spec = parser.parse_str(SPEC).unwrap();

        assert_eq!(spec.icon_for("User"), "face");
        assert_eq!(spec.icon_for("Billing"), "payments");
        assert_eq!(spec.icon_for("Authentication"), "lock");
    }

    #[test]
    fn unresolvable_reference_degrades_to_empty() {
        let yaml = r#"
paths:
  /x:
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Missing'
      responses: {}
"#;

        let spec = OpenApiParser::new().parse_str(yaml).unwrap();

        assert!(spec.group("General").unwrap().endpoints[0]
            .parameters
            .is_empty());
    }

    #[test]
    fn resolves_request_body_reference() {
        let yaml = r#"
paths:
  /x:
    post:
      operationId: createX
      requestBody:
        $ref: '#/components/requestBodies/X'
      responses: {}
components:
  requestBodies:
    X:
      content:
        application/json:
          schema:
            properties:
              label:
                type: string
"#;

        let spec = OpenApiParser::new().parse_str(yaml).unwrap();

        let params = &spec.group("General").unwrap().endpoints[0].parameters;
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "label");
    }

    #[test]
    fn skips_malformed_operations() {
        let yaml = r#"
paths:
  /x:
    get: not-an-operation
    post:
      operationId: createX
      responses: {}
"#;

        let spec = OpenApiParser::new().parse_str(yaml).unwrap();

        assert_eq!(spec.endpoint_count(), 1);
    }

    #[test]
    fn rejects_non_mapping_document() {
        let result = OpenApiParser::new().parse_str("- just\n- a list\n");

        assert!(matches!(result, Err(OpenApiError::InvalidDocument(_))));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let result = OpenApiParser::new().parse_str("paths: [unclosed");

        assert!(matches!(result, Err(OpenApiError::Yaml(_))));
    }

    #[test]
    fn missing_file_yields_empty_spec() {
        let dir = tempdir().unwrap();

        let spec = OpenApiParser::new()
            .parse_file(&dir.path().join("openapi.yaml"))
            .unwrap();

        assert_eq!(spec, ApiSpec::default());
    }

    #[test]
    fn parses_file_through_spec_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openapi.yaml");
        std::fs::write(&path, SPEC).unwrap();
        let source: Box<dyn SpecSource> = Box::new(OpenApiParser::new());

        let spec = source.parse_file(&path).unwrap();

        assert_eq!(spec.endpoint_count(), 4);
    }
}
