//! Endpoint records produced from an OpenAPI document.

use std::collections::BTreeMap;

use serde::Serialize;

/// Icon used for tags without a configured or built-in icon.
pub const DEFAULT_TAG_ICON: &str = "api";

/// Tag assigned to operations that declare no tags.
pub const DEFAULT_TAG: &str = "General";

/// A parsed OpenAPI document, grouped for the documentation sidebar.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpec {
    pub info: ApiInfo,
    /// Endpoint groups in order of first tag appearance
    pub groups: Vec<EndpointGroup>,
    /// Icons for the tags declared in the document's top-level `tags` list
    pub tag_icons: BTreeMap<String, String>,
    pub server_url: String,
}

impl ApiSpec {
    /// Find the group for a tag.
    pub fn group(&self, tag: &str) -> Option<&EndpointGroup> {
        self.groups.iter().find(|group| group.tag == tag)
    }

    /// Total number of endpoint records, counting multi-tag operations once per tag.
    pub fn endpoint_count(&self) -> usize {
        self.groups.iter().map(|group| group.endpoints.len()).sum()
    }

    /// Sidebar icon for a tag.
    pub fn icon_for(&self, tag: &str) -> &str {
        self.tag_icons
            .get(tag)
            .map(String::as_str)
            .unwrap_or(DEFAULT_TAG_ICON)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over every endpoint with the tag of its group.
    pub fn endpoints(&self) -> impl Iterator<Item = (&str, &Endpoint)> {
        self.groups.iter().flat_map(|group| {
            group
                .endpoints
                .iter()
                .map(move |endpoint| (group.tag.as_str(), endpoint))
        })
    }

    /// Iterate mutably over every endpoint record.
    pub fn endpoints_mut(&mut self) -> impl Iterator<Item = &mut Endpoint> {
        self.groups
            .iter_mut()
            .flat_map(|group| group.endpoints.iter_mut())
    }
}

/// Document `info` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiInfo {
    pub title: String,
    pub description: String,
    pub version: String,
}

/// Endpoints sharing one tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointGroup {
    pub tag: String,
    pub endpoints: Vec<Endpoint>,
}

/// One HTTP method on one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub path: String,
    /// Upper-cased HTTP method
    pub method: String,
    pub operation_id: String,
    pub summary: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
    /// Responses keyed by status code
    pub responses: BTreeMap<String, Response>,
    /// Security scheme names
    pub security: Vec<String>,
    /// Page URL, filled in by the site builder
    pub url: String,
}

impl Endpoint {
    /// Display title: the summary, or `METHOD path` when there is none.
    pub fn title(&self) -> String {
        if self.summary.is_empty() {
            format!("{} {}", self.method, self.path)
        } else {
            self.summary.clone()
        }
    }
}

/// A request parameter, declared or derived from a JSON request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(rename = "type")]
    pub schema_type: String,
    pub required: bool,
    pub description: String,
    pub example: String,
}

/// Where a parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Cookie,
    Body,
}

impl ParameterLocation {
    /// Parse an OpenAPI `in` value. Unknown values are treated as query.
    pub fn from_openapi(value: &str) -> Self {
        match value {
            "path" => Self::Path,
            "header" => Self::Header,
            "cookie" => Self::Cookie,
            "body" => Self::Body,
            _ => Self::Query,
        }
    }
}

/// A documented response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    /// Pretty-printed JSON example body
    pub example: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(method: &str, path: &str, summary: &str) -> Endpoint {
        Endpoint {
            method: method.to_string(),
            path: path.to_string(),
            summary: summary.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn endpoint_title_falls_back_to_method_and_path() {
        assert_eq!(endpoint("GET", "/users", "List users").title(), "List users");
        assert_eq!(endpoint("GET", "/users", "").title(), "GET /users");
    }

    #[test]
    fn icon_lookup_defaults_to_api() {
        let mut spec = ApiSpec::default();
        spec.tag_icons.insert("Users".to_string(), "group".to_string());

        assert_eq!(spec.icon_for("Users"), "group");
        assert_eq!(spec.icon_for("Billing"), "api");
    }

    #[test]
    fn counts_endpoints_across_groups() {
        let spec = ApiSpec {
            groups: vec![
                EndpointGroup {
                    tag: "A".to_string(),
                    endpoints: vec![endpoint("GET", "/a", ""), endpoint("POST", "/a", "")],
                },
                EndpointGroup {
                    tag: "B".to_string(),
                    endpoints: vec![endpoint("GET", "/b", "")],
                },
            ],
            ..Default::default()
        };

        assert_eq!(spec.endpoint_count(), 3);
        assert!(!spec.is_empty());
        assert_eq!(spec.group("B").map(|g| g.endpoints.len()), Some(1));
        assert!(spec.group("C").is_none());

        let tags: Vec<&str> = spec.endpoints().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec!["A", "A", "B"]);
    }

    #[test]
    fn serializes_parameter_keys() {
        let parameter = Parameter {
            name: "id".to_string(),
            location: ParameterLocation::Path,
            schema_type: "integer".to_string(),
            required: true,
            description: String::new(),
            example: "42".to_string(),
        };

        let json = serde_json::to_value(&parameter).unwrap();

        assert_eq!(json["in"], "path");
        assert_eq!(json["type"], "integer");
    }
}
