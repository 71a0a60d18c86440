//! API product definitions as served by the management API.

use serde::{Deserialize, Serialize};

/// Attribute naming the mesh services an API product authorizes.
pub const SERVICES_ATTRIBUTE: &str = "istio-services";

/// Name/value pair attached to an API product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An API product: target services, valid resource paths and quota settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiProduct {
    /// Unique product name.
    pub name: String,

    pub display_name: String,

    pub description: String,

    /// "auto" or "manual".
    pub approval_type: String,

    /// Resource paths callers may invoke (exact match).
    pub api_resources: Vec<String>,

    pub attributes: Vec<Attribute>,

    pub environments: Vec<String>,

    pub proxies: Vec<String>,

    pub scopes: Vec<String>,

    /// Quota limit, as a decimal string.
    #[serde(rename = "quota")]
    pub quota_limit: String,

    pub quota_interval: String,

    pub quota_time_unit: String,

    pub created_at: i64,

    pub created_by: String,

    pub last_modified_at: i64,

    pub last_modified_by: String,
}

impl ApiProduct {
    /// Create a product with only a name, for building catalogs by hand.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Add a resource path.
    pub fn with_resource(mut self, path: impl Into<String>) -> Self {
        self.api_resources.push(path.into());
        self
    }

    /// Target services listed by every `istio-services` attribute, in attribute order.
    ///
    /// Values are split on `,` without trimming, so duplicates and empty entries are kept.
    pub fn target_services(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|attr| attr.name == SERVICES_ATTRIBUTE)
            .flat_map(|attr| attr.value.split(','))
    }
}

/// Response body of `GET {base}/products`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiProductsResponse {
    #[serde(rename = "apiProduct", default)]
    pub api_product: Vec<ApiProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_products_response() {
        let body = r#"{
            "apiProduct": [{
                "name": "gold",
                "displayName": "Gold",
                "approvalType": "auto",
                "apiResources": ["/v1/foo", "/v1/bar"],
                "attributes": [
                    {"name": "access", "value": "public"},
                    {"name": "istio-services", "value": "svcA,svcB"}
                ],
                "environments": ["test", "prod"],
                "quota": "100",
                "quotaInterval": "1",
                "quotaTimeUnit": "minute",
                "scopes": ["read"],
                "createdAt": 1521055372000,
                "lastModifiedBy": "admin@example.com"
            }]
        }"#;

        let response: ApiProductsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.api_product.len(), 1);

        let product = &response.api_product[0];
        assert_eq!(product.name, "gold");
        assert_eq!(product.display_name, "Gold");
        assert_eq!(product.api_resources, vec!["/v1/foo", "/v1/bar"]);
        assert_eq!(product.quota_limit, "100");
        assert_eq!(product.quota_time_unit, "minute");
        assert_eq!(product.created_at, 1521055372000);
        assert!(product.proxies.is_empty());
    }

    #[test]
    fn test_empty_response() {
        let response: ApiProductsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.api_product.is_empty());
    }

    #[test]
    fn test_target_services() {
        let product = ApiProduct::new("gold")
            .with_attribute("istio-services", "svcA,svcB")
            .with_attribute("other", "svcC")
            .with_attribute("istio-services", "svcA");

        let targets: Vec<&str> = product.target_services().collect();
        assert_eq!(targets, vec!["svcA", "svcB", "svcA"]);
    }

    #[test]
    fn test_target_services_not_trimmed() {
        let product = ApiProduct::new("gold").with_attribute("istio-services", "svcA, svcB");
        let targets: Vec<&str> = product.target_services().collect();
        assert_eq!(targets, vec!["svcA", " svcB"]);
    }
}
