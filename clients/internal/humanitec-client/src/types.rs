// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Request and response bodies for the Humanitec API subset covered by
//! [`crate::Client`].
//!
//! Field names follow the wire format (snake_case). Response bodies are
//! `#[serde(default)]` throughout: a field the server leaves out takes its
//! zero value (empty string, empty collection, the Unix epoch) rather than
//! failing the call. Request bodies are serialized as given.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile of the user (or service user) that owns the token
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UserProfileResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Organization roles keyed by organization id
    pub roles: HashMap<String, String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

/// Body of `PATCH /current-user`. Omitted fields are left unchanged.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct UserProfileExtendedRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<UserProfileExtendedProperties>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct UserProfileExtendedProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_given: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutorial_completed: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OrganizationResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_expires_at: Option<DateTime<Utc>>,
}

/// Minimal environment description embedded in application payloads
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentBaseResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub env_type: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ApplicationResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub envs: Vec<EnvironmentBaseResponse>,
}

/// Initial environment created together with an application
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EnvironmentBaseRequest {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub env_type: String,
}

/// Body of `POST /orgs/{orgId}/apps`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ApplicationCreationRequest {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvironmentBaseRequest>,
}

impl ApplicationCreationRequest {
    /// Application whose display name equals its id
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            env: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub env_type: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_deploy_id: Option<String>,
}

/// Error body returned by the API on 4xx/5xx responses
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct HumanitecErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn user_profile_tolerates_missing_optional_fields() {
        let user: UserProfileResponse = serde_json::from_str(
            r#"{"id":"u-1","name":"Jo","created_at":"2024-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "u-1");
        assert!(user.email.is_none());
        assert!(user.roles.is_empty());
    }

    #[test]
    fn update_request_omits_unset_fields() {
        let body = UserProfileExtendedRequest {
            name: Some("changed".to_string()),
            properties: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"name":"changed"}"#
        );
    }

    #[test]
    fn application_creation_defaults_name_to_id() {
        let req = ApplicationCreationRequest::new("my-app");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["id"], "my-app");
        assert_eq!(json["name"], "my-app");
        assert!(json.get("env").is_none());
    }

    #[test]
    fn sparse_responses_take_zero_values() {
        let user: UserProfileResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(user, UserProfileResponse::default());
        assert_eq!(user.created_at.timestamp(), 0);

        let app: ApplicationResponse =
            serde_json::from_str(r#"{"id":"my-app","envs":[{"id":"dev"}]}"#).unwrap();
        assert_eq!(app.id, "my-app");
        assert_eq!(app.name, "");
        assert_eq!(app.envs[0].env_type, "");

        let env: EnvironmentResponse = serde_json::from_str(r#"{"type":"development"}"#).unwrap();
        assert_eq!(env.env_type, "development");
        assert!(env.from_deploy_id.is_none());

        let org: OrganizationResponse = serde_json::from_str("{}").unwrap();
        assert!(org.trial_expires_at.is_none());
    }

    #[test]
    fn environment_type_uses_wire_name() {
        let env: EnvironmentBaseResponse =
            serde_json::from_str(r#"{"id":"dev","name":"Dev","type":"development"}"#).unwrap();
        assert_eq!(env.env_type, "development");
    }
}
