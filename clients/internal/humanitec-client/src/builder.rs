// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Request builders for each API operation
//!
//! Obtained from the matching [`Client`] method; set the parameters, then
//! call `send()`. Required parameters that were never set make `send()`
//! fail with [`Error::InvalidRequest`] before anything goes on the wire.

use reqwest::Method;

use crate::client::{Client, ResponseValue};
use crate::error::Error;
use crate::types;

fn encode_path(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

fn uninitialized<T>(name: &str) -> Result<T, String> {
    Err(format!("{name} was not initialized"))
}

/// Builder for [`Client::get_current_user`]
///
/// `GET /current-user`
#[derive(Debug, Clone)]
pub struct GetCurrentUser<'a> {
    client: &'a Client,
}

impl<'a> GetCurrentUser<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn send(self) -> Result<ResponseValue<types::UserProfileResponse>, Error> {
        let request = self.client.request(Method::GET, "/current-user")?;
        let response = self.client.exec(request).await?;
        ResponseValue::from_response(response).await
    }
}

/// Builder for [`Client::update_current_user`]
///
/// `PATCH /current-user`
#[derive(Debug, Clone)]
pub struct UpdateCurrentUser<'a> {
    client: &'a Client,
    body: types::UserProfileExtendedRequest,
}

impl<'a> UpdateCurrentUser<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            body: types::UserProfileExtendedRequest::default(),
        }
    }

    pub fn body(mut self, value: types::UserProfileExtendedRequest) -> Self {
        self.body = value;
        self
    }

    /// Shorthand for a body that only changes the display name
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.body.name = Some(value.into());
        self
    }

    pub async fn send(self) -> Result<ResponseValue<types::UserProfileResponse>, Error> {
        let request = self
            .client
            .json_request(Method::PATCH, "/current-user", &self.body)?;
        let response = self.client.exec(request).await?;
        ResponseValue::from_response(response).await
    }
}

/// Builder for [`Client::list_organizations`]
///
/// `GET /orgs`
#[derive(Debug, Clone)]
pub struct ListOrganizations<'a> {
    client: &'a Client,
}

impl<'a> ListOrganizations<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn send(self) -> Result<ResponseValue<Vec<types::OrganizationResponse>>, Error> {
        let request = self.client.request(Method::GET, "/orgs")?;
        let response = self.client.exec(request).await?;
        ResponseValue::from_response(response).await
    }
}

/// Builder for [`Client::list_applications`]
///
/// `GET /orgs/{orgId}/apps`
#[derive(Debug, Clone)]
pub struct ListApplications<'a> {
    client: &'a Client,
    org_id: Result<String, String>,
}

impl<'a> ListApplications<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            org_id: uninitialized("org_id"),
        }
    }

    pub fn org_id(mut self, value: impl Into<String>) -> Self {
        self.org_id = Ok(value.into());
        self
    }

    pub async fn send(self) -> Result<ResponseValue<Vec<types::ApplicationResponse>>, Error> {
        let org_id = self.org_id.map_err(Error::InvalidRequest)?;
        let path = format!("/orgs/{}/apps", encode_path(&org_id));
        let request = self.client.request(Method::GET, &path)?;
        let response = self.client.exec(request).await?;
        ResponseValue::from_response(response).await
    }
}

/// Builder for [`Client::get_application`]
///
/// `GET /orgs/{orgId}/apps/{appId}`
#[derive(Debug, Clone)]
pub struct GetApplication<'a> {
    client: &'a Client,
    org_id: Result<String, String>,
    app_id: Result<String, String>,
}

impl<'a> GetApplication<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            org_id: uninitialized("org_id"),
            app_id: uninitialized("app_id"),
        }
    }

    pub fn org_id(mut self, value: impl Into<String>) -> Self {
        self.org_id = Ok(value.into());
        self
    }

    pub fn app_id(mut self, value: impl Into<String>) -> Self {
        self.app_id = Ok(value.into());
        self
    }

    pub async fn send(self) -> Result<ResponseValue<types::ApplicationResponse>, Error> {
        let org_id = self.org_id.map_err(Error::InvalidRequest)?;
        let app_id = self.app_id.map_err(Error::InvalidRequest)?;
        let path = format!(
            "/orgs/{}/apps/{}",
            encode_path(&org_id),
            encode_path(&app_id)
        );
        let request = self.client.request(Method::GET, &path)?;
        let response = self.client.exec(request).await?;
        ResponseValue::from_response(response).await
    }
}

/// Builder for [`Client::create_application`]
///
/// `POST /orgs/{orgId}/apps`
#[derive(Debug, Clone)]
pub struct CreateApplication<'a> {
    client: &'a Client,
    org_id: Result<String, String>,
    body: Result<types::ApplicationCreationRequest, String>,
}

impl<'a> CreateApplication<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            org_id: uninitialized("org_id"),
            body: uninitialized("body"),
        }
    }

    pub fn org_id(mut self, value: impl Into<String>) -> Self {
        self.org_id = Ok(value.into());
        self
    }

    pub fn body(mut self, value: types::ApplicationCreationRequest) -> Self {
        self.body = Ok(value);
        self
    }

    pub async fn send(self) -> Result<ResponseValue<types::ApplicationResponse>, Error> {
        let org_id = self.org_id.map_err(Error::InvalidRequest)?;
        let body = self.body.map_err(Error::InvalidRequest)?;
        let path = format!("/orgs/{}/apps", encode_path(&org_id));
        let request = self.client.json_request(Method::POST, &path, &body)?;
        let response = self.client.exec(request).await?;
        ResponseValue::from_response(response).await
    }
}

/// Builder for [`Client::delete_application`]
///
/// `DELETE /orgs/{orgId}/apps/{appId}`
#[derive(Debug, Clone)]
pub struct DeleteApplication<'a> {
    client: &'a Client,
    org_id: Result<String, String>,
    app_id: Result<String, String>,
}

impl<'a> DeleteApplication<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            org_id: uninitialized("org_id"),
            app_id: uninitialized("app_id"),
        }
    }

    pub fn org_id(mut self, value: impl Into<String>) -> Self {
        self.org_id = Ok(value.into());
        self
    }

    pub fn app_id(mut self, value: impl Into<String>) -> Self {
        self.app_id = Ok(value.into());
        self
    }

    pub async fn send(self) -> Result<ResponseValue<()>, Error> {
        let org_id = self.org_id.map_err(Error::InvalidRequest)?;
        let app_id = self.app_id.map_err(Error::InvalidRequest)?;
        let path = format!(
            "/orgs/{}/apps/{}",
            encode_path(&org_id),
            encode_path(&app_id)
        );
        let request = self.client.request(Method::DELETE, &path)?;
        let response = self.client.exec(request).await?;
        ResponseValue::empty(response).await
    }
}

/// Builder for [`Client::list_environments`]
///
/// `GET /orgs/{orgId}/apps/{appId}/envs`
#[derive(Debug, Clone)]
pub struct ListEnvironments<'a> {
    client: &'a Client,
    org_id: Result<String, String>,
    app_id: Result<String, String>,
}

impl<'a> ListEnvironments<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            org_id: uninitialized("org_id"),
            app_id: uninitialized("app_id"),
        }
    }

    pub fn org_id(mut self, value: impl Into<String>) -> Self {
        self.org_id = Ok(value.into());
        self
    }

    pub fn app_id(mut self, value: impl Into<String>) -> Self {
        self.app_id = Ok(value.into());
        self
    }

    pub async fn send(self) -> Result<ResponseValue<Vec<types::EnvironmentResponse>>, Error> {
        let org_id = self.org_id.map_err(Error::InvalidRequest)?;
        let app_id = self.app_id.map_err(Error::InvalidRequest)?;
        let path = format!(
            "/orgs/{}/apps/{}/envs",
            encode_path(&org_id),
            encode_path(&app_id)
        );
        let request = self.client.request(Method::GET, &path)?;
        let response = self.client.exec(request).await?;
        ResponseValue::from_response(response).await
    }
}
