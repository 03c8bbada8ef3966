//! HTTP implementation of the identity service port
//!
//! The server build talks to the identity service through `reqwest`, the
//! browser bundle through `gloo-net`. Both hand a `RawResponse` to the shared
//! interpreters in `client`.

use super::client::{
    Credentials, IdentityClient, LoginResponse, RawResponse, RegistrationData,
    parse_current_user_response, parse_login_response, parse_register_response,
};
use super::error::AuthError;
use super::session::{Token, User};
use crate::core::config::AuthConfig;

const LOGIN_PATH: &str = "auth/login";
const REGISTER_PATH: &str = "auth/register";
const CURRENT_USER_PATH: &str = "auth/me";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

/// JSON-over-HTTP identity service client
#[derive(Debug, Clone)]
pub struct HttpIdentityClient {
    config: AuthConfig,
    #[cfg(feature = "ssr")]
    http: reqwest::Client,
}

impl HttpIdentityClient {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            #[cfg(feature = "ssr")]
            http: reqwest::Client::new(),
        }
    }

    #[cfg(feature = "ssr")]
    async fn send(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&Token>,
        body: Option<serde_json::Value>,
    ) -> Result<RawResponse, AuthError> {
        let url = self.config.endpoint(path);
        let mut request = match method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };
        if let Some(token) = bearer {
            request = request.header(reqwest::header::AUTHORIZATION, token.bearer());
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        Ok(RawResponse::new(status, body))
    }

    #[cfg(not(feature = "ssr"))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&Token>,
        body: Option<serde_json::Value>,
    ) -> Result<RawResponse, AuthError> {
        use gloo_net::http::Request;

        let url = self.config.endpoint(path);
        let mut request = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };
        if let Some(token) = bearer {
            request = request.header("Authorization", &token.bearer());
        }

        let response = match body {
            Some(body) => {
                request
                    .json(&body)
                    .map_err(|e| AuthError::Network(e.to_string()))?
                    .send()
                    .await
            }
            None => request.send().await,
        }
        .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        Ok(RawResponse::new(status, body))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, AuthError> {
    serde_json::to_value(value).map_err(|e| AuthError::InvalidRequest(e.to_string()))
}

impl IdentityClient for HttpIdentityClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        let body = to_json(credentials)?;
        let response = self.send(Method::Post, LOGIN_PATH, None, Some(body)).await?;
        parse_login_response(response)
    }

    async fn register(&self, data: &RegistrationData) -> Result<(), AuthError> {
        let body = to_json(data)?;
        let response = self
            .send(Method::Post, REGISTER_PATH, None, Some(body))
            .await?;
        parse_register_response(response)
    }

    async fn fetch_current_user(&self, token: &Token) -> Result<User, AuthError> {
        let response = self
            .send(Method::Get, CURRENT_USER_PATH, Some(token), None)
            .await?;
        parse_current_user_response(response)
    }
}
