// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A sink that reports each event to a remote collector by POSTing JSON to an endpoint.
//!
//! Every request runs on a detached [`tokio`] task, so the dispatcher never waits on the
//! network. The completion order of those tasks is not guaranteed, which is fine: delivery
//! is at most once and ordering between events is best effort.

use std::{collections::BTreeMap,
          sync::atomic::{AtomicBool, Ordering}};

use beacon_analytics_schema::{ErrorEvent, KeyValue, KeyedEvent, ScreenView,
                              TrackingEvent, UserIdentity};
use miette::IntoDiagnostic;
use reqwest::Client;
use serde::Serialize;

use super::{FlatParameterMapper, ParameterMapper, Sink, SinkConfig};
use crate::DEBUG_ANALYTICS_MOD;

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum HttpSinkError {
    #[error("⏳ No tokio runtime on this thread, dropping the '{what}' report")]
    #[diagnostic(
        code(beacon_analytics::http_sink::no_async_runtime),
        help("Call the dispatcher from inside a tokio runtime to use the http sink")
    )]
    NoAsyncRuntime { what: &'static str },
}

/// The JSON body that is POSTed to the endpoint.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum Envelope<'a> {
    #[serde(rename_all = "camelCase")]
    Event {
        event_name: &'a str,
        properties: BTreeMap<String, String>,
    },
    /// Identity and screen keys get their own objects, everything else is a dimension.
    Keys {
        #[serde(skip_serializing_if = "Option::is_none")]
        user: Option<UserIdentity>,
        #[serde(skip_serializing_if = "Option::is_none")]
        screen: Option<ScreenView>,
        dimensions: BTreeMap<&'a str, &'a KeyValue>,
    },
    Error {
        error: &'a ErrorEvent,
    },
}

#[derive(Debug)]
pub struct HttpSink {
    config: SinkConfig,
    endpoint: String,
    client: Client,
    mapper: Box<dyn ParameterMapper>,
    started: AtomicBool,
    enabled: AtomicBool,
}

impl HttpSink {
    /// The [`SinkConfig::key`] is sent as a bearer token, and is required.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, config: SinkConfig) -> Self {
        Self {
            config,
            endpoint: endpoint.into(),
            client: Client::new(),
            mapper: Box::new(FlatParameterMapper),
            started: AtomicBool::new(false),
            enabled: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn with_mapper(mut self, mapper: impl ParameterMapper + 'static) -> Self {
        self.mapper = Box::new(mapper);
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str { &self.endpoint }

    /// Started with a valid key, and not switched off since.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.started.load(Ordering::Acquire) && self.enabled.load(Ordering::Acquire)
    }

    fn event_body(&self, event: &TrackingEvent) -> miette::Result<serde_json::Value> {
        serde_json::to_value(Envelope::Event {
            event_name: event.event_name(),
            properties: self.mapper.map(event),
        })
        .into_diagnostic()
    }

    fn keys_body(&self, keys: &KeyedEvent) -> miette::Result<serde_json::Value> {
        serde_json::to_value(Envelope::Keys {
            user: keys.user_identity(),
            screen: keys.screen_view(),
            dimensions: keys
                .custom_dimensions()
                .map(|(key, value)| (key.as_str(), value))
                .collect(),
        })
        .into_diagnostic()
    }

    /// Detach a task that POSTs `body`. Failures are logged by the task itself.
    fn start_task_to_post(
        &self,
        what: &'static str,
        body: serde_json::Value,
    ) -> miette::Result<()> {
        let debug_mode = self.config.debug_mode;
        if debug_mode {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📨 Report analytics item",
                what = %what,
                endpoint = %self.endpoint,
                body = %body
            );
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return Err(HttpSinkError::NoAsyncRuntime { what }.into());
        };

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let bearer = self.config.key.clone().unwrap_or_default();

        handle.spawn(async move {
            let result =
                http_client::make_post_request(&client, &endpoint, &bearer, &body).await;
            match result {
                Ok(response) if debug_mode => {
                    // % is Display, ? is Debug.
                    tracing::debug!(
                        message = "📬 Analytics item accepted",
                        what = %what,
                        status = %response.status()
                    );
                }
                Ok(_) => {
                    if DEBUG_ANALYTICS_MOD {
                        // % is Display, ? is Debug.
                        tracing::debug!(
                            message = "Successfully reported analytics item.",
                            what = %what,
                            endpoint = %endpoint
                        );
                    }
                }
                Err(error) => {
                    // % is Display, ? is Debug.
                    tracing::error!(
                        message = "Could not report analytics item.",
                        what = %what,
                        error = ?error
                    );
                }
            }
        });

        Ok(())
    }
}

impl Sink for HttpSink {
    fn name(&self) -> &str { "http" }

    fn start(&self) -> miette::Result<()> {
        self.config.check_key(self.name())?;
        self.started.store(true, Ordering::Release);
        Ok(())
    }

    fn track_event(&self, event: &TrackingEvent) -> miette::Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        let body = self.event_body(event)?;
        self.start_task_to_post("event", body)
    }

    fn track_keys(&self, keys: &KeyedEvent) -> miette::Result<()> {
        if !self.is_active() || keys.is_empty() {
            return Ok(());
        }
        let body = self.keys_body(keys)?;
        self.start_task_to_post("keys", body)
    }

    fn track_error(&self, error: &ErrorEvent) -> miette::Result<()> {
        if !self.is_active() || !self.config.exception_tracking_enabled {
            return Ok(());
        }
        let body = serde_json::to_value(Envelope::Error { error }).into_diagnostic()?;
        self.start_task_to_post("error", body)
    }

    fn set_enabled(&self, enabled: bool) -> miette::Result<()> {
        self.enabled.store(enabled, Ordering::Release);
        Ok(())
    }
}

pub mod http_client {
    use reqwest::{Client, Response};

    use crate::DEBUG_ANALYTICS_MOD;

    /// # Errors
    ///
    /// Returns an error if the request could not be sent, or the server responded with a
    /// non success status.
    pub async fn make_post_request(
        client: &Client,
        url: &str,
        bearer_token: &str,
        data: &serde_json::Value,
    ) -> Result<Response, reqwest::Error> {
        let response = client
            .post(url)
            .bearer_auth(bearer_token)
            .json(data)
            .send()
            .await?;
        if response.status().is_success() {
            // Handle successful response.
            if DEBUG_ANALYTICS_MOD {
                // % is Display, ? is Debug.
                tracing::debug!(message = "POST request succeeded.", response = ?response);
            }
            Ok(response)
        } else {
            // Handle error response.
            // % is Display, ? is Debug.
            tracing::error!(message = "POST request failed.", response = ?response);
            response.error_for_status()
        }
    }
}
