// src/components/contact_form.rs
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo_net::http::{Method, RequestBuilder, Response};
use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, FormData, HtmlFormElement, UrlSearchParams};

use crate::site_config::ContactConfig;
use crate::utils::by_id;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Delivered,
    /// The endpoint answered with a non-success status.
    Rejected { status: u16, detail: Option<String> },
    /// The request never got a response.
    NetworkError(String),
}

impl SubmitOutcome {
    pub fn message<'a>(&self, config: &'a ContactConfig) -> &'a str {
        match self {
            SubmitOutcome::Delivered => &config.success_message,
            SubmitOutcome::Rejected { .. } => &config.failure_message,
            SubmitOutcome::NetworkError(_) => &config.network_error_message,
        }
    }
}

/// Error body returned by form endpoints such as Formspree.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<FieldError>,
}

#[derive(Debug, Deserialize)]
struct FieldError {
    message: String,
}

fn describe_errors(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    if parsed.errors.is_empty() {
        return None;
    }
    let messages: Vec<String> = parsed.errors.into_iter().map(|e| e.message).collect();
    Some(messages.join("; "))
}

fn with_query(action: &str, query: &str) -> String {
    if query.is_empty() {
        action.to_string()
    } else if action.contains('?') {
        format!("{}&{}", action, query)
    } else {
        format!("{}?{}", action, query)
    }
}

async fn send(form: &HtmlFormElement) -> Result<Response, String> {
    let data = FormData::new_with_form(form).map_err(|e| format!("{:?}", e))?;
    let action = form.action();

    let built = if form.method().eq_ignore_ascii_case("get") {
        let params = UrlSearchParams::new_with_str_sequence_sequence(&data)
            .map_err(|e| format!("{:?}", e))?;
        let query = String::from(params.to_string());
        RequestBuilder::new(&with_query(&action, &query))
            .method(Method::GET)
            .header("Accept", "application/json")
            .build()
    } else {
        RequestBuilder::new(&action)
            .method(Method::POST)
            .header("Accept", "application/json")
            .body(data)
    };
    let request = built.map_err(|e| format!("Failed to build request: {:?}", e))?;

    request
        .send()
        .await
        .map_err(|e| format!("Failed to send form: {:?}", e))
}

async fn submit(form: &HtmlFormElement) -> SubmitOutcome {
    let response = match send(form).await {
        Ok(response) => response,
        Err(e) => return SubmitOutcome::NetworkError(e),
    };
    if response.ok() {
        return SubmitOutcome::Delivered;
    }
    let detail = response
        .text()
        .await
        .ok()
        .and_then(|body| describe_errors(&body));
    SubmitOutcome::Rejected {
        status: response.status(),
        detail,
    }
}

/// Sends the contact form in the background and reports the result inline.
pub fn mount(config: &ContactConfig) {
    let (Some(form), Some(status)) = (
        by_id::<HtmlFormElement>("contact-form"),
        by_id::<Element>("form-status"),
    ) else {
        log::warn!("Contact form disabled: missing #contact-form or #form-status");
        return;
    };

    let config = Rc::new(config.clone());
    let target = form.clone();
    EventListener::new_with_options(
        &target,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            let form = form.clone();
            let status = status.clone();
            let config = config.clone();
            spawn_local(async move {
                let outcome = submit(&form).await;
                match &outcome {
                    SubmitOutcome::Delivered => {
                        log::info!("Contact form delivered");
                        form.reset();
                    }
                    SubmitOutcome::Rejected { status: code, detail } => {
                        log::warn!(
                            "Contact form rejected with status {}: {}",
                            code,
                            detail.as_deref().unwrap_or("no details")
                        );
                    }
                    SubmitOutcome::NetworkError(e) => {
                        log::warn!("Contact form network error: {}", e);
                    }
                }
                status.set_text_content(Some(outcome.message(&config)));
            });
        },
    )
    .forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_outcome_has_its_own_message() {
        let config = ContactConfig::default();
        let delivered = SubmitOutcome::Delivered.message(&config);
        let rejected = SubmitOutcome::Rejected {
            status: 422,
            detail: None,
        }
        .message(&config);
        let offline = SubmitOutcome::NetworkError("offline".to_string()).message(&config);

        assert_eq!(delivered, config.success_message);
        assert_eq!(rejected, config.failure_message);
        assert_eq!(offline, config.network_error_message);
        assert_ne!(delivered, rejected);
        assert_ne!(rejected, offline);
    }

    #[test]
    fn test_describe_errors() {
        let body = r#"{"errors":[{"field":"email","message":"should be an email"},{"message":"form disabled"}]}"#;
        assert_eq!(
            describe_errors(body).as_deref(),
            Some("should be an email; form disabled")
        );
        assert_eq!(describe_errors(r#"{"ok":false}"#), None);
        assert_eq!(describe_errors("<html>502</html>"), None);
    }

    #[test]
    fn test_with_query() {
        assert_eq!(with_query("/contact", ""), "/contact");
        assert_eq!(with_query("/contact", "name=a"), "/contact?name=a");
        assert_eq!(with_query("/contact?src=web", "name=a"), "/contact?src=web&name=a");
    }
}
