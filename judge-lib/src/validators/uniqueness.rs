//! uniqueness

use log::debug;
use log::warn;
use url::form_urlencoded;

use super::Context;
use crate::error::ValidationError;
use crate::validation::Validation;

/// Splits a field name like `user[email]` into `("User", "email")`.
///
/// The model is camelized from the first segment; the attribute is the last
/// bracketed segment. A name without brackets yields no model.
fn model_and_attribute(name: &str) -> (String, String) {
    let Some(open) = name.find('[') else {
        return (String::new(), name.to_string());
    };

    let model = camelize(&name[..open]);
    let attribute = name
        .rsplit('[')
        .next()
        .unwrap_or_default()
        .trim_end_matches(']')
        .to_string();

    (model, attribute)
}

fn camelize(s: &str) -> String {
    s.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// URL of the server-side uniqueness check for the current element.
pub(super) fn url(cx: &Context<'_>) -> String {
    let (model, attribute) = model_and_attribute(cx.element.name());
    let options = cx.options();

    let klass = options.string("klass").unwrap_or(model.as_str());

    let mut query = form_urlencoded::Serializer::new(String::new());
    // `klass` is sent only when a model is known.
    if !klass.is_empty() {
        query.append_pair("klass", klass);
    }
    query
        .append_pair("attribute", options.string("attribute").unwrap_or(attribute.as_str()))
        .append_pair("value", cx.value())
        .append_pair("kind", "uniqueness");
    if let Some(original) = cx.element.original_value() {
        query.append_pair("original_value", original);
    }

    format!("{}?{}", cx.config.endpoint("validate"), query.finish())
}

pub(super) fn validate(cx: &Context<'_>) -> Validation {
    let validation = Validation::new();
    let element = cx.element.id().to_string();

    let request_error = cx
        .messages()
        .get("request_error")
        .unwrap_or(cx.config.request_error.as_str())
        .to_string();
    let failure = move |status: u16| request_error.replace("%{status}", &status.to_string());
    let failure_on_error = failure.clone();

    let on_success = {
        let validation = validation.clone();
        let element = element.clone();
        move |status: u16, _: &[(String, String)], body: &str| {
            let result = match validation.close(body) {
                Err(ValidationError::MalformedMessages(e)) => {
                    warn!("Unreadable uniqueness response for {}: {}", element, e);
                    validation.close(vec![failure(status)])
                }
                other => other,
            };
            if let Err(e) = result {
                warn!("Could not close uniqueness check for {}: {}", element, e);
            }
        }
    };

    let on_error = {
        let validation = validation.clone();
        move |status: u16, _: &[(String, String)], _: &str| {
            if let Err(e) = validation.close(vec![failure_on_error(status)]) {
                warn!("Could not close uniqueness check for {}: {}", element, e);
            }
        }
    };

    let url = url(cx);
    debug!("Checking uniqueness of {} via {}", cx.element.id(), url);
    cx.network.get(url, on_success, on_error);

    validation
}
