//! presence, length, inclusion, exclusion, acceptance

use super::Context;
use crate::validation::Validation;

const DEFAULT_ACCEPT: [&str; 2] = ["1", "true"];

pub(super) fn presence(cx: &Context<'_>) -> Validation {
    if cx.is_blank() {
        Validation::invalid(cx.message("blank"))
    } else {
        Validation::valid()
    }
}

pub(super) fn length(cx: &Context<'_>) -> Validation {
    let options = cx.options();
    let length = cx.value().chars().count();
    let mut messages = Vec::new();

    if let Some(is) = options.count("is") {
        if length != is {
            messages.push(cx.message_count("wrong_length", is));
        }
    }
    if let Some(minimum) = options.count("minimum") {
        if length < minimum {
            messages.push(cx.message_count("too_short", minimum));
        }
    }
    if let Some(maximum) = options.count("maximum") {
        if length > maximum {
            messages.push(cx.message_count("too_long", maximum));
        }
    }

    Validation::closed(messages)
}

fn is_member(cx: &Context<'_>) -> bool {
    cx.options()
        .strings("in")
        .unwrap_or_default()
        .iter()
        .any(|item| item == cx.value())
}

pub(super) fn exclusion(cx: &Context<'_>) -> Validation {
    if is_member(cx) {
        Validation::invalid(cx.message("exclusion"))
    } else {
        Validation::valid()
    }
}

pub(super) fn inclusion(cx: &Context<'_>) -> Validation {
    if is_member(cx) {
        Validation::valid()
    } else {
        Validation::invalid(cx.message("inclusion"))
    }
}

pub(super) fn acceptance(cx: &Context<'_>) -> Validation {
    let accepted = match cx.element.checked() {
        Some(checked) => checked,
        None => match cx.options().strings("accept") {
            Some(values) => values.iter().any(|v| v == cx.value()),
            None => DEFAULT_ACCEPT.contains(&cx.value()),
        },
    };

    if accepted {
        Validation::valid()
    } else {
        Validation::invalid(cx.message("accepted"))
    }
}
