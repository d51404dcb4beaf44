//! confirmation

use super::Context;
use crate::element::Element;
use crate::error::Error;
use crate::error::MissingConfirmationTargetError;
use crate::validation::Validation;

/// Id of the element whose value must match: the `confirmation_target`
/// option, or `{id}_confirmation` by convention.
fn target_id(cx: &Context<'_>) -> String {
    cx.options()
        .string("confirmation_target")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}_confirmation", cx.element.id()))
}

/// Looks up the confirmation target in the document.
pub(super) fn target<'a>(cx: &Context<'a>) -> Result<&'a dyn Element, Error> {
    let target_id = target_id(cx);
    cx.document.element(&target_id).ok_or_else(|| {
        MissingConfirmationTargetError {
            element: cx.element.id().to_string(),
            target: target_id,
        }
        .into()
    })
}

pub(super) fn validate(cx: &Context<'_>) -> Result<Validation, Error> {
    let target = target(cx)?;

    if target.value() == cx.value() {
        Ok(Validation::valid())
    } else {
        Ok(Validation::invalid(cx.message("confirmation")))
    }
}
