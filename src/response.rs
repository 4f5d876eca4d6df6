//! [`Response`] from the text-generation endpoint and the
//! [`GenerationResult`] kept by a [`Session`].
//!
//! [`Session`]: crate::Session

use std::borrow::Cow;

use derive_more::derive::IsVariant;
use serde::{Deserialize, Serialize};

use crate::{
    prompt::{Form, Length, Style},
    GenerationRequest,
};

/// Generated text returned by the API, resolved once at the boundary.
///
/// Providers do not all agree on a response shape, so a body is either
/// [`StructuredText`] (a JSON object carrying the text in a known field) or
/// [`RawText`] (anything else, coerced to a string).
///
/// [`StructuredText`]: Response::StructuredText
/// [`RawText`]: Response::RawText
#[derive(Debug, Clone, PartialEq, Eq, IsVariant, derive_more::Display)]
pub enum Response {
    /// Text extracted from a `text` or `generated_text` field.
    #[display("{_0}")]
    StructuredText(String),
    /// The whole response as text.
    #[display("{_0}")]
    RawText(String),
}

impl Response {
    /// Fields the generated text may be found in, in order of preference.
    pub const TEXT_FIELDS: [&'static str; 2] = ["text", "generated_text"];

    /// Resolve a response body.
    ///
    /// - An object with a `text` field is [`StructuredText`] with that value
    ///   verbatim. So is one with `generated_text`, or an array whose first
    ///   element is such an object. A value that is not a string is kept as
    ///   its JSON text.
    /// - A JSON string is [`RawText`] with the decoded string.
    /// - Anything else is [`RawText`] with the body as-is.
    ///
    /// [`StructuredText`]: Response::StructuredText
    /// [`RawText`]: Response::RawText
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => Self::from_value(value).unwrap_or_else(|| {
                Self::RawText(body.to_string())
            }),
            Err(_) => Self::RawText(body.to_string()),
        }
    }

    /// Resolve a parsed JSON value. Returns `None` if the value is neither
    /// structured nor a string, in which case the caller should fall back to
    /// the raw body.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Object(mut map) => Self::TEXT_FIELDS
                .iter()
                .find_map(|field| match map.remove(*field)? {
                    Value::String(text) => Some(text),
                    other => Some(other.to_string()),
                })
                .map(Self::StructuredText),
            Value::Array(items) => match items.into_iter().next() {
                Some(first @ Value::Object(_)) => Self::from_value(first)
                    .filter(Response::is_structured_text),
                _ => None,
            },
            Value::String(text) => Some(Self::RawText(text)),
            _ => None,
        }
    }

    /// Borrow the generated text.
    pub fn text(&self) -> &str {
        match self {
            Self::StructuredText(text) | Self::RawText(text) => text,
        }
    }

    /// Take the generated text.
    pub fn into_text(self) -> String {
        match self {
            Self::StructuredText(text) | Self::RawText(text) => text,
        }
    }
}

/// A generated poem along with the display fields of the request that made
/// it. A [`Session`] keeps only the latest one.
///
/// [`Session`]: crate::Session
#[derive(Debug, Clone, Serialize, Deserialize, derive_more::Display)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
#[display("{text}")]
pub struct GenerationResult {
    /// Generated poem text.
    pub text: String,
    /// Theme as substituted into the prompt.
    pub theme: Cow<'static, str>,
    /// Emotion as substituted into the prompt.
    pub emotion: Cow<'static, str>,
    /// Poetic [`Style`].
    pub style: Style,
    /// Poetic [`Form`].
    pub form: Form,
    /// Poem [`Length`].
    pub length: Length,
}

impl GenerationResult {
    /// Pair the generated text with the `request` that produced it.
    pub fn new(request: &GenerationRequest<'_>, response: Response) -> Self {
        let prompt = request.prompt().into_static();
        Self {
            text: response.into_text(),
            theme: prompt.theme,
            emotion: prompt.emotion,
            style: prompt.style,
            form: prompt.form,
            length: prompt.length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field() {
        let response = Response::from_body(r#"{"text": "  Petals fall\n"}"#);
        assert_eq!(response, Response::StructuredText("  Petals fall\n".into()));
        assert_eq!(response.text(), "  Petals fall\n");
    }

    #[test]
    fn test_text_preferred_over_generated_text() {
        let response =
            Response::from_body(r#"{"generated_text": "b", "text": "a"}"#);
        assert_eq!(response.text(), "a");
    }

    #[test]
    fn test_generated_text_array() {
        let response =
            Response::from_body(r#"[{"generated_text": "Winter moon"}]"#);
        assert!(response.is_structured_text());
        assert_eq!(response.into_text(), "Winter moon");
    }

    #[test]
    fn test_text_field_of_any_type() {
        assert_eq!(
            Response::from_body(r#"{"text": 42}"#),
            Response::StructuredText("42".into())
        );
        assert_eq!(
            Response::from_body(r#"{"text": ["a", "b"]}"#),
            Response::StructuredText(r#"["a","b"]"#.into())
        );
        assert_eq!(
            Response::from_body(r#"{"text": null, "generated_text": "x"}"#),
            Response::StructuredText("null".into())
        );
    }

    #[test]
    fn test_json_string() {
        let response = Response::from_body(r#""just a poem""#);
        assert_eq!(response, Response::RawText("just a poem".into()));
    }

    #[test]
    fn test_coerces_everything_else() {
        for body in [
            r#"{"poem": "no text field"}"#,
            r#"[]"#,
            r#"["a", "b"]"#,
            "null",
            "not json at all",
            "",
        ] {
            let response = Response::from_body(body);
            assert!(response.is_raw_text(), "{body}");
            assert_eq!(response.text(), body);
        }
    }

    #[test]
    fn test_display() {
        let response = Response::StructuredText("An old silent pond".into());
        assert_eq!(response.to_string(), "An old silent pond");
    }

    #[test]
    fn test_generation_result() {
        let request = GenerationRequest::default()
            .theme("")
            .form(Form::Haiku)
            .length(Length::Short);
        let result = GenerationResult::new(
            &request,
            Response::StructuredText("Cherry blossoms".into()),
        );
        assert_eq!(result.text, "Cherry blossoms");
        assert_eq!(result.theme, crate::prompt::DEFAULT_THEME);
        assert_eq!(result.form, Form::Haiku);
        assert_eq!(result.length, Length::Short);
        assert_eq!(result.to_string(), "Cherry blossoms");
    }
}
