//! [`GenerationRequest`] and the [Hugging Face text-generation] wire body.
//!
//! [Hugging Face text-generation]: <https://huggingface.co/docs/inference-providers/tasks/text-generation>

use std::{borrow::Cow, num::NonZeroU16};

use serde::{Deserialize, Serialize};

use crate::{
    prompt::{self, Form, Length, Style, Temperature},
    Model, Prompt, Provider,
};

/// Everything needed to generate one poem, except the credential. Build one
/// with [`Default`] and the chainable setters.
///
/// Empty `theme` and `emotion` are replaced with [`DEFAULT_THEME`] and
/// [`DEFAULT_EMOTION`] by the setters and by [`Self::with_defaults`].
///
/// [`DEFAULT_THEME`]: prompt::DEFAULT_THEME
/// [`DEFAULT_EMOTION`]: prompt::DEFAULT_EMOTION
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
#[serde(default)]
pub struct GenerationRequest<'a> {
    /// Central subject of the poem.
    pub theme: Cow<'a, str>,
    /// Emotional tone or atmosphere.
    pub emotion: Cow<'a, str>,
    /// Poetic [`Style`].
    pub style: Style,
    /// Poetic [`Form`].
    pub form: Form,
    /// Poem [`Length`]. Also determines the max-token budget.
    pub length: Length,
    /// Sampling [`Temperature`].
    pub temperature: Temperature,
    /// [`Model`] to use for inference.
    pub model: Model,
    /// Inference [`Provider`].
    pub provider: Provider,
}

impl Default for GenerationRequest<'_> {
    fn default() -> Self {
        Self {
            theme: Cow::Borrowed(prompt::DEFAULT_THEME),
            emotion: Cow::Borrowed(prompt::DEFAULT_EMOTION),
            style: Default::default(),
            form: Default::default(),
            length: Default::default(),
            temperature: Default::default(),
            model: Default::default(),
            provider: Default::default(),
        }
    }
}

impl<'a> GenerationRequest<'a> {
    /// Set the theme. An empty theme becomes [`DEFAULT_THEME`].
    ///
    /// [`DEFAULT_THEME`]: prompt::DEFAULT_THEME
    pub fn theme<S>(mut self, theme: S) -> Self
    where
        S: Into<Cow<'a, str>>,
    {
        self.theme = prompt::or_default(theme, prompt::DEFAULT_THEME);
        self
    }

    /// Set the emotion. An empty emotion becomes [`DEFAULT_EMOTION`].
    ///
    /// [`DEFAULT_EMOTION`]: prompt::DEFAULT_EMOTION
    pub fn emotion<S>(mut self, emotion: S) -> Self
    where
        S: Into<Cow<'a, str>>,
    {
        self.emotion = prompt::or_default(emotion, prompt::DEFAULT_EMOTION);
        self
    }

    /// Set the [`Style`].
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the [`Form`].
    pub fn form(mut self, form: Form) -> Self {
        self.form = form;
        self
    }

    /// Set the [`Length`].
    pub fn length(mut self, length: Length) -> Self {
        self.length = length;
        self
    }

    /// Set the [`Temperature`].
    pub fn temperature(mut self, temperature: Temperature) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the [`Model`].
    pub fn model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Set the [`Provider`].
    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    /// Apply the theme and emotion defaults. Needed only if the fields were
    /// assigned directly or the request was deserialized.
    pub fn with_defaults(mut self) -> Self {
        self.theme = prompt::or_default(self.theme, prompt::DEFAULT_THEME);
        self.emotion =
            prompt::or_default(self.emotion, prompt::DEFAULT_EMOTION);
        self
    }

    /// Max-token budget derived from the [`Length`].
    pub fn max_new_tokens(&self) -> NonZeroU16 {
        self.length.max_new_tokens()
    }

    /// The [`Prompt`] for this request, borrowing the theme and emotion.
    pub fn prompt(&self) -> Prompt<'_> {
        Prompt {
            theme: Cow::Borrowed(&*self.theme),
            emotion: Cow::Borrowed(&*self.emotion),
            style: self.style,
            form: self.form,
            length: self.length,
        }
        .with_defaults()
    }

    /// Wire body for the text-generation endpoint.
    pub fn body(&self) -> TextGeneration<'static> {
        TextGeneration {
            inputs: Cow::Owned(self.prompt().render()),
            parameters: Parameters {
                temperature: self.temperature.get(),
                max_new_tokens: self.max_new_tokens(),
                return_full_text: false,
            },
        }
    }

    /// Convert to a `'static` lifetime by taking ownership of the [`Cow`]
    /// fields.
    pub fn into_static(self) -> GenerationRequest<'static> {
        GenerationRequest {
            theme: Cow::Owned(self.theme.into_owned()),
            emotion: Cow::Owned(self.emotion.into_owned()),
            style: self.style,
            form: self.form,
            length: self.length,
            temperature: self.temperature,
            model: self.model,
            provider: self.provider,
        }
    }
}

/// Request body for the [Hugging Face text-generation] task.
///
/// [Hugging Face text-generation]: <https://huggingface.co/docs/inference-providers/tasks/text-generation>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
pub struct TextGeneration<'a> {
    /// Prompt text.
    pub inputs: Cow<'a, str>,
    /// Generation [`Parameters`].
    pub parameters: Parameters,
}

/// Generation parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
pub struct Parameters {
    /// Temperature for sampling.
    pub temperature: f32,
    /// Max tokens to generate.
    pub max_new_tokens: NonZeroU16,
    /// If `true` the prompt is echoed back before the generated text. We never
    /// want that.
    pub return_full_text: bool,
}
