//! [`Prompt`] builder and the poetic parameters that feed it.
//!
//! A [`Prompt`] is the fully substituted instruction text sent to the model.
//! It is rendered with [`Display`] (or [`Prompt::render`]) and is a pure
//! function of its five fields.
//!
//! [`Display`]: std::fmt::Display

use std::{borrow::Cow, num::NonZeroU16};

use serde::{Deserialize, Serialize};

/// Theme used when the user leaves the theme empty.
pub const DEFAULT_THEME: &str = "nature and the passing of time";
/// Emotion used when the user leaves the emotion empty.
pub const DEFAULT_EMOTION: &str = "contemplative";

/// Literary tradition or movement that influences the poem's language.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
)]
pub enum Style {
    #[default]
    #[allow(missing_docs)]
    Romantic,
    #[allow(missing_docs)]
    Modern,
    #[allow(missing_docs)]
    Victorian,
    #[allow(missing_docs)]
    Minimalist,
    #[allow(missing_docs)]
    Confessional,
    #[allow(missing_docs)]
    Imagist,
    #[allow(missing_docs)]
    Beat,
    #[allow(missing_docs)]
    Lyrical,
    #[allow(missing_docs)]
    Gothic,
    #[allow(missing_docs)]
    Surrealist,
}

impl Style {
    /// Every style, in menu order.
    pub const ALL: [Style; 10] = [
        Style::Romantic,
        Style::Modern,
        Style::Victorian,
        Style::Minimalist,
        Style::Confessional,
        Style::Imagist,
        Style::Beat,
        Style::Lyrical,
        Style::Gothic,
        Style::Surrealist,
    ];

    /// Look up a style by its label, for example `"Gothic"`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.to_string() == label)
    }
}

/// Structural pattern or traditional form of the poem.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
)]
pub enum Form {
    /// No regular rhythm or rhyme.
    #[default]
    #[serde(rename = "Free Verse")]
    #[display("Free Verse")]
    FreeVerse,
    /// 14 lines with a fixed rhyme scheme.
    Sonnet,
    /// 3 lines, 5-7-5 syllables.
    Haiku,
    /// 19 lines with two refrains and two rhymes.
    Villanelle,
    /// Narrative verse with a simple, singable rhythm.
    Ballad,
    /// 5 humorous lines rhyming AABBA.
    Limerick,
    /// Formal address to a subject.
    Ode,
    /// Couplets with a recurring rhyme and refrain.
    Ghazal,
    /// 5 lines, 5-7-5-7-7 syllables.
    Tanka,
    /// 6 stanzas of 6 lines rotating the same end words.
    Sestina,
}

impl Form {
    /// Every form, in menu order.
    pub const ALL: [Form; 10] = [
        Form::FreeVerse,
        Form::Sonnet,
        Form::Haiku,
        Form::Villanelle,
        Form::Ballad,
        Form::Limerick,
        Form::Ode,
        Form::Ghazal,
        Form::Tanka,
        Form::Sestina,
    ];

    /// Look up a form by its label, for example `"Free Verse"`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.to_string() == label)
    }
}

/// How long the poem should be. Determines the max-token budget.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    /// About 10 lines.
    #[display("short")]
    Short,
    /// About 20 lines. This is the default.
    #[default]
    #[display("medium")]
    Medium,
    /// About 30 lines.
    #[display("long")]
    Long,
}

impl Length {
    /// Every length, in menu order.
    pub const ALL: [Length; 3] = [Length::Short, Length::Medium, Length::Long];

    /// Upper bound on generated tokens for this length. A fixed table.
    pub const fn max_new_tokens(self) -> NonZeroU16 {
        match self {
            Self::Short => nonzero(500),
            Self::Medium => nonzero(800),
            Self::Long => nonzero(1200),
        }
    }

    /// Approximate number of lines the model is asked for.
    pub const fn approx_lines(self) -> u8 {
        match self {
            Self::Short => 10,
            Self::Medium => 20,
            Self::Long => 30,
        }
    }

    /// Parse `"short"`, `"medium"` or `"long"`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.to_string() == label)
    }
}

const fn nonzero(n: u16) -> NonZeroU16 {
    match NonZeroU16::new(n) {
        Some(n) => n,
        None => panic!("token budget must be nonzero"),
    }
}

/// Error for a [`Temperature`] outside of [`Temperature::RANGE`].
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Invalid temperature: {0} (expected 0.1 to 1.0)")]
pub struct InvalidTemperature(pub f32);

/// Sampling temperature. Higher values mean more surprising language. Always
/// within [`Self::RANGE`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Temperature(f32);

impl Temperature {
    /// Accepted values.
    pub const RANGE: std::ops::RangeInclusive<f32> = 0.1..=1.0;
    /// Default temperature of 0.8.
    pub const DEFAULT: Temperature = Temperature(0.8);

    /// Get the inner value.
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for Temperature {
    type Error = InvalidTemperature;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        // NaN fails `contains`.
        if Self::RANGE.contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidTemperature(value))
        }
    }
}

impl From<Temperature> for f32 {
    fn from(t: Temperature) -> Self {
        t.0
    }
}

/// Return `value` unless it is empty, in which case return `default`.
/// Whitespace-only values are kept as they are.
pub fn or_default<'a>(
    value: impl Into<Cow<'a, str>>,
    default: &'a str,
) -> Cow<'a, str> {
    let value = value.into();
    if value.is_empty() {
        Cow::Borrowed(default)
    } else {
        value
    }
}

/// The poetry prompt. Renders to the instruction text with [`Display`].
///
/// Empty `theme` and `emotion` are **not** replaced here. Use
/// [`Prompt::with_defaults`] (or build from a [`GenerationRequest`], which
/// already has) to apply [`DEFAULT_THEME`] and [`DEFAULT_EMOTION`].
///
/// [`Display`]: std::fmt::Display
/// [`GenerationRequest`]: crate::GenerationRequest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
pub struct Prompt<'a> {
    /// Central subject of the poem.
    pub theme: Cow<'a, str>,
    /// Emotional tone or atmosphere.
    pub emotion: Cow<'a, str>,
    /// Poetic [`Style`].
    pub style: Style,
    /// Poetic [`Form`].
    pub form: Form,
    /// Poem [`Length`].
    pub length: Length,
}

impl<'a> Prompt<'a> {
    /// Replace an empty theme or emotion with [`DEFAULT_THEME`] or
    /// [`DEFAULT_EMOTION`]. Non-empty values pass through unchanged.
    pub fn with_defaults(mut self) -> Self {
        self.theme = or_default(self.theme, DEFAULT_THEME);
        self.emotion = or_default(self.emotion, DEFAULT_EMOTION);
        self
    }

    /// Render the instruction text.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Convert to a `'static` lifetime by taking ownership of the [`Cow`]
    /// fields.
    pub fn into_static(self) -> Prompt<'static> {
        Prompt {
            theme: Cow::Owned(self.theme.into_owned()),
            emotion: Cow::Owned(self.emotion.into_owned()),
            style: self.style,
            form: self.form,
            length: self.length,
        }
    }
}

impl std::fmt::Display for Prompt<'_> {
    // Each field appears exactly once.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "You are a skilled poet with expertise in many poetic forms and traditions. Write a beautiful,
evocative poem based on the theme, emotion, style, form, and size provided by the user.

Guidelines:
- Create vivid imagery and metaphors that resonate with the requested subject and mood
- Use language, rhythm, and structure appropriate to the requested poetic structure
- Maintain consistency in tone and voice throughout the poem
- Balance clarity of meaning with artistic expression
- Follow the traditional constraints of the specified poetic structure when applicable
- Match the requested size (roughly 10, 20 or 30 lines)

Please write a {length} poem with the following elements:

Theme: {theme}
Emotion/Mood: {emotion}
Style: {style}
Form: {form}

Make it evocative, beautiful, and thoughtful. Ensure the poem is complete and has proper structure.
Return only the poem without introductions or explanations.
",
            length = self.length,
            theme = self.theme,
            emotion = self.emotion,
            style = self.style,
            form = self.form,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(theme: &'static str, emotion: &'static str) -> Prompt<'static> {
        Prompt {
            theme: theme.into(),
            emotion: emotion.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_length_budget() {
        assert_eq!(Length::Short.max_new_tokens().get(), 500);
        assert_eq!(Length::Medium.max_new_tokens().get(), 800);
        assert_eq!(Length::Long.max_new_tokens().get(), 1200);
        assert_eq!(Length::default(), Length::Medium);
    }

    #[test]
    fn test_length_labels() {
        assert_eq!(Length::Short.to_string(), "short");
        assert_eq!(Length::from_label("long"), Some(Length::Long));
        assert_eq!(Length::from_label("epic"), None);
        assert_eq!(
            serde_json::from_str::<Length>(r#""medium""#).unwrap(),
            Length::Medium
        );
        assert!(serde_json::from_str::<Length>(r#""huge""#).is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Form::FreeVerse.to_string(), "Free Verse");
        assert_eq!(Form::from_label("Free Verse"), Some(Form::FreeVerse));
        assert_eq!(Style::from_label("Beat"), Some(Style::Beat));
        assert_eq!(Style::from_label("beat"), None);
        assert_eq!(
            serde_json::to_string(&Form::FreeVerse).unwrap(),
            r#""Free Verse""#
        );
    }

    #[test]
    fn test_temperature() {
        assert_eq!(Temperature::default().get(), 0.8);
        assert!(Temperature::try_from(0.1).is_ok());
        assert!(Temperature::try_from(1.0).is_ok());
        assert_eq!(
            Temperature::try_from(0.05).unwrap_err(),
            InvalidTemperature(0.05)
        );
        assert!(Temperature::try_from(1.5).is_err());
        assert!(Temperature::try_from(f32::NAN).is_err());
        assert!(serde_json::from_str::<Temperature>("2.0").is_err());
    }

    #[test]
    fn test_or_default() {
        assert_eq!(or_default("", DEFAULT_THEME), DEFAULT_THEME);
        assert_eq!(or_default("   ", DEFAULT_EMOTION), "   ");
        assert_eq!(or_default("dreams", DEFAULT_THEME), "dreams");
    }

    #[test]
    fn test_with_defaults() {
        let p = prompt("", "").with_defaults();
        assert_eq!(p.theme, DEFAULT_THEME);
        assert_eq!(p.emotion, DEFAULT_EMOTION);

        let p = prompt("the sea", "longing").with_defaults();
        assert_eq!(p.theme, "the sea");
        assert_eq!(p.emotion, "longing");
    }

    #[test]
    fn test_fields_appear_exactly_once() {
        for style in Style::ALL {
            for form in Form::ALL {
                for length in Length::ALL {
                    let p = Prompt {
                        theme: "tidepools at dawn".into(),
                        emotion: "quiet wonder".into(),
                        style,
                        form,
                        length,
                    };
                    let text = p.render();
                    for field in [
                        p.theme.to_string(),
                        p.emotion.to_string(),
                        style.to_string(),
                        form.to_string(),
                        length.to_string(),
                    ] {
                        assert_eq!(
                            text.matches(field.as_str()).count(),
                            1,
                            "{field:?} in {style} {form} {length}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_render_is_pure() {
        let p = prompt("autumn forest at dusk", "nostalgia");
        assert_eq!(p.render(), p.render());
        assert_eq!(p.render(), p.clone().into_static().to_string());
    }

    #[test]
    fn test_render_layout() {
        let p = Prompt {
            theme: "mortality".into(),
            emotion: "melancholy".into(),
            style: Style::Gothic,
            form: Form::Sonnet,
            length: Length::Long,
        };
        let text = p.render();
        assert!(text.starts_with("You are a skilled poet"));
        assert!(text.contains("Please write a long poem"));
        assert!(text.contains(
            "Theme: mortality\nEmotion/Mood: melancholy\nStyle: Gothic\nForm: Sonnet\n"
        ));
        assert!(text.ends_with("without introductions or explanations.\n"));
    }

    #[test]
    fn test_no_escaping() {
        let p = prompt("<b>{braces}</b> & \"quotes\"", "joy");
        assert!(p.render().contains("Theme: <b>{braces}</b> & \"quotes\"\n"));
    }
}
