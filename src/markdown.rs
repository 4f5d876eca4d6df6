//! Markdown rendering of generated poems.
//!
//! [`ToMarkdown`] produces [`pulldown_cmark::Event`]s, which can be rendered
//! to CommonMark with [`ToMarkdown::markdown`] or to HTML with [`ToHtml`].
//!
//! [`ToHtml`]: crate::html::ToHtml

use pulldown_cmark::{CowStr, Event, HeadingLevel, Tag, TagEnd};

use crate::GenerationResult;

/// Options for rendering.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
pub struct Options {
    /// Heading level for the title. `None` to omit the title.
    pub heading: Option<HeadingLevel>,
    /// Include the theme, emotion, length, style and form lines.
    pub metadata: bool,
    /// Wrap the poem and badges in raw HTML with CSS classes
    /// (`poetry-container`, `poetry-text`, `theme-badge`, `style-badge`).
    /// HTML rendering always sets this.
    pub attrs: bool,
}

/// Title and metadata, no raw HTML.
pub const DEFAULT_OPTIONS: Options = Options {
    heading: Some(HeadingLevel::H3),
    metadata: true,
    attrs: false,
};

/// Just the poem.
pub const PLAIN_OPTIONS: Options = Options {
    heading: None,
    metadata: false,
    attrs: false,
};

/// Title of the rendered poem.
pub const TITLE: &str = "Your Generated Poem";

/// Immutable wrapper around a [`String`]. Guaranteed to be CommonMark.
#[derive(Debug, derive_more::Display)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
#[display("{inner}")]
pub struct Markdown {
    inner: String,
}

impl Markdown {
    /// Render a stream of markdown events.
    pub fn from_events<'a>(events: impl Iterator<Item = Event<'a>>) -> Self {
        let mut inner = String::new();
        // Writing to a `String` can't fail.
        let _ = pulldown_cmark_to_cmark::cmark(events, &mut inner);
        Self { inner }
    }
}

impl From<Markdown> for String {
    fn from(markdown: Markdown) -> Self {
        markdown.inner
    }
}

impl AsRef<str> for Markdown {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl std::ops::Deref for Markdown {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// A type that can be rendered as markdown events.
pub trait ToMarkdown {
    /// Markdown events with custom [`Options`].
    fn markdown_events_custom<'a>(
        &'a self,
        options: &'a Options,
    ) -> Box<dyn Iterator<Item = Event<'a>> + 'a>;

    /// Markdown events with [`DEFAULT_OPTIONS`].
    fn markdown_events(&self) -> Box<dyn Iterator<Item = Event<'_>> + '_> {
        self.markdown_events_custom(&DEFAULT_OPTIONS)
    }

    /// Render to CommonMark with [`DEFAULT_OPTIONS`].
    fn markdown(&self) -> Markdown {
        self.markdown_custom(&DEFAULT_OPTIONS)
    }

    /// Render to CommonMark with custom [`Options`].
    fn markdown_custom(&self, options: &Options) -> Markdown {
        Markdown::from_events(self.markdown_events_custom(options))
    }
}

/// Push `text` as a single paragraph with a hard break at every newline.
/// Blank lines are kept as empty lines.
pub(crate) fn push_lines<'a>(events: &mut Vec<Event<'a>>, text: &'a str) {
    events.push(Event::Start(Tag::Paragraph));
    for (i, line) in text.trim_end_matches('\n').split('\n').enumerate() {
        if i > 0 {
            events.push(Event::HardBreak);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.is_empty() {
            events.push(Event::Text(CowStr::Borrowed(line)));
        }
    }
    events.push(Event::End(TagEnd::Paragraph));
}

fn push_field<'a>(
    events: &mut Vec<Event<'a>>,
    label: &'static str,
    value: CowStr<'a>,
    badge: Option<&'static str>,
) {
    events.push(Event::Start(Tag::Paragraph));
    events.push(Event::Start(Tag::Strong));
    events.push(Event::Text(CowStr::Borrowed(label)));
    events.push(Event::End(TagEnd::Strong));
    events.push(Event::Text(CowStr::Borrowed(" ")));
    if let Some(class) = badge {
        events.push(Event::InlineHtml(
            format!("<span class=\"{class}\">").into(),
        ));
    }
    events.push(Event::Text(value));
    if badge.is_some() {
        events.push(Event::InlineHtml(CowStr::Borrowed("</span>")));
    }
    events.push(Event::End(TagEnd::Paragraph));
}

impl ToMarkdown for GenerationResult {
    fn markdown_events_custom<'a>(
        &'a self,
        options: &'a Options,
    ) -> Box<dyn Iterator<Item = Event<'a>> + 'a> {
        let mut events = Vec::new();

        if let Some(level) = options.heading {
            events.push(Event::Start(Tag::Heading {
                level,
                id: None,
                classes: Vec::new(),
                attrs: Vec::new(),
            }));
            events.push(Event::Text(CowStr::Borrowed(TITLE)));
            events.push(Event::End(TagEnd::Heading(level)));
        }

        if options.metadata {
            let badge = |class| options.attrs.then_some(class);
            push_field(
                &mut events,
                "Theme:",
                CowStr::Borrowed(&*self.theme),
                badge("theme-badge"),
            );
            push_field(
                &mut events,
                "Emotion:",
                CowStr::Borrowed(&*self.emotion),
                None,
            );
            push_field(
                &mut events,
                "Length:",
                self.length.to_string().into(),
                None,
            );
            push_field(
                &mut events,
                "Style:",
                self.style.to_string().into(),
                badge("style-badge"),
            );
            push_field(
                &mut events,
                "Form:",
                self.form.to_string().into(),
                None,
            );
        }

        if options.attrs {
            events.push(Event::Html(CowStr::Borrowed(
                "<div class=\"poetry-container\"><div class=\"poetry-text\">\n",
            )));
        }
        push_lines(&mut events, &self.text);
        if options.attrs {
            events.push(Event::Html(CowStr::Borrowed("</div></div>\n")));
        }

        Box::new(events.into_iter())
    }
}
