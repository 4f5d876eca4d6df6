use pulldown_cmark::{html::push_html, Event};

use crate::markdown::{ToMarkdown, TITLE};

pub use crate::markdown::{Options, DEFAULT_OPTIONS, PLAIN_OPTIONS};

/// CSS for the classes emitted by [`ToHtml`]: the parchment poem container
/// and the theme and style badges.
pub const STYLESHEET: &str = "\
.poetry-container {
    background-color: #f9f7f1;
    border-radius: 12px;
    padding: 40px 45px;
    border: 1px solid #e0d8c0;
    margin: 25px auto 0;
    box-shadow: 0 4px 20px rgba(0, 0, 0, 0.12);
    max-width: 850px;
}
.poetry-text {
    font-family: 'Garamond', 'Georgia', serif;
    font-size: 24px;
    line-height: 1.9;
    color: #2c3e50;
    white-space: pre-wrap;
    text-align: center;
    letter-spacing: 0.02em;
    font-weight: 500;
}
.style-badge, .theme-badge {
    border-radius: 15px;
    padding: 6px 14px;
    margin-right: 10px;
    font-size: 1.05em;
    font-weight: 600;
    font-family: 'Georgia', serif;
    display: inline-block;
}
.style-badge {
    background-color: #e8daef;
    color: #8e44ad;
    box-shadow: 0 1px 5px rgba(142, 68, 173, 0.2);
}
.theme-badge {
    background-color: #d1e7f0;
    color: #3498db;
    box-shadow: 0 1px 5px rgba(52, 152, 219, 0.2);
}
";

/// A rendered poem fragment. Only [`ToHtml`] makes these, so the text inside
/// is always escaped.
#[derive(Debug, Clone, derive_more::Display)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
#[display("{inner}")]
pub struct Html {
    inner: String,
}

impl Html {
    fn render<'a>(events: impl Iterator<Item = Event<'a>>) -> Self {
        let mut inner = String::new();
        push_html(&mut inner, events);
        Self { inner }
    }

    /// Wrap the fragment in a standalone document that carries
    /// [`STYLESHEET`].
    pub fn into_page(self) -> Self {
        let body = self.inner;
        Self {
            inner: format!(
                "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
                 <title>{TITLE}</title>\n<style>\n{STYLESHEET}</style>\n\
                 </head>\n<body>\n{body}</body>\n</html>\n"
            ),
        }
    }
}

impl From<Html> for String {
    fn from(html: Html) -> Self {
        html.inner
    }
}

impl AsRef<str> for Html {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl std::ops::Deref for Html {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// HTML rendering of anything that renders to markdown, such as a
/// [`GenerationResult`]. Raw-HTML `attrs` are always on, so the output uses
/// the classes styled by [`STYLESHEET`].
///
/// [`GenerationResult`]: crate::GenerationResult
pub trait ToHtml: ToMarkdown {
    /// Title, metadata badges and the poem container.
    fn html(&self) -> Html {
        self.html_custom(DEFAULT_OPTIONS)
    }

    /// Only the poem container.
    fn html_plain(&self) -> Html {
        self.html_custom(PLAIN_OPTIONS)
    }

    /// A full page for [`Self::html`], for saving or serving as-is.
    fn html_page(&self) -> Html {
        self.html().into_page()
    }

    /// Render with custom [`Options`]. `attrs` is forced on.
    fn html_custom(&self, mut options: Options) -> Html {
        options.attrs = true;
        Html::render(self.markdown_events_custom(&options))
    }
}

impl<T> ToHtml for T where T: ToMarkdown {}

#[cfg(test)]
mod tests {
    use crate::markdown::tests::result;

    use super::*;

    #[test]
    fn test_result_html() {
        let html = result().html();
        assert!(html.starts_with("<h3>Your Generated Poem</h3>\n"));
        assert!(html.contains(
            "<p><strong>Theme:</strong> <span class=\"theme-badge\">the sea</span></p>"
        ));
        assert!(html.contains(
            "<p><strong>Style:</strong> <span class=\"style-badge\">Lyrical</span></p>"
        ));
        assert!(html.contains("<p><strong>Form:</strong> Ballad</p>"));
        assert!(html.contains(
            "<div class=\"poetry-container\"><div class=\"poetry-text\">"
        ));
        assert!(html.contains("First line<br />\nsecond line<br />\n<br />\nnew stanza"));
        assert!(html.trim_end().ends_with("</div></div>"));
    }

    #[test]
    fn test_html_plain() {
        let html = result().html_plain();
        assert!(!html.contains("<h3>"));
        assert!(!html.contains("Theme:"));
        assert!(html.starts_with("<div class=\"poetry-container\">"));
    }

    #[test]
    fn test_html_escapes_text() {
        let mut poem = result();
        poem.text = "Roses & <thorns>\nend".into();
        poem.theme = "<script>".into();
        let html = poem.html();
        assert!(html.contains("Roses &amp; &lt;thorns&gt;<br />\nend"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_html_page() {
        let poem = result();
        let page = poem.html_page();
        assert!(page.starts_with("<!DOCTYPE html>\n"));
        assert!(page.contains("<title>Your Generated Poem</title>"));
        assert!(page.contains(STYLESHEET));
        assert!(page.contains(poem.html().as_ref()));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_stylesheet_covers_classes() {
        for class in
            ["poetry-container", "poetry-text", "style-badge", "theme-badge"]
        {
            assert!(STYLESHEET.contains(&format!(".{class}")), "{class}");
        }
    }

    #[test]
    fn test_into_string() {
        let html = result().html_plain();
        let string: String = html.into();
        assert!(string.contains("poetry-text"));
    }
}
