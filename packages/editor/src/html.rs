//! Minimal HTML writer used by block renderers and the editor layout.

/// Append-only HTML buffer
#[derive(Debug, Default)]
pub struct HtmlWriter {
    buffer: String,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a tag; attribute values are escaped
    pub fn open(&mut self, tag: &str, attributes: &[(&str, &str)]) -> &mut Self {
        self.buffer.push('<');
        self.buffer.push_str(tag);
        for (name, value) in attributes {
            self.buffer.push(' ');
            self.buffer.push_str(name);
            self.buffer.push_str("=\"");
            self.buffer.push_str(&escape_html(value));
            self.buffer.push('"');
        }
        self.buffer.push('>');
        self
    }

    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.buffer.push_str("</");
        self.buffer.push_str(tag);
        self.buffer.push('>');
        self
    }

    /// Escaped text content
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buffer.push_str(&escape_html(text));
        self
    }

    /// Pre-rendered markup, inserted as is
    pub fn raw(&mut self, html: &str) -> &mut Self {
        self.buffer.push_str(html);
        self
    }

    /// `<tag attrs>text</tag>`
    pub fn element(&mut self, tag: &str, attributes: &[(&str, &str)], text: &str) -> &mut Self {
        self.open(tag, attributes).text(text).close(tag)
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_entities() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_writer_nesting() {
        let mut html = HtmlWriter::new();
        html.open("div", &[("class", "a<b")])
            .element("h1", &[], "Hi & bye")
            .raw("<hr>")
            .close("div");

        assert_eq!(html.finish(), r#"<div class="a&lt;b"><h1>Hi &amp; bye</h1><hr></div>"#);
    }
}
