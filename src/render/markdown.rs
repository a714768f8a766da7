use crate::domain::ports::MarkdownEngine;

/// Inserts the source unconverted. Used when no markdown engine is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl MarkdownEngine for PassThrough {
    fn to_html(&self, markdown: &str) -> String {
        markdown.to_string()
    }

    fn to_inline_html(&self, markdown: &str) -> String {
        markdown.to_string()
    }
}

#[cfg(feature = "markdown")]
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMark;

#[cfg(feature = "markdown")]
impl MarkdownEngine for CommonMark {
    fn to_html(&self, markdown: &str) -> String {
        use pulldown_cmark::{html, Options, Parser};

        let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }

    fn to_inline_html(&self, markdown: &str) -> String {
        use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

        // 行內轉換：拿掉段落包裝
        let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH).filter(|event| {
            !matches!(
                event,
                Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph)
            )
        });
        let mut out = String::with_capacity(markdown.len());
        html::push_html(&mut out, parser);
        out.trim_end().to_string()
    }
}

#[cfg(feature = "markdown")]
fn compiled_engine() -> Option<Box<dyn MarkdownEngine>> {
    Some(Box::new(CommonMark))
}

#[cfg(not(feature = "markdown"))]
fn compiled_engine() -> Option<Box<dyn MarkdownEngine>> {
    tracing::warn!("Markdown support not compiled in, inserting raw text");
    None
}

/// Picks the markdown engine compiled in, or pass-through when disabled.
pub fn engine_for(enabled: bool) -> Box<dyn MarkdownEngine> {
    enabled
        .then(compiled_engine)
        .flatten()
        .unwrap_or_else(|| Box::new(PassThrough))
}
