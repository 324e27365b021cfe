use crate::{
    glossary::Glossary,
    tokenizer::{SeparatorSet, tokens},
};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Bytes that would end or reinterpret a relative path segment.
const PAGE_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&#39;"),
            c => res.push(c),
        }
    }
    res
}

/// File name of a term's page, the literal term.
pub fn page_name(term: &str) -> String {
    format!("{term}.html")
}

/// Relative link to a term's page, ready for a double-quoted attribute.
pub fn page_href(term: &str) -> String {
    escape(&page_name(&utf8_percent_encode(term, PAGE_SEGMENT).to_string()))
}

/// Anchor to a term's page with the term as link text.
pub fn anchor(term: &str) -> String {
    format!("<a href=\"{}\">{}</a>", page_href(term), escape(term))
}

/// Definition rendered as HTML, with cross-references turned into anchors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Linked {
    pub html: String,
    pub links: usize,
}

/// Turns in-definition occurrences of known terms into hyperlinks.
pub struct Linker<'g> {
    glossary: &'g Glossary,
    separators: &'g SeparatorSet,
    link_self: bool,
}

impl<'g> Linker<'g> {
    pub fn new(glossary: &'g Glossary, separators: &'g SeparatorSet) -> Self {
        Self {
            glossary,
            separators,
            link_self: true,
        }
    }

    pub fn link_self(mut self, link_self: bool) -> Self {
        self.link_self = link_self;
        self
    }

    /// Walks `definition` token by token and links each word that is
    /// exactly a known term, at the position where it was scanned.
    pub fn linkify(&self, definition: &str, self_term: &str) -> Linked {
        let mut linked = Linked {
            html: String::with_capacity(definition.len()),
            links: 0,
        };
        for token in tokens(definition, self.separators) {
            if token.is_word()
                && self.glossary.contains(token.content)
                && (self.link_self || token.content != self_term)
            {
                linked.html.push_str(&anchor(token.content));
                linked.links += 1;
            } else {
                linked.html.push_str(&escape(token.content));
            }
        }
        linked
    }

    /// Every term of the glossary with its linked definition, in term order.
    pub fn link_all(&self) -> impl Iterator<Item = (&'g str, Linked)> + '_ {
        self.glossary.iter().map(|(term, def)| {
            let linked = self.linkify(def, term);
            tracing::trace!(term, links = linked.links, "linked definition");
            (term, linked)
        })
    }
}
