// src/sitemap/xml.rs
// =============================================================================
// Sitemap XML parsing with quick-xml.
//
// Two document kinds exist:
// - <urlset>: <url><loc>page</loc></url> entries (a leaf sitemap)
// - <sitemapindex>: <sitemap><loc>child sitemap</loc></sitemap> entries
//
// Element names are matched on their local part, ignoring case, so any
// namespace (or none) works. Broken XML is reported as "no data".
// =============================================================================

use quick_xml::events::Event;
use quick_xml::Reader;

/// What one sitemap payload contributed: page URLs or child sitemaps.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SitemapNode {
    pub urls: Vec<String>,
    pub children: Vec<String>,
}

impl SitemapNode {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.children.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    UrlSet,
    SitemapIndex,
    Other,
}

impl Root {
    fn from_name(name: &[u8]) -> Self {
        if name.eq_ignore_ascii_case(b"urlset") {
            Root::UrlSet
        } else if name.eq_ignore_ascii_case(b"sitemapindex") {
            Root::SitemapIndex
        } else {
            Root::Other
        }
    }

    /// The element whose direct <loc> child is collected.
    fn entry_tag(self) -> Option<&'static [u8]> {
        match self {
            Root::UrlSet => Some(b"url"),
            Root::SitemapIndex => Some(b"sitemap"),
            Root::Other => None,
        }
    }
}

/// Parses a sitemap payload. Never fails: malformed XML or an unknown root
/// element gives an empty node.
pub fn parse_sitemap(bytes: &[u8]) -> SitemapNode {
    match parse_document(bytes) {
        Some((Root::UrlSet, locs)) => SitemapNode {
            urls: locs,
            children: Vec::new(),
        },
        Some((Root::SitemapIndex, locs)) => SitemapNode {
            urls: Vec::new(),
            children: locs,
        },
        _ => SitemapNode::default(),
    }
}

/// Walks the whole document. Returns `None` if it is not well-formed.
fn parse_document(bytes: &[u8]) -> Option<(Root, Vec<String>)> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut root: Option<Root> = None;
    let mut root_closed = false;
    // Local names of currently open elements, outermost first
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut current_loc: Option<String> = None;
    let mut locs = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).ok()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_ascii_lowercase();
                if open.is_empty() {
                    if root_closed {
                        return None;
                    }
                    root = Some(Root::from_name(&name));
                }

                let collecting = root.and_then(Root::entry_tag).is_some_and(|entry| {
                    name == b"loc" && open.last().is_some_and(|parent| parent == entry)
                });
                if collecting {
                    current_loc = Some(String::new());
                }
                open.push(name);
            }
            Event::Empty(e) => {
                if open.is_empty() {
                    if root_closed {
                        return None;
                    }
                    root = Some(Root::from_name(e.local_name().as_ref()));
                    root_closed = true;
                }
            }
            Event::Text(e) => {
                if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&e.unescape().ok()?);
                } else if open.is_empty() {
                    // Text outside the root element
                    return None;
                }
            }
            Event::CData(e) => {
                if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                let closed = open.pop()?;
                if closed == b"loc" {
                    if let Some(loc) = current_loc.take() {
                        let loc = loc.trim();
                        if !loc.is_empty() {
                            locs.push(loc.to_string());
                        }
                    }
                }
                if open.is_empty() {
                    root_closed = true;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !open.is_empty() {
        return None;
    }
    root.map(|root| (root, locs))
}
