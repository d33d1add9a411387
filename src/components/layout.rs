//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

/// Atom feeds advertised in the page head.
///
/// The feeds themselves are not generated here; pages only link them.
#[derive(Debug, Clone, Copy)]
pub struct Feeds<'a> {
    /// Repository name used in the feed titles.
    pub name: &'a str,
}

/// Wraps page content with standard HTML structure
///
/// Provides the DOCTYPE, head (charset, viewport, favicon, optional Atom
/// links, stylesheet) and body skeleton shared by every document. Asset
/// references are relative and prefixed with `relative_path_prefix`.
///
/// # Arguments
///
/// * `title`: Complete document title
/// * `relative_path_prefix`: Prefix leading from the page to the asset root
/// * `feeds`: Atom feeds to advertise, if any
/// * `header`: Header block rendered above the horizontal rule
/// * `body`: Page-specific content
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(
    title: &str,
    relative_path_prefix: &str,
    feeds: Option<Feeds<'_>>,
    header: Markup,
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta http-equiv="Content-Type" content="text/html; charset=UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="icon" type="image/png" href=(format!("{}favicon.png", relative_path_prefix));
                @if let Some(feeds) = feeds {
                    link rel="alternate" type="application/atom+xml"
                        title=(format!("{} Atom Feed", feeds.name)) href="atom.xml";
                    link rel="alternate" type="application/atom+xml"
                        title=(format!("{} Atom Feed (tags)", feeds.name)) href="tags.xml";
                }
                link rel="stylesheet" type="text/css" href=(format!("{}style.css", relative_path_prefix));
            }
            body {
                (header)
                hr;
                div id="content" {
                    (body)
                }
            }
        }
    }
}
