//! Cross-repository index page generation

use chrono::{DateTime, FixedOffset};
use maud::{Markup, html};

use crate::components::header::index_header;
use crate::components::layout::page_wrapper;
use crate::pages::Formatters;

/// Title of the index document.
pub const INDEX_TITLE: &str = "Repositories";

/// One repository row of the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Repository name without extension.
    pub name: String,
    pub description: String,
    pub owner: String,
    /// Author time of the HEAD commit.
    pub last_commit_time: DateTime<FixedOffset>,
    /// Relative link to the repository's landing page.
    pub landing_page_url: String,
}

impl IndexEntry {
    /// Landing page of a repository: its README if present, else its log.
    pub fn landing_page(stripped_name: &str, readme: Option<&str>) -> String {
        match readme {
            Some(readme) => format!("{}/{}", stripped_name, readme),
            None => format!("{}/log.html", stripped_name),
        }
    }
}

/// Generates the index document listing `entries` in the given order
///
/// # Arguments
///
/// * `entries`: Repositories to list
/// * `fmt`: Formatting functions for the last commit time
///
/// # Returns
///
/// Complete HTML document
pub fn render(entries: &[IndexEntry], fmt: &Formatters) -> Markup {
    page_wrapper(
        INDEX_TITLE,
        "",
        None,
        index_header(),
        html! {
            table id="index" {
                thead {
                    tr {
                        td { b { "Name" } }
                        td { b { "Description" } }
                        td { b { "Owner" } }
                        td { b { "Last commit" } }
                    }
                }
                tbody {
                    @for entry in entries {
                        tr {
                            td { a href=(entry.landing_page_url) { (entry.name) } }
                            td { (entry.description) }
                            td { (entry.owner) }
                            td { ((fmt.time)(entry.last_commit_time)) }
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::to_datetime;

    fn entry(name: &str, readme: Option<&str>) -> IndexEntry {
        IndexEntry {
            name: name.to_string(),
            description: format!("{} description", name),
            owner: "jane".to_string(),
            last_commit_time: to_datetime(1_234_567_890, 3600),
            landing_page_url: IndexEntry::landing_page(name, readme),
        }
    }

    #[test]
    fn test_landing_page_prefers_readme() {
        assert_eq!(
            IndexEntry::landing_page("alpha", Some("README.md")),
            "alpha/README.md"
        );
        assert_eq!(IndexEntry::landing_page("beta", None), "beta/log.html");
    }

    #[test]
    fn test_index_document() {
        // Arrange
        let entries = vec![entry("alpha", Some("README.md")), entry("beta", None)];

        // Act
        let html = render(&entries, &Formatters::default()).into_string();

        // Assert
        assert!(html.contains("<title>Repositories</title>"));
        assert!(html.contains(r#"<span class="desc">Repositories</span>"#));
        assert!(html.contains(r#"<a href="alpha/README.md">alpha</a>"#));
        assert!(html.contains(r#"<a href="beta/log.html">beta</a>"#));
        assert!(html.contains(
            "<td>alpha description</td><td>jane</td><td>2009-02-14 00:31</td>"
        ));
        assert!(!html.contains("atom.xml"), "Index has no feeds");
        let alpha = html.find("alpha/README.md").expect("Should list alpha");
        let beta = html.find("beta/log.html").expect("Should list beta");
        assert!(alpha < beta, "Should keep input order");
    }
}
