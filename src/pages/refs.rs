//! Refs page generation

use maud::{Markup, html};

use crate::pages::Formatters;
use crate::refs::ReferenceRecord;

/// Renders the branches and tags tables
///
/// Both tables list name, last commit date and author of the
/// representative commit, in the order given.
pub fn render(
    branches: &[ReferenceRecord],
    tags: &[ReferenceRecord],
    fmt: &Formatters,
) -> Markup {
    html! {
        h2 { "Branches" }
        (ref_table("branches", branches, fmt))
        br;
        h2 { "Tags" }
        (ref_table("tags", tags, fmt))
    }
}

fn ref_table(id: &str, refs: &[ReferenceRecord], fmt: &Formatters) -> Markup {
    html! {
        table id=(id) {
            thead {
                tr {
                    td { b { "Name" } }
                    td { b { "Last commit date" } }
                    td { b { "Author" } }
                }
            }
            tbody {
                @for reference in refs {
                    tr {
                        td { ((fmt.ref_name)(reference.full_name())) }
                        td { ((fmt.time)(reference.commit().author_time())) }
                        td { (reference.commit().author_name()) }
                    }
                }
            }
        }
    }
}
