//! Files page generation

use maud::{Markup, html};

use crate::pages::Formatters;
use crate::tree::TreeEntry;

/// Renders the flat file listing of the HEAD tree
pub fn render(entries: &[TreeEntry], fmt: &Formatters) -> Markup {
    html! {
        table id="files" {
            thead {
                tr {
                    td { b { "Mode" } }
                    td { b { "Name" } }
                    td class="num" align="right" { b { "Size" } }
                }
            }
            tbody {
                @for entry in entries {
                    tr {
                        td { (entry.mode().as_symbolic()) }
                        td { (entry.name()) }
                        td class="num" align="right" { ((fmt.size)(entry.size_bytes())) }
                    }
                }
            }
        }
    }
}
