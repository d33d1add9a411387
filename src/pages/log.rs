//! Log page generation

use maud::{Markup, html};

use crate::git::CommitRecord;
use crate::pages::Formatters;

/// Renders the commit log table
///
/// One row per commit in the given order, showing date, message, author
/// and the diff statistic against the first parent.
///
/// # Arguments
///
/// * `commits`: Commits, most recent first
/// * `fmt`: Formatting functions for timestamps and counts
///
/// # Returns
///
/// Log table markup
pub fn render(commits: &[CommitRecord], fmt: &Formatters) -> Markup {
    html! {
        table id="log" {
            thead {
                tr {
                    td { b { "Date" } }
                    td { b { "Commit message" } }
                    td { b { "Author" } }
                    td class="num" align="right" { b { "Files" } }
                    td class="num" align="right" { b { "+" } }
                    td class="num" align="right" { b { "-" } }
                }
            }
            tbody {
                @for commit in commits {
                    @let stat = commit.diff_stat();
                    tr {
                        td { ((fmt.time)(commit.author_time())) }
                        td { ((fmt.message)(commit.raw_message())) }
                        td { (commit.author_name()) }
                        td class="num" align="right" { ((fmt.count)(stat.files_changed)) }
                        td class="num" align="right" { "+" ((fmt.count)(stat.lines_added)) }
                        td class="num" align="right" { "-" ((fmt.count)(stat.lines_deleted)) }
                    }
                }
            }
        }
    }
}
