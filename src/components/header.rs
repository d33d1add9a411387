//! Repository header and navigation components

use maud::{Markup, html};

use crate::pages::PageContext;

/// Renders the header shared by the log, files and refs pages
///
/// Shows the logo (linking one level up, to the index), the repository
/// name and description, an optional clone URL row and the navigation bar.
///
/// # Arguments
///
/// * `ctx`: Header context of the page being rendered
///
/// # Returns
///
/// Header table markup
pub fn repo_header(ctx: &PageContext) -> Markup {
    let prefix = ctx.relative_path_prefix.as_str();

    html! {
        table {
            tr {
                td {
                    a href=(format!("../{}", prefix)) {
                        img src=(format!("{}logo.png", prefix)) alt="" width="32" height="32";
                    }
                }
                td {
                    h1 { (ctx.stripped_name) }
                    span class="desc" { (ctx.description) }
                }
            }
            @if !ctx.clone_url.is_empty() {
                tr class="url" {
                    td {}
                    td {
                        "git clone "
                        a href=(ctx.clone_url) { (ctx.clone_url) }
                    }
                }
            }
            tr {
                td {}
                td { (navigation(ctx)) }
            }
        }
    }
}

/// Renders the header of the cross-repository index page
pub fn index_header() -> Markup {
    html! {
        table {
            tr {
                td { img src="logo.png" alt="" width="32" height="32"; }
                td { span class="desc" { "Repositories" } }
            }
            tr {
                td {}
                td {}
            }
        }
    }
}

/// Navigation links in display order, as `(href, label)` pairs
///
/// README, submodules and license links only appear when the file exists
/// at HEAD.
pub fn nav_links(ctx: &PageContext) -> Vec<(String, &'static str)> {
    let prefix = ctx.relative_path_prefix.as_str();
    let mut links = Vec::with_capacity(6);

    if let Some(readme) = &ctx.readme_link {
        links.push((format!("{}{}", prefix, readme), "README"));
    }
    links.push((format!("{}log.html", prefix), "Log"));
    links.push((format!("{}files.html", prefix), "Files"));
    links.push((format!("{}refs.html", prefix), "Refs"));
    if let Some(submodules) = &ctx.submodules_link {
        links.push((format!("{}{}", prefix, submodules), "Submodules"));
    }
    if let Some(license) = &ctx.license_link {
        links.push((format!("{}{}", prefix, license), "LICENSE"));
    }

    links
}

fn navigation(ctx: &PageContext) -> Markup {
    html! {
        @for (idx, (href, label)) in nav_links(ctx).iter().enumerate() {
            @if idx > 0 { " | " }
            a href=(href) { (label) }
        }
    }
}
