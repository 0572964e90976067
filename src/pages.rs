//! Server-side HTML for every page of the site.
//!
//! ## Pages
//!
//! - **Landing** (`/`): carousel of mobile photos, three per slide
//! - **Portfolio** (`/portfolio`): desktop and mobile grids with category filters
//! - **View** (`/view/{variant}/{filename}`): one photo, back link, previous/next
//! - **About** (`/about`): `about.md` from the site root, or a short default
//! - **Contact** (`/contact`): form posted straight to the form service
//!
//! ## CSS and JavaScript
//!
//! Embedded at compile time and inlined into every page:
//! - `static/style.css`: base styles (theme colors injected from config)
//! - `static/site.js`: carousel and portfolio filter
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolation is escaped, filenames included.

use crate::config::{self, SiteConfig};
use crate::listing::{self, Portfolio, ReturnTo};
use crate::naming::Category;
use crate::types::{PhotoEntry, Variant};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// Photos per carousel slide.
pub const CAROUSEL_GROUP: usize = 3;

const NAV_LINKS: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/portfolio", "Portfolio"),
    ("/about", "About"),
    ("/contact", "Contact"),
];

/// Render markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

fn page_css(config: &SiteConfig) -> String {
    format!("{}\n\n{}", config::generate_theme_css(&config.theme), CSS_STATIC)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    config: &SiteConfig,
    title: &str,
    current_path: &str,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    let full_title = if title.is_empty() {
        config.site.title.clone()
    } else {
        format!("{} · {}", title, config.site.title)
    };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                style { (PreEscaped(page_css(config))) }
            }
            body class=[body_class] {
                (site_header(config, current_path))
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

fn site_header(config: &SiteConfig, current_path: &str) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (config.site.title) }
            nav.site-nav {
                ul {
                    @for (href, label) in NAV_LINKS {
                        @let is_current = *href == current_path;
                        li class=[is_current.then_some("current")] {
                            a href=(href) { (label) }
                        }
                    }
                }
            }
        }
    }
}

fn photo_img(variant: Variant, filename: &str, eager: bool) -> Markup {
    let loading = if eager { "eager" } else { "lazy" };
    html! {
        img src=(listing::photo_url(variant, filename)) alt=(filename) loading=(loading);
    }
}

fn gallery(variant: Variant, entries: &[PhotoEntry]) -> Markup {
    html! {
        div class={ "gallery gallery-" (variant) } data-variant=(variant) {
            @for entry in entries {
                a.gallery-item
                    href={ (listing::view_url(variant, &entry.filename)) (ReturnTo::Portfolio.query()) }
                    data-category=(entry.category)
                {
                    (photo_img(variant, &entry.filename, false))
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Landing page: carousel of mobile photos.
pub fn render_index(config: &SiteConfig, photos: &[String]) -> Markup {
    let content = html! {
        main.index-page {
            @if !config.site.tagline.is_empty() {
                p.tagline { (config.site.tagline) }
            }
            @if photos.is_empty() {
                p.empty { "No photos yet." }
            } @else {
                div.carousel-container {
                    button.carousel-button.prev #prevButton type="button" aria-label="Previous" { "‹" }
                    div.carousel {
                        @for (idx, group) in photos.chunks(CAROUSEL_GROUP).enumerate() {
                            div.image-trio {
                                @for filename in group {
                                    div.image-wrapper {
                                        a href=(listing::view_url(Variant::Mobile, filename)) {
                                            (photo_img(Variant::Mobile, filename, idx == 0))
                                        }
                                    }
                                }
                            }
                        }
                    }
                    button.carousel-button.next #nextButton type="button" aria-label="Next" { "›" }
                }
            }
        }
    };
    base_document(config, "", "/", Some("page-index"), content)
}

/// Portfolio page: both variants, filterable by category.
pub fn render_portfolio(config: &SiteConfig, portfolio: &Portfolio) -> Markup {
    let content = html! {
        main.portfolio-page {
            h1 { "Portfolio" }
            div.category-filters role="group" aria-label="Filter by category" {
                button.filter-button.active type="button" data-filter=(Category::All) {
                    (Category::All.label())
                }
                @for category in Category::CANDIDATES {
                    button.filter-button type="button" data-filter=(category) {
                        (category.label())
                    }
                }
            }
            (gallery(Variant::Desktop, &portfolio.desktop))
            (gallery(Variant::Mobile, &portfolio.mobile))
        }
    };
    base_document(config, "Portfolio", "/portfolio", Some("page-portfolio"), content)
}

/// About page. `body_html` is pre-rendered markdown; `None` shows a default.
pub fn render_about(config: &SiteConfig, body_html: Option<&str>) -> Markup {
    let content = html! {
        main.about-page {
            @if let Some(body) = body_html {
                article.about-content { (PreEscaped(body)) }
            } @else {
                article.about-content {
                    h1 { "About" }
                    p { "Photography by " (config.site.title) "." }
                }
            }
        }
    };
    base_document(config, "About", "/about", Some("page-about"), content)
}

/// Contact page. The form posts to the external service, never to us.
///
/// `site.js` submits it in the page and reports the outcome in
/// `#formResult`; without script it is a plain POST.
pub fn render_contact(config: &SiteConfig) -> Markup {
    let content = html! {
        main.contact-page {
            h1 { "Contact" }
            form.contact-form #contactForm action=(config.contact.form_action) method="POST" {
                input type="hidden" name="access_key" value=(config.access_key);
                input type="hidden" name="subject" value={ "New message from " (config.site.title) };
                input type="checkbox" name="botcheck" class="hidden" style="display: none;";
                label for="name" { "Name" }
                input #name type="text" name="name" required;
                label for="email" { "Email" }
                input #email type="email" name="email" required;
                label for="message" { "Message" }
                textarea #message name="message" rows="6" required {}
                button type="submit" { "Send" }
            }
            div.form-result #formResult role="status" aria-live="polite" {}
        }
    };
    base_document(config, "Contact", "/contact", Some("page-contact"), content)
}

/// Single photo view.
///
/// `prev` and `next` come from the variant's public listing and are absent
/// when the photo is not part of it.
pub fn render_view(
    config: &SiteConfig,
    variant: Variant,
    filename: &str,
    back: ReturnTo,
    prev: Option<&str>,
    next: Option<&str>,
) -> Markup {
    let content = html! {
        main.view-page {
            nav.view-nav {
                a.back-link href=(back.href()) { "← Back" }
                @if let Some(p) = prev {
                    a.prev-link href={ (listing::view_url(variant, p)) (back.query()) } { "Previous" }
                }
                @if let Some(n) = next {
                    a.next-link href={ (listing::view_url(variant, n)) (back.query()) } { "Next" }
                }
            }
            figure.view-figure {
                (photo_img(variant, filename, true))
                figcaption { (filename) }
            }
        }
    };
    base_document(config, filename, "", Some("page-view"), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::categorize;

    fn entry(variant: Variant, filename: &str) -> PhotoEntry {
        PhotoEntry {
            filename: filename.to_string(),
            variant,
            category: categorize(filename),
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn every_page_has_nav_and_theme() {
        let config = SiteConfig::default();
        let html = render_about(&config, None).into_string();
        for (href, label) in NAV_LINKS {
            assert!(html.contains(&format!("href=\"{href}\"")));
            assert!(html.contains(label));
        }
        assert!(html.contains("--color-bg"));
    }

    #[test]
    fn nav_marks_current_page() {
        let config = SiteConfig::default();
        let html = render_portfolio(
            &config,
            &Portfolio {
                desktop: vec![],
                mobile: vec![],
            },
        )
        .into_string();
        assert!(html.contains(r#"<li class="current"><a href="/portfolio">"#));
    }

    #[test]
    fn index_groups_photos_in_trios() {
        let config = SiteConfig::default();
        let photos = names(&["1.jpg", "2.jpg", "3.jpg", "4.jpg"]);
        let html = render_index(&config, &photos).into_string();

        assert_eq!(html.matches("class=\"image-trio\"").count(), 2);
        assert!(html.contains("/photos/mobile/4.jpg"));
        assert!(html.contains("/view/mobile/1.jpg"));
        assert!(html.contains("prevButton"));
    }

    #[test]
    fn index_without_photos() {
        let config = SiteConfig::default();
        let html = render_index(&config, &[]).into_string();
        assert!(html.contains("No photos yet."));
        assert!(!html.contains(r#"class="image-trio""#));
    }

    #[test]
    fn portfolio_tags_items_with_category() {
        let config = SiteConfig::default();
        let portfolio = Portfolio {
            desktop: vec![entry(Variant::Desktop, "Supercars-001-red.jpg")],
            mobile: vec![entry(Variant::Mobile, "random.jpg")],
        };
        let html = render_portfolio(&config, &portfolio).into_string();

        assert!(html.contains(r#"data-category="supercars""#));
        assert!(html.contains(r#"data-category="all""#));
        assert!(html.contains("/view/desktop/Supercars-001-red.jpg?from=portfolio"));
        assert!(html.contains("/photos/mobile/random.jpg"));
        for category in Category::CANDIDATES {
            assert!(html.contains(&format!("data-filter=\"{category}\"")));
        }
    }

    #[test]
    fn filenames_are_escaped() {
        let config = SiteConfig::default();
        let html = render_view(
            &config,
            Variant::Desktop,
            "<script>x</script>.jpg",
            ReturnTo::Home,
            None,
            None,
        )
        .into_string();
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn view_back_link_and_neighbors() {
        let config = SiteConfig::default();
        let html = render_view(
            &config,
            Variant::Mobile,
            "b.jpg",
            ReturnTo::Portfolio,
            Some("a.jpg"),
            None,
        )
        .into_string();

        assert!(html.contains(r#"class="back-link" href="/portfolio""#));
        assert!(html.contains("/view/mobile/a.jpg?from=portfolio"));
        assert!(!html.contains(r#"class="next-link""#));
        assert!(html.contains(r#"src="/photos/mobile/b.jpg""#));
    }

    #[test]
    fn contact_carries_access_key_and_action() {
        let config = SiteConfig {
            access_key: "key-123".to_string(),
            ..SiteConfig::default()
        };
        let html = render_contact(&config).into_string();
        assert!(html.contains(r#"name="access_key" value="key-123""#));
        assert!(html.contains(r#"action="https://api.web3forms.com/submit""#));
    }

    #[test]
    fn contact_has_in_page_result_area() {
        let html = render_contact(&SiteConfig::default()).into_string();
        assert!(html.contains(r#"id="contactForm""#));
        assert!(html.contains(r#"id="formResult""#));
        assert!(html.contains(r#"class="form-result""#));
        assert!(html.contains("formResult.textContent"));
    }

    #[test]
    fn contact_with_unset_key_has_empty_value() {
        let config = SiteConfig::default();
        let html = render_contact(&config).into_string();
        assert!(html.contains(r#"name="access_key" value="""#));
    }

    #[test]
    fn about_renders_markdown() {
        let config = SiteConfig::default();
        let body = markdown_to_html("# Hi\n\nI shoot *cars*.");
        let html = render_about(&config, Some(&body)).into_string();
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<em>cars</em>"));
    }

    #[test]
    fn tagline_only_when_set() {
        let mut config = SiteConfig::default();
        assert!(
            !render_index(&config, &[])
                .into_string()
                .contains(r#"class="tagline""#)
        );
        config.site.tagline = "Fast things, still".to_string();
        assert!(
            render_index(&config, &[])
                .into_string()
                .contains("Fast things, still")
        );
    }
}
