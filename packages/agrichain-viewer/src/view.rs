//! HTML presentation layer.
//!
//! Pages are rendered from a [`LookupSession`] and a [`Theme`]. Nothing here
//! touches the network; swapping the theme or the whole module leaves the
//! query pipeline untouched.

use agrichain_types::{display_or_na, parse_detail_blob, DetailEntry, ProductRecord, NO_DETAILS};
use std::borrow::Cow;

use crate::lookup::LookupSession;

/// Visual theme. Only styling differs between themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    AgriChain,
    Plain,
}

impl Theme {
    /// Unknown names fall back to the default theme.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "plain" | "minimal" => Theme::Plain,
            _ => Theme::AgriChain,
        }
    }

    fn stylesheet(self) -> &'static str {
        match self {
            Theme::AgriChain => AGRICHAIN_CSS,
            Theme::Plain => PLAIN_CSS,
        }
    }
}

const AGRICHAIN_CSS: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:linear-gradient(#f0fdf4,#fff);color:#1f2937}\
nav{background:#fff;box-shadow:0 1px 4px rgba(0,0,0,.1);padding:0 2rem;display:flex;justify-content:space-between;height:4rem;align-items:center}\
nav .brand{font-size:1.25rem;font-weight:700;color:#15803d;text-decoration:none}\
nav a{margin-left:2rem;color:#4b5563;text-decoration:none}nav a.active{color:#16a34a;border-bottom:2px solid #22c55e}\
main{max-width:56rem;margin:0 auto;padding:3rem 1rem}h1{color:#166534}\
.card{background:#fff;border-radius:.75rem;box-shadow:0 4px 12px rgba(0,0,0,.08);padding:2rem;margin-bottom:2rem}\
.features{display:grid;grid-template-columns:repeat(auto-fit,minmax(14rem,1fr));gap:2rem}\
.features .card{border-top:4px solid #22c55e}\
form{display:flex;gap:1rem}input{flex:1;padding:.75rem;border:1px solid #d1d5db;border-radius:.5rem;background:#f9fafb}\
button,.cta{background:#16a34a;color:#fff;font-weight:700;border:0;border-radius:.5rem;padding:.75rem 1.5rem;cursor:pointer;text-decoration:none}\
button:disabled{opacity:.7;cursor:not-allowed}\
.samples a{display:inline-block;margin:.5rem .5rem 0 0;padding:.25rem .75rem;background:#dcfce7;color:#166534;border-radius:9999px;text-decoration:none}\
.error{background:#fef2f2;border-left:4px solid #ef4444;color:#b91c1c;padding:1rem;border-radius:.375rem;margin-bottom:2rem}\
.result header{background:#16a34a;color:#fff;padding:1rem 1.5rem;border-radius:.75rem .75rem 0 0}\
.result .body{padding:1.5rem}.field-grid{display:grid;grid-template-columns:1fr 1fr;gap:1.5rem}\
.field{background:#f0fdf4;border-radius:.5rem;padding:1rem}.field h3{color:#166534;margin:0 0 .5rem}\
.entry{background:#f9fafb;border:1px solid #e5e7eb;border-radius:.5rem;padding:1rem;margin-top:1rem;display:grid;grid-template-columns:1fr 1fr;gap:.5rem}\
.entry .label{font-size:.875rem;color:#6b7280;display:block}.entry .value{font-weight:500;color:#111827}\
.verified{margin-top:1.5rem;padding-top:1.5rem;border-top:1px solid #e5e7eb;color:#15803d}\
footer{background:#166534;color:#dcfce7;padding:2rem;text-align:center;margin-top:4rem}";

const PLAIN_CSS: &str = "\
body{margin:0 auto;max-width:48rem;padding:1rem;font-family:sans-serif}\
nav a{margin-right:1rem}.error{color:#b00020;font-weight:bold}\
.entry{border:1px solid #ccc;padding:.5rem;margin:.5rem 0}.entry .label{color:#555;margin-right:.5rem}\
.samples a{margin-right:.5rem}";

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Home,
    Track,
}

fn layout(theme: Theme, active: Tab, title: &str, content: &str) -> String {
    let home_class = if active == Tab::Home { "active" } else { "" };
    let track_class = if active == Tab::Track { "active" } else { "" };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title} | AgriChain</title>\n<style>{css}</style>\n</head>\n<body>\n\
<nav><a class=\"brand\" href=\"/\">AgriChain</a><div>\
<a class=\"{home_class}\" href=\"/\">Home</a>\
<a class=\"{track_class}\" href=\"/track\">Track Product</a></div></nav>\n\
<main>\n{content}</main>\n\
<footer><p>AgriChain uses blockchain technology to bring transparency and traceability to the agricultural supply chain.</p></footer>\n\
</body>\n</html>\n",
        title = escape(title),
        css = theme.stylesheet(),
    )
}

/// Landing page.
pub fn render_home(theme: Theme) -> String {
    let content = "\
<section class=\"card\" style=\"text-align:center\">\
<h1>Transparent Food Supply Chain</h1>\
<p>Track the journey of your food from farm to table with blockchain-verified transparency.</p>\
<a class=\"cta\" href=\"/track\">Track Your Product</a></section>\n\
<section class=\"features\">\
<div class=\"card\"><h3>Blockchain Verified</h3><p>Every step of the supply chain is recorded on the Ethereum blockchain, ensuring data integrity and immutability.</p></div>\
<div class=\"card\"><h3>Sustainable Sourcing</h3><p>Track products from sustainable and ethical sources, supporting environmentally responsible farming practices.</p></div>\
<div class=\"card\"><h3>Complete Traceability</h3><p>Access detailed information about ingredients, processing methods, and the journey from farm to shelf.</p></div>\
</section>\n\
<section class=\"card\"><h2>How It Works</h2><ol>\
<li><strong>Enter Product ID</strong>: find the unique product ID on your product packaging.</li>\
<li><strong>Verify on Blockchain</strong>: the viewer retrieves verified data from the Ethereum blockchain.</li>\
<li><strong>View Complete History</strong>: see detailed information about ingredients, sources, and processing.</li>\
</ol></section>\n";
    layout(theme, Tab::Home, "Home", content)
}

/// Tracking page: search form, samples, error banner, and result panel.
pub fn render_track(theme: Theme, session: &LookupSession, sample_ids: &[String]) -> String {
    let mut content = String::new();
    content.push_str(
        "<h1>Track Your Product</h1>\
<p>Enter a Product ID to view its complete supply chain details.</p>\n",
    );
    content.push_str(&search_form(session, sample_ids));
    if let Some(error) = session.last_error() {
        content.push_str(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>\n",
            escape(error)
        ));
    }
    if let Some(record) = session.last_result() {
        content.push_str(&result_panel(record));
    }
    layout(theme, Tab::Track, "Track Product", &content)
}

fn search_form(session: &LookupSession, sample_ids: &[String]) -> String {
    // The button disables itself on submit so a second trigger cannot fire
    // while the lookup is in flight.
    let (disabled, label) = if session.is_loading() {
        (" disabled", "Loading...")
    } else {
        ("", "Get Product Details")
    };
    let samples: String = sample_ids
        .iter()
        .map(|id| {
            format!(
                "<a href=\"/track?sample={}\">{}</a>",
                urlencoding::encode(id),
                escape(id)
            )
        })
        .collect();
    format!(
        "<section class=\"card\">\
<form method=\"get\" action=\"/track\" \
onsubmit=\"var b=this.querySelector('button');b.disabled=true;b.textContent='Loading...';\">\
<input type=\"text\" name=\"product_id\" value=\"{query}\" placeholder=\"Enter Product ID (e.g., P3001)\" autofocus>\
<button type=\"submit\"{disabled}>{label}</button></form>\
<div class=\"samples\"><p>Try these sample product IDs:</p>{samples}</div></section>\n",
        query = escape(session.query_text()),
    )
}

fn result_panel(record: &ProductRecord) -> String {
    let details = if record.has_details() {
        let entries = parse_detail_blob(&record.detail_blob);
        if entries.is_empty() {
            no_details()
        } else {
            entries.iter().map(detail_entry).collect()
        }
    } else {
        no_details()
    };
    format!(
        "<section class=\"card result\"><header><h2>Product Details</h2></header><div class=\"body\">\
<div class=\"field-grid\">\
<div class=\"field\"><h3>Product Name</h3><p class=\"product-name\">{name}</p></div>\
<div class=\"field\"><h3>Batch ID</h3><p class=\"batch-id\">{batch}</p></div></div>\
<h3>Ingredient Details</h3>{details}\
<div class=\"verified\"><strong>Blockchain Verified</strong>\
<p>This information has been verified and stored on the Ethereum blockchain.</p></div>\
</div></section>\n",
        name = escape(display_or_na(&record.name)),
        batch = escape(display_or_na(&record.batch_id)),
    )
}

fn detail_entry(entry: &DetailEntry) -> String {
    let fields: String = entry
        .fields
        .iter()
        .map(|field| {
            format!(
                "<div><span class=\"label\">{}</span><span class=\"value\">{}</span></div>",
                escape(&field.label),
                escape(field.value_or_empty()),
            )
        })
        .collect();
    format!("<div class=\"entry\">{fields}</div>")
}

fn no_details() -> String {
    format!("<p class=\"no-details\">{NO_DETAILS}</p>")
}
