//! Loading placeholder view
//!
//! A full-height container centering one spinning ring. Shown while a route
//! segment prepares its content; it takes no input besides the variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ROOT_CLASSES: &str = "min-h-screen flex items-center justify-center";
const ADMIN_BACKDROP_CLASSES: &str = "bg-gradient-to-br from-gray-950 via-black to-indigo-950";
const SPINNER_CLASSES: &str = "h-8 w-8 animate-spin rounded-full border-2 border-white/30 border-t-white";

/// Inline rules for the utility classes above, so the page needs no stylesheet.
const INLINE_CSS: &str = "\
body{margin:0}\
.min-h-screen{min-height:100vh}\
.flex{display:flex}\
.items-center{align-items:center}\
.justify-center{justify-content:center}\
.bg-gradient-to-br{background-image:linear-gradient(to bottom right,#030712,#000000,#1e1b4b)}\
.h-8{height:2rem}\
.w-8{width:2rem}\
.rounded-full{border-radius:9999px}\
.border-2{border-width:2px;border-style:solid}\
.border-white\\/30{border-color:rgba(255,255,255,0.3)}\
.border-t-white{border-top-color:#ffffff}\
.animate-spin{animation:spin 1s linear infinite}\
@keyframes spin{to{transform:rotate(360deg)}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingVariant {
    #[default]
    Neutral,
    Admin,
}

impl LoadingVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadingVariant::Neutral => "neutral",
            LoadingVariant::Admin => "admin",
        }
    }

    fn root_classes(&self) -> String {
        match self {
            LoadingVariant::Neutral => ROOT_CLASSES.to_string(),
            LoadingVariant::Admin => format!("{ROOT_CLASSES} {ADMIN_BACKDROP_CLASSES}"),
        }
    }
}

impl fmt::Display for LoadingVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadingVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neutral" | "main" => Ok(LoadingVariant::Neutral),
            "admin" => Ok(LoadingVariant::Admin),
            other => Err(format!("Unknown loading variant '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadingView {
    variant: LoadingVariant,
}

impl LoadingView {
    pub fn new(variant: LoadingVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> LoadingVariant {
        self.variant
    }

    /// HTML fragment: one root container holding one spinner.
    pub fn render(&self) -> String {
        format!(
            r#"<div class="{}" data-loading="{}"><div class="{}" role="status" aria-label="Loading"></div></div>"#,
            self.variant.root_classes(),
            self.variant,
            SPINNER_CLASSES,
        )
    }

    /// Standalone page around [`LoadingView::render`].
    pub fn render_document(&self, title: &str) -> String {
        format!(
            "<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\"/>\n  \
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n  \
             <title>{}</title>\n  <style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>",
            escape_html(title),
            INLINE_CSS,
            self.render(),
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
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
    out
}
