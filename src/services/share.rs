// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Share links for a recipe.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use urlencoding::encode;

/// Ready-to-open share targets for one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ShareLinks {
    /// Canonical page of the recipe on the frontend
    pub url: String,
    pub text: String,
    pub facebook: String,
    pub twitter: String,
    pub whatsapp: String,
    pub email: String,
}

impl ShareLinks {
    pub fn new(frontend_url: &str, recipe_id: u64, title: &str) -> Self {
        let url = format!("{}/recipe/{}", frontend_url.trim_end_matches('/'), recipe_id);
        let text = format!("Check out this amazing recipe: {}", title);

        let subject = format!("Recipe: {}", title);
        let body = format!(
            "Hi!\n\nI found this amazing recipe and wanted to share it with you:\n\n{}\n\n{}\n\n{}\n\nEnjoy cooking!",
            title, text, url
        );

        Self {
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={}", encode(&url)),
            twitter: format!(
                "https://twitter.com/intent/tweet?text={}&url={}",
                encode(&text),
                encode(&url)
            ),
            whatsapp: format!("https://wa.me/?text={}", encode(&format!("{} {}", text, url))),
            email: format!("mailto:?subject={}&body={}", encode(&subject), encode(&body)),
            url,
            text,
        }
    }
}
