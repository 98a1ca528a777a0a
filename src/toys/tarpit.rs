//! Responder that keeps crawlers busy with endless random links.

use crate::handler::{Context, Handler};
use crate::toys::random::random_alphanum;

pub const ABOUT: &str =
    "Lead scanners on a wild goose chase generating random links and always responding with a 200.";

/// Every page has a random title and one link to another random page.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tarpit;

impl Handler for Tarpit {
    fn content(&self, _cx: &Context<'_>) -> String {
        format!(
            "<html><head><title>{}</title></head><body><a href='/{}'>{}</a></body></html>\n",
            random_alphanum(3, 8),
            random_alphanum(3, 8),
            random_alphanum(3, 8),
        )
    }
}
