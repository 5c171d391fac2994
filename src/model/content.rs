// src/model/content.rs

use serde::{Deserialize, Serialize};

/// One featured catalog entry shown in the hero carousel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HeroItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_url: String,
    /// Trailer reference as stored: either a bare video id or a full
    /// watch/share URL. May be absent or unresolvable.
    #[serde(default)]
    pub trailer: Option<String>,
}

impl HeroItem {
    /// Resolves the trailer reference to a playable video id.
    ///
    /// Accepts a bare id, a `watch?v=` URL or a short share URL. Returns
    /// None when the reference is missing or cannot be resolved; callers
    /// keep showing the poster in that case.
    pub fn playable_trailer_id(&self) -> Option<String> {
        let raw = self.trailer.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        let id = if let Some(pos) = raw.find("v=") {
            let tail = &raw[pos + 2..];
            tail.split(&['&', '#'][..]).next().unwrap_or("")
        } else if let Some(pos) = raw.find("youtu.be/") {
            let tail = &raw[pos + "youtu.be/".len()..];
            tail.split(&['?', '&', '#'][..]).next().unwrap_or("")
        } else if raw.contains('/') || raw.contains('?') {
            // URL in a shape we do not understand.
            ""
        } else {
            raw
        };
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(trailer: Option<&str>) -> HeroItem {
        HeroItem {
            id: 1,
            title: "Feature".to_string(),
            poster_url: "https://img.example/p.jpg".to_string(),
            trailer: trailer.map(String::from),
        }
    }

    #[test]
    fn resolves_bare_id_and_url_forms() {
        assert_eq!(
            item(Some("dQw4w9WgXcQ")).playable_trailer_id().as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            item(Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"))
                .playable_trailer_id()
                .as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            item(Some("https://youtu.be/dQw4w9WgXcQ?si=xyz"))
                .playable_trailer_id()
                .as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn unresolvable_reference_is_a_silent_none() {
        assert_eq!(item(None).playable_trailer_id(), None);
        assert_eq!(item(Some("")).playable_trailer_id(), None);
        assert_eq!(item(Some("   ")).playable_trailer_id(), None);
        assert_eq!(
            item(Some("https://vimeo.com/123456")).playable_trailer_id(),
            None
        );
    }
}
