use std::fmt;

/// One queued item. Built by `enqueue` once the locator has resolved and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRecord {
    locator: String,
    title: String,
    requester: String,
}

impl SongRecord {
    pub fn new(
        locator: impl Into<String>,
        title: impl Into<String>,
        requester: impl Into<String>,
    ) -> Self {
        Self {
            locator: locator.into(),
            title: title.into(),
            requester: requester.into(),
        }
    }

    /// The opaque source locator (usually a video URL).
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Display title as reported by the resolver.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Name of the user who asked for this song.
    pub fn requester(&self) -> &str {
        &self.requester
    }
}

impl fmt::Display for SongRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - Requested by: {}", self.title, self.requester)
    }
}
