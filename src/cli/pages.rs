use std::fmt::Display;

/// The unique string token that identifies the historical dashboard
pub static DASHBOARD: &str = "dashboard";

/// The unique string token that identifies batch prediction
pub static BATCH: &str = "batch";

/// The unique string token that identifies live prediction
pub static LIVE: &str = "live";

/// The unique string token that identifies the about page
pub static ABOUT: &str = "about";

/// Available pages
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum Page {
    /// KPIs, distribution, sample rows, word cloud and bigrams for the historical dataset
    #[default]
    Dashboard,

    /// Upload a table, predict every row and export the result
    Batch,

    /// Classify one piece of text
    Live,

    /// Model status and settings
    About,
}

impl Page {
    /// Every page, in menu order
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Batch, Page::Live, Page::About];
}

impl TryFrom<&str> for Page {
    type Error = PageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Page::ALL
            .into_iter()
            .find(|page| page.to_string() == value)
            .ok_or_else(|| PageError::Unknown(value.to_string()))
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Page::Dashboard => DASHBOARD,
            Page::Batch => BATCH,
            Page::Live => LIVE,
            Page::About => ABOUT,
        };

        write!(f, "{}", name)
    }
}

/// Page Error
#[derive(thiserror::Error, Debug)]
pub enum PageError {
    /// No page found for the given string
    #[error("no page found for {0}")]
    Unknown(String),
}
