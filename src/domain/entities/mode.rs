use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Server,
    Client,
}

/// How a paged client list lays out fetched pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLayout {
    /// Each fetch replaces the visible page.
    Replace,
    /// Fetched pages are kept by page number and shown in order.
    Positional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchMode {
    ServerData,
    ClientPaged { layout: PageLayout },
    ClientInfinite,
}

impl FetchMode {
    pub fn is_infinite(self) -> bool {
        matches!(self, FetchMode::ClientInfinite)
    }

    pub fn layout(self) -> Option<PageLayout> {
        match self {
            FetchMode::ClientPaged { layout } => Some(layout),
            _ => None,
        }
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMode::ServerData => write!(f, "server-data"),
            FetchMode::ClientPaged {
                layout: PageLayout::Replace,
            } => write!(f, "client-paged"),
            FetchMode::ClientPaged {
                layout: PageLayout::Positional,
            } => write!(f, "client-paged-positional"),
            FetchMode::ClientInfinite => write!(f, "client-infinite"),
        }
    }
}
