use crate::domain::entities::mode::FetchMode;

/// Decides whether the sentinel after the list should pull the next page.
pub struct SentinelTrigger;

impl SentinelTrigger {
    pub fn is_armed(mode: FetchMode, has_more: bool) -> bool {
        mode.is_infinite() && has_more
    }

    pub fn should_fire(mode: FetchMode, has_more: bool, loading: bool, intersecting: bool) -> bool {
        intersecting && !loading && Self::is_armed(mode, has_more)
    }
}
