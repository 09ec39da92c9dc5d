use crate::domain::entities::device::DeviceClass;
use crate::domain::entities::mode::{FetchMode, PageLayout, SourceKind};

/// Pure: the same inputs always pick the same mode.
pub fn select_mode(kind: SourceKind, infinite_append: bool, device: DeviceClass) -> FetchMode {
    match (kind, device) {
        (SourceKind::Server, _) => FetchMode::ServerData,
        (SourceKind::Client, DeviceClass::Mobile) if infinite_append => FetchMode::ClientInfinite,
        (SourceKind::Client, DeviceClass::Mobile | DeviceClass::Tablet) => FetchMode::ClientPaged {
            layout: PageLayout::Positional,
        },
        (SourceKind::Client, DeviceClass::Desktop) => FetchMode::ClientPaged {
            layout: PageLayout::Replace,
        },
    }
}
