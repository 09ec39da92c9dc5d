use serde::{Deserialize, Serialize};

pub const MOBILE_BREAKPOINT: f64 = 768.0;
pub const TABLET_BREAKPOINT: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl DeviceClass {
    pub fn from_width(width: f64) -> Self {
        if width < MOBILE_BREAKPOINT {
            DeviceClass::Mobile
        } else if width < TABLET_BREAKPOINT {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }

    /// Best guess when only a request header is available (server rendering).
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let Some(user_agent) = user_agent else {
            return DeviceClass::Desktop;
        };
        let ua = user_agent.to_ascii_lowercase();
        if ua.contains("ipad") || ua.contains("tablet") {
            return DeviceClass::Tablet;
        }
        if ua.contains("iphone") || ua.contains("android") || ua.contains("mobile") {
            return DeviceClass::Mobile;
        }
        DeviceClass::Desktop
    }
}
