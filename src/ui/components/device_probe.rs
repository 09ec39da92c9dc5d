use dioxus::prelude::*;
use log::debug;

use crate::domain::entities::device::DeviceClass;

/// Device class of the nearest [`DeviceProbe`], shared through context.
#[derive(Clone, Copy, PartialEq)]
pub struct ViewportClass(pub Signal<DeviceClass>);

/// Device class from the nearest probe, or `fallback` when no probe is mounted.
/// Subscribes the caller to class changes.
pub fn use_device_class(fallback: DeviceClass) -> DeviceClass {
    try_use_context::<ViewportClass>()
        .map(|ViewportClass(class)| class())
        .unwrap_or(fallback)
}

/// Measures its own width and publishes the matching [`DeviceClass`] to the
/// lists below it.
#[component]
pub fn DeviceProbe(#[props(default)] initial: DeviceClass, children: Element) -> Element {
    let ViewportClass(mut class) = use_context_provider(|| ViewportClass(Signal::new(initial)));

    rsx! {
        div {
            class: "ecom-device-probe",
            style: "width: 100%;",
            onresize: move |event: Event<ResizeData>| {
                let Ok(size) = event.get_border_box_size() else {
                    return;
                };
                let next = DeviceClass::from_width(size.width);
                if *class.peek() != next {
                    debug!("viewport {}px -> {next:?}", size.width);
                    class.set(next);
                }
            },
            {children}
        }
    }
}
