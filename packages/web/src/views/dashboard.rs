use dioxus::prelude::*;
use ui::views::DeviceRegistryView;

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        DeviceRegistryView {}
    }
}
