use dioxus::prelude::*;
use ui::views::DeviceFoldersView;

#[component]
pub fn DeviceFolders() -> Element {
    rsx! {
        DeviceFoldersView {}
    }
}
