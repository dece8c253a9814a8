use dioxus::prelude::*;

/// Previous / numbered pages / next. Render only when the list is paged.
#[component]
pub fn PaginationBar(current: usize, page_count: usize, on_select: EventHandler<usize>) -> Element {
    rsx! {
        nav {
            class: "pagination",
            button {
                class: "pagination__step",
                disabled: current <= 1,
                onclick: move |_| on_select.call(current.saturating_sub(1)),
                "Previous"
            }
            for page in 1..=page_count {
                button {
                    key: "{page}",
                    class: if page == current { "pagination__page pagination__page--active" } else { "pagination__page" },
                    onclick: move |_| on_select.call(page),
                    "{page}"
                }
            }
            button {
                class: "pagination__step",
                disabled: current >= page_count,
                onclick: move |_| on_select.call(current + 1),
                "Next"
            }
        }
    }
}
