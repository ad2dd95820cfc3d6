use dioxus::prelude::*;

#[component]
pub fn Shell(children: Element) -> Element {
    rsx! {
        div { class: "app",
            a { class: "skip-link", href: "#main-content", "Przejdź do treści" }
            header { class: "app-header", role: "banner",
                div { class: "container",
                    h1 { class: "app-title", tabindex: 0, "Ranking Ofert Pożyczek" }
                    p { class: "app-subtitle", tabindex: 0,
                        "Znajdź najlepszą ofertę dopasowaną do Twoich potrzeb"
                    }
                }
            }
            main { id: "main-content", class: "container app-main", {children} }
            footer { class: "app-footer", role: "contentinfo",
                div { class: "container",
                    p { "Ranking Ofert Pożyczek" }
                }
            }
        }
    }
}
