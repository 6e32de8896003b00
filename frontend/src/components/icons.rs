use crate::navigation::NavIcon;
use leptos::prelude::*;

/// 24x24 描边图标的路径数据
fn icon_path(icon: NavIcon) -> &'static str {
    match icon {
        NavIcon::Home => "M3 12l9-9 9 9M5 10v10h5v-6h4v6h5V10",
        NavIcon::Search => "M21 21l-5.2-5.2M17 10.5a6.5 6.5 0 11-13 0 6.5 6.5 0 0113 0z",
        NavIcon::GenerateKeys => "M15 7a2 2 0 012 2m4 0a6 6 0 01-7.7 5.7L11 17H9v2H7v2H3v-4l5.3-5.3A6 6 0 1121 9z",
        NavIcon::Transactions => "M4 7h16M4 7l4-4M4 7l4 4M20 17H4m16 0l-4-4m4 4l-4 4",
        NavIcon::Reset => "M4 4v5h5M20 20v-5h-5M5.1 15a8 8 0 0014.3 1M18.9 9A8 8 0 004.6 8",
        NavIcon::People => "M17 20h5v-2a3 3 0 00-5.4-1.8M9 20H2v-2a3 3 0 015.4-1.8M15 7a3 3 0 11-6 0 3 3 0 016 0z",
        NavIcon::Upload => "M4 16v2a2 2 0 002 2h12a2 2 0 002-2v-2M12 4v12M7 9l5-5 5 5",
        NavIcon::Providers => "M4 6h16M4 12h16M4 18h10",
        NavIcon::Inventory => "M20 7l-8-4-8 4m16 0v10l-8 4m8-14l-8 4m0 10L4 17V7m8 14V11",
        NavIcon::Bonus => "M12 8v13m0-13V6a2 2 0 112 2h-2zm0 0V5.5A2.5 2.5 0 109.5 8H12zM5 12h14v9H5z",
        NavIcon::Referral => "M18 9v3m0 0v3m0-3h3m-3 0h-3M13 7a4 4 0 11-8 0 4 4 0 018 0zM3 20a6 6 0 0112 0v1H3v-1z",
        NavIcon::Password => "M12 15v2m-6 4h12a2 2 0 002-2v-6a2 2 0 00-2-2H6a2 2 0 00-2 2v6a2 2 0 002 2zm10-10V7a4 4 0 00-8 0v4h8z",
        NavIcon::Menu => "M4 6h16M4 12h16M4 18h16",
    }
}

#[component]
pub fn Icon(icon: NavIcon, #[prop(optional, into)] class: String) -> impl IntoView {
    let class = if class.is_empty() {
        "h-5 w-5".to_string()
    } else {
        class
    };
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            class=class
            fill="none"
            viewBox="0 0 24 24"
            stroke="currentColor"
            stroke-width="2"
        >
            <path stroke-linecap="round" stroke-linejoin="round" d=icon_path(icon) />
        </svg>
    }
}

#[component]
pub fn LogOut(#[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            class=class
            fill="none"
            viewBox="0 0 24 24"
            stroke="currentColor"
            stroke-width="2"
        >
            <path
                stroke-linecap="round"
                stroke-linejoin="round"
                d="M17 16l4-4m0 0l-4-4m4 4H7m6 4v1a3 3 0 01-3 3H6a3 3 0 01-3-3V7a3 3 0 013-3h4a3 3 0 013 3v1"
            />
        </svg>
    }
}
