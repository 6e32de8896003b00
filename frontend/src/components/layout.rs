//! 受保护页面的外壳：侧边栏 + 移动端底部导航

use crate::auth::use_auth;
use crate::components::icons::{Icon, LogOut};
use crate::navigation::{
    BottomAction, BottomEntry, NavEntry, NavMenu, bottom_entries, bottom_nav_index, is_selected,
};
use crate::web::router::use_router;
use leptos::prelude::*;

#[component]
fn NavSection(
    title: &'static str,
    entries: Vec<NavEntry>,
    current_path: Signal<String>,
    on_pick: Callback<()>,
) -> impl IntoView {
    let router = use_router();

    view! {
        <li class="menu-title">{title}</li>
        {entries
            .into_iter()
            .map(|entry| {
                let path = entry.path();
                let href = path.clone();
                let selected = {
                    let path = path.clone();
                    move || is_selected(&current_path.get(), &path)
                };
                let on_click = move |ev: leptos::ev::MouseEvent| {
                    ev.prevent_default();
                    on_pick.run(());
                    router.navigate(&path);
                };
                view! {
                    <li>
                        <a
                            href=href
                            class=move || if selected() { "menu-active" } else { "" }
                            on:click=on_click
                        >
                            <Icon icon=entry.icon />
                            {entry.label}
                        </a>
                    </li>
                }
            })
            .collect_view()}
    }
}

#[component]
fn UserHeader() -> impl IntoView {
    let auth = use_auth();

    move || {
        let user = auth.user().unwrap_or_default();
        view! {
            <div class="flex items-center gap-3 p-4 border-b border-base-300">
                <div class="avatar avatar-placeholder">
                    <div class="bg-primary text-primary-content w-10 rounded-full">
                        <span>{user.initial().to_string()}</span>
                    </div>
                </div>
                <div class="min-w-0">
                    <p class="font-semibold truncate">{user.display_name().to_string()}</p>
                    <p class="text-xs text-base-content/60 truncate">
                        {user.email.clone().unwrap_or_default()}
                    </p>
                    <span class="badge badge-sm badge-outline mt-1">
                        {user.role_label().to_string()}
                    </span>
                </div>
            </div>
        }
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (drawer_open, set_drawer_open) = signal(false);
    let current_path = Signal::derive(move || router.current_route().get().to_path());
    let close_drawer = Callback::new(move |_| set_drawer_open.set(false));

    let on_logout = move |_| {
        set_drawer_open.set(false);
        // 路由服务监听会话变化，自动跳回登录页
        auth.logout();
    };

    let sidebar = move || {
        let menu = NavMenu::for_user(auth.user().as_ref());
        let show_management = menu.show_management();
        let NavMenu {
            primary,
            management,
        } = menu;
        let management = show_management.then(|| {
            view! {
                <NavSection
                    title="Management"
                    entries=management
                    current_path=current_path
                    on_pick=close_drawer
                />
            }
        });
        view! {
            <NavSection title="Main" entries=primary current_path=current_path on_pick=close_drawer />
            {management}
        }
    };

    let bottom_nav = move || {
        let active = bottom_nav_index(&current_path.get());
        bottom_entries()
            .into_iter()
            .enumerate()
            .map(|(idx, BottomEntry { label, icon, action })| {
                let class = if active == Some(idx) { "dock-active" } else { "" };
                let on_click = move |_| match &action {
                    BottomAction::Navigate(route) => {
                        set_drawer_open.set(false);
                        router.navigate(&route.to_path());
                    }
                    BottomAction::OpenMenu => set_drawer_open.set(true),
                };
                view! {
                    <button class=class on:click=on_click>
                        <Icon icon=icon />
                        <span class="dock-label">{label}</span>
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200">
            <input
                id="nav-drawer"
                type="checkbox"
                class="drawer-toggle"
                prop:checked=drawer_open
                on:change=move |ev| set_drawer_open.set(event_target_checked(&ev))
            />

            <div class="drawer-content flex flex-col pb-16 lg:pb-0">
                <main class="flex-1 p-4 md:p-8">{children()}</main>
                <div class="dock lg:hidden">{bottom_nav}</div>
            </div>

            <div class="drawer-side z-40">
                <label for="nav-drawer" aria-label="close sidebar" class="drawer-overlay"></label>
                <aside class="bg-base-100 w-64 min-h-full flex flex-col">
                    <UserHeader />
                    <ul class="menu w-full flex-1">{sidebar}</ul>
                    <div class="p-4 border-t border-base-300">
                        <button class="btn btn-outline btn-error btn-block gap-2" on:click=on_logout>
                            <LogOut class="h-4 w-4" />
                            "Logout"
                        </button>
                    </div>
                </aside>
            </div>
        </div>
    }
}
