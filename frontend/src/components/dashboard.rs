use crate::auth::use_auth;
use crate::components::icons::Icon;
use crate::navigation::primary_entries;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;

/// 全屏加载指示，会话恢复期间使用
#[component]
pub fn Loader() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center min-h-screen bg-base-200">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let greeting = move || {
        let user = auth.user().unwrap_or_default();
        format!("Welcome back, {}", user.display_name())
    };

    view! {
        <div class="max-w-5xl mx-auto space-y-8">
            <div>
                <h1 class="text-2xl font-bold">{greeting}</h1>
                <p class="text-base-content/70">
                    {move || auth.user().map(|u| u.role_label().to_string()).unwrap_or_default()}
                </p>
            </div>

            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                {primary_entries()
                    .into_iter()
                    .filter(|entry| entry.route != AppRoute::Dashboard)
                    .map(|entry| view! {
                        <Link to=entry.path() class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                            <div class="card-body flex-row items-center gap-4">
                                <Icon icon=entry.icon class="h-8 w-8 text-primary" />
                                <span class="card-title text-base">{entry.label}</span>
                            </div>
                        </Link>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// 数据页面的占位，内容由各自的业务模块提供
#[component]
pub fn SectionPage(route: AppRoute) -> impl IntoView {
    let detail = match &route {
        AppRoute::UserProfile(id) => Some(format!("User #{id}")),
        _ => None,
    };

    view! {
        <div class="max-w-5xl mx-auto space-y-4">
            <h1 class="text-2xl font-bold">{route.title()}</h1>
            {detail.map(|d| view! { <p class="text-base-content/70">{d}</p> })}
            <div class="card bg-base-100 shadow">
                <div class="card-body items-center text-base-content/50 py-16">
                    "No data to display yet."
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl">"404 - Page Not Found"</p>
                <Link to="/dashboard" class="btn btn-primary">"Back to Dashboard"</Link>
            </div>
        </div>
    }
}

#[component]
pub fn DownloadAppPage() -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <h1 class="text-3xl font-bold">"Download App"</h1>
                    <p class="text-base-content/70">
                        "Install Multipanel on your device for quicker access to your keys."
                    </p>
                    <Link to="/login" class="btn btn-primary">"Sign In"</Link>
                </div>
            </div>
        </div>
    }
}
