use crate::api::ApiError;
use crate::auth::use_auth;
use crate::web::router::Link;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use multipanel_shared::password::validate_credentials;

/// 提交失败时展示给用户的文本
pub(crate) fn submit_error_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Network(_) => err.to_string(),
        ApiError::Unauthorized(_) | ApiError::Server { .. } => err
            .server_message()
            .unwrap_or(fallback)
            .to_string(),
        ApiError::Decode(_) | ApiError::MissingToken => fallback.to_string(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (email, password) = (email.get(), password.get());
        if let Err(msg) = validate_credentials(&email, &password) {
            set_error_msg.set(Some(msg.to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = auth.public_api();
        spawn_local(async move {
            match api.login(email, password).await {
                Ok(resp) => match resp.into_session() {
                    // 路由服务监听会话变化，自动跳转到面板
                    Ok((user, token)) => {
                        auth.login(user, token);
                    }
                    Err(rejected) => set_error_msg.set(Some(rejected.reason)),
                },
                Err(e) => {
                    warn!("[Login] {}", e);
                    set_error_msg.set(Some(submit_error_message(&e, "Login failed")));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Multipanel"</h1>
                    <p class="text-base-content/70">"Sign in to your account"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email Address"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                autocomplete="email"
                                on:input=move |ev| {
                                    set_email.set(event_target_value(&ev));
                                    set_error_msg.set(None);
                                }
                                prop:value=email
                                prop:disabled=is_submitting
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                on:input=move |ev| {
                                    set_password.set(event_target_value(&ev));
                                    set_error_msg.set(None);
                                }
                                prop:value=password
                                prop:disabled=is_submitting
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                        <div class="text-center text-sm">
                            <Link to="/register" class="link link-hover">
                                "Don't have an account? Sign Up"
                            </Link>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
