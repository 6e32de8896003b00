use crate::auth::use_auth;
use crate::components::login::submit_error_message;
use crate::web::router::Link;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use multipanel_shared::protocol::RegisterRequest;
use multipanel_shared::{AuthResponse, UserRecord};

/// 注册响应到会话；后端未返回 user 时用表单里的 name/email 补齐
fn registered_session(
    resp: AuthResponse,
    name: &str,
    email: &str,
) -> Result<(UserRecord, String), String> {
    match (resp.success, resp.token) {
        (true, Some(token)) if !token.is_empty() => {
            let user = resp.user.unwrap_or_else(|| UserRecord::new(name, email));
            Ok((user, token))
        }
        _ => Err(resp
            .error
            .unwrap_or_else(|| "Failed to create an account".to_string())),
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let referral = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let req = RegisterRequest {
            name: name.get(),
            email: email.get(),
            password: password.get(),
            referral_id: referral.get(),
        };
        let api = auth.public_api();
        spawn_local(async move {
            let (form_name, form_email) = (req.name.clone(), req.email.clone());
            match api.register(req).await {
                Ok(resp) => match registered_session(resp, &form_name, &form_email) {
                    Ok((user, token)) => {
                        auth.register(user, token);
                    }
                    Err(reason) => set_error_msg.set(Some(reason)),
                },
                Err(e) => {
                    warn!("[Register] {}", e);
                    set_error_msg.set(Some(submit_error_message(
                        &e,
                        "Failed to create an account",
                    )));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let field = move |id: &'static str,
                      label: &'static str,
                      kind: &'static str,
                      value: RwSignal<String>,
                      required: bool| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=kind
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=value
                    prop:disabled=is_submitting
                    class="input input-bordered"
                    required=required
                />
            </div>
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create Account"</h1>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        {field("name", "Full Name", "text", name, true)}
                        {field("email", "Email Address", "email", email, true)}
                        {field("password", "Password", "password", password, true)}
                        {field("referral", "Referral Code", "text", referral, false)}

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    "Sign Up".into_any()
                                }}
                            </button>
                        </div>
                        <div class="text-center text-sm">
                            <Link to="/login" class="link link-hover">
                                "Already have an account? Sign In"
                            </Link>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
