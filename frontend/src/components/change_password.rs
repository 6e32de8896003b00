//! 修改密码页面
//!
//! 表单字段整合在 `PasswordForm` 中；强度清单随输入实时刷新，
//! 提交前在本地完成全部校验。

use crate::api::ApiError;
use crate::auth::use_auth;
use crate::components::login::submit_error_message;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use multipanel_shared::Profile;
use multipanel_shared::password::{PasswordPolicy, PasswordRule, validate_password_change};

/// 表单状态
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，可以直接在闭包间传递。
#[derive(Clone, Copy)]
struct PasswordForm {
    current: RwSignal<String>,
    new: RwSignal<String>,
    confirm: RwSignal<String>,
}

impl PasswordForm {
    fn new() -> Self {
        Self {
            current: RwSignal::new(String::new()),
            new: RwSignal::new(String::new()),
            confirm: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.current.set(String::new());
        self.new.set(String::new());
        self.confirm.set(String::new());
    }
}

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let auth = use_auth();
    let form = PasswordForm::new();

    let (profile, set_profile) = signal(Option::<Profile>::None);
    let (loading, set_loading) = signal(true);
    let (updating, set_updating) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    // 初始加载资料
    match auth.api() {
        Some(api) => spawn_local(async move {
            match api.profile().await {
                Ok(p) => set_profile.set(Some(p)),
                Err(e) => {
                    warn!("[ChangePassword] Error fetching profile: {}", e);
                    set_error_msg.set(Some(submit_error_message(
                        &e,
                        "Failed to load profile data",
                    )));
                }
            }
            set_loading.set(false);
        }),
        None => {
            set_error_msg.set(Some(ApiError::MissingToken.to_string()));
            set_loading.set(false);
        }
    }

    let report = Memo::new(move |_| form.new.with(|p| PasswordPolicy::check(p)));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_success_msg.set(None);

        let (current, new, confirm) = (form.current.get(), form.new.get(), form.confirm.get());
        if let Err(e) = validate_password_change(&current, &new, &confirm) {
            set_error_msg.set(Some(e.to_string()));
            return;
        }

        let Some(api) = auth.api() else {
            set_error_msg.set(Some(ApiError::MissingToken.to_string()));
            return;
        };

        set_updating.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match api.change_password(current, new).await {
                Ok(()) => {
                    set_success_msg.set(Some("Password changed successfully!".to_string()));
                    form.reset();
                }
                Err(e) => {
                    warn!("[ChangePassword] {}", e);
                    set_error_msg.set(Some(submit_error_message(&e, "Failed to change password")));
                }
            }
            set_updating.set(false);
        });
    };

    let input = move |id: &'static str, label: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type="password"
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=value
                    prop:disabled=updating
                    class="input input-bordered"
                />
            </div>
        }
    };

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! {
                <div class="flex justify-center items-center min-h-[60vh]">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            <div class="max-w-xl mx-auto space-y-6">
                <h1 class="text-2xl font-bold">"Change Password"</h1>

                {move || profile.get().map(|p| view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body py-4">
                            <p class="font-medium">{p.name.unwrap_or_default()}</p>
                            <p class="text-sm text-base-content/70">{p.email.unwrap_or_default()}</p>
                        </div>
                    </div>
                })}

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>
                <Show when=move || success_msg.get().is_some()>
                    <div role="alert" class="alert alert-success text-sm">
                        <span>{move || success_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <form class="card bg-base-100 shadow card-body" on:submit=on_submit>
                    {input("current", "Current Password", form.current)}
                    {input("new", "New Password", form.new)}
                    {input("confirm", "Confirm New Password", form.confirm)}

                    <ul class="text-sm space-y-1 mt-2">
                        {PasswordRule::ALL
                            .into_iter()
                            .map(|rule| {
                                let passed = move || report.get().passes(rule);
                                view! {
                                    <li class=move || if passed() { "text-success" } else { "text-base-content/60" }>
                                        {move || if passed() { "✓ " } else { "○ " }}
                                        {rule.label()}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>

                    <button class="btn btn-primary mt-4" disabled=move || updating.get()>
                        {move || if updating.get() { "Updating..." } else { "Change Password" }}
                    </button>
                </form>
            </div>
        </Show>
    }
}
