use crate::api::use_api;
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

/// 密码重置页；`uid` 与 `token` 来自邮件里的链接路径
#[component]
pub fn ResetPasswordPage(uid: String, token: String) -> impl IntoView {
    let router = use_router();
    let api = use_api();

    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (toast, set_toast) = signal(ToastMessage::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        if password.get_untracked().len() < 6 {
            show_toast(set_toast, "Password must be at least 6 characters", true);
            return;
        }

        set_submitting.set(true);
        let api = api.clone();
        let uid = uid.clone();
        let token = token.clone();
        spawn_local(async move {
            match api
                .reset_password(uid, token, password.get_untracked())
                .await
            {
                Ok(_) => {
                    show_toast(set_toast, "Password updated! Redirecting to sign in...", false);
                    set_timeout(
                        move || router.navigate(AppRoute::Login),
                        Duration::from_millis(1500),
                    );
                }
                Err(e) => show_toast(set_toast, e.user_message(), true),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <Toast message=toast />
            <form class="card bg-base-100 shadow-xl w-full max-w-md" on:submit=on_submit>
                <div class="card-body space-y-4">
                    <h2 class="card-title justify-center">"Choose a new password"</h2>

                    <div class="form-control">
                        <label class="label" for="new-password">
                            <span class="label-text">"New password"</span>
                        </label>
                        <input
                            id="new-password"
                            type="password"
                            placeholder="At least 6 characters"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="input input-bordered w-full"
                            required
                        />
                    </div>

                    <button class="btn btn-primary w-full" disabled=move || submitting.get()>
                        {move || {
                            if submitting.get() {
                                view! {
                                    <span class="loading loading-spinner"></span>
                                    "Saving..."
                                }
                                    .into_any()
                            } else {
                                "Reset password".into_any()
                            }
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}
