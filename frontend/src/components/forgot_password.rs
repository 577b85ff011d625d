use crate::api::use_api;
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::validate::is_valid_email;
use crate::web::route::AppRoute;
use crate::web::router::RouteLink;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let (sent, set_sent) = signal(false);
    let (toast, set_toast) = signal(ToastMessage::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        if !is_valid_email(&email.get_untracked()) {
            show_toast(set_toast, "Please enter a valid email", true);
            return;
        }

        let api = api.clone();
        spawn_local(async move {
            match api.forgot_password(email.get_untracked()).await {
                Ok(_) => {
                    set_sent.set(true);
                    show_toast(set_toast, "Reset link sent! Check your inbox.", false);
                }
                Err(_) => {
                    show_toast(set_toast, "Failed to send reset email. Try again later.", true);
                }
            }
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <Toast message=toast />
            <form class="card bg-base-100 shadow-xl w-full max-w-md" on:submit=on_submit>
                <div class="card-body space-y-4">
                    <h2 class="card-title justify-center">"Forgot Password"</h2>

                    <Show
                        when=move || !sent.get()
                        fallback=|| {
                            view! {
                                <p class="text-center text-success font-medium">
                                    "Password reset email sent. Please check your inbox."
                                </p>
                            }
                        }
                    >
                        <div class="form-control">
                            <label class="label" for="fp-email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="fp-email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered w-full"
                                required
                            />
                        </div>
                        <button class="btn btn-primary w-full">"Send reset link"</button>
                    </Show>

                    <p class="text-sm text-center text-base-content/70">
                        <RouteLink to=AppRoute::Login class="link link-hover">
                            "Back to sign in"
                        </RouteLink>
                    </p>
                </div>
            </form>
        </div>
    }
}
