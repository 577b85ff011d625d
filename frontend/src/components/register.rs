use crate::api::use_api;
use crate::components::icons::Ticket;
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::session::session;
use crate::validate::validate_registration;
use crate::web::route::AppRoute;
use crate::web::router::{RouteLink, use_router};
use eventhub_shared::UserRole;
use eventhub_shared::protocol::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let router = use_router();
    let api = use_api();

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (user_type, set_user_type) = signal(UserRole::Organizer);
    let (submitting, set_submitting) = signal(false);
    let (toast, set_toast) = signal(ToastMessage::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        if let Some(message) = validate_registration(
            &username.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
        ) {
            show_toast(set_toast, message, true);
            return;
        }

        set_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            let request = RegisterRequest {
                username: username.get_untracked(),
                email: email.get_untracked(),
                password: password.get_untracked(),
                user_type: user_type.get_untracked(),
            };
            match api.register(&request).await {
                Ok(tokens) => {
                    session().set_tokens(&tokens.access, &tokens.refresh);
                    show_toast(set_toast, "Registration successful! Redirecting...", false);
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
        <div class="hero min-h-screen bg-base-200">
            <Toast message=toast />
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Ticket attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"EventHub"</h1>
                        <p class="text-base-content/70">"Create your account"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                placeholder="ada"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="reg-email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="reg-password"
                                type="password"
                                placeholder="At least 6 characters"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="user-type">
                                <span class="label-text">"I am a..."</span>
                            </label>
                            <select
                                id="user-type"
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    set_user_type
                                        .set(
                                            match event_target_value(&ev).as_str() {
                                                "vendor" => UserRole::Vendor,
                                                "guest" => UserRole::Guest,
                                                _ => UserRole::Organizer,
                                            },
                                        )
                                }
                            >
                                <option
                                    value="organizer"
                                    selected=move || user_type.get() == UserRole::Organizer
                                >
                                    "Event organizer"
                                </option>
                                <option
                                    value="guest"
                                    selected=move || user_type.get() == UserRole::Guest
                                >
                                    "Guest"
                                </option>
                                <option
                                    value="vendor"
                                    selected=move || user_type.get() == UserRole::Vendor
                                >
                                    "Vendor"
                                </option>
                            </select>
                        </div>
                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || submitting.get()>
                                {move || {
                                    if submitting.get() {
                                        view! {
                                            <span class="loading loading-spinner"></span>
                                            "Creating account..."
                                        }
                                            .into_any()
                                    } else {
                                        "Register".into_any()
                                    }
                                }}
                            </button>
                        </div>

                        <p class="text-sm text-center text-base-content/70 mt-2">
                            "Already registered? "
                            <RouteLink to=AppRoute::Login class="link link-primary">
                                "Sign in"
                            </RouteLink>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
