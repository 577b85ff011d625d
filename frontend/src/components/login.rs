use crate::api::use_api;
use crate::auth::{login, use_auth_context};
use crate::components::icons::{LogIn, Ticket};
use crate::validate::validate_login;
use crate::web::route::AppRoute;
use crate::web::router::{RouteLink, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let router = use_router();
    let ctx = use_auth_context();
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        if let Some(message) = validate_login(&email.get_untracked(), &password.get_untracked()) {
            set_error_msg.set(Some(message));
            return;
        }

        set_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        spawn_local(async move {
            match login(
                &ctx,
                &api,
                email.get_untracked(),
                password.get_untracked(),
            )
            .await
            {
                Ok(destination) => router.navigate_path(&destination),
                Err(_) => {
                    set_error_msg.set(Some(
                        "Login failed. Please check your credentials.".to_string(),
                    ));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Ticket attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"EventHub"</h1>
                        <p class="text-base-content/70">"Welcome back to your event platform"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <h2 class="card-title">
                            "Sign In" <LogIn attr:class="h-4 w-4" />
                        </h2>

                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
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
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                            <label class="label">
                                <RouteLink
                                    to=AppRoute::ForgotPassword
                                    class="label-text-alt link link-hover"
                                >
                                    "Forgot password?"
                                </RouteLink>
                            </label>
                        </div>
                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || submitting.get()>
                                {move || {
                                    if submitting.get() {
                                        view! {
                                            <span class="loading loading-spinner"></span>
                                            "Signing in..."
                                        }
                                            .into_any()
                                    } else {
                                        "Sign In".into_any()
                                    }
                                }}
                            </button>
                        </div>

                        <p class="text-sm text-center text-base-content/70 mt-2">
                            "No account yet? "
                            <RouteLink to=AppRoute::Register class="link link-primary">
                                "Register"
                            </RouteLink>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
