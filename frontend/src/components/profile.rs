use crate::auth::use_auth;
use crate::components::layout::{BrandHeader, PageFooter};
use eventhub_shared::date;
use leptos::prelude::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let guard = use_auth(None);

    view! {
        <div class="min-h-screen bg-base-200">
            <BrandHeader />
            <div class="max-w-xl mx-auto px-4 py-10">
                {move || {
                    if guard.checking.get() {
                        view! {
                            <div class="flex justify-center py-24">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        }
                            .into_any()
                    } else {
                        match guard.user.get() {
                            Some(user) => {
                                view! {
                                    <div class="card bg-base-100 shadow-xl">
                                        <div class="card-body items-center text-center">
                                            <div class="avatar placeholder mb-2">
                                                <div class="bg-primary text-primary-content rounded-full w-20">
                                                    <span class="text-3xl">
                                                        {user
                                                            .username
                                                            .chars()
                                                            .next()
                                                            .map(|c| c.to_uppercase().to_string())
                                                            .unwrap_or_else(|| "U".to_string())}
                                                    </span>
                                                </div>
                                            </div>
                                            <h2 class="card-title">{user.username.clone()}</h2>
                                            <p class="text-base-content/70">{user.email.clone()}</p>
                                            <div class="badge badge-outline capitalize">
                                                {user.user_type.as_str()}
                                            </div>
                                            {user
                                                .date_joined
                                                .map(|joined| {
                                                    view! {
                                                        <p class="text-sm text-base-content/50 mt-2">
                                                            {format!(
                                                                "Member since {}",
                                                                date::format_date_only(&joined),
                                                            )}
                                                        </p>
                                                    }
                                                })}
                                        </div>
                                    </div>
                                }
                                    .into_any()
                            }
                            None => ().into_any(),
                        }
                    }
                }}
            </div>
            <PageFooter />
        </div>
    }
}
