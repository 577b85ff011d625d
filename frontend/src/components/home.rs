use crate::components::icons::{Calendar, Store, Ticket};
use crate::components::layout::{BrandHeader, PageFooter};
use crate::web::route::AppRoute;
use crate::web::router::RouteLink;
use leptos::prelude::*;

/// 营销落地页（无取数）
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-base-200 flex flex-col">
            <BrandHeader />
            <main class="flex-1">
                <div class="hero py-20">
                    <div class="hero-content text-center">
                        <div class="max-w-xl">
                            <div class="flex justify-center mb-6">
                                <div class="p-4 bg-primary text-primary-content rounded-2xl shadow-lg">
                                    <Ticket attr:class="h-10 w-10" />
                                </div>
                            </div>
                            <h1 class="text-5xl font-bold">"EventHub"</h1>
                            <p class="py-6 text-base-content/70">
                                "Discover events, book tickets, and find trusted vendors for your own shows - all in one place."
                            </p>
                            <div class="flex flex-wrap justify-center gap-3">
                                <RouteLink to=AppRoute::Events class="btn btn-primary gap-2">
                                    <Calendar attr:class="h-4 w-4" />
                                    "Browse events"
                                </RouteLink>
                                <RouteLink to=AppRoute::VendorServices class="btn btn-ghost gap-2">
                                    <Store attr:class="h-4 w-4" />
                                    "Find vendors"
                                </RouteLink>
                            </div>
                            <div class="mt-8 text-sm text-base-content/60">
                                "Organizing something? "
                                <RouteLink to=AppRoute::Register class="link link-primary">
                                    "Create an account"
                                </RouteLink> " or "
                                <RouteLink to=AppRoute::Login class="link link-primary">
                                    "sign in"
                                </RouteLink> "."
                            </div>
                        </div>
                    </div>
                </div>
            </main>
            <PageFooter />
        </div>
    }
}
