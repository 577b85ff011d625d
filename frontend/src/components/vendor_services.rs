use crate::api::use_api;
use crate::components::icons::Store;
use crate::components::layout::{BrandHeader, PageFooter};
use crate::state::Fetch;
use crate::web::route::AppRoute;
use crate::web::router::RouteLink;
use eventhub_shared::VendorService;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn VendorServicesPage() -> impl IntoView {
    let api = use_api();

    let (state, set_state) = signal(Fetch::<Vec<VendorService>>::Loading);

    {
        let api = api.clone();
        spawn_local(async move {
            set_state.set(Fetch::from_result(api.services().await));
        });
    }

    view! {
        <div class="min-h-screen bg-base-200">
            <BrandHeader />
            <div class="max-w-7xl mx-auto px-4 py-8 space-y-6">
                <div class="flex items-center gap-2">
                    <Store attr:class="h-6 w-6 text-primary" />
                    <h1 class="text-3xl font-bold">"Vendor Services"</h1>
                </div>

                {move || match state.get() {
                    Fetch::Idle | Fetch::Loading => {
                        view! {
                            <div class="flex justify-center py-16">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        }
                            .into_any()
                    }
                    Fetch::Error(message) => {
                        view! {
                            <div role="alert" class="alert alert-error">
                                <span>{message}</span>
                            </div>
                        }
                            .into_any()
                    }
                    Fetch::Loaded(services) if services.is_empty() => {
                        view! {
                            <div class="text-center py-16 text-base-content/50">
                                "No vendor services found."
                            </div>
                        }
                            .into_any()
                    }
                    Fetch::Loaded(services) => {
                        view! {
                            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                                {services
                                    .into_iter()
                                    .map(|service| {
                                        let detail = AppRoute::VendorServiceDetail {
                                            slug: service.slug.clone(),
                                        };
                                        view! {
                                            <div class="card bg-base-100 shadow-xl">
                                                {service
                                                    .image
                                                    .clone()
                                                    .map(|src| {
                                                        view! {
                                                            <figure>
                                                                <img
                                                                    src=src
                                                                    alt=service.service_name.clone()
                                                                    class="h-40 w-full object-cover"
                                                                />
                                                            </figure>
                                                        }
                                                    })}
                                                <div class="card-body">
                                                    <h2 class="card-title">{service.business_name.clone()}</h2>
                                                    <p class="text-base-content/70">
                                                        {service.service_name.clone()}
                                                    </p>
                                                    <p class="text-sm text-base-content/60 line-clamp-2">
                                                        {service.description.clone()}
                                                    </p>
                                                    <div class="card-actions justify-end">
                                                        <RouteLink to=detail class="btn btn-primary btn-sm">
                                                            "View service"
                                                        </RouteLink>
                                                    </div>
                                                </div>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                            .into_any()
                    }
                }}
            </div>
            <PageFooter />
        </div>
    }
}
