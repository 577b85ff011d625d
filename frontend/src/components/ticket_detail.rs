use crate::api::use_api;
use crate::components::layout::{BrandHeader, PageFooter};
use crate::state::Fetch;
use crate::web::route::AppRoute;
use crate::web::router::RouteLink;
use eventhub_shared::{Ticket, date, format_naira};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 购票确认页（按票据参考号查询）
#[component]
pub fn TicketDetailPage(reference: String) -> impl IntoView {
    let api = use_api();

    let (state, set_state) = signal(Fetch::<Ticket>::Loading);

    {
        let api = api.clone();
        let reference = reference.clone();
        spawn_local(async move {
            set_state.set(Fetch::from_result(api.ticket(reference).await));
        });
    }

    view! {
        <div class="min-h-screen bg-base-200">
            <BrandHeader />
            <div class="max-w-xl mx-auto px-4 py-10">
                <h1 class="text-2xl font-bold mb-4 text-center">"Ticket Confirmed"</h1>

                {move || match state.get() {
                    Fetch::Idle | Fetch::Loading => {
                        view! {
                            <div class="flex justify-center py-16">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        }
                            .into_any()
                    }
                    Fetch::Error(_) => {
                        view! {
                            <div role="alert" class="alert alert-error">
                                <span>"Ticket not found."</span>
                                <RouteLink to=AppRoute::Events class="btn btn-sm">
                                    "Browse events"
                                </RouteLink>
                            </div>
                        }
                            .into_any()
                    }
                    Fetch::Loaded(ticket) => {
                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <h2 class="text-xl font-semibold">
                                        {ticket.event_title.clone()}
                                    </h2>
                                    <p class="text-base-content/70">
                                        {date::format_long(&ticket.event_date)}
                                    </p>
                                    <p class="text-base-content/60 mb-3">
                                        {ticket.event_location.clone()}
                                    </p>

                                    {ticket
                                        .qr_code_url
                                        .clone()
                                        .map(|src| {
                                            view! {
                                                <img
                                                    src=src
                                                    alt="QR Code"
                                                    class="mx-auto w-40 h-40 border border-base-300 rounded"
                                                />
                                            }
                                        })}

                                    <div class="text-center space-y-1 mt-4">
                                        <p>
                                            <strong>"Reference: "</strong>
                                            <span class="font-mono">{ticket.reference.clone()}</span>
                                        </p>
                                        <p>
                                            <strong>"Quantity: "</strong>
                                            {ticket.quantity}
                                        </p>
                                        <p>
                                            <strong>"Total Paid: "</strong>
                                            {ticket
                                                .amount_paid
                                                .map(format_naira)
                                                .unwrap_or_else(|| "-".to_string())}
                                        </p>
                                    </div>

                                    <div class="card-actions justify-center mt-6">
                                        <RouteLink to=AppRoute::Events class="btn btn-ghost btn-sm">
                                            "Back to Events"
                                        </RouteLink>
                                        <RouteLink to=AppRoute::MyTickets class="btn btn-primary btn-sm">
                                            "My Tickets"
                                        </RouteLink>
                                    </div>
                                </div>
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
