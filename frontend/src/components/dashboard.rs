use crate::api::use_api;
use crate::auth::{logout, use_auth, use_auth_context};
use crate::components::icons::{Calendar, CreditCard, LogOut, Plus, RefreshCw, Ticket};
use crate::components::layout::PageFooter;
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::state::Fetch;
use crate::web::route::AppRoute;
use crate::web::router::RouteLink;
use eventhub_shared::{OrganizerSummary, UserRole, date, format_naira};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 按时段问候
fn greeting() -> &'static str {
    let hours = js_sys::Date::new_0().get_hours();
    if hours < 12 {
        "Good morning"
    } else if hours < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let ctx = use_auth_context();
    let guard = use_auth(Some(UserRole::Organizer));

    let (state, set_state) = signal(Fetch::<OrganizerSummary>::Loading);
    let (toast, set_toast) = signal(ToastMessage::None);

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_state.set(Fetch::Loading);
            spawn_local(async move {
                match api.organizer_summary().await {
                    Ok(summary) => set_state.set(Fetch::Loaded(summary)),
                    Err(e) => {
                        set_state.set(Fetch::Error(e.user_message()));
                        show_toast(set_toast, "Failed to load dashboard data.", true);
                    }
                }
            });
        }
    };

    {
        let load = load.clone();
        load();
    }

    let on_logout = move |_| logout(&ctx);

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <Toast message=toast />
            <Show
                when=move || !guard.checking.get()
                fallback=|| {
                    view! {
                        <div class="flex items-center justify-center min-h-screen">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                }
            >
                <div class="max-w-7xl mx-auto space-y-8">
                    <div class="navbar bg-base-100 rounded-box shadow-xl">
                        <div class="flex-1 gap-2 px-2">
                            <Ticket attr:class="text-primary h-6 w-6" />
                            <span class="text-xl font-bold">"EventHub Dashboard"</span>
                            <span class="badge badge-neutral hidden md:inline-flex">
                                {move || {
                                    format!(
                                        "{}, {}",
                                        greeting(),
                                        guard
                                            .user
                                            .get()
                                            .map(|u| u.username)
                                            .unwrap_or_else(|| "User".to_string()),
                                    )
                                }}
                            </span>
                        </div>
                        <div class="flex-none gap-2">
                            <RouteLink to=AppRoute::CreateEvent class="btn btn-primary gap-2">
                                <Plus attr:class="h-4 w-4" />
                                "New Event"
                            </RouteLink>
                            <RouteLink to=AppRoute::Settings class="btn btn-ghost gap-2">
                                <CreditCard attr:class="h-4 w-4" />
                                "Payouts"
                            </RouteLink>
                            <RouteLink to=AppRoute::Profile class="btn btn-ghost">
                                "Profile"
                            </RouteLink>
                            <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                                <LogOut attr:class="h-4 w-4" />
                                "Log out"
                            </button>
                        </div>
                    </div>

                    {
                        let load = load.clone();
                        move || match state.get() {
                        Fetch::Idle | Fetch::Loading => {
                            view! {
                                <div class="grid grid-cols-1 md:grid-cols-3 gap-6 animate-pulse">
                                    <div class="h-32 bg-base-300 rounded-2xl"></div>
                                    <div class="h-32 bg-base-300 rounded-2xl"></div>
                                    <div class="h-32 bg-base-300 rounded-2xl"></div>
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
                        Fetch::Loaded(summary) => {
                            let recent = summary.recent_events.clone();
                            view! {
                                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                                    <div class="stat">
                                        <div class="stat-figure text-primary">
                                            <Calendar attr:class="h-8 w-8" />
                                        </div>
                                        <div class="stat-title">"Total events"</div>
                                        <div class="stat-value text-primary">
                                            {summary.total_events}
                                        </div>
                                    </div>
                                    <div class="stat">
                                        <div class="stat-figure text-secondary">
                                            <Ticket attr:class="h-8 w-8" />
                                        </div>
                                        <div class="stat-title">"Tickets sold"</div>
                                        <div class="stat-value text-secondary">
                                            {summary.total_tickets}
                                        </div>
                                    </div>
                                    <div class="stat">
                                        <div class="stat-title">"Revenue"</div>
                                        <div class="stat-value text-accent text-2xl">
                                            {format_naira(summary.total_revenue)}
                                        </div>
                                        <div class="stat-desc">"Settled to your subaccount"</div>
                                    </div>
                                </div>

                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body p-0">
                                        <div class="flex items-center justify-between p-6 pb-2">
                                            <div>
                                                <h3 class="card-title">"Recent events"</h3>
                                                <p class="text-base-content/70 text-sm">
                                                    "Your latest listings at a glance."
                                                </p>
                                            </div>
                                            <button
                                                on:click={
                                                    let load = load.clone();
                                                    move |_| load()
                                                }
                                                class="btn btn-ghost btn-circle"
                                            >
                                                <RefreshCw attr:class="h-5 w-5" />
                                            </button>
                                        </div>

                                        <div class="overflow-x-auto w-full">
                                            <table class="table table-zebra w-full">
                                                <thead>
                                                    <tr>
                                                        <th>"Event"</th>
                                                        <th>"Date"</th>
                                                        <th class="hidden md:table-cell">"Sold"</th>
                                                        <th class="hidden md:table-cell">"Price"</th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    <Show when={
                                                        let is_empty = recent.is_empty();
                                                        move || is_empty
                                                    }>
                                                        <tr>
                                                            <td
                                                                colspan="4"
                                                                class="text-center py-8 text-base-content/50"
                                                            >
                                                                "No recent events. Create one to get started."
                                                            </td>
                                                        </tr>
                                                    </Show>
                                                    <For
                                                        each={
                                                            let recent = recent.clone();
                                                            move || recent.clone()
                                                        }
                                                        key=|event| event.id
                                                        children=move |event| {
                                                            view! {
                                                                <tr>
                                                                    <td class="font-medium">{event.title.clone()}</td>
                                                                    <td>{date::format_date_only(&event.start_date)}</td>
                                                                    <td class="hidden md:table-cell">
                                                                        {format!("{}/{}", event.tickets_sold, event.capacity)}
                                                                    </td>
                                                                    <td class="hidden md:table-cell">
                                                                        {format_naira(event.ticket_price)}
                                                                    </td>
                                                                </tr>
                                                            }
                                                        }
                                                    />
                                                </tbody>
                                            </table>
                                        </div>
                                    </div>
                                </div>
                            }
                                .into_any()
                        }
                    }
                    }
                </div>
            </Show>
            <PageFooter />
        </div>
    }
}
