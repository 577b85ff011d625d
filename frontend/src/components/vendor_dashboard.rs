use crate::api::use_api;
use crate::auth::{logout, use_auth, use_auth_context};
use crate::components::icons::{BellRing, CalendarCheck, LogOut, Plus, RefreshCw, Store};
use crate::components::layout::PageFooter;
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::state::Fetch;
use crate::web::route::AppRoute;
use crate::web::router::RouteLink;
use eventhub_shared::{UserRole, VendorSummary, date};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn VendorDashboardPage() -> impl IntoView {
    let api = use_api();
    let ctx = use_auth_context();
    let guard = use_auth(Some(UserRole::Vendor));

    let (state, set_state) = signal(Fetch::<VendorSummary>::Loading);
    let (period, set_period) = signal("week".to_string());
    let (toast, set_toast) = signal(ToastMessage::None);

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            let period = period.get_untracked();
            set_state.set(Fetch::Loading);
            spawn_local(async move {
                // 字段缺失/形状不对时由 serde default 收敛成空状态
                match api.vendor_summary(period).await {
                    Ok(summary) => set_state.set(Fetch::Loaded(summary)),
                    Err(e) => {
                        // 保底仍渲染默认数据，同时提示
                        set_state.set(Fetch::Loaded(VendorSummary::default()));
                        show_toast(set_toast, "Failed to load dashboard data. Please try again.", true);
                        web_sys::console::log_1(&format!("[VendorDashboard] {}", e).into());
                    }
                }
            });
        }
    };

    // 初始加载 + 时间窗变化时重新拉取
    {
        let load = load.clone();
        Effect::new(move |_| {
            period.track();
            load();
        });
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
                            <Store attr:class="text-primary h-6 w-6" />
                            <span class="text-xl font-bold">"Vendor Dashboard"</span>
                        </div>
                        <div class="flex-none gap-2 items-center">
                            <select
                                class="select select-bordered select-sm"
                                on:change=move |ev| set_period.set(event_target_value(&ev))
                            >
                                <option value="week" selected=move || period.get() == "week">
                                    "This week"
                                </option>
                                <option value="month" selected=move || period.get() == "month">
                                    "This month"
                                </option>
                                <option value="year" selected=move || period.get() == "year">
                                    "This year"
                                </option>
                            </select>
                            <button
                                on:click={
                                    let load = load.clone();
                                    move |_| load()
                                }
                                class="btn btn-ghost btn-circle"
                            >
                                <RefreshCw attr:class="h-5 w-5" />
                            </button>
                            <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                                <LogOut attr:class="h-4 w-4" />
                                "Log out"
                            </button>
                        </div>
                    </div>

                    // 快捷入口
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <RouteLink
                            to=AppRoute::CreateVendorService
                            class="card bg-base-100 shadow hover:shadow-lg transition-shadow"
                        >
                            <div class="card-body flex-row items-center gap-3">
                                <Plus attr:class="h-6 w-6 text-primary" />
                                <div>
                                    <div class="font-semibold">"Add Service"</div>
                                    <div class="text-sm text-base-content/60">
                                        "Create a new offering"
                                    </div>
                                </div>
                            </div>
                        </RouteLink>
                        <RouteLink
                            to=AppRoute::MyRequests
                            class="card bg-base-100 shadow hover:shadow-lg transition-shadow"
                        >
                            <div class="card-body flex-row items-center gap-3">
                                <BellRing attr:class="h-6 w-6 text-secondary" />
                                <div>
                                    <div class="font-semibold">"View Requests"</div>
                                    <div class="text-sm text-base-content/60">
                                        "Check pending requests"
                                    </div>
                                </div>
                            </div>
                        </RouteLink>
                        <RouteLink
                            to=AppRoute::VendorServices
                            class="card bg-base-100 shadow hover:shadow-lg transition-shadow"
                        >
                            <div class="card-body flex-row items-center gap-3">
                                <CalendarCheck attr:class="h-6 w-6 text-accent" />
                                <div>
                                    <div class="font-semibold">"Marketplace"</div>
                                    <div class="text-sm text-base-content/60">
                                        "See all listed services"
                                    </div>
                                </div>
                            </div>
                        </RouteLink>
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
                        Fetch::Loaded(summary) => {
                            let recent_requests = summary.recent_requests.clone();
                            let recent_bookings = summary.recent_bookings.clone();
                            view! {
                                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                                    <div class="stat">
                                        <div class="stat-title">"Requests"</div>
                                        <div class="stat-value text-primary">
                                            {summary.total_requests}
                                        </div>
                                    </div>
                                    <div class="stat">
                                        <div class="stat-title">"Bookings"</div>
                                        <div class="stat-value text-secondary">
                                            {summary.total_bookings}
                                        </div>
                                    </div>
                                    <div class="stat">
                                        <div class="stat-title">"Confirmed"</div>
                                        <div class="stat-value text-accent">
                                            {summary.confirmed_bookings}
                                        </div>
                                    </div>
                                </div>

                                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                                    <div class="card bg-base-100 shadow-xl">
                                        <div class="card-body">
                                            <h3 class="card-title">"Recent requests"</h3>
                                            {if recent_requests.is_empty() {
                                                view! {
                                                    <p class="text-base-content/50 py-6 text-center">
                                                        "No recent requests."
                                                    </p>
                                                }
                                                    .into_any()
                                            } else {
                                                view! {
                                                    <ul class="divide-y divide-base-200">
                                                        {recent_requests
                                                            .iter()
                                                            .map(|request| {
                                                                view! {
                                                                    <li class="py-3 flex items-center justify-between gap-2">
                                                                        <div>
                                                                            <p class="font-medium">
                                                                                {request
                                                                                    .event_title
                                                                                    .clone()
                                                                                    .unwrap_or_else(|| format!("Event #{}", request.event))}
                                                                            </p>
                                                                            <p class="text-sm text-base-content/60">
                                                                                {date::format_date_only(&request.created_at)}
                                                                            </p>
                                                                        </div>
                                                                        <span class="badge badge-outline capitalize">
                                                                            {request.status.label()}
                                                                        </span>
                                                                    </li>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </ul>
                                                }
                                                    .into_any()
                                            }}
                                        </div>
                                    </div>

                                    <div class="card bg-base-100 shadow-xl">
                                        <div class="card-body">
                                            <h3 class="card-title">"Recent bookings"</h3>
                                            {if recent_bookings.is_empty() {
                                                view! {
                                                    <p class="text-base-content/50 py-6 text-center">
                                                        "No recent bookings."
                                                    </p>
                                                }
                                                    .into_any()
                                            } else {
                                                view! {
                                                    <ul class="divide-y divide-base-200">
                                                        {recent_bookings
                                                            .iter()
                                                            .map(|booking| {
                                                                view! {
                                                                    <li class="py-3 flex items-center justify-between gap-2">
                                                                        <div>
                                                                            <p class="font-medium">
                                                                                {booking
                                                                                    .service_name
                                                                                    .clone()
                                                                                    .unwrap_or_else(|| format!("Booking #{}", booking.id))}
                                                                            </p>
                                                                            <p class="text-sm text-base-content/60">
                                                                                {format!(
                                                                                    "{} {}",
                                                                                    booking.date.clone().unwrap_or_default(),
                                                                                    booking.time.clone().unwrap_or_default(),
                                                                                )}
                                                                            </p>
                                                                        </div>
                                                                        {booking
                                                                            .status
                                                                            .clone()
                                                                            .map(|status| {
                                                                                view! {
                                                                                    <span class="badge badge-outline capitalize">{status}</span>
                                                                                }
                                                                            })}
                                                                    </li>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </ul>
                                                }
                                                    .into_any()
                                            }}
                                        </div>
                                    </div>
                                </div>
                            }
                                .into_any()
                        }
                    }}
                </div>
            </Show>
            <PageFooter />
        </div>
    }
}
