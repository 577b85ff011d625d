use crate::api::use_api;
use crate::components::icons::{Calendar, ChevronDown, ChevronUp, Clock, MapPin, Ticket, Users};
use crate::components::layout::{BrandHeader, PageFooter};
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::session::session;
use crate::state::Fetch;
use crate::validate::adjust_quantity;
use crate::web::route::AppRoute;
use crate::web::router::{redirect_external, use_router};
use crate::web::Interval;
use chrono::{DateTime, Utc};
use eventhub_shared::{Event, date, format_naira};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 浏览器当前时刻（测试环境兜底为纪元起点）
fn now_utc() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[component]
pub fn EventDetailPage(slug: String) -> impl IntoView {
    let router = use_router();
    let api = use_api();

    let (state, set_state) = signal(Fetch::<Event>::Loading);
    let (quantity, set_quantity) = signal(1u32);
    let (booking, set_booking) = signal(false);
    let (toast, set_toast) = signal(ToastMessage::None);
    // 每分钟驱动一次倒计时重算
    let (tick, set_tick) = signal(0u32);

    {
        let api = api.clone();
        let slug = slug.clone();
        spawn_local(async move {
            match api.event_detail(slug).await {
                Ok(event) => set_state.set(Fetch::Loaded(event)),
                Err(e) => {
                    set_state.set(Fetch::Error(e.user_message()));
                    show_toast(set_toast, "Event not found or network error.", true);
                }
            }
        });
    }

    // 页面级长驻定时器；页面销毁后 try_update 静默失效
    Interval::new(60_000, move || {
        let _ = set_tick.try_update(|t| *t += 1);
    })
    .leak();

    let on_book = {
        let api = api.clone();
        let slug = slug.clone();
        move |_| {
            let Fetch::Loaded(event) = state.get_untracked() else {
                return;
            };

            let s = session();
            if s.access_token().is_none() {
                s.remember_redirect(
                    &AppRoute::EventDetail { slug: slug.clone() }.to_path(),
                );
                router.navigate(AppRoute::Login);
                return;
            }

            set_booking.set(true);
            let api = api.clone();
            spawn_local(async move {
                match api.book_ticket(event.id, quantity.get_untracked()).await {
                    Ok(link) => match link.payment_url {
                        Some(url) => redirect_external(&url),
                        None => show_toast(set_toast, "No payment link returned.", true),
                    },
                    Err(_) => show_toast(set_toast, "Booking failed!", true),
                }
                set_booking.set(false);
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <BrandHeader />
            <Toast message=toast />
            <div class="max-w-4xl mx-auto px-4 py-8">
                {move || match state.get() {
                    Fetch::Idle | Fetch::Loading => {
                        view! {
                            <div class="animate-pulse space-y-4">
                                <div class="w-full h-64 bg-base-300 rounded-2xl"></div>
                                <div class="h-8 bg-base-300 rounded w-3/4"></div>
                                <div class="h-4 bg-base-300 rounded w-1/2"></div>
                                <div class="h-24 bg-base-300 rounded"></div>
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
                    Fetch::Loaded(event) => {
                        let remaining = event.tickets_remaining();
                        let sold_out = event.is_sold_out();
                        let percent_left = 100.0 - event.percent_sold();
                        let countdown = {
                            let start = event.start_date;
                            move || {
                                tick.get();
                                date::Countdown::until(&start, &now_utc())
                            }
                        };
                        let upcoming = event.start_date > now_utc();
                        let price = event.ticket_price;
                        let on_book = on_book.clone();
                        view! {
                            {event
                                .flyer
                                .clone()
                                .map(|src| {
                                    view! {
                                        <img
                                            src=src
                                            alt=event.title.clone()
                                            class="w-full h-64 sm:h-80 object-cover rounded-2xl shadow-lg mb-8"
                                        />
                                    }
                                })}

                            <Show when=move || upcoming>
                                <div class="mb-8 flex flex-wrap gap-3">
                                    <div class="bg-base-100 rounded-lg px-4 py-2 text-center shadow">
                                        <p class="text-2xl font-bold">{move || countdown().days}</p>
                                        <p class="text-xs font-medium opacity-60">"DAYS"</p>
                                    </div>
                                    <div class="bg-base-100 rounded-lg px-4 py-2 text-center shadow">
                                        <p class="text-2xl font-bold">{move || countdown().hours}</p>
                                        <p class="text-xs font-medium opacity-60">"HOURS"</p>
                                    </div>
                                    <div class="bg-base-100 rounded-lg px-4 py-2 text-center shadow">
                                        <p class="text-2xl font-bold">
                                            {move || countdown().minutes}
                                        </p>
                                        <p class="text-xs font-medium opacity-60">"MINUTES"</p>
                                    </div>
                                    <div class="bg-base-100 rounded-lg flex items-center px-3 py-2 shadow">
                                        <Clock attr:class="h-4 w-4 mr-2 text-accent" />
                                        <span class="text-sm font-medium">"Starting Soon!"</span>
                                    </div>
                                </div>
                            </Show>

                            <div class="mb-8">
                                <h1 class="text-3xl sm:text-4xl font-bold mb-3">
                                    {event.title.clone()}
                                </h1>
                                <div class="space-y-2 text-base-content/80">
                                    <p class="flex items-center gap-2">
                                        <MapPin attr:class="h-4 w-4 text-secondary" />
                                        {event.location.clone()}
                                    </p>
                                    <p class="flex items-center gap-2">
                                        <Calendar attr:class="h-4 w-4 text-secondary" />
                                        {date::format_long(&event.start_date)}
                                    </p>
                                    <p class="flex items-center gap-2">
                                        <Users attr:class="h-4 w-4 text-secondary" />
                                        {format!("Capacity: {} attendees", event.capacity)}
                                    </p>
                                </div>
                            </div>

                            <div class="mb-10">
                                <h3 class="text-xl font-semibold mb-3">"About this event"</h3>
                                <p class="text-base-content/80 leading-relaxed">
                                    {event.description.clone()}
                                </p>
                            </div>

                            <div class="card bg-base-100 shadow-xl mb-8">
                                <div class="bg-primary text-primary-content p-4 rounded-t-2xl flex items-center gap-2">
                                    <Ticket attr:class="h-5 w-5" />
                                    <h3 class="text-xl font-bold">"Book Your Ticket"</h3>
                                </div>
                                <div class="card-body">
                                    <div class="flex justify-between items-center mb-4">
                                        <div>
                                            <span class="text-2xl font-bold">
                                                {format_naira(price)}
                                            </span>
                                            <p class="text-sm text-base-content/60">"per person"</p>
                                        </div>
                                        <div class="text-right">
                                            <p class="text-sm font-medium">
                                                {format!("{} tickets left", remaining)}
                                            </p>
                                            <progress
                                                class="progress progress-secondary w-28"
                                                value=percent_left
                                                max="100"
                                            ></progress>
                                        </div>
                                    </div>

                                    <Show when=move || !sold_out>
                                        <div class="mb-4">
                                            <label class="label">
                                                <span class="label-text">"Number of Tickets"</span>
                                            </label>
                                            <div class="join">
                                                <button
                                                    class="btn join-item"
                                                    disabled=move || quantity.get() <= 1
                                                    on:click=move |_| {
                                                        set_quantity
                                                            .update(|q| *q = adjust_quantity(*q, -1, remaining))
                                                    }
                                                >
                                                    <ChevronDown attr:class="h-4 w-4" />
                                                </button>
                                                <div class="join-item px-6 py-2 border border-base-300 font-semibold text-lg">
                                                    {move || quantity.get()}
                                                </div>
                                                <button
                                                    class="btn join-item"
                                                    disabled=move || quantity.get() >= remaining
                                                    on:click=move |_| {
                                                        set_quantity
                                                            .update(|q| *q = adjust_quantity(*q, 1, remaining))
                                                    }
                                                >
                                                    <ChevronUp attr:class="h-4 w-4" />
                                                </button>
                                            </div>
                                        </div>
                                    </Show>

                                    <div class="flex justify-between items-center py-3 border-t border-dashed border-base-300 mb-4">
                                        <span class="font-medium">"Total"</span>
                                        <span class="font-bold text-xl">
                                            {move || format_naira(price * quantity.get() as f64)}
                                        </span>
                                    </div>

                                    <button
                                        class="btn btn-secondary w-full"
                                        disabled=move || sold_out || booking.get()
                                        on:click=on_book
                                    >
                                        {move || {
                                            if sold_out {
                                                "Sold Out".into_any()
                                            } else if booking.get() {
                                                view! {
                                                    <span class="loading loading-spinner"></span>
                                                    "Processing..."
                                                }
                                                    .into_any()
                                            } else {
                                                "Book Now".into_any()
                                            }
                                        }}
                                    </button>
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
