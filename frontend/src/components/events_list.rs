use crate::api::use_api;
use crate::components::icons::{ArrowUpDown, Calendar, MapPin, Users};
use crate::components::layout::{BrandHeader, PageFooter};
use crate::state::Fetch;
use crate::web::route::AppRoute;
use crate::web::router::RouteLink;
use eventhub_shared::{Event, date, format_naira};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 客户端排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
}

impl SortOrder {
    fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest first",
            SortOrder::Oldest => "Oldest first",
            SortOrder::PriceLow => "Price: low to high",
            SortOrder::PriceHigh => "Price: high to low",
        }
    }

    fn from_value(value: &str) -> Self {
        match value {
            "oldest" => SortOrder::Oldest,
            "price-low" => SortOrder::PriceLow,
            "price-high" => SortOrder::PriceHigh,
            _ => SortOrder::Newest,
        }
    }
}

/// 列表是小的内存数组，排序在客户端完成
fn sort_events(events: &mut [Event], order: SortOrder) {
    match order {
        SortOrder::Newest => events.sort_by(|a, b| b.start_date.cmp(&a.start_date)),
        SortOrder::Oldest => events.sort_by(|a, b| a.start_date.cmp(&b.start_date)),
        SortOrder::PriceLow => events.sort_by(|a, b| a.ticket_price.total_cmp(&b.ticket_price)),
        SortOrder::PriceHigh => events.sort_by(|a, b| b.ticket_price.total_cmp(&a.ticket_price)),
    }
}

#[component]
pub fn EventsPage() -> impl IntoView {
    let api = use_api();

    let (state, set_state) = signal(Fetch::<Vec<Event>>::Loading);
    let (order, set_order) = signal(SortOrder::Newest);

    {
        let api = api.clone();
        spawn_local(async move {
            set_state.set(Fetch::from_result(api.events().await));
        });
    }

    let sorted = move || {
        state.get().loaded().map(|events| {
            let mut events = events.clone();
            sort_events(&mut events, order.get());
            events
        })
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <BrandHeader />
            <div class="max-w-7xl mx-auto px-4 py-8 space-y-6">
                <div class="flex flex-wrap items-center justify-between gap-4">
                    <div>
                        <h1 class="text-3xl font-bold">"Upcoming Events"</h1>
                        <p class="text-base-content/70">"Find your next experience."</p>
                    </div>
                    <label class="flex items-center gap-2">
                        <ArrowUpDown attr:class="h-4 w-4 opacity-60" />
                        <select
                            class="select select-bordered select-sm"
                            on:change=move |ev| {
                                set_order.set(SortOrder::from_value(&event_target_value(&ev)))
                            }
                        >
                            <option value="newest">{SortOrder::Newest.label()}</option>
                            <option value="oldest">{SortOrder::Oldest.label()}</option>
                            <option value="price-low">{SortOrder::PriceLow.label()}</option>
                            <option value="price-high">{SortOrder::PriceHigh.label()}</option>
                        </select>
                    </label>
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
                    Fetch::Loaded(events) if events.is_empty() => {
                        view! {
                            <div class="text-center py-16 text-base-content/50">
                                "No events yet. Check back soon."
                            </div>
                        }
                            .into_any()
                    }
                    Fetch::Loaded(_) => {
                        view! {
                            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                                <For
                                    each=move || sorted().unwrap_or_default()
                                    key=|event| event.id
                                    children=move |event| {
                                        let remaining = event.tickets_remaining();
                                        let detail = AppRoute::EventDetail {
                                            slug: event.slug.clone(),
                                        };
                                        view! {
                                            <div class="card bg-base-100 shadow-xl">
                                                <figure class="h-40 bg-base-300">
                                                    {event
                                                        .flyer
                                                        .clone()
                                                        .map(|src| {
                                                            view! {
                                                                <img
                                                                    src=src
                                                                    alt=event.title.clone()
                                                                    class="h-40 w-full object-cover"
                                                                />
                                                            }
                                                                .into_any()
                                                        })
                                                        .unwrap_or_else(|| {
                                                            view! {
                                                                <Calendar attr:class="h-10 w-10 opacity-30" />
                                                            }
                                                                .into_any()
                                                        })}
                                                </figure>
                                                <div class="card-body">
                                                    <h2 class="card-title">{event.title.clone()}</h2>
                                                    <p class="flex items-center gap-2 text-sm text-base-content/70">
                                                        <MapPin attr:class="h-4 w-4" />
                                                        {event.location.clone()}
                                                    </p>
                                                    <p class="flex items-center gap-2 text-sm text-base-content/70">
                                                        <Calendar attr:class="h-4 w-4" />
                                                        {date::format_short(&event.start_date)}
                                                    </p>
                                                    <p class="flex items-center gap-2 text-sm text-base-content/70">
                                                        <Users attr:class="h-4 w-4" />
                                                        {format!("{} tickets left", remaining)}
                                                    </p>
                                                    <div class="card-actions justify-between items-center mt-2">
                                                        <span class="text-lg font-bold">
                                                            {format_naira(event.ticket_price)}
                                                        </span>
                                                        <RouteLink to=detail class="btn btn-primary btn-sm">
                                                            {if remaining == 0 { "Sold Out" } else { "View Event" }}
                                                        </RouteLink>
                                                    </div>
                                                </div>
                                            </div>
                                        }
                                    }
                                />
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

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: u64, start: &str, price: f64) -> Event {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "slug": format!("event-{}", id),
            "title": "t",
            "description": "d",
            "location": "l",
            "start_date": start,
            "end_date": start,
            "capacity": 10,
            "tickets_sold": 0,
            "ticket_price": price
        }))
        .unwrap()
    }

    #[test]
    fn sorts_by_date_and_price() {
        let base = vec![
            event(1, "2026-09-01T18:00:00Z", 3000.0),
            event(2, "2026-10-01T18:00:00Z", 1000.0),
            event(3, "2026-08-01T18:00:00Z", 2000.0),
        ];

        let mut newest = base.clone();
        sort_events(&mut newest, SortOrder::Newest);
        assert_eq!(newest.iter().map(|e| e.id).collect::<Vec<_>>(), [2, 1, 3]);

        let mut oldest = base.clone();
        sort_events(&mut oldest, SortOrder::Oldest);
        assert_eq!(oldest.iter().map(|e| e.id).collect::<Vec<_>>(), [3, 1, 2]);

        let mut cheap = base.clone();
        sort_events(&mut cheap, SortOrder::PriceLow);
        assert_eq!(cheap.iter().map(|e| e.id).collect::<Vec<_>>(), [2, 3, 1]);

        let mut dear = base;
        sort_events(&mut dear, SortOrder::PriceHigh);
        assert_eq!(dear.iter().map(|e| e.id).collect::<Vec<_>>(), [1, 3, 2]);
    }

    #[test]
    fn sort_values_parse() {
        assert_eq!(SortOrder::from_value("price-low"), SortOrder::PriceLow);
        assert_eq!(SortOrder::from_value("anything"), SortOrder::Newest);
    }
}
