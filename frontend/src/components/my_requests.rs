use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::icons::{BellRing, Calendar, MapPin, RefreshCw};
use crate::components::layout::{BrandHeader, PageFooter};
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::state::Fetch;
use eventhub_shared::protocol::RespondAction;
use eventhub_shared::{Event, RequestStatus, UserRole, VendorRequest, date};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;

/// 服务商收到的合作请求，可接受/拒绝。
/// 列表项带活动 slug 时补拉活动详情用于展示时间地点。
#[component]
pub fn MyRequestsPage() -> impl IntoView {
    let api = use_api();
    let guard = use_auth(Some(UserRole::Vendor));

    let (state, set_state) = signal(Fetch::<Vec<VendorRequest>>::Loading);
    let (event_details, set_event_details) = signal(HashMap::<String, Event>::new());
    let (responding, set_responding) = signal(Option::<u64>::None);
    let (toast, set_toast) = signal(ToastMessage::None);

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_state.set(Fetch::Loading);
            spawn_local(async move {
                match api.my_requests().await {
                    Ok(requests) => {
                        // 逐个补拉活动详情；失败的跳过，不影响列表
                        let slugs: Vec<String> = requests
                            .iter()
                            .filter_map(|r| r.event_slug.clone())
                            .collect();
                        set_state.set(Fetch::Loaded(requests));

                        for slug in slugs {
                            if event_details.with_untracked(|map| map.contains_key(&slug)) {
                                continue;
                            }
                            if let Ok(event) = api.event_detail(slug.clone()).await {
                                set_event_details.update(|map| {
                                    map.insert(slug.clone(), event);
                                });
                            }
                        }
                    }
                    Err(_) => {
                        set_state.set(Fetch::Error(
                            "Failed to fetch vendor requests.".to_string(),
                        ));
                        show_toast(set_toast, "Failed to fetch vendor requests.", true);
                    }
                }
            });
        }
    };

    {
        let load = load.clone();
        load();
    }

    let respond = {
        let api = api.clone();
        let load = load.clone();
        move |request: VendorRequest, action: RespondAction| {
            set_responding.set(Some(request.id));
            let api = api.clone();
            let load = load.clone();
            spawn_local(async move {
                match api.respond_request(request.respond_key(), action).await {
                    Ok(_) => {
                        let verb = match action {
                            RespondAction::Accepted => "accepted",
                            RespondAction::Rejected => "declined",
                        };
                        show_toast(set_toast, format!("Request {} successfully", verb), false);
                        load();
                    }
                    Err(_) => show_toast(set_toast, "Action failed", true),
                }
                set_responding.set(None);
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <BrandHeader />
            <Toast message=toast />
            <Show
                when=move || !guard.checking.get()
                fallback=|| {
                    view! {
                        <div class="flex justify-center py-24">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                }
            >
                <div class="max-w-4xl mx-auto px-4 py-8 space-y-6">
                    <div class="flex items-center justify-between">
                        <div class="flex items-center gap-2">
                            <BellRing attr:class="h-6 w-6 text-primary" />
                            <h1 class="text-3xl font-bold">"Incoming Requests"</h1>
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

                    {
                        let respond = respond.clone();
                        move || match state.get() {
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
                        Fetch::Loaded(requests) if requests.is_empty() => {
                            view! {
                                <div class="text-center py-16 text-base-content/50">
                                    "No requests yet. Organizers will reach out here."
                                </div>
                            }
                                .into_any()
                        }
                        Fetch::Loaded(requests) => {
                            let respond = respond.clone();
                            view! {
                                <div class="space-y-3">
                                    {requests
                                        .into_iter()
                                        .map(|request| {
                                            let detail = request
                                                .event_slug
                                                .clone()
                                                .and_then(|slug| {
                                                    event_details.with(|map| map.get(&slug).cloned())
                                                });
                                            let is_pending = request.status == RequestStatus::Pending;
                                            let busy = {
                                                let id = request.id;
                                                move || responding.get() == Some(id)
                                            };
                                            let accept = {
                                                let respond = respond.clone();
                                                let request = request.clone();
                                                move |_| respond(request.clone(), RespondAction::Accepted)
                                            };
                                            let reject = {
                                                let respond = respond.clone();
                                                let request = request.clone();
                                                move |_| respond(request.clone(), RespondAction::Rejected)
                                            };
                                            view! {
                                                <div class="card bg-base-100 shadow">
                                                    <div class="card-body py-4 space-y-2">
                                                        <div class="flex items-center justify-between gap-4">
                                                            <p class="font-medium">
                                                                {request
                                                                    .event_title
                                                                    .clone()
                                                                    .unwrap_or_else(|| format!("Event #{}", request.event))}
                                                            </p>
                                                            <span class="badge badge-outline capitalize">
                                                                {request.status.label()}
                                                            </span>
                                                        </div>

                                                        {detail
                                                            .map(|event| {
                                                                view! {
                                                                    <div class="text-sm text-base-content/60 space-y-1">
                                                                        <p class="flex items-center gap-2">
                                                                            <Calendar attr:class="h-4 w-4" />
                                                                            {date::format_short(&event.start_date)}
                                                                        </p>
                                                                        <p class="flex items-center gap-2">
                                                                            <MapPin attr:class="h-4 w-4" />
                                                                            {event.location.clone()}
                                                                        </p>
                                                                    </div>
                                                                }
                                                            })}

                                                        {request
                                                            .message
                                                            .clone()
                                                            .filter(|m| !m.is_empty())
                                                            .map(|m| {
                                                                view! {
                                                                    <p class="text-sm bg-base-200 rounded p-2">{m}</p>
                                                                }
                                                            })}

                                                        <Show when={
                                                            let busy = busy.clone();
                                                            move || is_pending && !busy()
                                                        }>
                                                            <div class="card-actions">
                                                                <button
                                                                    class="btn btn-success btn-sm"
                                                                    on:click=accept.clone()
                                                                >
                                                                    "Accept"
                                                                </button>
                                                                <button
                                                                    class="btn btn-outline btn-error btn-sm"
                                                                    on:click=reject.clone()
                                                                >
                                                                    "Decline"
                                                                </button>
                                                            </div>
                                                        </Show>
                                                        <Show when=busy.clone()>
                                                            <span class="loading loading-spinner loading-sm"></span>
                                                        </Show>
                                                    </div>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
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
