use crate::api::use_api;
use crate::components::icons::{Calendar, Send};
use crate::components::layout::{BrandHeader, PageFooter};
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::session::session;
use crate::state::Fetch;
use crate::web::route::AppRoute;
use crate::web::router::{RouteLink, use_router};
use eventhub_shared::{Event, UserProfile, UserRole, VendorRequest, VendorService, has_existing_request};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn VendorServiceDetailPage(slug: String) -> impl IntoView {
    let router = use_router();
    let api = use_api();

    let (state, set_state) = signal(Fetch::<VendorService>::Loading);
    let (user, set_user) = signal(Option::<UserProfile>::None);
    let (events, set_events) = signal(Vec::<Event>::new());
    let (sent, set_sent) = signal(Vec::<VendorRequest>::new());
    // select 的取值（活动 id 字符串，空串 = 未选）
    let (selected_event, set_selected_event) = signal(String::new());
    let (message, set_message) = signal(String::new());
    let (date_value, set_date_value) = signal(String::new());
    let (time_value, set_time_value) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (toast, set_toast) = signal(ToastMessage::None);

    {
        let api = api.clone();
        let slug = slug.clone();
        spawn_local(async move {
            match api.service_detail(slug).await {
                Ok(service) => set_state.set(Fetch::Loaded(service)),
                Err(_) => {
                    show_toast(set_toast, "Failed to load service.", true);
                    router.navigate(AppRoute::VendorServices);
                    return;
                }
            }

            // 已登录则补充用户信息；主办方再拉自己的活动与已发送请求
            if session().is_logged_in() {
                match api.profile().await {
                    Ok(profile) => {
                        let is_organizer = profile.user_type == UserRole::Organizer;
                        set_user.set(Some(profile));

                        if is_organizer {
                            if let Ok(list) = api.my_events().await {
                                set_events.set(list);
                            }
                            if let Ok(list) = api.sent_requests().await {
                                set_sent.set(list);
                            }
                        }
                    }
                    Err(_) => show_toast(set_toast, "Failed to fetch user info", true),
                }
            }
        });
    }

    // 重复请求前置检查：本地已发送列表中存在同一 活动+服务 即禁用提交
    let already_requested = move || {
        let Some(event_id) = selected_event.get().parse::<u64>().ok() else {
            return false;
        };
        let Some(service_id) = state.get().loaded().map(|s| s.id) else {
            return false;
        };
        sent.with(|sent| has_existing_request(sent, event_id, service_id))
    };

    let on_send_request = {
        let api = api.clone();
        move |_| {
            let Ok(event_id) = selected_event.get_untracked().parse::<u64>() else {
                show_toast(set_toast, "Select an event first", true);
                return;
            };
            let Some(service_id) = state.get_untracked().loaded().map(|s| s.id) else {
                return;
            };
            // 前置检查命中时按钮本已禁用，这里兜底不发网络请求
            if already_requested() {
                return;
            }

            set_submitting.set(true);
            let api = api.clone();
            spawn_local(async move {
                match api
                    .send_vendor_request(event_id, service_id, message.get_untracked())
                    .await
                {
                    Ok(_) => {
                        show_toast(set_toast, "Request sent to vendor!", false);
                        router.navigate(AppRoute::SentRequests);
                    }
                    Err(e) if e.is_duplicate_constraint() => {
                        // 后端仍可能拒绝（本地列表过期）：识别约束错误并同样提示
                        show_toast(
                            set_toast,
                            "You've already requested this vendor for this event.",
                            true,
                        );
                        router.navigate(AppRoute::SentRequests);
                    }
                    Err(_) => show_toast(set_toast, "Failed to send request.", true),
                }
                set_submitting.set(false);
            });
        }
    };

    let on_book = {
        let api = api.clone();
        move |_| {
            if date_value.get_untracked().is_empty() || time_value.get_untracked().is_empty() {
                show_toast(set_toast, "Select date and time", true);
                return;
            }
            let Some(service_id) = state.get_untracked().loaded().map(|s| s.id) else {
                return;
            };

            set_submitting.set(true);
            let api = api.clone();
            spawn_local(async move {
                match api
                    .book_vendor(
                        service_id,
                        date_value.get_untracked(),
                        time_value.get_untracked(),
                    )
                    .await
                {
                    Ok(_) => show_toast(set_toast, "Vendor booked!", false),
                    Err(_) => show_toast(set_toast, "Failed to book service", true),
                }
                set_submitting.set(false);
            });
        }
    };

    let is_organizer = move || {
        user.get()
            .is_some_and(|u| u.user_type == UserRole::Organizer)
    };
    let is_vendor = move || {
        user.get()
            .is_some_and(|u| u.user_type == UserRole::Vendor)
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <BrandHeader />
            <Toast message=toast />
            <div class="max-w-4xl mx-auto px-4 py-10 space-y-6">
                {move || match state.get() {
                    Fetch::Idle | Fetch::Loading => {
                        view! {
                            <p class="text-center py-16 text-base-content/60">
                                "Loading service..."
                            </p>
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
                    Fetch::Loaded(service) => {
                        view! {
                            <div>
                                <h1 class="text-3xl font-bold mb-1">
                                    {service.business_name.clone()}
                                </h1>
                                <p class="text-xl text-base-content/70 mb-3">
                                    {service.service_name.clone()}
                                </p>
                                {service
                                    .image
                                    .clone()
                                    .map(|src| {
                                        view! {
                                            <img
                                                src=src
                                                alt=service.service_name.clone()
                                                class="w-full h-64 object-cover rounded-xl mb-4"
                                            />
                                        }
                                    })}
                                <p class="text-base-content/80 mb-6">
                                    {service.description.clone()}
                                </p>
                            </div>
                        }
                            .into_any()
                    }
                }}

                // 非服务商（含访客）看到直接预订表单
                <Show when=move || !is_vendor() && state.get().loaded().is_some()>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">
                                <Calendar attr:class="h-5 w-5 text-primary" />
                                "Book This Vendor"
                            </h3>
                            <div class="flex flex-wrap gap-2 items-end">
                                <input
                                    type="date"
                                    class="input input-bordered"
                                    on:input=move |ev| set_date_value.set(event_target_value(&ev))
                                    prop:value=date_value
                                />
                                <input
                                    type="time"
                                    class="input input-bordered"
                                    on:input=move |ev| set_time_value.set(event_target_value(&ev))
                                    prop:value=time_value
                                />
                                <button
                                    class="btn btn-primary"
                                    disabled=move || submitting.get()
                                    on:click=on_book.clone()
                                >
                                    {move || {
                                        if submitting.get() { "Booking..." } else { "Book Vendor" }
                                    }}
                                </button>
                            </div>
                        </div>
                    </div>
                </Show>

                // 主办方看到"为某场活动邀请该服务商"的请求表单
                <Show when=move || is_organizer() && state.get().loaded().is_some()>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body space-y-3">
                            <h3 class="card-title">
                                <Send attr:class="h-5 w-5 text-secondary" />
                                "Request for your event"
                            </h3>

                            <select
                                class="select select-bordered w-full"
                                on:change=move |ev| set_selected_event.set(event_target_value(&ev))
                            >
                                <option value="" selected=move || selected_event.get().is_empty()>
                                    "Select one of your events"
                                </option>
                                <For
                                    each=move || events.get()
                                    key=|event| event.id
                                    children=move |event| {
                                        let id = event.id.to_string();
                                        let value = id.clone();
                                        view! {
                                            <option
                                                value=value
                                                selected=move || selected_event.get() == id
                                            >
                                                {event.title.clone()}
                                            </option>
                                        }
                                    }
                                />
                            </select>

                            <textarea
                                class="textarea textarea-bordered w-full"
                                rows="3"
                                placeholder="Tell the vendor about your event (optional)"
                                on:input=move |ev| set_message.set(event_target_value(&ev))
                                prop:value=message
                            ></textarea>

                            <Show when=already_requested>
                                <div role="alert" class="alert alert-warning text-sm py-2">
                                    <span>
                                        "You've already requested this vendor for this event."
                                    </span>
                                </div>
                            </Show>

                            <button
                                class="btn btn-secondary self-start"
                                disabled=move || submitting.get() || already_requested()
                                on:click=on_send_request.clone()
                            >
                                {move || {
                                    if submitting.get() { "Sending..." } else { "Send request" }
                                }}
                            </button>

                            <p class="text-sm text-base-content/60">
                                "Track responses under "
                                <RouteLink to=AppRoute::SentRequests class="link link-hover">
                                    "sent requests"
                                </RouteLink> "."
                            </p>
                        </div>
                    </div>
                </Show>
            </div>
            <PageFooter />
        </div>
    }
}
