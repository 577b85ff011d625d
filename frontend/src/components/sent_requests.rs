use crate::api::use_api;
use crate::components::icons::{CheckCircle, Clock, Mail, RefreshCw, Search, XCircle};
use crate::components::layout::{BrandHeader, PageFooter};
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::state::Fetch;
use eventhub_shared::{RequestStatus, VendorRequest, date};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 状态过滤（All 之外与 RequestStatus 一一对应）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Pending,
    Accepted,
    Rejected,
}

impl StatusFilter {
    fn from_value(value: &str) -> Self {
        match value {
            "pending" => StatusFilter::Pending,
            "accepted" => StatusFilter::Accepted,
            "rejected" => StatusFilter::Rejected,
            _ => StatusFilter::All,
        }
    }

    fn matches(&self, status: RequestStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == RequestStatus::Pending,
            StatusFilter::Accepted => status == RequestStatus::Accepted,
            StatusFilter::Rejected => status == RequestStatus::Rejected,
        }
    }
}

/// 客户端过滤 + 排序（列表小，内存操作）
fn filter_requests(
    requests: &[VendorRequest],
    search: &str,
    status: StatusFilter,
    newest_first: bool,
) -> Vec<VendorRequest> {
    let needle = search.to_lowercase();
    let mut filtered: Vec<VendorRequest> = requests
        .iter()
        .filter(|request| status.matches(request.status))
        .filter(|request| {
            if needle.is_empty() {
                return true;
            }
            let haystacks = [
                request.event_title.as_deref().unwrap_or_default(),
                request.service_name.as_deref().unwrap_or_default(),
                request.message.as_deref().unwrap_or_default(),
            ];
            haystacks
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    if newest_first {
        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    } else {
        filtered.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    }
    filtered
}

fn status_badge_class(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "badge badge-warning badge-outline gap-1",
        RequestStatus::Accepted => "badge badge-success badge-outline gap-1",
        RequestStatus::Rejected => "badge badge-error badge-outline gap-1",
    }
}

#[component]
fn StatusBadge(status: RequestStatus) -> impl IntoView {
    view! {
        <span class=status_badge_class(status)>
            {match status {
                RequestStatus::Pending => view! { <Clock attr:class="h-3 w-3" /> }.into_any(),
                RequestStatus::Accepted => {
                    view! { <CheckCircle attr:class="h-3 w-3" /> }.into_any()
                }
                RequestStatus::Rejected => view! { <XCircle attr:class="h-3 w-3" /> }.into_any(),
            }}
            {status.label()}
        </span>
    }
}

#[component]
pub fn SentRequestsPage() -> impl IntoView {
    let api = use_api();

    let (state, set_state) = signal(Fetch::<Vec<VendorRequest>>::Loading);
    let (search, set_search) = signal(String::new());
    let (status_filter, set_status_filter) = signal(StatusFilter::All);
    let (newest_first, set_newest_first) = signal(true);
    let (toast, set_toast) = signal(ToastMessage::None);

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_state.set(Fetch::Loading);
            spawn_local(async move {
                match api.sent_requests().await {
                    Ok(requests) => set_state.set(Fetch::Loaded(requests)),
                    Err(e) => {
                        set_state.set(Fetch::Error(
                            "Failed to load sent requests. Please try again later.".to_string(),
                        ));
                        show_toast(set_toast, "Failed to load sent requests", true);
                        web_sys::console::log_1(&format!("[SentRequests] {}", e).into());
                    }
                }
            });
        }
    };

    {
        let load = load.clone();
        load();
    }

    let visible = move || {
        state
            .get()
            .loaded()
            .map(|requests| {
                filter_requests(
                    requests,
                    &search.get(),
                    status_filter.get(),
                    newest_first.get(),
                )
            })
            .unwrap_or_default()
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <BrandHeader />
            <Toast message=toast />
            <div class="max-w-4xl mx-auto px-4 py-8 space-y-6">
                <div class="flex flex-wrap items-center justify-between gap-4">
                    <div class="flex items-center gap-2">
                        <Mail attr:class="h-6 w-6 text-primary" />
                        <h1 class="text-3xl font-bold">"Sent Requests"</h1>
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

                <div class="flex flex-wrap gap-2">
                    <label class="input input-bordered input-sm flex items-center gap-2 flex-1 min-w-48">
                        <Search attr:class="h-4 w-4 opacity-60" />
                        <input
                            type="text"
                            class="grow"
                            placeholder="Search by event, vendor or message"
                            on:input=move |ev| set_search.set(event_target_value(&ev))
                            prop:value=search
                        />
                    </label>
                    <select
                        class="select select-bordered select-sm"
                        on:change=move |ev| {
                            set_status_filter.set(StatusFilter::from_value(&event_target_value(&ev)))
                        }
                    >
                        <option value="all">"All statuses"</option>
                        <option value="pending">"Pending"</option>
                        <option value="accepted">"Accepted"</option>
                        <option value="rejected">"Rejected"</option>
                    </select>
                    <select
                        class="select select-bordered select-sm"
                        on:change=move |ev| {
                            set_newest_first.set(event_target_value(&ev) == "desc")
                        }
                    >
                        <option value="desc">"Newest first"</option>
                        <option value="asc">"Oldest first"</option>
                    </select>
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
                    Fetch::Loaded(requests) if requests.is_empty() => {
                        view! {
                            <div class="text-center py-16 text-base-content/50">
                                "You haven't sent any vendor requests yet."
                            </div>
                        }
                            .into_any()
                    }
                    Fetch::Loaded(_) => {
                        view! {
                            <div class="space-y-3">
                                <For
                                    each=visible
                                    key=|request| request.id
                                    children=move |request| {
                                        view! {
                                            <div class="card bg-base-100 shadow">
                                                <div class="card-body py-4 flex-row items-center justify-between gap-4">
                                                    <div>
                                                        <p class="font-medium">
                                                            {request
                                                                .event_title
                                                                .clone()
                                                                .unwrap_or_else(|| format!("Event #{}", request.event))}
                                                            " -> "
                                                            {request
                                                                .service_name
                                                                .clone()
                                                                .unwrap_or_else(|| {
                                                                    format!("Service #{}", request.vendor_service)
                                                                })}
                                                        </p>
                                                        {request
                                                            .message
                                                            .clone()
                                                            .filter(|m| !m.is_empty())
                                                            .map(|m| {
                                                                view! {
                                                                    <p class="text-sm text-base-content/60">{m}</p>
                                                                }
                                                            })}
                                                        <p class="text-xs text-base-content/50 mt-1">
                                                            {date::format_short(&request.created_at)}
                                                        </p>
                                                    </div>
                                                    <StatusBadge status=request.status />
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

    fn request(id: u64, status: &str, created: &str, title: &str) -> VendorRequest {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "event": id,
            "vendor_service": 1,
            "status": status,
            "created_at": created,
            "event_title": title,
            "message": "need sound"
        }))
        .unwrap()
    }

    #[test]
    fn filters_by_status_and_search() {
        let requests = vec![
            request(1, "pending", "2026-08-01T10:00:00Z", "Tech Fest"),
            request(2, "accepted", "2026-08-02T10:00:00Z", "Food Fair"),
            request(3, "rejected", "2026-08-03T10:00:00Z", "Art Night"),
        ];

        let pending = filter_requests(&requests, "", StatusFilter::Pending, true);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, 1);

        let by_title = filter_requests(&requests, "food", StatusFilter::All, true);
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, 2);

        // 消息内容也参与搜索
        let by_message = filter_requests(&requests, "SOUND", StatusFilter::All, true);
        assert_eq!(by_message.len(), 3);
    }

    #[test]
    fn sorts_by_created_at() {
        let requests = vec![
            request(1, "pending", "2026-08-01T10:00:00Z", "a"),
            request(2, "pending", "2026-08-03T10:00:00Z", "b"),
            request(3, "pending", "2026-08-02T10:00:00Z", "c"),
        ];

        let newest = filter_requests(&requests, "", StatusFilter::All, true);
        assert_eq!(newest.iter().map(|r| r.id).collect::<Vec<_>>(), [2, 3, 1]);

        let oldest = filter_requests(&requests, "", StatusFilter::All, false);
        assert_eq!(oldest.iter().map(|r| r.id).collect::<Vec<_>>(), [1, 3, 2]);
    }
}
