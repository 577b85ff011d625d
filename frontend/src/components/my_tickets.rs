use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::icons::{Calendar, Download, FileText, MapPin, Printer, Ticket as TicketIcon};
use crate::components::layout::{BrandHeader, PageFooter};
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::export;
use crate::state::Fetch;
use crate::web::http::fetch_binary;
use chrono::DateTime;
use eventhub_shared::{Ticket, date, format_naira};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 生成时间（页脚戳）
fn generated_stamp() -> String {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64)
        .map(|dt| date::format_short(&dt))
        .unwrap_or_default()
}

/// 单张票卡（含导出按钮组；打印兜底路径走颜色改写）
#[component]
fn TicketCard(
    ticket: Ticket,
    downloading: ReadSignal<Option<String>>,
    set_downloading: WriteSignal<Option<String>>,
    set_toast: WriteSignal<ToastMessage>,
) -> impl IntoView {
    let card_ref = NodeRef::<leptos::html::Div>::new();
    let reference = ticket.reference.clone();

    let is_downloading = {
        let reference = reference.clone();
        move || downloading.get().as_deref() == Some(reference.as_str())
    };

    let on_download_pdf = {
        let ticket = ticket.clone();
        move |_| {
            let ticket = ticket.clone();
            set_downloading.set(Some(ticket.reference.clone()));
            spawn_local(async move {
                // 先抓二维码字节；失败则继续输出无码版
                let qr_bytes = match &ticket.qr_code_url {
                    Some(url) => fetch_binary(url).await.ok(),
                    None => None,
                };
                let result = export::build_ticket_pdf(
                    &ticket,
                    qr_bytes.as_deref(),
                    &generated_stamp(),
                )
                .and_then(|bytes| {
                    export::download_bytes(
                        &format!("EventHub-Ticket-{}.pdf", ticket.reference),
                        "application/pdf",
                        &bytes,
                    )
                });
                if let Err(e) = result {
                    web_sys::console::log_1(&format!("[Export] {}", e).into());
                    show_toast(set_toast, "Could not generate the ticket PDF.", true);
                }
                set_downloading.set(None);
            });
        }
    };

    let on_download_qr = {
        let ticket = ticket.clone();
        move |_| {
            let Some(url) = ticket.qr_code_url.clone() else {
                show_toast(set_toast, "This ticket has no QR code yet.", true);
                return;
            };
            let reference = ticket.reference.clone();
            spawn_local(async move {
                match fetch_binary(&url).await {
                    Ok(bytes) => {
                        if export::download_bytes(
                            &format!("Ticket-{}.png", reference),
                            "image/png",
                            &bytes,
                        )
                        .is_err()
                        {
                            show_toast(set_toast, "Could not download the QR code.", true);
                        }
                    }
                    Err(_) => show_toast(set_toast, "Could not download the QR code.", true),
                }
            });
        }
    };

    let on_print = move |_| {
        if let Some(card) = card_ref.get_untracked() {
            export::sanitize::print_card(&card);
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl" node_ref=card_ref>
            <div class="card-body">
                <div class="flex items-start justify-between gap-4">
                    <div>
                        <h2 class="card-title">{ticket.event_title.clone()}</h2>
                        <p class="flex items-center gap-2 text-sm text-base-content/70">
                            <Calendar attr:class="h-4 w-4" />
                            {date::format_short(&ticket.event_date)}
                        </p>
                        <p class="flex items-center gap-2 text-sm text-base-content/70">
                            <MapPin attr:class="h-4 w-4" />
                            {ticket.event_location.clone()}
                        </p>
                        <p class="text-sm mt-2">
                            <span class="font-mono text-xs opacity-60">
                                {ticket.reference.clone()}
                            </span>
                        </p>
                        <p class="text-sm">
                            {format!(
                                "{} x ticket{}",
                                ticket.quantity,
                                if ticket.quantity > 1 { "s" } else { "" },
                            )}
                            {ticket
                                .amount_paid
                                .map(|amount| format!(" · {}", format_naira(amount)))
                                .unwrap_or_default()}
                        </p>
                    </div>
                    {ticket
                        .qr_code_url
                        .clone()
                        .map(|src| {
                            view! {
                                <img
                                    src=src
                                    alt="Ticket QR code"
                                    class="w-24 h-24 border border-base-300 rounded"
                                />
                            }
                        })}
                </div>

                <div class="card-actions justify-end mt-2">
                    <button
                        class="btn btn-sm btn-primary gap-2"
                        disabled=is_downloading.clone()
                        on:click=on_download_pdf
                    >
                        {
                            let is_downloading = is_downloading.clone();
                            move || {
                                if is_downloading() {
                                    view! { <span class="loading loading-spinner loading-xs"></span> }
                                        .into_any()
                                } else {
                                    view! { <FileText attr:class="h-4 w-4" /> }.into_any()
                                }
                            }
                        }
                        "Download PDF"
                    </button>
                    <button class="btn btn-sm btn-ghost gap-2" on:click=on_download_qr>
                        <Download attr:class="h-4 w-4" />
                        "QR code"
                    </button>
                    <button class="btn btn-sm btn-ghost gap-2" on:click=on_print>
                        <Printer attr:class="h-4 w-4" />
                        "Print"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn MyTicketsPage() -> impl IntoView {
    let api = use_api();
    let guard = use_auth(None);

    let (state, set_state) = signal(Fetch::<Vec<Ticket>>::Loading);
    let (downloading, set_downloading) = signal(Option::<String>::None);
    let (toast, set_toast) = signal(ToastMessage::None);

    {
        let api = api.clone();
        spawn_local(async move {
            set_state.set(Fetch::from_result(api.my_tickets().await));
        });
    }

    view! {
        <div class="min-h-screen bg-base-200">
            <BrandHeader />
            <Toast message=toast />
            <div class="max-w-3xl mx-auto px-4 py-8 space-y-6">
                <div class="flex items-center gap-2">
                    <TicketIcon attr:class="h-6 w-6 text-primary" />
                    <h1 class="text-3xl font-bold">"My Tickets"</h1>
                </div>

                {move || match (guard.checking.get(), state.get()) {
                    (true, _) | (_, Fetch::Idle) | (_, Fetch::Loading) => {
                        view! {
                            <div class="flex justify-center py-16">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        }
                            .into_any()
                    }
                    (_, Fetch::Error(message)) => {
                        view! {
                            <div role="alert" class="alert alert-error">
                                <span>{message}</span>
                            </div>
                        }
                            .into_any()
                    }
                    (_, Fetch::Loaded(tickets)) if tickets.is_empty() => {
                        view! {
                            <div class="text-center py-16 text-base-content/50">
                                "No tickets yet. Book an event to see it here."
                            </div>
                        }
                            .into_any()
                    }
                    (_, Fetch::Loaded(_tickets)) => {
                        view! {
                            <div class="space-y-4">
                                <For
                                    each=move || {
                                        state.get().loaded().cloned().unwrap_or_default()
                                    }
                                    key=|ticket| ticket.reference.clone()
                                    children=move |ticket| {
                                        view! {
                                            <TicketCard
                                                ticket=ticket
                                                downloading=downloading
                                                set_downloading=set_downloading
                                                set_toast=set_toast
                                            />
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
