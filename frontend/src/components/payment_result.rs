use crate::api::use_api;
use crate::components::icons::{AlertCircle, CheckCircle, Download, XCircle};
use crate::components::layout::{BrandHeader, PageFooter};
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::export;
use crate::web::http::fetch_binary;
use crate::web::route::AppRoute;
use crate::web::router::RouteLink;
use eventhub_shared::Ticket;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 后端确认"已核验并发布"时的原话
const VERIFIED_EVENT_MESSAGE: &str = "Payment verified and event published.";

/// 两个支付回跳页共用此组件，按 kind 决定核验接口与成功文案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    /// 活动上架付费
    EventPublish,
    /// 购票付费
    TicketPurchase,
}

/// 核验状态机：verifying -> success / partial / failed / invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerifyState {
    Verifying,
    Success,
    /// 支付收到但发布未完成（仅活动上架）
    Partial,
    Failed,
    /// URL 缺 reference
    Invalid,
}

#[component]
pub fn PaymentResultPage(kind: PaymentKind, reference: Option<String>) -> impl IntoView {
    let api = use_api();

    let (state, set_state) = signal(VerifyState::Verifying);
    let (ticket, set_ticket) = signal(Option::<Ticket>::None);
    let (toast, set_toast) = signal(ToastMessage::None);

    match reference.clone() {
        None => set_state.set(VerifyState::Invalid),
        Some(reference) => {
            let api = api.clone();
            spawn_local(async move {
                match kind {
                    PaymentKind::EventPublish => match api.verify_payment(reference).await {
                        Ok(ack) => {
                            if ack.message.as_deref() == Some(VERIFIED_EVENT_MESSAGE) {
                                set_state.set(VerifyState::Success);
                            } else {
                                set_state.set(VerifyState::Partial);
                            }
                        }
                        Err(_) => set_state.set(VerifyState::Failed),
                    },
                    PaymentKind::TicketPurchase => {
                        match api.verify_ticket_payment(reference).await {
                            Ok(issued) => {
                                set_ticket.set(Some(issued));
                                set_state.set(VerifyState::Success);
                            }
                            Err(_) => set_state.set(VerifyState::Failed),
                        }
                    }
                }
            });
        }
    }

    let on_download_qr = move |_| {
        let Some(t) = ticket.get_untracked() else {
            return;
        };
        let Some(url) = t.qr_code_url.clone() else {
            show_toast(set_toast, "This ticket has no QR code yet.", true);
            return;
        };
        spawn_local(async move {
            match fetch_binary(&url).await {
                Ok(bytes) => {
                    let _ = export::download_bytes(
                        &format!("Ticket-{}.png", t.reference),
                        "image/png",
                        &bytes,
                    );
                }
                Err(_) => show_toast(set_toast, "Could not download the QR code.", true),
            }
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 flex flex-col">
            <BrandHeader />
            <Toast message=toast />
            <main class="flex-1 flex items-center justify-center p-4">
                <div class="card bg-base-100 shadow-xl w-full max-w-md">
                    <div class="card-body items-center text-center space-y-2">
                        {move || match state.get() {
                            VerifyState::Verifying => {
                                view! {
                                    <span class="loading loading-spinner loading-lg text-primary"></span>
                                    <h2 class="card-title">"Verifying payment..."</h2>
                                    <p class="text-base-content/70">
                                        "Hold on while we confirm your payment."
                                    </p>
                                }
                                    .into_any()
                            }
                            VerifyState::Success => {
                                view! {
                                    <CheckCircle attr:class="h-12 w-12 text-success" />
                                    <h2 class="card-title">
                                        {match kind {
                                            PaymentKind::EventPublish => "Event published!",
                                            PaymentKind::TicketPurchase => "Ticket confirmed!",
                                        }}
                                    </h2>
                                    {move || {
                                        ticket
                                            .get()
                                            .map(|t| {
                                                view! {
                                                    <div class="space-y-2">
                                                        {t
                                                            .qr_code_url
                                                            .clone()
                                                            .map(|src| {
                                                                view! {
                                                                    <img
                                                                        src=src
                                                                        alt="Ticket QR code"
                                                                        class="mx-auto w-36 h-36 border border-base-300 rounded"
                                                                    />
                                                                }
                                                            })}
                                                        <p class="font-mono text-sm opacity-70">{t.reference.clone()}</p>
                                                        <button
                                                            class="btn btn-sm btn-ghost gap-2"
                                                            on:click=on_download_qr
                                                        >
                                                            <Download attr:class="h-4 w-4" />
                                                            "Download QR"
                                                        </button>
                                                    </div>
                                                }
                                            })
                                    }}
                                    <div class="card-actions justify-center mt-2">
                                        {match kind {
                                            PaymentKind::EventPublish => {
                                                view! {
                                                    <RouteLink to=AppRoute::Dashboard class="btn btn-primary">
                                                        "Go to dashboard"
                                                    </RouteLink>
                                                }
                                                    .into_any()
                                            }
                                            PaymentKind::TicketPurchase => {
                                                view! {
                                                    <RouteLink to=AppRoute::MyTickets class="btn btn-primary">
                                                        "View my tickets"
                                                    </RouteLink>
                                                }
                                                    .into_any()
                                            }
                                        }}
                                    </div>
                                }
                                    .into_any()
                            }
                            VerifyState::Partial => {
                                view! {
                                    <AlertCircle attr:class="h-12 w-12 text-warning" />
                                    <h2 class="card-title">"Payment received"</h2>
                                    <p class="text-base-content/70">
                                        "We received your payment but the event is not published yet. It will appear shortly."
                                    </p>
                                    <RouteLink to=AppRoute::Dashboard class="btn btn-ghost">
                                        "Back to dashboard"
                                    </RouteLink>
                                }
                                    .into_any()
                            }
                            VerifyState::Failed => {
                                view! {
                                    <XCircle attr:class="h-12 w-12 text-error" />
                                    <h2 class="card-title">"Verification failed"</h2>
                                    <p class="text-base-content/70">
                                        "We could not verify this payment. If you were charged, contact support."
                                    </p>
                                    <RouteLink to=AppRoute::Events class="btn btn-ghost">
                                        "Back to events"
                                    </RouteLink>
                                }
                                    .into_any()
                            }
                            VerifyState::Invalid => {
                                view! {
                                    <AlertCircle attr:class="h-12 w-12 text-warning" />
                                    <h2 class="card-title">"Missing payment reference"</h2>
                                    <p class="text-base-content/70">
                                        "This page needs a payment reference in the URL."
                                    </p>
                                    <RouteLink to=AppRoute::Events class="btn btn-ghost">
                                        "Back to events"
                                    </RouteLink>
                                }
                                    .into_any()
                            }
                        }}
                    </div>
                </div>
            </main>
            <PageFooter />
        </div>
    }
}
