use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::icons::CreditCard;
use crate::components::layout::{BrandHeader, PageFooter};
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::validate::{is_valid_account_number, is_valid_custom_bank_code};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use eventhub_shared::UserRole;
use eventhub_shared::protocol::SubaccountRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

/// 常用银行清单（后端无银行目录接口，随客户端内置）
const BANK_CODES: [(&str, &str); 9] = [
    ("058", "Guaranty Trust Bank"),
    ("011", "First Bank of Nigeria"),
    ("057", "Zenith Bank"),
    ("044", "Access Bank"),
    ("050", "Ecobank Nigeria"),
    ("100004", "Paycom/ Opay"),
    ("100033", "Palmpay"),
    ("090406", "Moniepoint"),
    ("090267", "Kuda"),
];

#[component]
pub fn SettingsPage() -> impl IntoView {
    let router = use_router();
    let api = use_api();
    let guard = use_auth(Some(UserRole::Organizer));

    let (account_number, set_account_number) = signal(String::new());
    let (bank_code, set_bank_code) = signal(String::new());
    let (show_custom, set_show_custom) = signal(false);
    let (custom_name, set_custom_name) = signal(String::new());
    let (custom_code, set_custom_code) = signal(String::new());
    let (attempted, set_attempted) = signal(false);
    let (loading, set_loading) = signal(false);
    let (toast, set_toast) = signal(ToastMessage::None);

    let account_invalid =
        move || attempted.get() && !is_valid_account_number(&account_number.get());
    let bank_invalid = move || {
        if !attempted.get() {
            return false;
        }
        if show_custom.get() {
            custom_name.get().trim().is_empty() || !is_valid_custom_bank_code(&custom_code.get())
        } else {
            bank_code.get().is_empty()
        }
    };

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_attempted.set(true);

            if account_invalid() || bank_invalid() {
                show_toast(set_toast, "Please check the form for errors.", true);
                return;
            }

            let request = if show_custom.get_untracked() {
                SubaccountRequest {
                    account_number: account_number.get_untracked(),
                    bank_code: custom_code.get_untracked(),
                    business_name: custom_name.get_untracked(),
                }
            } else {
                let code = bank_code.get_untracked();
                let name = BANK_CODES
                    .iter()
                    .find(|(c, _)| *c == code)
                    .map(|(_, n)| (*n).to_string())
                    .unwrap_or_default();
                SubaccountRequest {
                    account_number: account_number.get_untracked(),
                    bank_code: code,
                    business_name: name,
                }
            };

            set_loading.set(true);
            let api = api.clone();
            spawn_local(async move {
                match api.setup_subaccount(&request).await {
                    Ok(_) => {
                        show_toast(set_toast, "Bank account successfully connected!", false);
                        set_timeout(
                            move || router.navigate(AppRoute::Dashboard),
                            Duration::from_millis(1000),
                        );
                    }
                    Err(e) => show_toast(set_toast, e.user_message(), true),
                }
                set_loading.set(false);
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
                <div class="max-w-xl mx-auto px-4 py-10">
                    <form class="card bg-base-100 shadow-xl" on:submit=on_submit.clone()>
                        <div class="card-body space-y-3">
                            <h2 class="card-title">
                                <CreditCard attr:class="h-5 w-5 text-primary" />
                                "Connect payout account"
                            </h2>
                            <p class="text-sm text-base-content/70">
                                "Ticket revenue is settled into this bank account."
                            </p>

                            <div class="form-control">
                                <label class="label" for="account-number">
                                    <span class="label-text">"Account number"</span>
                                </label>
                                <input
                                    id="account-number"
                                    type="text"
                                    maxlength="10"
                                    placeholder="0123456789"
                                    class=move || {
                                        if account_invalid() {
                                            "input input-bordered input-error w-full"
                                        } else {
                                            "input input-bordered w-full"
                                        }
                                    }
                                    on:input=move |ev| set_account_number.set(event_target_value(&ev))
                                    prop:value=account_number
                                />
                                <Show when=account_invalid>
                                    <label class="label">
                                        <span class="label-text-alt text-error">
                                            "Account number must be exactly 10 digits"
                                        </span>
                                    </label>
                                </Show>
                            </div>

                            <div class="form-control">
                                <label class="label" for="bank">
                                    <span class="label-text">"Bank"</span>
                                </label>
                                <Show
                                    when=move || !show_custom.get()
                                    fallback=move || {
                                        view! {
                                            <div class="space-y-2">
                                                <input
                                                    type="text"
                                                    placeholder="Bank name"
                                                    class="input input-bordered w-full"
                                                    on:input=move |ev| {
                                                        set_custom_name.set(event_target_value(&ev))
                                                    }
                                                    prop:value=custom_name
                                                />
                                                <input
                                                    type="text"
                                                    maxlength="3"
                                                    placeholder="3-digit bank code"
                                                    class="input input-bordered w-full"
                                                    on:input=move |ev| {
                                                        set_custom_code.set(event_target_value(&ev))
                                                    }
                                                    prop:value=custom_code
                                                />
                                            </div>
                                        }
                                    }
                                >
                                    <select
                                        id="bank"
                                        class="select select-bordered w-full"
                                        on:change=move |ev| set_bank_code.set(event_target_value(&ev))
                                    >
                                        <option value="" selected=move || bank_code.get().is_empty()>
                                            "Select your bank"
                                        </option>
                                        {BANK_CODES
                                            .iter()
                                            .map(|(code, name)| {
                                                let code = *code;
                                                view! {
                                                    <option
                                                        value=code
                                                        selected=move || bank_code.get() == code
                                                    >
                                                        {*name}
                                                    </option>
                                                }
                                            })
                                            .collect_view()}
                                    </select>
                                </Show>
                                <Show when=bank_invalid>
                                    <label class="label">
                                        <span class="label-text-alt text-error">
                                            {move || {
                                                if show_custom.get() {
                                                    "Enter a bank name and a 3-digit code"
                                                } else {
                                                    "Please select a bank"
                                                }
                                            }}
                                        </span>
                                    </label>
                                </Show>
                                <label class="label cursor-pointer justify-start gap-2">
                                    <input
                                        type="checkbox"
                                        class="toggle toggle-sm toggle-primary"
                                        prop:checked=show_custom
                                        on:change=move |ev| {
                                            set_show_custom.set(event_target_checked(&ev))
                                        }
                                    />
                                    <span class="label-text">"My bank is not listed"</span>
                                </label>
                            </div>

                            <div class="form-control mt-4">
                                <button class="btn btn-primary" disabled=move || loading.get()>
                                    {move || {
                                        if loading.get() {
                                            view! {
                                                <span class="loading loading-spinner"></span>
                                                "Connecting..."
                                            }
                                                .into_any()
                                        } else {
                                            "Connect account".into_any()
                                        }
                                    }}
                                </button>
                            </div>
                        </div>
                    </form>
                </div>
            </Show>
            <PageFooter />
        </div>
    }
}
