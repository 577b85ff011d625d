mod form_state;

use crate::api::use_api;
use crate::components::icons::{Plus, Trash2};
use crate::components::layout::{BrandHeader, PageFooter};
use crate::session::session;
use crate::validate::validate_event_field;
use crate::web::route::AppRoute;
use crate::web::router::{redirect_external, use_router};
use form_state::EventFormState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

/// 表单顶部的整体状态条（typed，三态互斥）
#[derive(Clone, PartialEq, Default)]
enum FormStatus {
    #[default]
    Idle,
    Loading(String),
    Error(String),
    Success(String),
}

/// 字段 + 内联错误的小包装
#[component]
fn FieldError(form: EventFormState, #[prop(into)] key: String) -> impl IntoView {
    let key = StoredValue::new(key);
    view! {
        <Show when=move || key.with_value(|k| form.error_for(k).is_some())>
            <label class="label">
                <span class="label-text-alt text-error">
                    {move || key.with_value(|k| form.error_for(k).unwrap_or_default())}
                </span>
            </label>
        </Show>
    }
}

#[component]
pub fn CreateEventPage() -> impl IntoView {
    let router = use_router();
    let api = use_api();

    // 守卫：无令牌先记录回跳路径（创建页不拉 profile，与预订页同策略）
    {
        let s = session();
        if s.access_token().is_none() {
            s.remember_redirect(&AppRoute::CreateEvent.to_path());
            router.navigate(AppRoute::Login);
        }
    }

    let form = EventFormState::new();
    // 传单文件句柄（非 Send），只在 on: 事件处理器中流动
    let flyer_file = RwSignal::new_local(Option::<web_sys::File>::None);
    let (status, set_status) = signal(FormStatus::Idle);
    let (submitting, set_submitting) = signal(false);

    // 单字段即时校验（输入变更时更新对应键）
    let check_field = move |name: &'static str, value: String| {
        let message = validate_event_field(name, &value, &form.start_date.get_untracked());
        form.errors.update(|errors| {
            match message {
                Some(text) => errors.insert(name.to_string(), text),
                None => errors.remove(name),
            };
        });
    };

    let on_flyer_change = move |ev: leptos::web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.item(0));

        if let Some(file) = &file {
            let mime = file.type_();
            form.errors.update(|errors| {
                if mime.starts_with("image/") {
                    errors.remove("flyer");
                } else {
                    errors.insert("flyer".to_string(), "Please upload an image file".to_string());
                }
            });
            form.flyer_mime.set(Some(mime));
        } else {
            form.flyer_mime.set(None);
        }
        flyer_file.set(file);
    };

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();

            if !form.validate() {
                set_status.set(FormStatus::Error(
                    "Please fix the errors in the form before submitting".to_string(),
                ));
                return;
            }

            let data = match form.to_form_data(flyer_file.get_untracked().as_ref()) {
                Ok(data) => data,
                Err(e) => {
                    set_status.set(FormStatus::Error(format!("Could not build form: {}", e)));
                    return;
                }
            };

            set_submitting.set(true);
            set_status.set(FormStatus::Loading("Creating your event...".to_string()));

            let api = api.clone();
            spawn_local(async move {
                match api.create_event_flow(data).await {
                    Ok(payment_url) => {
                        set_status.set(FormStatus::Success(
                            "Event created! Redirecting to payment...".to_string(),
                        ));
                        redirect_external(&payment_url);
                    }
                    Err(e) => {
                        // 支付初始化失败时活动已创建且不回滚，文案如实说明
                        set_status.set(FormStatus::Error(e.user_message()));
                        set_submitting.set(false);
                    }
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <BrandHeader />
            <div class="max-w-3xl mx-auto px-4 py-8">
                <h1 class="text-3xl font-bold text-center mb-6">"Create New Event"</h1>

                {move || match status.get() {
                    FormStatus::Idle => ().into_any(),
                    FormStatus::Loading(message) => {
                        view! {
                            <div class="alert mb-6">
                                <span class="loading loading-spinner loading-sm"></span>
                                <span>{message}</span>
                            </div>
                        }
                            .into_any()
                    }
                    FormStatus::Error(message) => {
                        view! {
                            <div role="alert" class="alert alert-error mb-6">
                                <span>{message}</span>
                            </div>
                        }
                            .into_any()
                    }
                    FormStatus::Success(message) => {
                        view! {
                            <div role="alert" class="alert alert-success mb-6">
                                <span>{message}</span>
                            </div>
                        }
                            .into_any()
                    }
                }}

                <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                    <div class="card-body space-y-2">
                        <div class="form-control">
                            <label class="label" for="title">
                                <span class="label-text">"Title"</span>
                            </label>
                            <input
                                id="title"
                                type="text"
                                placeholder="Lagos Tech Fest"
                                class="input input-bordered w-full"
                                prop:value=form.title
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.title.set(value.clone());
                                    check_field("title", value);
                                }
                            />
                            <FieldError form=form key="title" />
                        </div>

                        <div class="form-control">
                            <label class="label" for="description">
                                <span class="label-text">"Description"</span>
                            </label>
                            <textarea
                                id="description"
                                rows="4"
                                placeholder="What makes this event special?"
                                class="textarea textarea-bordered w-full"
                                prop:value=form.description
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.description.set(value.clone());
                                    check_field("description", value);
                                }
                            ></textarea>
                            <FieldError form=form key="description" />
                        </div>

                        <div class="form-control">
                            <label class="label" for="location">
                                <span class="label-text">"Location"</span>
                            </label>
                            <input
                                id="location"
                                type="text"
                                placeholder="Landmark Centre"
                                class="input input-bordered w-full"
                                prop:value=form.location
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.location.set(value.clone());
                                    check_field("location", value);
                                }
                            />
                            <FieldError form=form key="location" />
                        </div>

                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="start_date">
                                    <span class="label-text">"Starts"</span>
                                </label>
                                <input
                                    id="start_date"
                                    type="datetime-local"
                                    class="input input-bordered w-full"
                                    prop:value=form.start_date
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        form.start_date.set(value.clone());
                                        check_field("start_date", value);
                                    }
                                />
                                <FieldError form=form key="start_date" />
                            </div>
                            <div class="form-control">
                                <label class="label" for="end_date">
                                    <span class="label-text">"Ends"</span>
                                </label>
                                <input
                                    id="end_date"
                                    type="datetime-local"
                                    class="input input-bordered w-full"
                                    prop:value=form.end_date
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        form.end_date.set(value.clone());
                                        check_field("end_date", value);
                                    }
                                />
                                <FieldError form=form key="end_date" />
                            </div>
                        </div>

                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="ticket_price">
                                    <span class="label-text">"Ticket price (₦)"</span>
                                </label>
                                <input
                                    id="ticket_price"
                                    type="number"
                                    min="0"
                                    placeholder="5000"
                                    class="input input-bordered w-full"
                                    prop:value=form.ticket_price
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        form.ticket_price.set(value.clone());
                                        check_field("ticket_price", value);
                                    }
                                />
                                <FieldError form=form key="ticket_price" />
                            </div>
                            <div class="form-control">
                                <label class="label" for="capacity">
                                    <span class="label-text">"Capacity"</span>
                                </label>
                                <input
                                    id="capacity"
                                    type="number"
                                    min="1"
                                    placeholder="300"
                                    class="input input-bordered w-full"
                                    prop:value=form.capacity
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        form.capacity.set(value.clone());
                                        check_field("capacity", value);
                                    }
                                />
                                <FieldError form=form key="capacity" />
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label" for="flyer">
                                <span class="label-text">"Event flyer"</span>
                            </label>
                            <input
                                id="flyer"
                                type="file"
                                accept="image/*"
                                class="file-input file-input-bordered w-full"
                                on:change=on_flyer_change
                            />
                            <FieldError form=form key="flyer" />
                        </div>

                        // 票档
                        <div class="divider">"Price tiers"</div>
                        <For
                            each=move || 0..form.tiers.get().len()
                            key=|index| *index
                            children=move |index| {
                                view! {
                                    <div class="grid grid-cols-[1fr_1fr_1fr_auto] gap-2 items-end">
                                        <div class="form-control">
                                            <label class="label">
                                                <span class="label-text">"Name"</span>
                                            </label>
                                            <input
                                                type="text"
                                                placeholder="Regular"
                                                class="input input-bordered input-sm w-full"
                                                prop:value=move || {
                                                    form.tiers
                                                        .with(|t| {
                                                            t.get(index).map(|t| t.name.clone()).unwrap_or_default()
                                                        })
                                                }
                                                on:input=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    form.tiers
                                                        .update(|tiers| {
                                                            if let Some(tier) = tiers.get_mut(index) {
                                                                tier.name = value;
                                                            }
                                                        });
                                                }
                                            />
                                            <FieldError
                                                form=form
                                                key=format!("tier_{}_name", index)
                                            />
                                        </div>
                                        <div class="form-control">
                                            <label class="label">
                                                <span class="label-text">"Price"</span>
                                            </label>
                                            <input
                                                type="number"
                                                min="0"
                                                class="input input-bordered input-sm w-full"
                                                prop:value=move || {
                                                    form.tiers
                                                        .with(|t| {
                                                            t.get(index).map(|t| t.price.clone()).unwrap_or_default()
                                                        })
                                                }
                                                on:input=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    form.tiers
                                                        .update(|tiers| {
                                                            if let Some(tier) = tiers.get_mut(index) {
                                                                tier.price = value;
                                                            }
                                                        });
                                                }
                                            />
                                            <FieldError
                                                form=form
                                                key=format!("tier_{}_price", index)
                                            />
                                        </div>
                                        <div class="form-control">
                                            <label class="label">
                                                <span class="label-text">"Capacity"</span>
                                            </label>
                                            <input
                                                type="number"
                                                min="1"
                                                class="input input-bordered input-sm w-full"
                                                prop:value=move || {
                                                    form.tiers
                                                        .with(|t| {
                                                            t.get(index)
                                                                .map(|t| t.capacity.clone())
                                                                .unwrap_or_default()
                                                        })
                                                }
                                                on:input=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    form.tiers
                                                        .update(|tiers| {
                                                            if let Some(tier) = tiers.get_mut(index) {
                                                                tier.capacity = value;
                                                            }
                                                        });
                                                }
                                            />
                                            <FieldError
                                                form=form
                                                key=format!("tier_{}_capacity", index)
                                            />
                                        </div>
                                        <button
                                            type="button"
                                            class="btn btn-ghost btn-sm text-error"
                                            on:click=move |_| form.remove_tier(index)
                                        >
                                            <Trash2 attr:class="h-4 w-4" />
                                        </button>
                                    </div>
                                }
                            }
                        />
                        <button
                            type="button"
                            class="btn btn-ghost btn-sm self-start gap-2"
                            on:click=move |_| form.add_tier()
                        >
                            <Plus attr:class="h-4 w-4" />
                            "Add tier"
                        </button>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || submitting.get()>
                                {move || {
                                    if submitting.get() {
                                        view! {
                                            <span class="loading loading-spinner"></span>
                                            "Submitting..."
                                        }
                                            .into_any()
                                    } else {
                                        "Create event".into_any()
                                    }
                                }}
                            </button>
                        </div>
                    </div>
                </form>
            </div>
            <PageFooter />
        </div>
    }
}
