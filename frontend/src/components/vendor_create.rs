use crate::api::use_api;
use crate::components::icons::Upload;
use crate::components::layout::{BrandHeader, PageFooter};
use crate::components::toast::{Toast, ToastMessage, show_toast};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

#[component]
pub fn CreateVendorServicePage() -> impl IntoView {
    let router = use_router();
    let api = use_api();

    let (business_name, set_business_name) = signal(String::new());
    let (service_name, set_service_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let image = RwSignal::new_local(Option::<web_sys::File>::None);
    let (loading, set_loading) = signal(false);
    let (toast, set_toast) = signal(ToastMessage::None);

    let on_file_change = move |ev: leptos::web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.item(0));
        image.set(file);
    };

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();

            let form = match web_sys::FormData::new() {
                Ok(form) => form,
                Err(_) => return,
            };
            let _ = form.append_with_str("business_name", &business_name.get_untracked());
            let _ = form.append_with_str("service_name", &service_name.get_untracked());
            let _ = form.append_with_str("description", &description.get_untracked());
            if let Some(file) = image.get_untracked() {
                let _ = form.append_with_blob("image", &file);
            }

            set_loading.set(true);
            let api = api.clone();
            spawn_local(async move {
                match api.create_service(form).await {
                    Ok(_) => {
                        show_toast(set_toast, "Service created successfully!", false);
                        router.navigate(AppRoute::VendorDashboard);
                    }
                    Err(_) => show_toast(set_toast, "Failed to create service.", true),
                }
                set_loading.set(false);
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <BrandHeader />
            <Toast message=toast />
            <div class="max-w-xl mx-auto px-4 py-10">
                <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                    <div class="card-body space-y-3">
                        <h2 class="card-title">"Add a new service"</h2>
                        <p class="text-sm text-base-content/70">
                            "Describe what you offer so organizers can find you."
                        </p>

                        <div class="form-control">
                            <label class="label" for="business-name">
                                <span class="label-text">"Business name"</span>
                            </label>
                            <input
                                id="business-name"
                                type="text"
                                placeholder="Krush Audio"
                                class="input input-bordered w-full"
                                on:input=move |ev| set_business_name.set(event_target_value(&ev))
                                prop:value=business_name
                                required
                            />
                        </div>

                        <div class="form-control">
                            <label class="label" for="service-name">
                                <span class="label-text">"Service name"</span>
                            </label>
                            <input
                                id="service-name"
                                type="text"
                                placeholder="Live DJ & sound"
                                class="input input-bordered w-full"
                                on:input=move |ev| set_service_name.set(event_target_value(&ev))
                                prop:value=service_name
                                required
                            />
                        </div>

                        <div class="form-control">
                            <label class="label" for="service-description">
                                <span class="label-text">"Description"</span>
                            </label>
                            <textarea
                                id="service-description"
                                rows="4"
                                placeholder="Gear, experience, typical setups..."
                                class="textarea textarea-bordered w-full"
                                on:input=move |ev| set_description.set(event_target_value(&ev))
                                prop:value=description
                                required
                            ></textarea>
                        </div>

                        <div class="form-control">
                            <label class="label" for="service-image">
                                <span class="label-text flex items-center gap-2">
                                    <Upload attr:class="h-4 w-4" />
                                    "Cover image (optional)"
                                </span>
                            </label>
                            <input
                                id="service-image"
                                type="file"
                                accept="image/*"
                                class="file-input file-input-bordered w-full"
                                on:change=on_file_change
                            />
                        </div>

                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || loading.get()>
                                {move || {
                                    if loading.get() {
                                        view! {
                                            <span class="loading loading-spinner"></span>
                                            "Creating..."
                                        }
                                            .into_any()
                                    } else {
                                        "Create service".into_any()
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
