//! 公共页面骨架：品牌页眉与页脚

use crate::components::icons::Ticket;
use crate::web::route::AppRoute;
use crate::web::router::RouteLink;
use leptos::prelude::*;

/// 品牌页眉（logo 回首页 + 常用入口）
#[component]
pub fn BrandHeader() -> impl IntoView {
    view! {
        <header class="navbar bg-base-100 border-b border-base-300 px-4">
            <div class="flex-1">
                <RouteLink to=AppRoute::Home class="btn btn-ghost gap-2 text-xl normal-case">
                    <span class="p-2 bg-primary text-primary-content rounded-lg">
                        <Ticket attr:class="h-5 w-5" />
                    </span>
                    "EventHub"
                </RouteLink>
            </div>
            <div class="flex-none gap-1">
                <RouteLink to=AppRoute::Events class="btn btn-ghost btn-sm">"Events"</RouteLink>
                <RouteLink to=AppRoute::VendorServices class="btn btn-ghost btn-sm">
                    "Vendors"
                </RouteLink>
                <RouteLink to=AppRoute::MyTickets class="btn btn-ghost btn-sm">
                    "My Tickets"
                </RouteLink>
            </div>
        </header>
    }
}

/// 页脚
#[component]
pub fn PageFooter() -> impl IntoView {
    view! {
        <footer class="border-t border-base-300 mt-12">
            <div class="max-w-7xl mx-auto px-4 py-6 flex flex-col md:flex-row justify-between items-center gap-3">
                <div class="flex items-center gap-2">
                    <span class="p-1.5 bg-primary text-primary-content rounded-md">
                        <Ticket attr:class="h-4 w-4" />
                    </span>
                    <span class="text-sm font-medium">"EventHub"</span>
                </div>
                <div class="text-sm text-base-content/60">
                    "EventHub - Your trusted ticketing platform"
                </div>
            </div>
        </footer>
    }
}
