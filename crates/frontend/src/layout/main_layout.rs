use leptos::prelude::*;

use super::global_context::{allowed_pages, use_app_context, Page};
use crate::dashboards::d400_sales_performance::ui::dashboard::SalesPerformanceDashboard;
use crate::dashboards::d401_province_revenue::ui::province_table::ProvinceRevenueView;
use crate::domain::a001_order::ui::cost_confirmation::DeliveryCostConfirmation;
use crate::domain::a004_reference_data::ui::list::ReferenceDataList;
use crate::system::auth::context::{do_logout, use_auth};

#[component]
fn UserBadge() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    view! {
        <div class="user-badge">
            {move || {
                auth_state.get().user_info.map(|user| {
                    let initial = user
                        .full_name
                        .as_deref()
                        .unwrap_or(&user.username)
                        .chars()
                        .next()
                        .unwrap_or('?');
                    let name = user.full_name.clone().unwrap_or_else(|| user.username.clone());
                    let team = user.team.clone().unwrap_or_default();
                    view! {
                        {match user.profile_picture_url.clone() {
                            Some(url) => view! { <img class="avatar" src=url alt="" /> }.into_any(),
                            None => view! { <span class="avatar avatar--initial">{initial.to_string()}</span> }.into_any(),
                        }}
                        <span class="user-badge__name">{name}</span>
                        <span class="user-badge__team">{team}</span>
                    }
                })
            }}
            <button class="btn-link" on:click=move |_| do_logout(set_auth_state)>
                "Đăng xuất"
            </button>
        </div>
    }
}

/// Основной layout: меню страниц и содержимое активной страницы
#[component]
pub fn MainLayout() -> impl IntoView {
    let ctx = use_app_context();
    let (auth_state, _) = use_auth();

    let pages = Memo::new(move |_| {
        auth_state
            .get()
            .user_info
            .map(|user| allowed_pages(&user))
            .unwrap_or_default()
    });

    // Активная страница должна быть среди разрешённых
    Effect::new(move |_| {
        let allowed = pages.get();
        if let Some(first) = allowed.first() {
            if !allowed.contains(&ctx.active_page.get_untracked()) {
                ctx.open_page(*first);
            }
        }
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <nav class="app-nav">
                    <For
                        each=move || pages.get()
                        key=|page| page.code()
                        children=move |page: Page| {
                            view! {
                                <button
                                    class="app-nav__item"
                                    class=("app-nav__item--active", move || ctx.active_page.get() == page)
                                    on:click=move |_| ctx.open_page(page)
                                >
                                    {page.title()}
                                </button>
                            }
                        }
                    />
                </nav>
                <UserBadge />
            </header>

            <main class="app-content">
                {move || {
                    if pages.get().is_empty() {
                        return view! { <div class="empty-state">"Tài khoản chưa được cấp quyền xem trang nào."</div> }.into_any();
                    }
                    match ctx.active_page.get() {
                        Page::SalesPerformance => view! { <SalesPerformanceDashboard /> }.into_any(),
                        Page::ProvinceMap => view! { <ProvinceRevenueView /> }.into_any(),
                        Page::ReferenceData => view! { <ReferenceDataList /> }.into_any(),
                        Page::DeliveryCost => view! { <DeliveryCostConfirmation /> }.into_any(),
                    }
                }}
            </main>
        </div>
    }
}
