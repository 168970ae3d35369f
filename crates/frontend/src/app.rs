use crate::layout::main_layout::MainLayout;
use crate::layout::AppContext;
use crate::system::auth::context::{use_auth, AuthProvider};
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
fn AppBody() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Общее состояние UI: активная страница и фильтр дашборда
    provide_context(AppContext::new());

    view! {
        <AuthProvider>
            <AppBody />
        </AuthProvider>
    }
}
