use contracts::dashboards::d400_sales_performance::SalesPerformanceRequest;
use contracts::system::auth::UserInfo;
use leptos::prelude::*;

/// Страницы приложения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    SalesPerformance,
    ProvinceMap,
    ReferenceData,
    DeliveryCost,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::SalesPerformance,
        Page::ProvinceMap,
        Page::ReferenceData,
        Page::DeliveryCost,
    ];

    /// Code used in the `pages` list of a user profile
    pub fn code(&self) -> &'static str {
        match self {
            Page::SalesPerformance => "dashboard",
            Page::ProvinceMap => "map",
            Page::ReferenceData => "reference",
            Page::DeliveryCost => "delivery",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::SalesPerformance => "Hiệu suất bán hàng",
            Page::ProvinceMap => "Bản đồ doanh thu",
            Page::ReferenceData => "Dữ liệu tham chiếu",
            Page::DeliveryCost => "Phí giao hàng",
        }
    }

    /// Admins and users without a page list see everything
    pub fn is_allowed_for(&self, user: &UserInfo) -> bool {
        user.is_admin
            || user.pages.is_empty()
            || user.pages.iter().any(|p| p.eq_ignore_ascii_case(self.code()))
    }
}

/// Pages the user may open, in menu order
pub fn allowed_pages(user: &UserInfo) -> Vec<Page> {
    Page::ALL
        .into_iter()
        .filter(|page| page.is_allowed_for(user))
        .collect()
}

/// Query string of the dashboard filter, empty values left out
pub fn filter_query(filter: &SalesPerformanceRequest) -> String {
    let mut params: Vec<String> = Vec::new();
    let mut push = |key: &str, value: &Option<String>| {
        if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            params.push(format!("{}={}", key, urlencoding::encode(v)));
        }
    };
    push("date_from", &filter.date_from);
    push("date_to", &filter.date_to);
    push("team", &filter.team);
    if filter.refresh {
        params.push("refresh=true".to_string());
    }

    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

/// Shared UI state: active page and the dashboard filter
///
/// Components read the signals and change them only through the setters.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub active_page: RwSignal<Page>,
    pub filter: RwSignal<SalesPerformanceRequest>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            active_page: RwSignal::new(Page::SalesPerformance),
            filter: RwSignal::new(SalesPerformanceRequest::default()),
        }
    }

    pub fn open_page(&self, page: Page) {
        self.active_page.set(page);
    }

    fn non_empty(value: String) -> Option<String> {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn set_date_from(&self, value: String) {
        self.filter.update(|f| {
            f.date_from = Self::non_empty(value);
            f.refresh = false;
        });
    }

    pub fn set_date_to(&self, value: String) {
        self.filter.update(|f| {
            f.date_to = Self::non_empty(value);
            f.refresh = false;
        });
    }

    pub fn set_team(&self, value: String) {
        self.filter.update(|f| {
            f.team = Self::non_empty(value);
            f.refresh = false;
        });
    }

    /// Reload the data from the remote backend, keeping the filter
    pub fn request_refresh(&self) {
        self.filter.update(|f| f.refresh = true);
    }

    pub fn clear_filter(&self) {
        self.filter.set(SalesPerformanceRequest::default());
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext not found in component tree")
}
