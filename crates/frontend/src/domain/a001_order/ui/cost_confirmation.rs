use contracts::domain::a001_order::aggregate::{
    ConfirmDeliveryCostRequest, ConfirmDeliveryCostResponse,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_order::api;
use crate::shared::number_format::{format_money, parse_amount};
use crate::system::auth::context::use_auth;

/// Request from the form inputs, or the message to show
fn build_request(
    order_id: &str,
    cost: &str,
    note: &str,
) -> Result<ConfirmDeliveryCostRequest, String> {
    if order_id.trim().is_empty() {
        return Err("Nhập mã đơn hàng".to_string());
    }
    let internal_cost = parse_amount(cost).ok_or_else(|| "Phí giao hàng không hợp lệ".to_string())?;
    let note = note.trim();

    let request = ConfirmDeliveryCostRequest {
        internal_cost,
        note: (!note.is_empty()).then(|| note.to_string()),
    };
    request.validate()?;
    Ok(request)
}

/// Xác nhận phí giao hàng của tài xế cho một đơn
#[component]
pub fn DeliveryCostConfirmation() -> impl IntoView {
    let (auth_state, _) = use_auth();

    let (order_id, set_order_id) = signal(String::new());
    let (cost, set_cost) = signal(String::new());
    let (note, set_note) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (confirmed, set_confirmed) = signal(Vec::<ConfirmDeliveryCostResponse>::new());
    let (is_sending, set_is_sending) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let id = order_id.get_untracked();
        let request = match build_request(&id, &cost.get_untracked(), &note.get_untracked()) {
            Ok(request) => request,
            Err(message) => {
                set_error.set(Some(message));
                return;
            }
        };

        let token = auth_state.get_untracked().token();
        set_error.set(None);
        set_is_sending.set(true);

        spawn_local(async move {
            match api::confirm_delivery_cost(&id, &request, &token).await {
                Ok(response) => {
                    log::info!("Order {}: delivery cost confirmed", response.order_id);
                    set_confirmed.update(|list| list.insert(0, response));
                    set_order_id.set(String::new());
                    set_cost.set(String::new());
                    set_note.set(String::new());
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_is_sending.set(false);
        });
    };

    view! {
        <div class="cost-confirmation">
            <form class="cost-confirmation__form" on:submit=on_submit>
                <label class="form-group">
                    <span>"Mã đơn hàng"</span>
                    <input
                        type="text"
                        prop:value=move || order_id.get()
                        on:input=move |ev| set_order_id.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-group">
                    <span>"Phí giao hàng (₫)"</span>
                    <input
                        type="text"
                        inputmode="numeric"
                        prop:value=move || cost.get()
                        on:input=move |ev| set_cost.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-group">
                    <span>"Ghi chú"</span>
                    <input
                        type="text"
                        prop:value=move || note.get()
                        on:input=move |ev| set_note.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="btn btn--primary" disabled=move || is_sending.get()>
                    {move || if is_sending.get() { "Đang gửi..." } else { "Xác nhận" }}
                </button>
            </form>

            {move || error.get().map(|err| view! { <div class="d400-error">{err}</div> })}

            <Show when=move || !confirmed.get().is_empty()>
                <table class="d400-table">
                    <thead>
                        <tr>
                            <th>"Đơn"</th>
                            <th class="num">"Phí giao hàng"</th>
                            <th>"Người xác nhận"</th>
                            <th>"Thời gian"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            confirmed
                                .get()
                                .into_iter()
                                .map(|row| {
                                    view! {
                                        <tr>
                                            <td>{row.order_id}</td>
                                            <td class="num">{format_money(row.internal_cost)}</td>
                                            <td>{row.confirmed_by}</td>
                                            <td>{row.confirmed_at}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request() {
        let request = build_request(" A-1 ", "35.000", "  giao trễ ").unwrap();
        assert_eq!(request.internal_cost, 35000.0);
        assert_eq!(request.note.as_deref(), Some("giao trễ"));

        let no_note = build_request("A-1", "0", " ").unwrap();
        assert!(no_note.note.is_none());
    }

    #[test]
    fn test_build_request_rejects_bad_input() {
        assert!(build_request("", "1000", "").is_err());
        assert!(build_request("A-1", "abc", "").is_err());
        assert!(build_request("A-1", "-5.000", "").is_err());
    }
}
