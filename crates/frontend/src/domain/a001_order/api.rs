use contracts::domain::a001_order::aggregate::{
    ConfirmDeliveryCostRequest, ConfirmDeliveryCostResponse,
};

use crate::shared::api_utils::post_json;

/// Подтвердить стоимость доставки заказа
pub async fn confirm_delivery_cost(
    order_id: &str,
    request: &ConfirmDeliveryCostRequest,
    access_token: &str,
) -> Result<ConfirmDeliveryCostResponse, String> {
    let path = format!(
        "/api/orders/{}/confirm_delivery_cost",
        urlencoding::encode(order_id.trim())
    );
    post_json(&path, request, access_token).await
}
