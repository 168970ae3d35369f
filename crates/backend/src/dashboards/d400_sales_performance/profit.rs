use contracts::domain::a001_order::aggregate::Order;

/// Profit of a single order: revenue minus product and shipping cost
///
/// Missing amounts count as zero. Loss-making orders yield a negative value.
pub fn order_profit(order: &Order) -> f64 {
    order.revenue() - order.product_cost - order.internal_cost
}
