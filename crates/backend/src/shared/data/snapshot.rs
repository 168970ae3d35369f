use anyhow::Context;
use contracts::domain::a001_order::aggregate::Order;
use contracts::domain::a002_sales_user::aggregate::SalesUser;
use contracts::domain::a003_monthly_target::aggregate::MonthlyTarget;
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::shared::ingest;
use crate::shared::remote::{RemoteError, SheetSource};

pub const ORDERS_SHEET: &str = "Orders";
pub const USERS_SHEET: &str = "Users";
pub const TARGETS_SHEET: &str = "Targets";

/// Orders, users and targets fetched together
///
/// A snapshot is immutable; `generation` identifies it for memoization.
#[derive(Debug)]
pub struct DataSnapshot {
    pub generation: u64,
    pub fetched_at: Instant,
    pub orders: Vec<Order>,
    pub users: Vec<SalesUser>,
    pub targets: Vec<MonthlyTarget>,
}

impl DataSnapshot {
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Fetch the three sheets concurrently and normalize them
///
/// A missing targets sheet is treated as "no targets".
pub async fn load_snapshot(source: &dyn SheetSource, generation: u64) -> anyhow::Result<DataSnapshot> {
    let (orders, users, targets) = tokio::join!(
        source.fetch_sheet(ORDERS_SHEET),
        source.fetch_sheet(USERS_SHEET),
        source.fetch_sheet(TARGETS_SHEET),
    );

    let orders = orders.context("Failed to fetch orders")?;
    let users = users.context("Failed to fetch users")?;
    let targets = match targets {
        Ok(payload) => payload,
        Err(e) if e.is_not_found() => {
            tracing::warn!("Targets sheet not found, using no targets");
            Value::Null
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Failed to fetch targets")),
    };

    let snapshot = DataSnapshot {
        generation,
        fetched_at: Instant::now(),
        orders: ingest::parse_orders(&orders),
        users: ingest::parse_users(&users),
        targets: ingest::parse_targets(&targets),
    };

    tracing::info!(
        "Loaded snapshot #{}: {} orders, {} users, {} targets",
        snapshot.generation,
        snapshot.orders.len(),
        snapshot.users.len(),
        snapshot.targets.len()
    );

    Ok(snapshot)
}

/// Find the remote error behind an anyhow chain
pub fn remote_cause(error: &anyhow::Error) -> Option<&RemoteError> {
    error.chain().find_map(|e| e.downcast_ref::<RemoteError>())
}
