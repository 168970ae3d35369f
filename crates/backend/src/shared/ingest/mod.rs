//! Schema normalization for remote backend payloads
//!
//! The remote sheets are edited by hand, so the same column shows up as
//! `Grand Total`, `grand_total` or `GrandTotal`, and the rows array hides under
//! `data`, `Rows` or sits at the top level. Everything is mapped onto one
//! canonical schema here; the rest of the backend only sees typed records.

pub mod aliases;

use contracts::domain::a001_order::aggregate::Order;
use contracts::domain::a002_sales_user::aggregate::SalesUser;
use contracts::domain::a003_monthly_target::aggregate::MonthlyTarget;
use contracts::system::auth::UserInfo;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::shared::coercion::coerce_amount;
use aliases::{FieldAliases, ORDER_FIELDS, PROFILE_FIELDS, TARGET_FIELDS, USER_FIELDS};

pub type Row = Map<String, Value>;

/// Keys that may wrap the rows array
const ROW_ENVELOPES: &[&str] = &["data", "rows", "items", "records", "values", "result"];

/// Keys that may carry the permitted page list
const PAGE_KEYS: &[&str] = &["pages", "teamspages", "allowedpages"];

/// Keys that may wrap a login profile
const PROFILE_ENVELOPES: &[&str] = &["user", "profile", "data", "account"];

/// Lowercase and drop everything that is not alphanumeric
///
/// `"Grand Total"`, `"grand_total"` and `"GrandTotal"` all fold to
/// `"grandtotal"`.
pub fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Find a value in an object under any key that folds to one of `candidates`
fn lookup<'a>(object: &'a Row, candidates: &[&str]) -> Option<&'a Value> {
    let folded: HashMap<String, &Value> = object
        .iter()
        .rev()
        .map(|(k, v)| (fold_key(k), v))
        .collect();
    candidates.iter().find_map(|c| folded.get(*c).copied())
}

/// Pull the rows array out of a payload
///
/// A non-array payload without a known envelope yields no rows. Non-object
/// items inside the array are skipped.
pub fn extract_rows(payload: &Value) -> Vec<Row> {
    match payload {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_object().cloned())
            .collect(),
        Value::Object(object) => match lookup(object, ROW_ENVELOPES) {
            Some(inner @ Value::Array(_)) => extract_rows(inner),
            Some(inner @ Value::Object(_)) => extract_rows(inner),
            _ => {
                tracing::warn!(
                    "Remote payload has no rows array (keys: {:?})",
                    object.keys().collect::<Vec<_>>()
                );
                Vec::new()
            }
        },
        other => {
            tracing::warn!("Remote payload is not a collection: {}", type_name(other));
            Vec::new()
        }
    }
}

/// Page permissions under `pages` / `Pages` / `TeamsPages`
///
/// Accepts an array of names or a comma separated string.
pub fn extract_pages(object: &Row) -> Vec<String> {
    match lookup(object, PAGE_KEYS) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Field access
// ============================================================================

/// Row view that resolves canonical field names through an alias table
struct CanonicalRow<'a> {
    folded: HashMap<String, &'a Value>,
    fields: &'static FieldAliases,
}

impl<'a> CanonicalRow<'a> {
    fn new(row: &'a Row, fields: &'static FieldAliases) -> Self {
        // first spelling wins when a row carries the same column twice
        let mut folded = HashMap::new();
        for (key, value) in row {
            folded.entry(fold_key(key)).or_insert(value);
        }
        Self { folded, fields }
    }

    fn raw(&self, canonical: &str) -> Option<&'a Value> {
        self.fields
            .iter()
            .find(|(name, _)| *name == canonical)
            .and_then(|(_, aliases)| aliases.iter().find_map(|a| self.folded.get(*a).copied()))
    }

    fn text(&self, canonical: &str) -> Option<String> {
        match self.raw(canonical)? {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn text_or_empty(&self, canonical: &str) -> String {
        self.text(canonical).unwrap_or_default()
    }

    /// `None` when the column is absent, coerced amount otherwise
    fn amount(&self, canonical: &str) -> Option<f64> {
        self.raw(canonical).map(coerce_amount)
    }

    fn flag(&self, canonical: &str) -> bool {
        match self.raw(canonical) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
            Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
            _ => false,
        }
    }
}

// ============================================================================
// Typed records
// ============================================================================

pub fn parse_orders(payload: &Value) -> Vec<Order> {
    extract_rows(payload)
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let r = CanonicalRow::new(row, ORDER_FIELDS);
            Order {
                id: r.text("id").unwrap_or_else(|| format!("row-{}", index + 1)),
                user_name: r.text_or_empty("userName"),
                team: r.text_or_empty("team"),
                timestamp: r.text("timestamp"),
                grand_total: r.amount("grandTotal"),
                product_cost: r.amount("productCost").unwrap_or(0.0),
                internal_cost: r.amount("internalCost").unwrap_or(0.0),
                province: r.text("province"),
                status: r.text("status"),
            }
        })
        .collect()
}

pub fn parse_users(payload: &Value) -> Vec<SalesUser> {
    extract_rows(payload)
        .iter()
        .map(|row| {
            let r = CanonicalRow::new(row, USER_FIELDS);
            SalesUser {
                user_name: r.text_or_empty("userName"),
                full_name: r.text_or_empty("fullName"),
                team: r.text_or_empty("team"),
                profile_picture_url: r.text("profilePictureUrl"),
                role: r.text("role"),
            }
        })
        .collect()
}

pub fn parse_targets(payload: &Value) -> Vec<MonthlyTarget> {
    extract_rows(payload)
        .iter()
        .map(|row| {
            let r = CanonicalRow::new(row, TARGET_FIELDS);
            MonthlyTarget {
                user_name: r.text_or_empty("userName"),
                month: normalize_month(&r.text_or_empty("month")),
                target_amount: r.amount("targetAmount").unwrap_or(0.0),
            }
        })
        .collect()
}

/// Profile returned by the remote login endpoint
///
/// `None` when the backend answered with `success: false` or the profile has
/// no user name.
pub fn parse_profile(payload: &Value) -> Option<UserInfo> {
    let root = payload.as_object()?;
    if let Some(Value::Bool(false)) = lookup(root, &["success", "ok"]) {
        return None;
    }

    let profile = match lookup(root, PROFILE_ENVELOPES) {
        Some(Value::Object(inner)) => inner,
        _ => root,
    };

    let r = CanonicalRow::new(profile, PROFILE_FIELDS);
    let username = r.text("userName")?;
    let role = r.text("role").unwrap_or_default();
    let is_admin = r.flag("isAdmin") || role.eq_ignore_ascii_case("admin");

    let mut pages = extract_pages(profile);
    if pages.is_empty() {
        pages = extract_pages(root);
    }

    Some(UserInfo {
        username,
        full_name: r.text("fullName"),
        team: r.text("team"),
        profile_picture_url: r.text("profilePictureUrl"),
        is_admin,
        pages,
    })
}

// ============================================================================
// Reference rows
// ============================================================================

/// Rewrite every key of a reference row to lowerCamelCase
///
/// `"Bank Name"` → `bankName`, `"PRICE"` → `price`, `"shipping_fee"` →
/// `shippingFee`. On collisions the first spelling wins.
pub fn normalize_row(row: &Row) -> Row {
    let mut normalized = Row::new();
    for (key, value) in row {
        let canonical = to_camel_case(key);
        if canonical.is_empty() || normalized.contains_key(&canonical) {
            continue;
        }
        normalized.insert(canonical, value.clone());
    }
    normalized
}

pub fn to_camel_case(key: &str) -> String {
    let words: Vec<String> = split_words(key);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

/// Split on separators and on lower→upper case boundaries
fn split_words(key: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in key.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_numeric();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Canonical "YYYY-MM" for target months
///
/// Accepts `2024-1`, `2024/01`, `01/2024` and full dates; anything else is
/// returned trimmed and unchanged.
pub fn normalize_month(raw: &str) -> String {
    let raw = raw.trim();
    let parts: Vec<&str> = raw.split(['-', '/', '.']).collect();

    let (year, month) = match parts.as_slice() {
        [y, m] | [y, m, _] if y.len() == 4 => (y.parse::<i32>().ok(), m.parse::<u32>().ok()),
        [m, y] if y.len() == 4 => (y.parse::<i32>().ok(), m.parse::<u32>().ok()),
        _ => (None, None),
    };

    match (year, month) {
        (Some(y), Some(m)) if (1..=12).contains(&m) => format!("{:04}-{:02}", y, m),
        _ => raw.to_string(),
    }
}
