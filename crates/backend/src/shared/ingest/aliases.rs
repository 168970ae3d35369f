//! Known column spellings per record type
//!
//! Aliases are stored folded (lowercase, alphanumerics only), see
//! [`super::fold_key`]. Order matters: the first alias present in a row wins.

pub type FieldAliases = [(&'static str, &'static [&'static str])];

pub static ORDER_FIELDS: &FieldAliases = &[
    ("id", &["id", "orderid", "ordercode", "orderno", "code"]),
    ("userName", &["username", "user", "seller", "salesperson", "createdby"]),
    ("team", &["team", "teamname", "group"]),
    ("timestamp", &["timestamp", "createdat", "orderdate", "date", "time"]),
    ("grandTotal", &["grandtotal", "totalamount", "total"]),
    ("productCost", &["productcost", "costofgoods", "cogs"]),
    ("internalCost", &["internalcost", "shippingcost", "deliverycost", "shipcost"]),
    ("province", &["province", "provincename", "city", "region"]),
    ("status", &["status", "orderstatus", "fulfillmentstatus"]),
];

pub static USER_FIELDS: &FieldAliases = &[
    ("userName", &["username", "user", "login", "account"]),
    ("fullName", &["fullname", "name", "displayname"]),
    ("team", &["team", "teamname", "group"]),
    ("profilePictureUrl", &["profilepictureurl", "profilepicture", "avatarurl", "avatar", "photo"]),
    ("role", &["role", "position"]),
];

pub static TARGET_FIELDS: &FieldAliases = &[
    ("userName", &["username", "user", "seller", "salesperson"]),
    ("month", &["month", "period", "targetmonth"]),
    ("targetAmount", &["targetamount", "target", "amount"]),
];

pub static PROFILE_FIELDS: &FieldAliases = &[
    ("userName", &["username", "user", "login"]),
    ("fullName", &["fullname", "name", "displayname"]),
    ("team", &["team", "teamname"]),
    ("profilePictureUrl", &["profilepictureurl", "profilepicture", "avatarurl", "avatar"]),
    ("role", &["role"]),
    ("isAdmin", &["isadmin", "admin"]),
];
