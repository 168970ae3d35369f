use contracts::domain::a004_reference_data::{ReferenceRowsResponse, ReferenceSheet};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{Map, Value};

use crate::domain::a004_reference_data::api;
use crate::system::auth::context::use_auth;

/// Union of row keys in first-seen order
fn columns(rows: &[Map<String, Value>]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn row_id(row: &Map<String, Value>) -> Option<String> {
    Some(cell_text(row.get("id"))).filter(|id| !id.trim().is_empty())
}

/// Editable fields of a sheet: every column except `id`
fn editable_columns(keys: &[String]) -> Vec<String> {
    let fields: Vec<String> = keys.iter().filter(|k| k.as_str() != "id").cloned().collect();
    if fields.is_empty() {
        vec!["name".to_string()]
    } else {
        fields
    }
}

/// Row body from the editor inputs
///
/// For a new row blank inputs are left out. For an edit only changed fields
/// are sent; numbers stay numbers when the input still parses as one.
fn row_from_inputs(
    inputs: &[(String, String)],
    original: Option<&Map<String, Value>>,
) -> Map<String, Value> {
    let mut row = Map::new();
    for (key, text) in inputs {
        let text = text.trim();
        let before = original.and_then(|o| o.get(key));

        if let Some(before) = before {
            if cell_text(Some(before)) == text {
                continue;
            }
        } else if text.is_empty() {
            continue;
        }

        let value = match (before, text.parse::<f64>()) {
            (Some(Value::Number(_)), Ok(n)) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(text.to_string())),
            _ => Value::String(text.to_string()),
        };
        row.insert(key.clone(), value);
    }
    row
}

/// Open editor: the row being edited (None for a new row) and one input per field
#[derive(Clone)]
struct Editor {
    id: Option<String>,
    original: Option<Map<String, Value>>,
    fields: Vec<(String, RwSignal<String>)>,
}

impl Editor {
    fn open(keys: &[String], row: Option<&Map<String, Value>>) -> Self {
        let fields = editable_columns(keys)
            .into_iter()
            .map(|key| {
                let text = cell_text(row.and_then(|r| r.get(&key)));
                (key, RwSignal::new(text))
            })
            .collect();
        Self {
            id: row.and_then(row_id),
            original: row.cloned(),
            fields,
        }
    }

    fn body(&self) -> Map<String, Value> {
        let inputs: Vec<(String, String)> = self
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), value.get_untracked()))
            .collect();
        row_from_inputs(&inputs, self.original.as_ref())
    }
}

/// Справочники: товары, пользователи, способы доставки, водители, счета
#[component]
pub fn ReferenceDataList() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let (sheet, set_sheet) = signal(ReferenceSheet::Products);
    let (data, set_data) = signal(None::<ReferenceRowsResponse>);
    let (error, set_error) = signal(None::<String>);
    let (reload, set_reload) = signal(0u32);
    let editor = RwSignal::new(None::<Editor>);
    let (saving, set_saving) = signal(false);

    let is_admin = move || {
        auth_state
            .get()
            .user_info
            .map_or(false, |user| user.is_admin)
    };

    Effect::new(move |_| {
        let current = sheet.get();
        reload.track();
        let token = auth_state.get_untracked().token();
        set_error.set(None);
        set_data.set(None);

        spawn_local(async move {
            match api::list_rows(current, &token).await {
                Ok(response) => set_data.set(Some(response)),
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let open_editor = move |row: Option<Map<String, Value>>| {
        let keys = data
            .get_untracked()
            .map(|d| columns(&d.rows))
            .unwrap_or_default();
        editor.set(Some(Editor::open(&keys, row.as_ref())));
    };

    let save = move |_| {
        let Some(current) = editor.get_untracked() else {
            return;
        };
        let body = current.body();
        if body.is_empty() {
            editor.set(None);
            return;
        }

        let target = sheet.get_untracked();
        let token = auth_state.get_untracked().token();
        set_saving.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = match current.id.as_deref() {
                Some(id) => api::update_row(target, id, &body, &token).await,
                None => api::append_row(target, &body, &token).await,
            };
            match result {
                Ok(_) => {
                    log::info!("{}: row saved", target.code());
                    editor.set(None);
                    set_reload.update(|n| *n += 1);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="reference-view">
            <div class="reference-tabs">
                {ReferenceSheet::ALL
                    .into_iter()
                    .map(|item| {
                        view! {
                            <button
                                class="btn"
                                class=("btn--active", move || sheet.get() == item)
                                on:click=move |_| {
                                    editor.set(None);
                                    set_sheet.set(item);
                                }
                            >
                                {item.title()}
                            </button>
                        }
                    })
                    .collect_view()}
                <Show when=is_admin>
                    <button class="btn btn--primary" on:click=move |_| open_editor(None)>
                        "+ Thêm dòng"
                    </button>
                </Show>
            </div>

            {move || error.get().map(|err| view! { <div class="d400-error">{err}</div> })}

            {move || {
                editor.get().map(|current| {
                    let title = match &current.id {
                        Some(id) => format!("Sửa dòng {}", id),
                        None => "Dòng mới".to_string(),
                    };
                    view! {
                        <div class="reference-editor">
                            <h3>{title}</h3>
                            {current
                                .fields
                                .iter()
                                .map(|(key, value)| {
                                    let value = *value;
                                    view! {
                                        <label class="form-group">
                                            <span>{key.clone()}</span>
                                            <input
                                                type="text"
                                                prop:value=move || value.get()
                                                on:input=move |ev| value.set(event_target_value(&ev))
                                            />
                                        </label>
                                    }
                                })
                                .collect_view()}
                            <div class="reference-editor__actions">
                                <button class="btn btn--primary" disabled=move || saving.get() on:click=save>
                                    {move || if saving.get() { "Đang lưu..." } else { "Lưu" }}
                                </button>
                                <button class="btn" on:click=move |_| editor.set(None)>
                                    "Hủy"
                                </button>
                            </div>
                        </div>
                    }
                })
            }}

            {move || {
                data.get().map(|data| {
                    let keys = columns(&data.rows);
                    let header = keys.clone();
                    let admin = is_admin();
                    view! {
                        <table class="d400-table">
                            <thead>
                                <tr>
                                    {header.into_iter().map(|k| view! { <th>{k}</th> }).collect_view()}
                                    {admin.then(|| view! { <th></th> })}
                                </tr>
                            </thead>
                            <tbody>
                                {data
                                    .rows
                                    .iter()
                                    .map(|row| {
                                        let editable = row_id(row).is_some().then(|| row.clone());
                                        view! {
                                            <tr>
                                                {keys
                                                    .iter()
                                                    .map(|k| view! { <td>{cell_text(row.get(k))}</td> })
                                                    .collect_view()}
                                                {admin.then(|| {
                                                    view! {
                                                        <td>
                                                            {editable.map(|row| {
                                                                view! {
                                                                    <button
                                                                        class="btn-link"
                                                                        on:click=move |_| open_editor(Some(row.clone()))
                                                                    >
                                                                        "Sửa"
                                                                    </button>
                                                                }
                                                            })}
                                                        </td>
                                                    }
                                                })}
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                })
            }}
        </div>
    }
}
