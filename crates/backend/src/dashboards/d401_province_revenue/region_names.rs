use serde_json::Value;

/// Administrative words written in front of a province name
const PREFIXES: &[&str] = &["thanh pho", "tinh", "tp", "province", "city"];

/// Administrative words written after a province name
const SUFFIXES: &[&str] = &["province", "city"];

/// Canonical matching key of a province name
///
/// `"Tỉnh Đồng Nai"`, `"dong nai"` and `"TP. Đồng-Nai"` all give `"dong nai"`.
pub fn normalize_region_name(name: &str) -> String {
    let folded: String = name
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c))
        .map(fold_diacritic)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut words: Vec<&str> = folded.split_whitespace().collect();

    loop {
        let before = words.len();
        for prefix in PREFIXES {
            let prefix_words: Vec<&str> = prefix.split(' ').collect();
            if words.len() > prefix_words.len() && words.starts_with(&prefix_words) {
                words.drain(..prefix_words.len());
            }
        }
        if words.len() > 1 && words.last().is_some_and(|last| SUFFIXES.contains(last)) {
            words.pop();
        }
        if words.len() == before {
            break;
        }
    }

    words.join(" ")
}

// decomposed (NFD) input carries its accents as separate combining marks
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ằ' | 'ắ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ầ' | 'ấ' | 'ẩ'
        | 'ẫ' | 'ậ' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ề' | 'ế' | 'ể' | 'ễ' | 'ệ' | 'ë' => 'e',
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ồ' | 'ố' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ờ' | 'ớ' | 'ở'
        | 'ỡ' | 'ợ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ừ' | 'ứ' | 'ử' | 'ữ' | 'ự' | 'û' | 'ü' => 'u',
        'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' | 'ÿ' => 'y',
        'đ' => 'd',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Property keys that carry the display name of a boundary feature
const NAME_PROPERTIES: &[&str] = &["name", "NAME_1", "Name", "ten_tinh", "province"];

/// One display name per feature of a GeoJSON FeatureCollection
pub fn feature_names(geojson: &Value) -> Vec<String> {
    let Some(features) = geojson.get("features").and_then(Value::as_array) else {
        tracing::warn!("Boundary file has no features array");
        return Vec::new();
    };

    features
        .iter()
        .filter_map(|feature| {
            let properties = feature.get("properties")?;
            NAME_PROPERTIES.iter().find_map(|key| {
                properties
                    .get(*key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
            })
        })
        .collect()
}
