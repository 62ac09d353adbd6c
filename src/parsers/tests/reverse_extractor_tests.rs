use crate::parsers::reverse::{self, LENS_SCHEMA, SchemaError};
use crate::results::ReverseImageMatch;
use serde_json::{Value, json};

/// A raw match laid out the way the lens payload stores it
fn raw_match(i: usize) -> Value {
    let mut item = vec![Value::Null; 16];
    item[0] = json!([format!("https://img{}.example.com/full.jpg", i), 800, 600]);
    item[3] = json!(format!("Title {}", i));
    item[5] = json!(format!("https://site{}.example.com/page", i));
    item[14] = json!(format!("site{}.example.com", i));
    item[15] = json!([format!("https://encrypted-tbn0.gstatic.com/favicon?q={}", i)]);
    Value::Array(item)
}

fn expected(i: usize) -> ReverseImageMatch {
    ReverseImageMatch {
        title: format!("Title {}", i),
        source_url: format!("https://site{}.example.com/page", i),
        domain_name: format!("site{}.example.com", i),
        image_url: format!("https://img{}.example.com/full.jpg", i),
        icon_url: format!("https://encrypted-tbn0.gstatic.com/favicon?q={}", i),
    }
}

/// Nest the match list at data[1][0][1][8][8][0][12]
fn nest(items: Vec<Value>) -> Value {
    let mut value = Value::Array(items);
    for idx in [12, 0, 8, 8, 1, 0, 1] {
        let mut level = vec![Value::Null; idx + 1];
        level[idx] = value;
        value = Value::Array(level);
    }
    value
}

fn callback(data: &Value) -> String {
    format!(
        "AF_initDataCallback({{key: 'ds:1', hash: '2', data:{}, sideChannel: {{}}}});",
        data
    )
}

fn page(scripts: &[String]) -> String {
    let body = scripts
        .iter()
        .map(|s| format!(r#"<script nonce="r4nd0m">{}</script>"#, s))
        .collect::<String>();
    format!("<html><head>{}</head><body></body></html>", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_decoded() {
        let items = (0..3).map(raw_match).collect();
        let html = page(&[callback(&nest(items))]);
        let matches = reverse::parse(&html);
        assert_eq!(matches, vec![expected(0), expected(1), expected(2)]);
    }

    #[test]
    fn test_item_with_missing_path_is_skipped() {
        let mut items: Vec<Value> = (0..4).map(raw_match).collect();
        // Drop the icon list from the third match
        if let Value::Array(fields) = &mut items[2] {
            fields.truncate(15);
        }
        let html = page(&[callback(&nest(items))]);
        let matches = reverse::parse(&html);
        assert_eq!(matches.len(), 3);
        assert_eq!(matches, vec![expected(0), expected(1), expected(3)]);
    }

    #[test]
    fn test_item_with_null_title_is_skipped() {
        let mut items: Vec<Value> = (0..2).map(raw_match).collect();
        items[0][3] = Value::Null;
        let matches = reverse::matches_from_payload(&json!({"data": nest(items)}), &LENS_SCHEMA);
        assert_eq!(matches, vec![expected(1)]);
    }

    #[test]
    fn test_scripts_without_nonce_are_ignored() {
        let script = callback(&nest(vec![raw_match(0)]));
        let html = format!("<html><head><script>{}</script></head></html>", script);
        assert!(reverse::parse(&html).is_empty());
    }

    #[test]
    fn test_scripts_without_thumbnails_are_ignored() {
        let html = page(&["AF_initDataCallback({key: 'ds:0', data: [1, 2]});".to_string()]);
        assert!(reverse::data_scripts(&html).is_empty());
        assert!(reverse::parse(&html).is_empty());
    }

    #[test]
    fn test_unevaluable_script_does_not_stop_others() {
        let bad = "AF_initDataCallback({key: 'ds:2', data: steal('https://encrypted-tbn0.gstatic.com')});"
            .to_string();
        let good = callback(&nest(vec![raw_match(7)]));
        let html = page(&[bad, good]);
        assert_eq!(reverse::data_scripts(&html).len(), 2);
        assert_eq!(reverse::parse(&html), vec![expected(7)]);
    }

    #[test]
    fn test_payload_without_match_list() {
        let html = page(&[callback(&json!([null, ["https://encrypted-tbn0.gstatic.com/x"]]))]);
        assert!(reverse::parse(&html).is_empty());
        assert_eq!(
            LENS_SCHEMA.matches(&json!({"data": []})),
            Err(SchemaError::MissingMatches(LENS_SCHEMA.match_list))
        );
    }

    #[test]
    fn test_decode_match_errors() {
        let mut item = raw_match(0);
        item[5] = json!(42);
        assert_eq!(
            LENS_SCHEMA.decode_match(&item),
            Err(SchemaError::NotAString {
                field: "source_url"
            })
        );
        assert_eq!(
            LENS_SCHEMA.decode_match(&json!([])),
            Err(SchemaError::MissingField {
                field: "title",
                pointer: "/3"
            })
        );
    }
}
