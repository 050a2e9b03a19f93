use crate::{Region, SlugError};
use serde_json::Value;

const ROUTES: [(&str, &str); 5] = [
    ("CommissionRecord", "/anlita-oss/uppdrag"),
    ("MemberRecord", "/anlita-oss/hitta-konstnar"),
    ("NewsRecord", "/nyheter"),
    ("MemberNewsRecord", "/konstnar/aktuellt"),
    ("AboutRecord", "/om"),
];

/// Site-relative path of a record, derived from its `__typename` and `slug`.
///
/// A string record is taken to be a path already. Non-global regions prefix
/// the path with their own slug.
pub fn record_to_slug(record: &Value, region: Option<&Region>) -> Result<String, SlugError> {
    let fields = match record {
        Value::String(path) => return Ok(path.clone()),
        Value::Object(fields) => fields,
        _ => return Err(SlugError::MissingRecord),
    };

    let typename = fields
        .get("__typename")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let base = ROUTES
        .iter()
        .find(|(name, _)| *name == typename)
        .map(|(_, base)| *base)
        .ok_or_else(|| SlugError::UnknownType(typename.to_string()))?;
    let slug = fields
        .get("slug")
        .and_then(Value::as_str)
        .ok_or_else(|| SlugError::MissingSlug {
            typename: typename.to_string(),
        })?;

    let path = format!("{base}/{slug}");
    Ok(match region {
        Some(region) if !region.global => format!("/{}{path}", region.slug),
        _ => path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_types_map_to_routes() {
        let member = json!({"__typename": "MemberRecord", "slug": "anna-berg"});
        let news = json!({"__typename": "NewsRecord", "slug": "vernissage"});
        let member_news = json!({"__typename": "MemberNewsRecord", "slug": "ny-bok"});

        assert_eq!(
            record_to_slug(&member, None).unwrap(),
            "/anlita-oss/hitta-konstnar/anna-berg"
        );
        assert_eq!(record_to_slug(&news, None).unwrap(), "/nyheter/vernissage");
        assert_eq!(record_to_slug(&member_news, None).unwrap(), "/konstnar/aktuellt/ny-bok");
    }

    #[test]
    fn regional_prefix_skips_global_region() {
        let record = json!({"__typename": "NewsRecord", "slug": "vernissage"});
        let skane = Region {
            id: "1".to_string(),
            slug: "skane".to_string(),
            global: false,
        };
        let global = Region {
            id: "0".to_string(),
            slug: "riks".to_string(),
            global: true,
        };

        assert_eq!(
            record_to_slug(&record, Some(&skane)).unwrap(),
            "/skane/nyheter/vernissage"
        );
        assert_eq!(record_to_slug(&record, Some(&global)).unwrap(), "/nyheter/vernissage");
    }

    #[test]
    fn unknown_or_empty_records_fail() {
        let unknown = json!({"__typename": "StartRecord", "slug": "x"});
        assert_eq!(
            record_to_slug(&unknown, None),
            Err(SlugError::UnknownType("StartRecord".to_string()))
        );
        assert_eq!(record_to_slug(&Value::Null, None), Err(SlugError::MissingRecord));
        assert_eq!(
            record_to_slug(&json!({"__typename": "AboutRecord"}), None),
            Err(SlugError::MissingSlug {
                typename: "AboutRecord".to_string()
            })
        );
        assert_eq!(record_to_slug(&json!("/om/oss"), None).unwrap(), "/om/oss");
    }
}
