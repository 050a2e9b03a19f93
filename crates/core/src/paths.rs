use crate::Region;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const DEFAULT_LISTING_PAGE_SIZE: usize = 10;

/// Route parameters for one statically generated page.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct StaticPath {
    pub params: BTreeMap<String, String>,
}

impl StaticPath {
    fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

pub fn chunk_array<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    items.chunks(size.max(1)).map(<[T]>::to_vec).collect()
}

/// One path per record keyed by `segment`; regional paths also carry the
/// record's region slug when it has one. Records without a slug are skipped.
pub fn static_page_paths(items: &[Value], segment: &str, regional: bool) -> Vec<StaticPath> {
    items
        .iter()
        .filter_map(|item| {
            let slug = item.get("slug").and_then(Value::as_str)?;
            let path = StaticPath::default().with(segment, slug);
            let region = item.pointer("/region/slug").and_then(Value::as_str);
            Some(match region {
                Some(region) if regional => path.with("region", region),
                _ => path,
            })
        })
        .collect()
}

/// Paths for every record of a paginated listing, numbering pages from 1.
///
/// With `regions`, each region gets its own listing of the records whose
/// `region.id` matches it.
pub fn static_pagination_paths(
    items: &[Value],
    segment: &str,
    regions: Option<&[Region]>,
    page_size: usize,
) -> Vec<StaticPath> {
    let Some(regions) = regions else {
        return listing_paths(items, segment, None, page_size);
    };

    regions
        .iter()
        .flat_map(|region| {
            let scoped: Vec<Value> = items
                .iter()
                .filter(|item| {
                    item.pointer("/region/id").and_then(Value::as_str) == Some(region.id.as_str())
                })
                .cloned()
                .collect();
            listing_paths(&scoped, segment, Some(region), page_size)
        })
        .collect()
}

fn listing_paths(
    items: &[Value],
    segment: &str,
    region: Option<&Region>,
    page_size: usize,
) -> Vec<StaticPath> {
    let mut paths = Vec::new();
    for (page, records) in chunk_array(items, page_size).into_iter().enumerate() {
        for record in records {
            let Some(slug) = record.get("slug").and_then(Value::as_str) else {
                continue;
            };
            let mut path = StaticPath::default()
                .with(segment, slug)
                .with("page", (page + 1).to_string());
            if let Some(region) = region {
                path = path.with("region", region.slug.clone());
            }
            paths.push(path);
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn news(count: usize, region: &str) -> Vec<Value> {
        (0..count)
            .map(|index| {
                json!({
                    "slug": format!("{region}-{index}"),
                    "region": { "id": region, "slug": format!("region-{region}") }
                })
            })
            .collect()
    }

    #[test]
    fn chunk_array_keeps_remainder() {
        let chunks = chunk_array(&[1, 2, 3, 4, 5], 2);
        assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn page_paths_include_region_when_regional() {
        let items = news(2, "1");
        let plain = static_page_paths(&items, "news", false);
        let regional = static_page_paths(&items, "news", true);

        assert_eq!(plain.len(), 2);
        assert_eq!(plain[0].params.get("news").map(String::as_str), Some("1-0"));
        assert!(plain[0].params.get("region").is_none());
        assert_eq!(
            regional[1].params.get("region").map(String::as_str),
            Some("region-1")
        );
    }

    #[test]
    fn pagination_paths_number_pages_per_region() {
        let mut items = news(12, "1");
        items.extend(news(3, "2"));
        let regions = vec![
            Region {
                id: "1".to_string(),
                slug: "stockholm".to_string(),
                global: false,
            },
            Region {
                id: "2".to_string(),
                slug: "skane".to_string(),
                global: false,
            },
        ];

        let paths = static_pagination_paths(
            &items,
            "news",
            Some(regions.as_slice()),
            DEFAULT_LISTING_PAGE_SIZE,
        );
        assert_eq!(paths.len(), 15);

        let last_stockholm = &paths[11];
        assert_eq!(last_stockholm.params.get("page").map(String::as_str), Some("2"));
        assert_eq!(
            last_stockholm.params.get("region").map(String::as_str),
            Some("stockholm")
        );

        let first_skane = &paths[12];
        assert_eq!(first_skane.params.get("page").map(String::as_str), Some("1"));
        assert_eq!(first_skane.params.get("region").map(String::as_str), Some("skane"));

        let flat = static_pagination_paths(&items, "news", None, DEFAULT_LISTING_PAGE_SIZE);
        assert_eq!(flat.len(), 15);
        assert_eq!(flat[14].params.get("page").map(String::as_str), Some("2"));
    }
}
