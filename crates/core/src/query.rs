//! The list-query engine: filter, then sort, then paginate.
//!
//! Filtering walks the entity's [`FilterRule`] table; each rule whose
//! parameter is present and non-empty narrows the surviving set (AND across
//! rules). Sorting is a single stable pass with a comparator that dispatches
//! on the field's value kind.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use icu_collator::{Collator, CollatorOptions};
use serde::{Deserialize, Serialize};

use crate::field::{find_column, parse_timestamp, FieldKind, FieldValue};
use crate::paginate::{paginate, Page, PageRequest};
use crate::record::{FilterRule, MasterRecord};

/// Field sorted on when the request names none.
pub const DEFAULT_SORT_FIELD: &str = "createTime";

/// Query parameter names with a fixed meaning; everything else is a filter.
pub const PARAM_SORT_BY: &str = "sortBy";
pub const PARAM_SORT_ORDER: &str = "sortOrder";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_PAGE_SIZE: &str = "pageSize";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Anything other than `asc` sorts descending.
    pub fn parse(raw: &str) -> Self {
        if raw == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Combined filter, sort and pagination parameters of one list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// Raw filter values keyed by parameter name.
    pub filters: BTreeMap<String, String>,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filters: BTreeMap::new(),
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            sort_order: SortOrder::Desc,
            page: PageRequest::default(),
        }
    }
}

impl ListQuery {
    /// Build from raw `(name, value)` request pairs. The first occurrence of
    /// a name wins, so repeated (array-style) parameters use their first
    /// element.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut raw: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in pairs {
            raw.entry(name).or_insert(value);
        }

        let sort_by = raw
            .remove(PARAM_SORT_BY)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SORT_FIELD.to_string());
        let sort_order = raw
            .remove(PARAM_SORT_ORDER)
            .map_or(SortOrder::Desc, |s| SortOrder::parse(&s));
        let page = raw.remove(PARAM_PAGE);
        let page_size = raw.remove(PARAM_PAGE_SIZE);

        Self {
            filters: raw,
            sort_by,
            sort_order,
            page: PageRequest::from_raw(page.as_deref(), page_size.as_deref()),
        }
    }

    /// Add a filter value (builder style).
    pub fn filter(mut self, param: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(param.into(), value.into());
        self
    }

    pub fn sorted(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = field.into();
        self.sort_order = order;
        self
    }

    pub fn paged(mut self, page: i64, page_size: i64) -> Self {
        self.page = PageRequest::new(page, page_size);
        self
    }

    /// Render back into request pairs.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        pairs.push((PARAM_SORT_BY.to_string(), self.sort_by.clone()));
        pairs.push((
            PARAM_SORT_ORDER.to_string(),
            self.sort_order.as_str().to_string(),
        ));
        pairs.push((PARAM_PAGE.to_string(), self.page.page.to_string()));
        pairs.push((PARAM_PAGE_SIZE.to_string(), self.page.page_size.to_string()));
        pairs
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Apply every recognised, non-empty filter in `filters`. Unrecognised keys
/// are ignored. Source order is preserved.
pub fn filter_records<'a, R: MasterRecord>(
    records: &'a [R],
    filters: &BTreeMap<String, String>,
) -> Vec<&'a R> {
    let mut survivors: Vec<&R> = records.iter().collect();

    for rule in R::FILTERS {
        let Some(value) = filters.get(rule.param()).filter(|v| !v.is_empty()) else {
            continue;
        };

        match rule {
            FilterRule::Contains { fields, .. } => {
                let needle = value.to_lowercase();
                survivors.retain(|r| fields.iter().any(|f| r.field(f).contains_lowercase(&needle)));
            }
            FilterRule::From { field, .. } => match parse_timestamp(value) {
                Some(bound) => survivors
                    .retain(|r| r.field(field).as_timestamp().is_some_and(|t| t >= bound)),
                None => survivors.clear(),
            },
            FilterRule::Until { field, .. } => match parse_timestamp(value) {
                Some(bound) => survivors
                    .retain(|r| r.field(field).as_timestamp().is_some_and(|t| t <= bound)),
                None => survivors.clear(),
            },
        }

        if survivors.is_empty() {
            break;
        }
    }

    survivors
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Whether `field` sorts as a timestamp for entity `R`.
pub fn is_time_field<R: MasterRecord>(field: &str) -> bool {
    field.contains("Time")
        || find_column(R::COLUMNS, field).is_some_and(|c| c.kind == FieldKind::Time)
}

/// Locale-aware string ordering using the CLDR root collation.
///
/// Falls back to code-point order if the collation data cannot be loaded.
pub struct TextCollation(Option<Collator>);

impl TextCollation {
    pub fn root() -> Self {
        Self(Collator::try_new(&Default::default(), CollatorOptions::new()).ok())
    }

    /// Case-insensitive comparison: both sides are lowercased first.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let (a, b) = (a.to_lowercase(), b.to_lowercase());
        match &self.0 {
            Some(collator) => collator.compare(&a, &b),
            None => a.cmp(&b),
        }
    }
}

/// Ascending comparison of two field values.
pub fn compare_values(
    a: &FieldValue<'_>,
    b: &FieldValue<'_>,
    as_time: bool,
    collation: &TextCollation,
) -> Ordering {
    if as_time {
        return a.epoch_millis().cmp(&b.epoch_millis());
    }
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        _ => collation.compare(&a.to_sort_string(), &b.to_sort_string()),
    }
}

/// Stable sort on `sort_by`. Records with equal keys keep their relative
/// order. An unknown field compares equal everywhere and leaves the order
/// untouched.
pub fn sort_records<R: MasterRecord>(records: &mut [&R], sort_by: &str, order: SortOrder) {
    let as_time = is_time_field::<R>(sort_by);
    let collation = TextCollation::root();
    records.sort_by(|a, b| {
        let ord = compare_values(&a.field(sort_by), &b.field(sort_by), as_time, &collation);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

/// Filter and sort without paginating.
pub fn run_query<'a, R: MasterRecord>(records: &'a [R], query: &ListQuery) -> Vec<&'a R> {
    let mut matched = filter_records(records, &query.filters);
    sort_records(&mut matched, &query.sort_by, query.sort_order);
    matched
}

/// The full list pipeline: filter, sort, then cut the requested page.
pub fn list<R: MasterRecord>(records: &[R], query: &ListQuery) -> Page<R> {
    let matched = run_query(records, query);
    let page = paginate(matched, query.page);
    Page {
        items: page.items.into_iter().cloned().collect(),
        total: page.total,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::bom::BomRecord;
    use crate::fixtures::{sample_bom, sample_material};
    use crate::material::MaterialRecord;

    fn bom(code: &str, created_day: u32) -> BomRecord {
        let mut record = sample_bom(code);
        record.id = format!("id-{code}");
        record.create_time = Utc.with_ymd_and_hms(2024, 1, created_day, 0, 0, 0).unwrap();
        record.update_time = record.create_time + Duration::days(1);
        record
    }

    fn dataset() -> Vec<BomRecord> {
        let mut a = bom("BOM000001", 3);
        a.business_unit = Some("乘用车事业部".into());
        a.business_unit_code = "BU001".into();
        a.supplier_name = Some("Anhui Parts".into());
        a.supplier_code = Some("SUP002".into());
        a.bom_change_time = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

        let mut b = bom("BOM000002", 1);
        b.business_unit = Some("商用车事业部".into());
        b.business_unit_code = "BU002".into();
        b.supplier_name = Some("Wuhu Tech".into());
        b.supplier_code = Some("SUP001".into());
        b.bom_change_time = None;

        let mut c = bom("BOM000010", 2);
        c.business_unit = Some("新能源事业部".into());
        c.business_unit_code = "BU003".into();
        c.supplier_name = Some("anhui parts".into());
        c.supplier_code = Some("SUP003".into());
        c.bom_change_time = Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());

        vec![a, b, c]
    }

    fn codes(records: &[&BomRecord]) -> Vec<String> {
        records.iter().map(|r| r.bom_code.clone()).collect()
    }

    fn filters(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // -- filtering -----------------------------------------------------------

    #[test]
    fn exact_code_returns_single_record() {
        let data = dataset();
        let out = filter_records(&data, &filters(&[("bomCode", "BOM000001")]));
        assert_eq!(codes(&out), vec!["BOM000001"]);
    }

    #[test]
    fn substring_filter_is_case_insensitive() {
        let data = dataset();
        let out = filter_records(&data, &filters(&[("bomCode", "bom00000")]));
        assert_eq!(codes(&out), vec!["BOM000001", "BOM000002"]);
    }

    #[test]
    fn every_survivor_contains_value_and_every_excluded_does_not() {
        let data = dataset();
        let needle = "01";
        let out = filter_records(&data, &filters(&[("bomCode", needle)]));
        for r in &data {
            let kept = out.iter().any(|o| o.id == r.id);
            assert_eq!(kept, r.bom_code.to_lowercase().contains(needle));
        }
    }

    #[test]
    fn code_or_name_pairing_matches_either_column() {
        let data = dataset();
        let by_name = filter_records(&data, &filters(&[("supplier", "ANHUI")]));
        assert_eq!(codes(&by_name), vec!["BOM000001", "BOM000010"]);

        let by_code = filter_records(&data, &filters(&[("supplier", "sup001")]));
        assert_eq!(codes(&by_code), vec!["BOM000002"]);

        let by_unit = filter_records(&data, &filters(&[("businessUnit", "新能源")]));
        assert_eq!(codes(&by_unit), vec!["BOM000010"]);
    }

    #[test]
    fn filters_compose_with_and() {
        let data = dataset();
        let out = filter_records(
            &data,
            &filters(&[("supplier", "anhui"), ("businessUnit", "BU003")]),
        );
        assert_eq!(codes(&out), vec!["BOM000010"]);
    }

    #[test]
    fn unknown_and_empty_filters_are_ignored() {
        let data = dataset();
        let out = filter_records(&data, &filters(&[("colour", "red"), ("bomCode", "")]));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn no_match_yields_empty_not_error() {
        let data = dataset();
        let out = filter_records(&data, &filters(&[("bomName", "zzz-nothing")]));
        assert!(out.is_empty());
    }

    #[test]
    fn date_range_excludes_absent_timestamps() {
        let data = dataset();
        let out = filter_records(&data, &filters(&[("bomChangeTimeStart", "2024-01-15")]));
        assert_eq!(codes(&out), vec!["BOM000001", "BOM000010"]);

        let out = filter_records(
            &data,
            &filters(&[
                ("bomChangeTimeStart", "2024-01-15"),
                ("bomChangeTimeEnd", "2024-02-01T00:00:00Z"),
            ]),
        );
        assert_eq!(codes(&out), vec!["BOM000001"]);
    }

    #[test]
    fn change_time_range_uses_update_time() {
        let data = dataset();
        // update_time = create_time + 1 day: Jan 4, Jan 2, Jan 3.
        let out = filter_records(&data, &filters(&[("changeTimeEnd", "2024-01-03")]));
        assert_eq!(codes(&out), vec!["BOM000002", "BOM000010"]);
    }

    #[test]
    fn unparsable_date_bound_matches_nothing() {
        let data = dataset();
        let out = filter_records(&data, &filters(&[("changeTimeStart", "yesterday-ish")]));
        assert!(out.is_empty());
    }

    // -- sorting -------------------------------------------------------------

    #[test]
    fn default_sort_is_create_time_descending() {
        let data = dataset();
        let out = run_query(&data, &ListQuery::default());
        assert_eq!(codes(&out), vec!["BOM000001", "BOM000010", "BOM000002"]);
    }

    #[test]
    fn create_time_ascending_is_non_decreasing() {
        let data = crate::fixtures::generate_boms(60, Utc::now(), &mut crate::fixtures::seeded_rng(7));
        let query = ListQuery::default().sorted("createTime", SortOrder::Asc);
        let out = run_query(&data, &query);
        assert!(out.windows(2).all(|w| w[0].create_time <= w[1].create_time));
    }

    #[test]
    fn missing_timestamps_sort_as_epoch_zero() {
        let data = dataset();
        let query = ListQuery::default().sorted("bomChangeTime", SortOrder::Asc);
        let out = run_query(&data, &query);
        assert_eq!(codes(&out), vec!["BOM000002", "BOM000001", "BOM000010"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut data = dataset();
        for r in &mut data {
            r.bom_version = "v1.0".into();
        }
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let query = ListQuery::default().sorted("bomVersion", order);
            let out = run_query(&data, &query);
            assert_eq!(codes(&out), vec!["BOM000001", "BOM000002", "BOM000010"]);
        }
    }

    #[test]
    fn unknown_sort_field_keeps_source_order() {
        let data = dataset();
        let query = ListQuery::default().sorted("doesNotExist", SortOrder::Asc);
        let out = run_query(&data, &query);
        assert_eq!(codes(&out), vec!["BOM000001", "BOM000002", "BOM000010"]);
    }

    #[test]
    fn numbers_sort_numerically() {
        let mut data = dataset();
        data[0].child_part_quantity = Some(9.5);
        data[1].child_part_quantity = Some(10.0);
        data[2].child_part_quantity = Some(2.25);
        let query = ListQuery::default().sorted("childPartQuantity", SortOrder::Asc);
        let out = run_query(&data, &query);
        assert_eq!(codes(&out), vec!["BOM000010", "BOM000001", "BOM000002"]);
    }

    #[test]
    fn strings_sort_case_insensitively() {
        let data = dataset();
        let query = ListQuery::default().sorted("supplierName", SortOrder::Asc);
        let out = run_query(&data, &query);
        // "Anhui Parts" and "anhui parts" tie and keep source order.
        assert_eq!(codes(&out), vec!["BOM000001", "BOM000010", "BOM000002"]);
    }

    #[test]
    fn strings_use_locale_aware_collation() {
        let mut data = dataset();
        data.push(bom("BOM000011", 4));
        for (record, name) in data.iter_mut().zip(["a1", "a_1", "é", "f"]) {
            record.bom_name = Some(name.to_string());
        }
        let names = |order| -> Vec<String> {
            run_query(&data, &ListQuery::default().sorted("bomName", order))
                .iter()
                .filter_map(|r| r.bom_name.clone())
                .collect()
        };
        assert_eq!(names(SortOrder::Asc), vec!["a_1", "a1", "é", "f"]);
        assert_eq!(names(SortOrder::Desc), vec!["f", "é", "a1", "a_1"]);
    }

    #[test]
    fn collation_ignores_case_but_not_accents() {
        let collation = TextCollation::root();
        assert_eq!(collation.compare("Émile", "émile"), Ordering::Equal);
        assert_eq!(collation.compare("Ebene", "ébène"), Ordering::Less);
        assert_eq!(collation.compare("Zürich", "zurich"), Ordering::Greater);
    }

    #[test]
    fn booleans_sort_false_first_ascending() {
        let mut data: Vec<MaterialRecord> = (0..4)
            .map(|i| {
                let mut m = sample_material(&format!("CHERY-{i:08}"));
                m.id = format!("m{i}");
                m
            })
            .collect();
        data[0].is_sop = Some(true);
        data[1].is_sop = Some(false);
        data[2].is_sop = Some(true);
        data[3].is_sop = Some(false);

        let ids = |q: &ListQuery| -> Vec<String> {
            run_query(&data, q).iter().map(|m| m.id.clone()).collect()
        };
        let asc = ListQuery::default().sorted("isSOP", SortOrder::Asc);
        assert_eq!(ids(&asc), vec!["m1", "m3", "m0", "m2"]);
        let desc = ListQuery::default().sorted("isSOP", SortOrder::Desc);
        assert_eq!(ids(&desc), vec!["m0", "m2", "m1", "m3"]);
    }

    // -- end to end ----------------------------------------------------------

    #[test]
    fn list_is_idempotent() {
        let data = crate::fixtures::generate_boms(80, Utc::now(), &mut crate::fixtures::seeded_rng(3));
        let query = ListQuery::from_pairs(vec![
            ("supplier".to_string(), "SUP00".to_string()),
            ("page".to_string(), "2".to_string()),
        ]);
        assert_eq!(list(&data, &query), list(&data, &query));
    }

    #[test]
    fn total_is_invariant_across_pages() {
        let data = crate::fixtures::generate_boms(45, Utc::now(), &mut crate::fixtures::seeded_rng(11));
        let totals: Vec<usize> = (1..=6)
            .map(|p| list(&data, &ListQuery::default().paged(p, 10)).total)
            .collect();
        assert!(totals.iter().all(|t| *t == 45));
    }

    #[test]
    fn from_pairs_separates_reserved_parameters() {
        let query = ListQuery::from_pairs(vec![
            ("bomCode".to_string(), "BOM1".to_string()),
            ("bomCode".to_string(), "ignored".to_string()),
            ("sortBy".to_string(), "bomCode".to_string()),
            ("sortOrder".to_string(), "asc".to_string()),
            ("page".to_string(), "2".to_string()),
            ("pageSize".to_string(), "500".to_string()),
        ]);
        assert_eq!(query.filters.get("bomCode").map(String::as_str), Some("BOM1"));
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.sort_by, "bomCode");
        assert_eq!(query.sort_order, SortOrder::Asc);
        assert_eq!(query.page, PageRequest { page: 2, page_size: 100 });
    }

    #[test]
    fn to_pairs_round_trips() {
        let query = ListQuery::default()
            .filter("supplier", "SUP001")
            .sorted("updateTime", SortOrder::Asc)
            .paged(4, 25);
        assert_eq!(ListQuery::from_pairs(query.to_pairs()), query);
    }

    #[test]
    fn time_detection_uses_name_and_kind() {
        assert!(is_time_field::<BomRecord>("createTime"));
        assert!(is_time_field::<BomRecord>("someOtherTime"));
        assert!(!is_time_field::<BomRecord>("bomCode"));
        assert!(is_time_field::<MaterialRecord>("dataSyncExecutionTime"));
    }
}
