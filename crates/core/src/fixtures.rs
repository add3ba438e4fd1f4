//! Synthetic record generation for the mock backend.
//!
//! Generators take an explicit RNG and a fixed `now`, so a seed reproduces
//! the same data set. The `sample_*` builders return fully populated,
//! deterministic records for tests.

use chrono::{DateTime, Duration};
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bom::BomRecord;
use crate::material::MaterialRecord;
use crate::types::Timestamp;

const BUSINESS_UNITS: &[(&str, &str)] = &[
    ("BU001", "乘用车事业部"),
    ("BU002", "商用车事业部"),
    ("BU003", "新能源事业部"),
    ("BU004", "零部件事业部"),
];

const SUPPLIERS: &[(&str, &str)] = &[
    ("SUP001", "奇瑞汽车零部件有限公司"),
    ("SUP002", "安徽奇瑞科技有限公司"),
    ("SUP003", "芜湖奇瑞汽车技术有限公司"),
    ("SUP004", "奇瑞新能源技术有限公司"),
    ("SUP005", "奇瑞商用车有限公司"),
];

const CATEGORIES: &[(&str, &str)] = &[
    ("CAT001", "发动机系统"),
    ("CAT002", "底盘系统"),
    ("CAT003", "车身系统"),
    ("CAT004", "电气系统"),
    ("CAT005", "内饰系统"),
];

const FACTORIES: &[(&str, &str)] = &[
    ("FAC001", "芜湖工厂"),
    ("FAC002", "大连工厂"),
    ("FAC003", "鄂尔多斯工厂"),
    ("FAC004", "开封工厂"),
];

const PART_TYPES: &[&str] = &["标准件", "定制件", "外购件", "自制件"];
const UNITS: &[&str] = &["个", "件", "套", "台", "kg", "m"];
const DATA_SOURCES: &[&str] = &["ERP系统", "PLM系统", "手工录入", "批量导入"];
const ACCOUNTS: &[&str] = &["admin", "vben", "jack"];
const VEHICLE_MODELS: &[&str] = &[
    "瑞虎8", "艾瑞泽5", "瑞虎5x", "瑞虎7", "艾瑞泽GX", "瑞虎3x", "星途TX", "捷途X70",
];
const PROJECT_NAMES: &[&str] = &["T1X项目", "M1X项目", "A3X项目", "T2X项目", "M2X项目", "A4X项目"];
const CHIP_PROCUREMENT_TYPES: &[&str] = &["直接采购", "间接采购", "代工采购"];

const PRODUCT_NAMES: &[&str] = &[
    "Ergonomic Steel Bracket",
    "Refined Rubber Gasket",
    "Sleek Aluminum Housing",
    "Rustic Copper Connector",
    "Handmade Plastic Clip",
    "Intelligent Granite Mount",
    "Practical Cotton Seal",
    "Modern Bronze Bearing",
    "Generic Wooden Panel",
    "Tasty Concrete Bolt",
];

/// Seeded RNG used for reproducible fixture sets.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generate `count` BOM records with sequential codes `BOM000001..`.
pub fn generate_boms<G: Rng + ?Sized>(count: usize, now: Timestamp, rng: &mut G) -> Vec<BomRecord> {
    (0..count)
        .map(|i| {
            let (bu_code, bu_name) = pick(rng, BUSINESS_UNITS);
            let (sup_code, sup_name) = pick(rng, SUPPLIERS);
            let (cat_code, cat_name) = pick(rng, CATEGORIES);
            let (create_time, update_time) = audit_times(rng, now);
            let bom_change_time = rng
                .random_bool(0.7)
                .then(|| between(rng, create_time, now));

            BomRecord {
                id: random_uuid(rng),
                business_unit_code: bu_code.to_string(),
                business_unit: Some(bu_name.to_string()),
                supplier_code: Some(sup_code.to_string()),
                supplier_name: Some(sup_name.to_string()),
                chery_part_number: Some(format!("CHERY-{}", alnum(rng, 8))),
                chery_part_name: Some(format!("{}零件", pick(rng, PRODUCT_NAMES))),
                bom_code: format!("BOM{:06}", i + 1),
                bom_name: Some(format!("{}BOM", pick(rng, PRODUCT_NAMES))),
                supplier_parent_part_code: Some(format!("SUP-{}", alnum(rng, 8))),
                supplier_parent_part_name: Some(format!("{}父件", pick(rng, PRODUCT_NAMES))),
                parent_part_type: Some(pick(rng, PART_TYPES).to_string()),
                parent_part_unit: Some(pick(rng, UNITS).to_string()),
                child_part_code: Some(format!("CHILD-{}", alnum(rng, 8))),
                child_part_name: Some(format!("{}子件", pick(rng, PRODUCT_NAMES))),
                child_part_type: Some(pick(rng, PART_TYPES).to_string()),
                child_part_quantity: Some(f64::from(rng.random_range(10..=10_000u32)) / 100.0),
                child_part_unit: Some(pick(rng, UNITS).to_string()),
                bom_version: version(rng, "v"),
                bom_change_time,
                create_time,
                update_time,
                category_code: Some(cat_code.to_string()),
                category_name: Some(cat_name.to_string()),
                creator_login_account: pick(rng, ACCOUNTS).to_string(),
                data_source: Some(pick(rng, DATA_SOURCES).to_string()),
                updater_account: rng
                    .random_bool(0.5)
                    .then(|| pick(rng, ACCOUNTS).to_string()),
            }
        })
        .collect()
}

/// Generate `count` material records.
pub fn generate_materials<G: Rng + ?Sized>(
    count: usize,
    now: Timestamp,
    rng: &mut G,
) -> Vec<MaterialRecord> {
    (0..count)
        .map(|_| {
            let (bu_code, bu_name) = pick(rng, BUSINESS_UNITS);
            let (sup_code, sup_name) = pick(rng, SUPPLIERS);
            let (fac_code, fac_name) = pick(rng, FACTORIES);
            let (create_time, update_time) = audit_times(rng, now);
            let data_sync_execution_time = rng
                .random_bool(0.7)
                .then(|| between(rng, create_time, now));

            MaterialRecord {
                id: random_uuid(rng),
                chery_part_number: format!("CHERY-{}", alnum(rng, 8)),
                chery_part_name: Some(format!("{}零件", pick(rng, PRODUCT_NAMES))),
                business_unit_code: Some(bu_code.to_string()),
                business_unit: Some(bu_name.to_string()),
                supplier_code: Some(sup_code.to_string()),
                supplier_name: Some(sup_name.to_string()),
                supplier_assembly_part_number: Some(format!("SUP-{}", alnum(rng, 8))),
                supplier_assembly_part_name: Some(format!("{}总成零件", pick(rng, PRODUCT_NAMES))),
                chery_hardware_version_number: Some(version(rng, "HW")),
                chery_software_version_number: Some(version(rng, "SW")),
                vehicle_model: Some(pick(rng, VEHICLE_MODELS).to_string()),
                project_name: Some(pick(rng, PROJECT_NAMES).to_string()),
                is_sop: Some(rng.random_bool(0.6)),
                data_sync_execution_time,
                factory_code: Some(fac_code.to_string()),
                factory_name: Some(fac_name.to_string()),
                supplier_part_version_number: Some(version(rng, "V")),
                chip_procurement_type: Some(pick(rng, CHIP_PROCUREMENT_TYPES).to_string()),
                chip_mpn_identifier_code: Some(format!("MPN-{}", alnum(rng, 10))),
                chip_mpn_identifier_name: Some(format!("{}芯片", pick(rng, PRODUCT_NAMES))),
                data_source: Some(pick(rng, DATA_SOURCES).to_string()),
                material_validity_period_days: Some(rng.random_range(30..=3650)),
                material_type: Some(pick(rng, PART_TYPES).to_string()),
                creator_login_account: pick(rng, ACCOUNTS).to_string(),
                create_time,
                updater_account: rng
                    .random_bool(0.5)
                    .then(|| pick(rng, ACCOUNTS).to_string()),
                update_time,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Deterministic samples
// ---------------------------------------------------------------------------

fn sample_time(secs: i64) -> Timestamp {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// A complete BOM record in business unit `BU001`.
pub fn sample_bom(bom_code: &str) -> BomRecord {
    let create_time = sample_time(1_704_067_200); // 2024-01-01T00:00:00Z
    BomRecord {
        id: format!("bom-{bom_code}"),
        business_unit_code: "BU001".to_string(),
        business_unit: Some("乘用车事业部".to_string()),
        supplier_code: Some("SUP001".to_string()),
        supplier_name: Some("奇瑞汽车零部件有限公司".to_string()),
        chery_part_number: Some("CHERY-SAMPLE01".to_string()),
        chery_part_name: Some("Sample零件".to_string()),
        bom_code: bom_code.to_string(),
        bom_name: Some("SampleBOM".to_string()),
        supplier_parent_part_code: Some("SUP-PARENT01".to_string()),
        supplier_parent_part_name: Some("Sample父件".to_string()),
        parent_part_type: Some("标准件".to_string()),
        parent_part_unit: Some("套".to_string()),
        child_part_code: Some("CHILD-SAMPLE01".to_string()),
        child_part_name: Some("Sample子件".to_string()),
        child_part_type: Some("外购件".to_string()),
        child_part_quantity: Some(4.0),
        child_part_unit: Some("个".to_string()),
        bom_version: "v1.0".to_string(),
        bom_change_time: Some(create_time + Duration::hours(12)),
        create_time,
        update_time: create_time + Duration::days(1),
        category_code: Some("CAT001".to_string()),
        category_name: Some("发动机系统".to_string()),
        creator_login_account: "admin".to_string(),
        data_source: Some("ERP系统".to_string()),
        updater_account: Some("vben".to_string()),
    }
}

/// A complete material record with `isSOP = true`.
pub fn sample_material(chery_part_number: &str) -> MaterialRecord {
    let create_time = sample_time(1_704_067_200);
    MaterialRecord {
        id: format!("mat-{chery_part_number}"),
        chery_part_number: chery_part_number.to_string(),
        chery_part_name: Some("Sample零件".to_string()),
        business_unit_code: Some("BU001".to_string()),
        business_unit: Some("乘用车事业部".to_string()),
        supplier_code: Some("SUP001".to_string()),
        supplier_name: Some("奇瑞汽车零部件有限公司".to_string()),
        supplier_assembly_part_number: Some("SUP-ASSY0001".to_string()),
        supplier_assembly_part_name: Some("Sample总成零件".to_string()),
        chery_hardware_version_number: Some("HW1.0".to_string()),
        chery_software_version_number: Some("SW1.0".to_string()),
        vehicle_model: Some("瑞虎8".to_string()),
        project_name: Some("T1X项目".to_string()),
        is_sop: Some(true),
        data_sync_execution_time: Some(create_time + Duration::hours(6)),
        factory_code: Some("FAC001".to_string()),
        factory_name: Some("芜湖工厂".to_string()),
        supplier_part_version_number: Some("V1.0".to_string()),
        chip_procurement_type: Some("直接采购".to_string()),
        chip_mpn_identifier_code: Some("MPN-SAMPLE0001".to_string()),
        chip_mpn_identifier_name: Some("Sample芯片".to_string()),
        data_source: Some("PLM系统".to_string()),
        material_validity_period_days: Some(365),
        material_type: Some("标准件".to_string()),
        creator_login_account: "admin".to_string(),
        create_time,
        updater_account: Some("jack".to_string()),
        update_time: create_time + Duration::days(1),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn pick<T: Copy, G: Rng + ?Sized>(rng: &mut G, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

fn alnum<G: Rng + ?Sized>(rng: &mut G, len: usize) -> String {
    (0..len)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect::<String>()
        .to_uppercase()
}

fn version<G: Rng + ?Sized>(rng: &mut G, prefix: &str) -> String {
    let major: u32 = rng.random_range(1..=5);
    let minor: u32 = rng.random_range(0..=9);
    format!("{prefix}{major}.{minor}")
}

fn random_uuid<G: Rng + ?Sized>(rng: &mut G) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
}

/// Uniform instant in `[from, to]` at millisecond resolution.
fn between<G: Rng + ?Sized>(rng: &mut G, from: Timestamp, to: Timestamp) -> Timestamp {
    let (lo, hi) = (from.timestamp_millis(), to.timestamp_millis());
    if lo >= hi {
        return from;
    }
    DateTime::from_timestamp_millis(rng.random_range(lo..=hi)).unwrap_or(from)
}

/// A create time within the last year and an update time after it.
fn audit_times<G: Rng + ?Sized>(rng: &mut G, now: Timestamp) -> (Timestamp, Timestamp) {
    let now = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
    let create_time = between(rng, now - Duration::days(365), now);
    let update_time = between(rng, create_time, now);
    (create_time, update_time)
}
