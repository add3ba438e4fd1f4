//! BOM (bill of materials) master-data records.

use serde::{Deserialize, Serialize};

use crate::field::{ColumnSpec, FieldKind, FieldValue};
use crate::record::{FilterRule, MasterRecord};
use crate::types::{RecordId, Timestamp};

/// One BOM line: a parent part, one child part and its usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomRecord {
    pub id: RecordId,
    pub business_unit_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chery_part_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chery_part_name: Option<String>,
    pub bom_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bom_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_parent_part_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_parent_part_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_part_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_part_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_part_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_part_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_part_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_part_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_part_unit: Option<String>,
    pub bom_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bom_change_time: Option<Timestamp>,
    pub create_time: Timestamp,
    pub update_time: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub creator_login_account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updater_account: Option<String>,
}

pub const BOM_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("businessUnitCode", "事业部编号", FieldKind::Enum),
    ColumnSpec::new("businessUnit", "事业部", FieldKind::Enum),
    ColumnSpec::new("supplierCode", "供应商代码", FieldKind::Enum),
    ColumnSpec::new("supplierName", "供应商名称", FieldKind::Enum),
    ColumnSpec::new("cheryPartNumber", "奇瑞零件号", FieldKind::Text),
    ColumnSpec::new("cheryPartName", "奇瑞零件名称", FieldKind::Text),
    ColumnSpec::new("bomCode", "BOM编码", FieldKind::Text),
    ColumnSpec::new("bomName", "BOM名称", FieldKind::Text),
    ColumnSpec::new("supplierParentPartCode", "供应商父件编码", FieldKind::Text),
    ColumnSpec::new("supplierParentPartName", "供应商父件名称", FieldKind::Text),
    ColumnSpec::new("parentPartType", "父件类型", FieldKind::Enum),
    ColumnSpec::new("parentPartUnit", "父件单位", FieldKind::Enum),
    ColumnSpec::new("childPartCode", "子件编码", FieldKind::Text),
    ColumnSpec::new("childPartName", "子件名称", FieldKind::Text),
    ColumnSpec::new("childPartType", "子件类型", FieldKind::Enum),
    ColumnSpec::new("childPartQuantity", "子件用量", FieldKind::Number),
    ColumnSpec::new("childPartUnit", "子件单位", FieldKind::Enum),
    ColumnSpec::new("bomVersion", "BOM版本", FieldKind::Text),
    ColumnSpec::new("bomChangeTime", "BOM变更时间", FieldKind::Time),
    ColumnSpec::new("createTime", "创建时间", FieldKind::Time),
    ColumnSpec::new("updateTime", "更新时间", FieldKind::Time),
    ColumnSpec::new("categoryCode", "品类编码", FieldKind::Enum),
    ColumnSpec::new("categoryName", "品类名称", FieldKind::Enum),
    ColumnSpec::new("creatorLoginAccount", "创建人登录账号", FieldKind::Text),
    ColumnSpec::new("dataSource", "数据来源", FieldKind::Enum),
    ColumnSpec::new("updaterAccount", "更新人账号", FieldKind::Text),
];

const BOM_TEMPLATE_COLUMNS: &[&str] = &[
    "businessUnitCode",
    "businessUnit",
    "supplierCode",
    "supplierName",
    "cheryPartNumber",
    "cheryPartName",
    "bomCode",
    "bomName",
    "supplierParentPartCode",
    "supplierParentPartName",
    "parentPartType",
    "parentPartUnit",
    "childPartCode",
    "childPartName",
    "childPartType",
    "childPartQuantity",
    "childPartUnit",
    "bomVersion",
    "bomChangeTime",
    "categoryCode",
    "categoryName",
    "dataSource",
];

const BOM_FILTERS: &[FilterRule] = &[
    FilterRule::Contains {
        param: "businessUnit",
        fields: &["businessUnit", "businessUnitCode"],
    },
    FilterRule::Contains {
        param: "supplier",
        fields: &["supplierName", "supplierCode"],
    },
    FilterRule::Contains {
        param: "cheryPartNumber",
        fields: &["cheryPartNumber"],
    },
    FilterRule::Contains {
        param: "cheryPartName",
        fields: &["cheryPartName"],
    },
    FilterRule::Contains {
        param: "bomCode",
        fields: &["bomCode"],
    },
    FilterRule::Contains {
        param: "bomName",
        fields: &["bomName"],
    },
    FilterRule::Contains {
        param: "supplierParentPartCode",
        fields: &["supplierParentPartCode"],
    },
    FilterRule::Contains {
        param: "supplierParentPartName",
        fields: &["supplierParentPartName"],
    },
    FilterRule::Contains {
        param: "childPartCode",
        fields: &["childPartCode"],
    },
    FilterRule::Contains {
        param: "childPartName",
        fields: &["childPartName"],
    },
    FilterRule::Contains {
        param: "bomVersion",
        fields: &["bomVersion"],
    },
    FilterRule::Contains {
        param: "categoryName",
        fields: &["categoryName"],
    },
    FilterRule::From {
        param: "bomChangeTimeStart",
        field: "bomChangeTime",
    },
    FilterRule::Until {
        param: "bomChangeTimeEnd",
        field: "bomChangeTime",
    },
    FilterRule::From {
        param: "changeTimeStart",
        field: "updateTime",
    },
    FilterRule::Until {
        param: "changeTimeEnd",
        field: "updateTime",
    },
];

impl MasterRecord for BomRecord {
    const ENTITY: &'static str = "BOM";
    const COLUMNS: &'static [ColumnSpec] = BOM_COLUMNS;
    const TEMPLATE_COLUMNS: &'static [&'static str] = BOM_TEMPLATE_COLUMNS;
    const FILTERS: &'static [FilterRule] = BOM_FILTERS;
    const REQUIRED_FIELDS: &'static [&'static str] = &["businessUnitCode", "bomCode", "bomVersion"];
    const KEY_FIELDS: &'static [&'static str] = &["businessUnitCode", "bomCode"];
    const EXPORT_FILE_NAME: &'static str = "BOM主数据";
    const TEMPLATE_FILE_NAME: &'static str = "BOM主数据导入模板.csv";

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "id" => FieldValue::text(&self.id),
            "businessUnitCode" => FieldValue::text(&self.business_unit_code),
            "businessUnit" => FieldValue::opt_text(&self.business_unit),
            "supplierCode" => FieldValue::opt_text(&self.supplier_code),
            "supplierName" => FieldValue::opt_text(&self.supplier_name),
            "cheryPartNumber" => FieldValue::opt_text(&self.chery_part_number),
            "cheryPartName" => FieldValue::opt_text(&self.chery_part_name),
            "bomCode" => FieldValue::text(&self.bom_code),
            "bomName" => FieldValue::opt_text(&self.bom_name),
            "supplierParentPartCode" => FieldValue::opt_text(&self.supplier_parent_part_code),
            "supplierParentPartName" => FieldValue::opt_text(&self.supplier_parent_part_name),
            "parentPartType" => FieldValue::opt_text(&self.parent_part_type),
            "parentPartUnit" => FieldValue::opt_text(&self.parent_part_unit),
            "childPartCode" => FieldValue::opt_text(&self.child_part_code),
            "childPartName" => FieldValue::opt_text(&self.child_part_name),
            "childPartType" => FieldValue::opt_text(&self.child_part_type),
            "childPartQuantity" => FieldValue::opt_number(self.child_part_quantity),
            "childPartUnit" => FieldValue::opt_text(&self.child_part_unit),
            "bomVersion" => FieldValue::text(&self.bom_version),
            "bomChangeTime" => FieldValue::opt_time(self.bom_change_time),
            "createTime" => FieldValue::Time(self.create_time),
            "updateTime" => FieldValue::Time(self.update_time),
            "categoryCode" => FieldValue::opt_text(&self.category_code),
            "categoryName" => FieldValue::opt_text(&self.category_name),
            "creatorLoginAccount" => FieldValue::text(&self.creator_login_account),
            "dataSource" => FieldValue::opt_text(&self.data_source),
            "updaterAccount" => FieldValue::opt_text(&self.updater_account),
            _ => FieldValue::Absent,
        }
    }

    fn create_time(&self) -> Timestamp {
        self.create_time
    }

    fn update_time(&self) -> Timestamp {
        self.update_time
    }
}
