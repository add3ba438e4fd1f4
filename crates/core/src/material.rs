//! Material (part) master-data records.

use serde::{Deserialize, Serialize};

use crate::field::{ColumnSpec, FieldKind, FieldValue};
use crate::record::{FilterRule, MasterRecord};
use crate::types::{RecordId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    pub id: RecordId,
    pub chery_part_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chery_part_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_unit_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_assembly_part_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_assembly_part_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chery_hardware_version_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chery_software_version_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(rename = "isSOP", default, skip_serializing_if = "Option::is_none")]
    pub is_sop: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_sync_execution_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_part_version_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chip_procurement_type: Option<String>,
    #[serde(
        rename = "chipMPNIdentifierCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub chip_mpn_identifier_code: Option<String>,
    #[serde(
        rename = "chipMPNIdentifierName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub chip_mpn_identifier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_validity_period_days: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<String>,
    pub creator_login_account: String,
    pub create_time: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updater_account: Option<String>,
    pub update_time: Timestamp,
}

pub const MATERIAL_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("cheryPartNumber", "奇瑞零件号", FieldKind::Text),
    ColumnSpec::new("cheryPartName", "奇瑞零件名称", FieldKind::Text),
    ColumnSpec::new("businessUnitCode", "事业部编号", FieldKind::Enum),
    ColumnSpec::new("businessUnit", "事业部", FieldKind::Enum),
    ColumnSpec::new("supplierCode", "供应商代码", FieldKind::Enum),
    ColumnSpec::new("supplierName", "供应商名称", FieldKind::Enum),
    ColumnSpec::new("supplierAssemblyPartNumber", "供应商总成零件号", FieldKind::Text),
    ColumnSpec::new("supplierAssemblyPartName", "供应商总成零件名称", FieldKind::Text),
    ColumnSpec::new("cheryHardwareVersionNumber", "奇瑞硬件版本号", FieldKind::Text),
    ColumnSpec::new("cherySoftwareVersionNumber", "奇瑞软件版本号", FieldKind::Text),
    ColumnSpec::new("vehicleModel", "车型", FieldKind::Enum),
    ColumnSpec::new("projectName", "项目名称", FieldKind::Enum),
    ColumnSpec::new("isSOP", "是否SOP", FieldKind::Bool),
    ColumnSpec::new("dataSyncExecutionTime", "数据同步执行时间", FieldKind::Time),
    ColumnSpec::new("factoryCode", "工厂代码", FieldKind::Enum),
    ColumnSpec::new("factoryName", "工厂名称", FieldKind::Enum),
    ColumnSpec::new("supplierPartVersionNumber", "供应商零件版本号", FieldKind::Text),
    ColumnSpec::new("chipProcurementType", "芯片采购类型", FieldKind::Enum),
    ColumnSpec::new("chipMPNIdentifierCode", "芯片MPN标识码", FieldKind::Text),
    ColumnSpec::new("chipMPNIdentifierName", "芯片MPN标识名称", FieldKind::Text),
    ColumnSpec::new("dataSource", "数据来源", FieldKind::Enum),
    ColumnSpec::new("materialValidityPeriodDays", "物料有效期（天）", FieldKind::Number),
    ColumnSpec::new("type", "类型", FieldKind::Enum),
    ColumnSpec::new("creatorLoginAccount", "创建人登录账号", FieldKind::Text),
    ColumnSpec::new("createTime", "创建时间", FieldKind::Time),
    ColumnSpec::new("updaterAccount", "更新人账号", FieldKind::Text),
    ColumnSpec::new("updateTime", "更新时间", FieldKind::Time),
];

const MATERIAL_TEMPLATE_COLUMNS: &[&str] = &[
    "cheryPartNumber",
    "cheryPartName",
    "businessUnitCode",
    "businessUnit",
    "supplierCode",
    "supplierName",
    "supplierAssemblyPartNumber",
    "supplierAssemblyPartName",
    "cheryHardwareVersionNumber",
    "cherySoftwareVersionNumber",
    "vehicleModel",
    "projectName",
    "isSOP",
    "dataSyncExecutionTime",
    "factoryCode",
    "factoryName",
    "supplierPartVersionNumber",
    "chipProcurementType",
    "chipMPNIdentifierCode",
    "chipMPNIdentifierName",
    "dataSource",
    "materialValidityPeriodDays",
    "type",
];

const MATERIAL_FILTERS: &[FilterRule] = &[
    FilterRule::Contains {
        param: "businessUnit",
        fields: &["businessUnit", "businessUnitCode"],
    },
    FilterRule::Contains {
        param: "supplier",
        fields: &["supplierName", "supplierCode"],
    },
    FilterRule::Contains {
        param: "supplierName",
        fields: &["supplierName"],
    },
    FilterRule::Contains {
        param: "cheryPartName",
        fields: &["cheryPartName"],
    },
    FilterRule::Contains {
        param: "supplierAssemblyPartName",
        fields: &["supplierAssemblyPartName"],
    },
    FilterRule::Contains {
        param: "projectName",
        fields: &["projectName"],
    },
    FilterRule::Contains {
        param: "factoryName",
        fields: &["factoryName", "factoryCode"],
    },
    FilterRule::Contains {
        param: "chipMPNIdentifierName",
        fields: &["chipMPNIdentifierName"],
    },
];

impl MasterRecord for MaterialRecord {
    const ENTITY: &'static str = "Material";
    const COLUMNS: &'static [ColumnSpec] = MATERIAL_COLUMNS;
    const TEMPLATE_COLUMNS: &'static [&'static str] = MATERIAL_TEMPLATE_COLUMNS;
    const FILTERS: &'static [FilterRule] = MATERIAL_FILTERS;
    const REQUIRED_FIELDS: &'static [&'static str] = &["cheryPartNumber"];
    const KEY_FIELDS: &'static [&'static str] = &["cheryPartNumber"];
    const EXPORT_FILE_NAME: &'static str = "物料主数据";
    const TEMPLATE_FILE_NAME: &'static str = "物料主数据导入模板.csv";

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "id" => FieldValue::text(&self.id),
            "cheryPartNumber" => FieldValue::text(&self.chery_part_number),
            "cheryPartName" => FieldValue::opt_text(&self.chery_part_name),
            "businessUnitCode" => FieldValue::opt_text(&self.business_unit_code),
            "businessUnit" => FieldValue::opt_text(&self.business_unit),
            "supplierCode" => FieldValue::opt_text(&self.supplier_code),
            "supplierName" => FieldValue::opt_text(&self.supplier_name),
            "supplierAssemblyPartNumber" => {
                FieldValue::opt_text(&self.supplier_assembly_part_number)
            }
            "supplierAssemblyPartName" => FieldValue::opt_text(&self.supplier_assembly_part_name),
            "cheryHardwareVersionNumber" => {
                FieldValue::opt_text(&self.chery_hardware_version_number)
            }
            "cherySoftwareVersionNumber" => {
                FieldValue::opt_text(&self.chery_software_version_number)
            }
            "vehicleModel" => FieldValue::opt_text(&self.vehicle_model),
            "projectName" => FieldValue::opt_text(&self.project_name),
            "isSOP" => FieldValue::opt_bool(self.is_sop),
            "dataSyncExecutionTime" => FieldValue::opt_time(self.data_sync_execution_time),
            "factoryCode" => FieldValue::opt_text(&self.factory_code),
            "factoryName" => FieldValue::opt_text(&self.factory_name),
            "supplierPartVersionNumber" => {
                FieldValue::opt_text(&self.supplier_part_version_number)
            }
            "chipProcurementType" => FieldValue::opt_text(&self.chip_procurement_type),
            "chipMPNIdentifierCode" => FieldValue::opt_text(&self.chip_mpn_identifier_code),
            "chipMPNIdentifierName" => FieldValue::opt_text(&self.chip_mpn_identifier_name),
            "dataSource" => FieldValue::opt_text(&self.data_source),
            "materialValidityPeriodDays" => {
                FieldValue::opt_number(self.material_validity_period_days.map(|d| d as f64))
            }
            "type" => FieldValue::opt_text(&self.material_type),
            "creatorLoginAccount" => FieldValue::text(&self.creator_login_account),
            "createTime" => FieldValue::Time(self.create_time),
            "updaterAccount" => FieldValue::opt_text(&self.updater_account),
            "updateTime" => FieldValue::Time(self.update_time),
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
