//! Generation options.

use serde::{Deserialize, Serialize};

/// Default attribute-map namespace.
pub const ATTRIBUTE_MAP_NS: &str = "urn:layout-forge:attribute-map:1.0";

/// How the identification metadata's table name combines with each
/// field's own table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableNamePolicy {
    /// Fields without a table name take the metadata one.
    #[default]
    FillMissing,
    /// A non-empty metadata table name replaces every field's table name.
    OverrideAll,
}

impl TableNamePolicy {
    /// Resolves the table name for one field.
    pub fn resolve<'a>(self, own: &'a str, global: Option<&'a str>) -> &'a str {
        let own = own.trim();
        match (self, global) {
            (Self::FillMissing, Some(global)) if own.is_empty() => global,
            (Self::OverrideAll, Some(global)) => global,
            _ => own,
        }
    }
}

/// Table names and output knobs shared by all generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Primary layout table.
    pub layout_table: String,
    pub enrichment_keys_table: String,
    pub enrichment_returns_table: String,
    /// Table of literal SQL lines that replaces generated inserts.
    pub sql_table: String,
    pub default_values_table: String,
    /// Target table of the generated inserts.
    pub sql_metadata_table: String,
    pub table_name_policy: TableNamePolicy,
    pub attribute_map_namespace: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            layout_table: "Campos Entrada".to_string(),
            enrichment_keys_table: "Chaves Enriquecimento".to_string(),
            enrichment_returns_table: "Campos Retorno".to_string(),
            sql_table: "SQL".to_string(),
            default_values_table: "Valores Padrao".to_string(),
            sql_metadata_table: "LAYOUT_COLUMN_METADATA".to_string(),
            table_name_policy: TableNamePolicy::FillMissing,
            attribute_map_namespace: ATTRIBUTE_MAP_NS.to_string(),
        }
    }
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout_table(mut self, name: impl Into<String>) -> Self {
        self.layout_table = name.into();
        self
    }

    pub fn with_enrichment_tables(
        mut self,
        keys: impl Into<String>,
        returns: impl Into<String>,
    ) -> Self {
        self.enrichment_keys_table = keys.into();
        self.enrichment_returns_table = returns.into();
        self
    }

    pub fn with_sql_table(mut self, name: impl Into<String>) -> Self {
        self.sql_table = name.into();
        self
    }

    pub fn with_default_values_table(mut self, name: impl Into<String>) -> Self {
        self.default_values_table = name.into();
        self
    }

    pub fn with_sql_metadata_table(mut self, name: impl Into<String>) -> Self {
        self.sql_metadata_table = name.into();
        self
    }

    pub fn with_table_name_policy(mut self, policy: TableNamePolicy) -> Self {
        self.table_name_policy = policy;
        self
    }

    pub fn with_attribute_map_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.attribute_map_namespace = namespace.into();
        self
    }
}
