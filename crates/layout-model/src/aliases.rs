//! Recognized header spellings for the field attributes the core reads.
//!
//! Aliases are compared through [`normalize_header_key`](crate::keys::normalize_header_key),
//! so case, accents, spaces, `_` and `-` are irrelevant.

pub const NAME: &[&str] = &["NomeCampo", "Nome", "Campo", "FieldName", "Name"];
pub const ID: &[&str] = &["IdentificadorCampo", "Id", "FieldId"];
pub const ACTIVE: &[&str] = &["Entrada", "Active", "Ativo"];
pub const SIZE: &[&str] = &["TamanhoCampo", "Tamanho", "Size", "Length"];
pub const START: &[&str] = &[
    "PosicaoInicial",
    "PosInicial",
    "PosIni",
    "Start",
    "StartPosition",
];
pub const END: &[&str] = &["PosicaoFinal", "PosFinal", "PosFin", "End", "EndPosition"];
pub const TYPE: &[&str] = &["TipoCampo", "Tipo", "FieldType", "DataType"];
pub const ALIGNMENT: &[&str] = &["AlinhamentoCampo", "Alinhamento", "Alignment"];
pub const REQUIRED: &[&str] = &["CampoObrigatorio", "Obrigatorio", "Required"];
pub const DEFAULT_VALUE: &[&str] = &["ValorPadrao", "DefaultValue"];
pub const CURRENT_VALUE: &[&str] = &["ValorUsuario", "Valor", "Value", "CurrentValue"];
pub const DESCRIPTION: &[&str] = &["DescricaoCampo", "Descricao", "Description"];

// Routing flags consumed by the generators.
pub const FLAG_PERSISTENCE: &[&str] = &["Persistencia", "Persistence"];
pub const FLAG_ENRICHMENT: &[&str] = &["Enriquecimento", "Enrichment"];
pub const FLAG_ATTRIBUTE_MAP: &[&str] = &["MapaAtributo", "AttributeMap"];

/// Header names that are routing flags even without section metadata.
pub const KNOWN_ROUTING_FLAGS: &[&str] = &[
    "Entrada",
    "Persistencia",
    "Enriquecimento",
    "MapaAtributo",
    "Saida",
    "CampoConcatenado",
    "Active",
    "Persistence",
    "Enrichment",
    "AttributeMap",
    "Output",
    "Concatenated",
];

// Persistence and SQL columns.
pub const TABLE_NAME: &[&str] = &["NomeTabela", "TableName", "Tabela"];
pub const COLUMN_NAME: &[&str] = &["NomeColuna", "ColumnName", "Coluna"];
pub const ORACLE_TYPE: &[&str] = &["OracleDataType", "OracleType"];
pub const DATA_LENGTH: &[&str] = &["DataLength"];
pub const NUMBER_PRECISION: &[&str] = &["NumberPrecision", "Precision"];
pub const NUMBER_SCALE: &[&str] = &["NumberScale", "Scale"];
pub const NULLABLE: &[&str] = &["Nullable"];
pub const ENCRYPTED: &[&str] = &["Encrypted"];
pub const UNIQUE: &[&str] = &["Unique"];

// Attribute-map columns.
pub const RULE_ATTRIBUTE: &[&str] = &["RuleAttribute"];
pub const ORIGIN: &[&str] = &["Origin", "Origem"];
pub const EVENT_ATTRIBUTE: &[&str] = &["EventAttribute"];
pub const ATTRIBUTE_TYPE: &[&str] = &["Type"];
pub const MODEL_ATTRIBUTE: &[&str] = &["ModelAttribute"];
pub const SCORE_MODEL_IN: &[&str] = &["ScoreModelIn"];
pub const ATTRIBUTE_DEFAULT: &[&str] = &["DefaultValue"];
pub const ATTRIBUTE_DESCRIPTION: &[&str] = &["Description"];

// Enrichment columns.
pub const ENRICHMENT_ID: &[&str] = &[
    "IdEnriquecimento",
    "IdentificadorEnriquecimento",
    "EnrichmentId",
];
pub const ENRICHMENT_SOURCE: &[&str] = &["Fonte", "Origem", "Source"];
pub const QUERY: &[&str] = &["Consulta", "Query", "Sql"];
pub const CONDITION: &[&str] = &["Condicao", "Condition", "Filtro"];

// External identification metadata keys.
pub const META_IDENTIFIER: &[&str] = &["Identificador", "Identifier", "IdLayout"];
pub const META_EVENT: &[&str] = &["IdEvento", "Evento", "EventId", "Event"];
pub const META_TABLE_NAME: &[&str] = &["NomeTabela", "TableName", "Tabela"];

// Default-value definition rows.
pub const DEFAULT_DEF_NAME: &[&str] = &["Nome", "Name", "Atributo", "Attribute"];
pub const DEFAULT_DEF_VALUE: &[&str] = &["Valor", "Value", "ValorPadrao", "DefaultValue"];
pub const DEFAULT_DEF_TYPE: &[&str] = &["Tipo", "Type"];
pub const DEFAULT_DEF_DESCRIPTION: &[&str] = &["Descricao", "Description"];

// SQL passthrough column.
pub const SQL_LINE: &[&str] = &["Sql", "Comando", "Command"];
