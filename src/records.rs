// Record Types
//
// The canonical, serialized shape of one analysed type declaration.
// One JSON artifact per visited declaration mirrors `TypeRecord` exactly.

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

pub use crate::declarations::TypeKind;

/// Source position of a declaration (1-based lines and character columns,
/// end column exclusive)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AstPosition {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

/// A class or interface, with everything declared inside it
///
/// Member and nested-type maps keep declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    /// Simple name as written in source
    pub name: String,
    /// Canonical identity (fully-qualified name, or simple name as fallback)
    pub key: String,
    pub kind: TypeKind,
    pub position: AstPosition,
    pub anonymous: bool,
    pub modifiers: Vec<String>,
    /// Field records keyed by field key
    pub fields: IndexMap<String, FieldRecord>,
    /// Method records keyed by method key
    pub methods: IndexMap<String, MethodRecord>,
    #[serde(rename = "extends_")]
    pub extends: Vec<String>,
    #[serde(rename = "implements_")]
    pub implements: Vec<String>,
    /// Nested classes keyed by canonical name
    pub inner_classes: IndexMap<String, TypeRecord>,
    /// Nested interfaces keyed by canonical name
    pub inner_interfaces: IndexMap<String, TypeRecord>,
    /// Key of the lexically enclosing type, if any
    pub defined_in_type_key: Option<String>,
    /// Source file path relative to the configured source root
    pub source_file_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    pub name: String,
    /// Qualified type name
    #[serde(rename = "type")]
    pub type_name: String,
    pub has_type_variable: bool,
    pub position: AstPosition,
    pub owning_type_key: String,
    pub modifiers: Vec<String>,
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MethodRecord {
    pub name: String,
    /// Qualified return type name (`void` for procedures)
    pub return_type: String,
    pub position: AstPosition,
    pub owning_type_key: String,
    pub modifiers: Vec<String>,
    pub overrides_super_method: bool,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterRecord>,
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub has_type_variable: bool,
    pub position: AstPosition,
    pub modifiers: Vec<String>,
    pub key: String,
    pub owning_method_key: String,
}

impl TypeRecord {
    /// Empty record for a declaration; extractors fill in members.
    pub fn new(name: String, key: String, kind: TypeKind, source_file_path: String) -> Self {
        Self {
            name,
            key,
            kind,
            position: AstPosition::default(),
            anonymous: false,
            modifiers: Vec::new(),
            fields: IndexMap::new(),
            methods: IndexMap::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            inner_classes: IndexMap::new(),
            inner_interfaces: IndexMap::new(),
            defined_in_type_key: None,
            source_file_path,
        }
    }

    /// Nested-type map matching a kind
    pub fn inner_types_mut(&mut self, kind: TypeKind) -> &mut IndexMap<String, TypeRecord> {
        match kind {
            TypeKind::Class => &mut self.inner_classes,
            TypeKind::Interface => &mut self.inner_interfaces,
        }
    }

    /// Pretty JSON document for this record (two-space indentation)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
