use serde::{Deserialize, Serialize};

/// Kind of an attribute definition (`BA_DEF_` line).
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum AttrType {
    #[default]
    Int,
    Float,
    String,
    Enum,
}

impl AttrType {
    /// DBC keyword for this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            AttrType::Int => "INT",
            AttrType::Float => "FLOAT",
            AttrType::String => "STRING",
            AttrType::Enum => "ENUM",
        }
    }
}

/// Kind of object an attribute applies to.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum AttrObject {
    /// The whole bus definition (no object keyword in the DBC text).
    #[default]
    Database,
    Node,
    Message,
    Signal,
}

impl AttrObject {
    /// DBC object keyword. Empty for [`AttrObject::Database`].
    pub fn keyword(&self) -> &'static str {
        match self {
            AttrObject::Database => "",
            AttrObject::Node => "BU_",
            AttrObject::Message => "BO_",
            AttrObject::Signal => "SG_",
        }
    }
}

/// Attribute definition: a named attribute and where it can apply.
///
/// The parser leaves these untouched (the `BA_DEF_` grammar is intentionally
/// inert); callers may populate them programmatically and the serializer
/// writes them back out.
#[derive(Default, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Attribute name.
    pub name: String,
    /// Attribute kind.
    pub kind: AttrType,
    /// Object kinds this attribute can be assigned to.
    pub applies_to: Vec<AttrObject>,
    /// Default value, stored as text; interpret based on `kind`.
    pub default_value: String,
    /// Enumeration entries, only meaningful when `kind == AttrType::Enum`.
    pub enum_values: Vec<String>,
}

/// Attribute assignment to a concrete object (`BA_` line).
#[derive(Default, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AttributeValue {
    /// Kind of the target object.
    pub object_type: AttrObject,
    /// Name or ID of the target object.
    pub object_name: String,
    /// Attribute name.
    pub attr_name: String,
    /// Assigned value, stored as text.
    pub value: String,
}
