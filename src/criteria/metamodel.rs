use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Basic,
    Embedded,
    ToOne,
    ToMany,
    ElementCollection,
}

impl AttributeKind {
    /// Associations and collections are reached through a join; everything else is a path.
    pub fn is_association(&self) -> bool {
        matches!(self, AttributeKind::ToOne | AttributeKind::ToMany | AttributeKind::ElementCollection)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
    /// Managed type the attribute points to, or the value type of a basic attribute.
    pub type_name: String,
}

impl Attribute {
    pub fn new(name: &str, kind: AttributeKind, type_name: &str) -> Self {
        Self { name: name.to_string(), kind, type_name: type_name.to_string() }
    }

    pub fn basic(name: &str, type_name: &str) -> Self {
        Self::new(name, AttributeKind::Basic, type_name)
    }

    pub fn embedded(name: &str, type_name: &str) -> Self {
        Self::new(name, AttributeKind::Embedded, type_name)
    }

    pub fn to_one(name: &str, type_name: &str) -> Self {
        Self::new(name, AttributeKind::ToOne, type_name)
    }

    pub fn to_many(name: &str, type_name: &str) -> Self {
        Self::new(name, AttributeKind::ToMany, type_name)
    }

    pub fn element_collection(name: &str, type_name: &str) -> Self {
        Self::new(name, AttributeKind::ElementCollection, type_name)
    }

    pub fn is_textual(&self) -> bool {
        self.kind == AttributeKind::Basic && matches!(self.type_name.to_ascii_lowercase().as_str(), "string" | "text" | "str")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedType {
    pub name: String,
    attributes: IndexMap<String, Attribute>,
}

impl ManagedType {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), attributes: IndexMap::new() }
    }

    pub fn with(mut self, attribute: Attribute) -> Self {
        self.attributes.insert(attribute.name.clone(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }
}

/// Entity and embeddable types known to the caller, keyed by type name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metamodel {
    types: IndexMap<String, ManagedType>,
}

impl Metamodel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, managed_type: ManagedType) -> Self {
        self.types.insert(managed_type.name.clone(), managed_type);
        self
    }

    pub fn managed_type(&self, name: &str) -> Option<&ManagedType> {
        self.types.get(name)
    }
}
