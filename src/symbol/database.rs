// Mon Oct 19 2026 - Alex

use crate::structure::{LayoutError, LayoutResult, TypeFact, TypeKind, TypeProvider};
use crate::symbol::builtin::{fundamental_size, is_pointer, normalize, split_array};
use crate::symbol::SymbolError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

const DEFAULT_POINTER_WIDTH: u64 = 8;

#[derive(Debug, Serialize, Deserialize)]
struct DatabaseFile {
    #[serde(default = "default_pointer_width")]
    pointer_width: u64,
    #[serde(default)]
    types: Vec<TypeFact>,
}

fn default_pointer_width() -> u64 {
    DEFAULT_POINTER_WIDTH
}

/// Type facts exported from debug info, read from a JSON document.
///
/// Fundamental types, pointers and arrays resolve without being declared.
/// Typedefs resolve to their canonical target.
#[derive(Debug, Clone)]
pub struct TypeDatabase {
    pointer_width: u64,
    types: IndexMap<String, Arc<TypeFact>>,
}

impl TypeDatabase {
    pub fn new(pointer_width: u64) -> Self {
        Self {
            pointer_width,
            types: IndexMap::new(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SymbolError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let db = Self::from_json(&contents)?;
        log::debug!("loaded {} types from {}", db.len(), path.display());
        Ok(db)
    }

    pub fn from_json(json: &str) -> Result<Self, SymbolError> {
        let file: DatabaseFile = serde_json::from_str(json)?;
        if !matches!(file.pointer_width, 2 | 4 | 8) {
            return Err(SymbolError::InvalidPointerWidth(file.pointer_width));
        }

        let mut db = Self::new(file.pointer_width);
        for fact in file.types {
            db.insert(fact)?;
        }
        Ok(db)
    }

    pub fn insert(&mut self, fact: TypeFact) -> Result<(), SymbolError> {
        if fact.kind == TypeKind::Typedef && fact.target.is_none() {
            return Err(SymbolError::MissingTarget(fact.name));
        }
        let name = normalize(&fact.name).to_string();
        if self.types.contains_key(&name) {
            return Err(SymbolError::DuplicateType(name));
        }
        let is_typedef = fact.target.is_some();
        self.types.insert(name.clone(), Arc::new(fact));

        // Any new cycle has to pass through the typedef just added.
        if is_typedef && self.typedef_cycle(&name) {
            self.types.shift_remove(&name);
            return Err(SymbolError::TypedefCycle(name));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Finds the declared type a user means by `query`.
    ///
    /// Exact names win; otherwise the unqualified name (after the last `::`)
    /// must match exactly one declared type.
    pub fn find_type(&self, query: &str) -> Result<String, SymbolError> {
        let query = normalize(query);
        if self.types.contains_key(query) {
            return Ok(query.to_string());
        }

        let candidates: Vec<String> = self
            .types
            .keys()
            .filter(|name| unqualified(name) == query)
            .cloned()
            .collect();

        match candidates.len() {
            0 if self.lookup(query).is_some() => Ok(query.to_string()),
            0 => Err(SymbolError::TypeNotFound(query.to_string())),
            1 => Ok(candidates.into_iter().next().unwrap_or_default()),
            _ => Err(SymbolError::AmbiguousType {
                name: query.to_string(),
                candidates,
            }),
        }
    }

    fn typedef_cycle(&self, name: &str) -> bool {
        let mut seen = vec![name];
        let mut current = self.types.get(name);
        while let Some(target) = current.and_then(|fact| fact.target.as_deref()) {
            let target = normalize(target);
            if seen.contains(&target) {
                return true;
            }
            seen.push(target);
            current = self.types.get(target);
        }
        false
    }

    fn lookup(&self, name: &str) -> Option<Arc<TypeFact>> {
        let name = normalize(name);

        if let Some(fact) = self.types.get(name) {
            return match fact.target.as_deref() {
                Some(target) => self.lookup(target),
                None => Some(Arc::clone(fact)),
            };
        }
        if is_pointer(name) {
            return Some(Arc::new(TypeFact::new(name, TypeKind::Pointer, self.pointer_width)));
        }
        if let Some((element, count)) = split_array(name) {
            let size = self.lookup(element)?.byte_size.checked_mul(count)?;
            return Some(Arc::new(TypeFact::new(name, TypeKind::Array, size)));
        }
        fundamental_size(name, self.pointer_width)
            .map(|size| Arc::new(TypeFact::new(name, TypeKind::Scalar, size)))
    }
}

impl TypeProvider for TypeDatabase {
    fn resolve(&self, type_name: &str) -> LayoutResult<Arc<TypeFact>> {
        self.lookup(type_name)
            .ok_or_else(|| LayoutError::UnresolvedType(type_name.to_string()))
    }

    fn pointer_width(&self) -> u64 {
        self.pointer_width
    }
}

fn unqualified(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}
