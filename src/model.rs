// API model accumulated while scanning
//
// Every collection is ordered (BTreeSet/BTreeMap), so serializing the model
// yields sorted arrays and sorted object keys without a separate pass.
// Constructor lists are the one exception: they keep discovery order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Everything discovered in one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiModel {
    /// Functions registered from C++ via `set_function`
    pub globals: BTreeSet<String>,
    /// Top-level functions declared in Lua sources
    pub lua_globals: BTreeSet<String>,
    /// Module tables built from `function M.name(` declarations
    pub lua_modules: BTreeMap<String, ModuleDescriptor>,
    /// Usertypes keyed by exposed name
    pub usertypes: BTreeMap<String, UsertypeDescriptor>,
}

/// A usertype registered with `new_usertype`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsertypeDescriptor {
    pub fields: BTreeSet<String>,
    pub methods: BTreeSet<String>,
    /// Raw `sol::constructors<...>` argument text, in discovery order
    pub constructors: Vec<String>,
}

/// Functions belonging to one Lua module table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleDescriptor {
    pub functions: BTreeSet<String>,
}

/// Counts used for progress reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelStats {
    pub globals: usize,
    pub lua_globals: usize,
    pub modules: usize,
    pub usertypes: usize,
    pub fields: usize,
    pub methods: usize,
    pub constructors: usize,
}

impl ApiModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the descriptor for an exposed usertype name
    pub fn usertype_mut(&mut self, exposed: &str) -> &mut UsertypeDescriptor {
        self.usertypes.entry(exposed.to_string()).or_default()
    }

    /// Get or create the descriptor for a Lua module table
    pub fn module_mut(&mut self, module: &str) -> &mut ModuleDescriptor {
        self.lua_modules.entry(module.to_string()).or_default()
    }

    /// Fold another model into this one.
    ///
    /// Set-backed collections take the union. Constructor lists are appended
    /// in `other`'s order, skipping signatures already present, which keeps
    /// the operation associative.
    pub fn merge(&mut self, other: ApiModel) {
        self.globals.extend(other.globals);
        self.lua_globals.extend(other.lua_globals);

        for (name, module) in other.lua_modules {
            self.module_mut(&name).functions.extend(module.functions);
        }

        for (name, usertype) in other.usertypes {
            self.usertype_mut(&name).merge(usertype);
        }
    }

    /// Check if nothing was discovered
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty()
            && self.lua_globals.is_empty()
            && self.lua_modules.is_empty()
            && self.usertypes.is_empty()
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            globals: self.globals.len(),
            lua_globals: self.lua_globals.len(),
            modules: self.lua_modules.len(),
            usertypes: self.usertypes.len(),
            fields: self.usertypes.values().map(|u| u.fields.len()).sum(),
            methods: self.usertypes.values().map(|u| u.methods.len()).sum(),
            constructors: self.usertypes.values().map(|u| u.constructors.len()).sum(),
        }
    }
}

impl UsertypeDescriptor {
    /// Append a constructor signature unless it is already recorded
    pub fn add_constructor(&mut self, signature: &str) {
        if !self.constructors.iter().any(|c| c == signature) {
            self.constructors.push(signature.to_string());
        }
    }

    pub fn merge(&mut self, other: UsertypeDescriptor) {
        self.fields.extend(other.fields);
        self.methods.extend(other.methods);
        for ctor in &other.constructors {
            self.add_constructor(ctor);
        }
    }
}
